#![allow(dead_code)]

use chrono::NaiveDate;
use valuescreen::domain::error::ValuescreenError;
use valuescreen::domain::frame::{Frame, Mask};
use valuescreen::ports::data_port::MarketDataPort;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn day_axis(n: usize) -> Vec<NaiveDate> {
    let start = date(2024, 1, 1);
    (0..n as i64).map(|i| start + chrono::Duration::days(i)).collect()
}

/// Frame from per-asset columns on a synthetic daily axis.
pub fn frame(columns: Vec<Vec<Option<f64>>>) -> Frame {
    let n = columns[0].len();
    let assets = (0..columns.len()).map(|i| format!("A{i}")).collect();
    Frame::new(day_axis(n), assets, columns).unwrap()
}

/// Mask from per-asset columns on the same synthetic axis.
pub fn mask(columns: Vec<Vec<bool>>) -> Mask {
    let n = columns[0].len();
    let assets = (0..columns.len()).map(|i| format!("A{i}")).collect();
    Mask::new(day_axis(n), assets, columns).unwrap()
}

pub fn present(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().map(|v| Some(*v)).collect()
}

/// In-memory data port holding one price and one valuation frame.
pub struct MockMarketDataPort {
    pub price: Frame,
    pub valuation: Frame,
}

impl MockMarketDataPort {
    pub fn new(price: Frame, valuation: Frame) -> Self {
        Self { price, valuation }
    }
}

impl MarketDataPort for MockMarketDataPort {
    fn fetch_prices(
        &self,
        _start_date: Option<NaiveDate>,
        _end_date: Option<NaiveDate>,
    ) -> Result<Frame, ValuescreenError> {
        Ok(self.price.clone())
    }

    fn fetch_valuations(
        &self,
        _start_date: Option<NaiveDate>,
        _end_date: Option<NaiveDate>,
    ) -> Result<Frame, ValuescreenError> {
        Ok(self.valuation.clone())
    }
}
