//! Windowed per-asset indicators.
//!
//! Each indicator is a pure column transform lifted over the asset axis by
//! [`Frame::map_columns`]; columns are independent, so the lift runs in
//! parallel across assets. Warm-up cells (before a trailing window has
//! filled) and windows touching a data gap are missing, never zero.

pub mod pct_change;
pub mod rsi;
pub mod sma;

pub use pct_change::pct_change;
pub use rsi::rsi;
pub use sma::moving_average;

#[cfg(test)]
use crate::domain::frame::Frame;

/// Trailing simple mean over `window` cells. Missing until the window has
/// filled, and missing for any window containing a missing cell.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }

    let mut sum = 0.0;
    let mut missing = 0usize;
    for i in 0..values.len() {
        match values[i] {
            Some(v) => sum += v,
            None => missing += 1,
        }
        if i >= window {
            match values[i - window] {
                Some(v) => sum -= v,
                None => missing -= 1,
            }
        }
        if i + 1 >= window && missing == 0 {
            out[i] = Some(sum / window as f64);
        }
    }
    out
}

#[cfg(test)]
pub(crate) fn single_asset_frame(values: Vec<Option<f64>>) -> Frame {
    use chrono::NaiveDate;

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let dates = (0..values.len() as i64)
        .map(|i| start + chrono::Duration::days(i))
        .collect();
    Frame::new(dates, vec!["TEST".into()], vec![values]).unwrap()
}
