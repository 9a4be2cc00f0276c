//! Wide-CSV data adapter.
//!
//! Layout: a `date` column (YYYY-MM-DD) followed by one column per asset
//! code. An empty cell is a missing observation. The same layout is used for
//! exporting the holding matrix, with `true`/`false` cells.

use crate::domain::error::ValuescreenError;
use crate::domain::frame::{Frame, Mask};
use crate::ports::data_port::MarketDataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvAdapter {
    price_path: PathBuf,
    valuation_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(price_path: PathBuf, valuation_path: PathBuf) -> Self {
        Self {
            price_path,
            valuation_path,
        }
    }
}

impl MarketDataPort for CsvAdapter {
    fn fetch_prices(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Frame, ValuescreenError> {
        read_frame(&self.price_path, start_date, end_date)
    }

    fn fetch_valuations(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Frame, ValuescreenError> {
        read_frame(&self.valuation_path, start_date, end_date)
    }
}

/// Parse a wide CSV into a frame, keeping rows inside the date window.
pub fn read_frame(
    path: &Path,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<Frame, ValuescreenError> {
    let content = fs::read_to_string(path).map_err(|e| ValuescreenError::Data {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;

    let mut rdr = csv::Reader::from_reader(content.as_bytes());

    let headers = rdr.headers().map_err(|e| ValuescreenError::Data {
        reason: format!("CSV header error in {}: {}", path.display(), e),
    })?;
    let assets: Vec<String> = headers.iter().skip(1).map(|h| h.trim().to_string()).collect();
    if assets.is_empty() {
        return Err(ValuescreenError::NoData {
            source_name: path.display().to_string(),
        });
    }

    let mut rows: Vec<(NaiveDate, Vec<Option<f64>>)> = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| ValuescreenError::Data {
            reason: format!("CSV parse error in {}: {}", path.display(), e),
        })?;

        let date_str = record.get(0).ok_or_else(|| ValuescreenError::Data {
            reason: format!("missing date column in {}", path.display()),
        })?;
        let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
            ValuescreenError::Data {
                reason: format!("invalid date '{}' in {}: {}", date_str, path.display(), e),
            }
        })?;

        if start_date.is_some_and(|s| date < s) || end_date.is_some_and(|e| date > e) {
            continue;
        }

        let mut cells = Vec::with_capacity(assets.len());
        for (i, code) in assets.iter().enumerate() {
            let raw = record.get(i + 1).unwrap_or("").trim();
            if raw.is_empty() {
                cells.push(None);
                continue;
            }
            let value: f64 = raw.parse().map_err(|e| ValuescreenError::Data {
                reason: format!(
                    "invalid value '{}' for {} on {} in {}: {}",
                    raw,
                    code,
                    date,
                    path.display(),
                    e
                ),
            })?;
            // non-finite observations carry no information
            cells.push(value.is_finite().then_some(value));
        }
        rows.push((date, cells));
    }

    rows.sort_by_key(|(date, _)| *date);
    for pair in rows.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(ValuescreenError::Data {
                reason: format!("duplicate date {} in {}", pair[0].0, path.display()),
            });
        }
    }

    let dates: Vec<NaiveDate> = rows.iter().map(|(d, _)| *d).collect();
    let mut columns = vec![Vec::with_capacity(dates.len()); assets.len()];
    for (_, cells) in rows {
        for (a, cell) in cells.into_iter().enumerate() {
            columns[a].push(cell);
        }
    }

    Frame::new(dates, assets, columns)
}

/// Export a holding matrix in the same wide layout.
pub fn write_mask(path: &Path, mask: &Mask) -> Result<(), ValuescreenError> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| ValuescreenError::Data {
        reason: format!("failed to open {} for writing: {}", path.display(), e),
    })?;

    let mut header = vec!["date".to_string()];
    header.extend(mask.assets.iter().cloned());
    wtr.write_record(&header).map_err(|e| ValuescreenError::Data {
        reason: format!("CSV write error: {e}"),
    })?;

    for (t, date) in mask.dates.iter().enumerate() {
        let mut row = vec![date.format("%Y-%m-%d").to_string()];
        for a in 0..mask.n_assets() {
            row.push(mask.get(t, a).to_string());
        }
        wtr.write_record(&row).map_err(|e| ValuescreenError::Data {
            reason: format!("CSV write error: {e}"),
        })?;
    }

    wtr.flush().map_err(|e| ValuescreenError::Data {
        reason: format!("CSV flush error: {e}"),
    })
}
