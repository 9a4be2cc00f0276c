//! Date × asset tables.
//!
//! Two table types flow through the pipeline:
//! - [`Frame`]: numeric observations with explicit missing cells. "No data"
//!   is `None`, never zero, so it stays distinguishable from a real value.
//! - [`Mask`]: boolean cells with *no* missing values. Layers that produce a
//!   `Mask` collapse missing inputs to `false` at that point.
//!
//! Both are column-major: one contiguous column per asset, ordered by the
//! shared date axis, so per-asset scans touch contiguous memory.

use crate::domain::error::ValuescreenError;
use chrono::NaiveDate;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};

/// Numeric date × asset table with explicit missing cells.
#[derive(Debug, Clone)]
pub struct Frame {
    pub dates: Vec<NaiveDate>,
    pub assets: Vec<String>,
    /// One column per asset; `columns[a].len() == dates.len()`.
    pub columns: Vec<Vec<Option<f64>>>,
    pub date_index: HashMap<NaiveDate, usize>,
}

impl Frame {
    pub fn new(
        dates: Vec<NaiveDate>,
        assets: Vec<String>,
        columns: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, ValuescreenError> {
        if columns.len() != assets.len() {
            return Err(ValuescreenError::FrameShape {
                reason: format!(
                    "{} columns for {} assets",
                    columns.len(),
                    assets.len()
                ),
            });
        }
        for (a, col) in columns.iter().enumerate() {
            if col.len() != dates.len() {
                return Err(ValuescreenError::FrameShape {
                    reason: format!(
                        "column {} has {} rows, date axis has {}",
                        assets[a],
                        col.len(),
                        dates.len()
                    ),
                });
            }
        }
        for pair in dates.windows(2) {
            if pair[0] >= pair[1] {
                return Err(ValuescreenError::FrameShape {
                    reason: format!("date axis not strictly increasing at {}", pair[1]),
                });
            }
        }
        let unique: BTreeSet<&String> = assets.iter().collect();
        if unique.len() != assets.len() {
            return Err(ValuescreenError::FrameShape {
                reason: "duplicate asset code".into(),
            });
        }

        let date_index = dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();
        Ok(Self {
            dates,
            assets,
            columns,
            date_index,
        })
    }

    pub fn n_dates(&self) -> usize {
        self.dates.len()
    }

    pub fn n_assets(&self) -> usize {
        self.assets.len()
    }

    pub fn get(&self, date_idx: usize, asset_idx: usize) -> Option<f64> {
        self.columns[asset_idx][date_idx]
    }

    pub fn column(&self, asset_idx: usize) -> &[Option<f64>] {
        &self.columns[asset_idx]
    }

    pub fn date_position(&self, date: NaiveDate) -> Option<usize> {
        self.date_index.get(&date).copied()
    }

    pub fn asset_position(&self, code: &str) -> Option<usize> {
        self.assets.iter().position(|a| a == code)
    }

    /// Build a frame on the same axes from already-shaped columns.
    pub fn like(&self, columns: Vec<Vec<Option<f64>>>) -> Frame {
        debug_assert_eq!(columns.len(), self.assets.len());
        debug_assert!(columns.iter().all(|c| c.len() == self.dates.len()));
        Frame {
            dates: self.dates.clone(),
            assets: self.assets.clone(),
            columns,
            date_index: self.date_index.clone(),
        }
    }

    /// Apply an independent per-asset column transform, in parallel across
    /// assets. The transform must preserve column length.
    pub fn map_columns<F>(&self, f: F) -> Frame
    where
        F: Fn(&[Option<f64>]) -> Vec<Option<f64>> + Sync,
    {
        let columns: Vec<Vec<Option<f64>>> =
            self.columns.par_iter().map(|col| f(col)).collect();
        self.like(columns)
    }

    pub fn same_axes(&self, other: &Frame) -> bool {
        self.dates == other.dates && self.assets == other.assets
    }
}

/// Boolean date × asset table with no missing cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    pub dates: Vec<NaiveDate>,
    pub assets: Vec<String>,
    pub columns: Vec<Vec<bool>>,
}

impl Mask {
    pub fn new(
        dates: Vec<NaiveDate>,
        assets: Vec<String>,
        columns: Vec<Vec<bool>>,
    ) -> Result<Self, ValuescreenError> {
        if columns.len() != assets.len() {
            return Err(ValuescreenError::FrameShape {
                reason: format!(
                    "{} columns for {} assets",
                    columns.len(),
                    assets.len()
                ),
            });
        }
        if let Some((a, col)) = columns
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != dates.len())
        {
            return Err(ValuescreenError::FrameShape {
                reason: format!(
                    "column {} has {} rows, date axis has {}",
                    assets[a],
                    col.len(),
                    dates.len()
                ),
            });
        }
        Ok(Self {
            dates,
            assets,
            columns,
        })
    }

    /// Build a mask on a frame's axes from already-shaped columns.
    pub fn like_frame(frame: &Frame, columns: Vec<Vec<bool>>) -> Mask {
        debug_assert_eq!(columns.len(), frame.assets.len());
        debug_assert!(columns.iter().all(|c| c.len() == frame.dates.len()));
        Mask {
            dates: frame.dates.clone(),
            assets: frame.assets.clone(),
            columns,
        }
    }

    pub fn n_dates(&self) -> usize {
        self.dates.len()
    }

    pub fn n_assets(&self) -> usize {
        self.assets.len()
    }

    pub fn get(&self, date_idx: usize, asset_idx: usize) -> bool {
        self.columns[asset_idx][date_idx]
    }

    pub fn column(&self, asset_idx: usize) -> &[bool] {
        &self.columns[asset_idx]
    }

    /// Number of true cells on one date, across all assets.
    pub fn true_count_on(&self, date_idx: usize) -> usize {
        self.columns.iter().filter(|col| col[date_idx]).count()
    }

    pub fn same_axes(&self, other: &Mask) -> bool {
        self.dates == other.dates && self.assets == other.assets
    }

    /// Elementwise conjunction. Both masks must share axes.
    pub fn and(&self, other: &Mask) -> Mask {
        debug_assert!(self.same_axes(other));
        let columns = self
            .columns
            .iter()
            .zip(&other.columns)
            .map(|(a, b)| a.iter().zip(b).map(|(x, y)| *x && *y).collect())
            .collect();
        Mask {
            dates: self.dates.clone(),
            assets: self.assets.clone(),
            columns,
        }
    }
}

/// Fail with a descriptive [`ValuescreenError::AxisMismatch`] unless both
/// tables agree on date axis and asset universe.
pub fn require_same_axes(
    left_name: &str,
    left_dates: &[NaiveDate],
    left_assets: &[String],
    right_name: &str,
    right_dates: &[NaiveDate],
    right_assets: &[String],
) -> Result<(), ValuescreenError> {
    if left_dates != right_dates {
        return Err(ValuescreenError::AxisMismatch {
            left: left_name.to_string(),
            right: right_name.to_string(),
            reason: format!(
                "date axes differ ({} vs {} dates)",
                left_dates.len(),
                right_dates.len()
            ),
        });
    }
    if left_assets != right_assets {
        return Err(ValuescreenError::AxisMismatch {
            left: left_name.to_string(),
            right: right_name.to_string(),
            reason: format!(
                "asset universes differ ({} vs {} assets)",
                left_assets.len(),
                right_assets.len()
            ),
        });
    }
    Ok(())
}

/// Reindex two frames onto the union of their date axes and asset universes.
/// Cells an input never observed become missing.
pub fn outer_align(a: &Frame, b: &Frame) -> (Frame, Frame) {
    let dates: Vec<NaiveDate> = a
        .dates
        .iter()
        .chain(b.dates.iter())
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let assets: Vec<String> = a
        .assets
        .iter()
        .chain(b.assets.iter())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    (reindex(a, &dates, &assets), reindex(b, &dates, &assets))
}

fn reindex(frame: &Frame, dates: &[NaiveDate], assets: &[String]) -> Frame {
    let columns: Vec<Vec<Option<f64>>> = assets
        .iter()
        .map(|code| match frame.asset_position(code) {
            Some(a) => dates
                .iter()
                .map(|d| frame.date_position(*d).and_then(|t| frame.columns[a][t]))
                .collect(),
            None => vec![None; dates.len()],
        })
        .collect();

    let date_index = dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();
    Frame {
        dates: dates.to_vec(),
        assets: assets.to_vec(),
        columns,
        date_index,
    }
}
