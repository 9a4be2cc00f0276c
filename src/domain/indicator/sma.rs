//! Trailing simple moving average.

use crate::domain::frame::Frame;
use crate::domain::indicator::rolling_mean;

pub fn moving_average_column(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_mean(values, window)
}

pub fn moving_average(frame: &Frame, window: usize) -> Frame {
    frame.map_columns(|col| moving_average_column(col, window))
}
