//! Price-drawdown exit signal.

use crate::domain::frame::{Frame, Mask};
use crate::domain::indicator::pct_change;

/// True where the day-over-day price change is at or below `-drop_threshold`.
/// A missing change (first day, data gap) never forces an exit.
pub fn stop_loss(price: &Frame, drop_threshold: f64) -> Mask {
    let change = pct_change(price);
    let columns = change
        .columns
        .iter()
        .map(|col| {
            col.iter()
                .map(|v| v.is_some_and(|c| c <= -drop_threshold))
                .collect()
        })
        .collect();
    Mask::like_frame(price, columns)
}
