//! RSI (Relative Strength Index) over a trailing simple-mean window.
//!
//! Day-over-day change is split into a non-negative gain and a non-negative
//! loss (absolute value of a negative change); both are smoothed with a
//! trailing simple moving average of length `period`. Then
//! `RSI = 100 - 100 / (1 + gain_avg / (loss_avg + EPSILON))`.
//!
//! The epsilon keeps a zero-loss window well defined: all-gain history gives
//! an RSI just under 100 instead of a division fault.
//!
//! Warmup: the change is undefined on the first day, so the first defined
//! RSI sits at index `period` (the smoothing window needs `period` changes).
//! Any window containing a missing change is missing.

use crate::domain::frame::Frame;
use crate::domain::indicator::rolling_mean;

pub const RSI_EPSILON: f64 = 1e-9;

pub fn rsi_column(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut gains: Vec<Option<f64>> = vec![None; n];
    let mut losses: Vec<Option<f64>> = vec![None; n];

    for t in 1..n {
        if let (Some(prev), Some(cur)) = (values[t - 1], values[t]) {
            let change = cur - prev;
            gains[t] = Some(change.max(0.0));
            losses[t] = Some((-change).max(0.0));
        }
    }

    let gain_avg = rolling_mean(&gains, period);
    let loss_avg = rolling_mean(&losses, period);

    gain_avg
        .iter()
        .zip(&loss_avg)
        .map(|(gain, loss)| match (gain, loss) {
            (Some(g), Some(l)) => {
                let rs = g / (l + RSI_EPSILON);
                Some(100.0 - 100.0 / (1.0 + rs))
            }
            _ => None,
        })
        .collect()
}

pub fn rsi(frame: &Frame, period: usize) -> Frame {
    frame.map_columns(|col| rsi_column(col, period))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::single_asset_frame;
    use approx::assert_relative_eq;

    fn closes(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().map(|v| Some(*v)).collect()
    }

    #[test]
    fn rsi_empty_series() {
        assert!(rsi_column(&[], 14).is_empty());
    }

    #[test]
    fn rsi_warmup_length() {
        // period changes are needed, and the first change lands on day 1,
        // so the first defined RSI is at index `period`.
        let series = closes(&[
            100.0, 102.0, 101.0, 103.0, 104.0, 102.0, 105.0, 106.0, 104.0, 107.0, 108.0, 106.0,
            109.0, 110.0, 108.0, 111.0,
        ]);
        let out = rsi_column(&series, 14);

        for t in 0..14 {
            assert!(out[t].is_none(), "index {} should be in warmup", t);
        }
        assert!(out[14].is_some());
        assert!(out[15].is_some());
    }

    #[test]
    fn rsi_all_gains_near_100() {
        let series = closes(&(0..16).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        let out = rsi_column(&series, 14);

        let value = out[14].unwrap();
        assert!(value > 99.9, "all-gain RSI was {}", value);
        assert!(value <= 100.0);
    }

    #[test]
    fn rsi_all_losses_is_zero() {
        let series = closes(&(0..16).map(|i| 100.0 - i as f64).collect::<Vec<_>>());
        let out = rsi_column(&series, 14);

        assert_relative_eq!(out[14].unwrap(), 0.0);
    }

    #[test]
    fn rsi_flat_series_is_zero() {
        // no gains and no losses: rs = 0 / epsilon = 0
        let series = closes(&[100.0; 16]);
        let out = rsi_column(&series, 14);
        assert_relative_eq!(out[15].unwrap(), 0.0);
    }

    #[test]
    fn rsi_balanced_moves_near_50() {
        // alternating +1/-1: average gain == average loss
        let series = closes(
            &(0..20)
                .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
                .collect::<Vec<_>>(),
        );
        let out = rsi_column(&series, 14);
        assert_relative_eq!(out[15].unwrap(), 50.0, max_relative = 1e-6);
    }

    #[test]
    fn rsi_stays_in_range() {
        let series = closes(
            &(0..40)
                .map(|i| 100.0 + ((i * 7) % 13) as f64 - 6.0)
                .collect::<Vec<_>>(),
        );
        for value in rsi_column(&series, 14).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&value), "RSI {} out of range", value);
        }
    }

    #[test]
    fn rsi_gap_propagates_through_window() {
        let mut series = closes(&(0..12).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        series[5] = None;
        let out = rsi_column(&series, 3);

        // changes at 5 and 6 are missing, so windows ending at 5..=8 break
        assert!(out[4].is_some());
        for t in 5..=8 {
            assert!(out[t].is_none(), "index {} should be missing", t);
        }
        assert!(out[9].is_some());
    }

    #[test]
    fn rsi_frame_runs_per_asset() {
        let frame = single_asset_frame(closes(
            &(0..6).map(|i| 100.0 + i as f64).collect::<Vec<_>>(),
        ));
        let out = rsi(&frame, 3);

        assert!(out.same_axes(&frame));
        assert!(out.get(2, 0).is_none());
        assert!(out.get(3, 0).is_some());
    }
}
