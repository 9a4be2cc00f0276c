//! Day-over-day percentage change.
//!
//! `(value[t] - value[t-1]) / value[t-1]`, missing on the first day and
//! whenever either endpoint is missing. Gaps are not forward-filled: a change
//! across a gap is undefined, so a crash hidden behind missing data never
//! manufactures an exit signal.

use crate::domain::frame::Frame;

pub fn pct_change_column(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    for t in 1..values.len() {
        if let (Some(prev), Some(cur)) = (values[t - 1], values[t]) {
            out[t] = Some((cur - prev) / prev);
        }
    }
    out
}

pub fn pct_change(frame: &Frame) -> Frame {
    frame.map_columns(pct_change_column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::single_asset_frame;
    use approx::assert_relative_eq;

    #[test]
    fn first_day_is_missing() {
        let out = pct_change_column(&[Some(100.0), Some(110.0)]);
        assert_eq!(out[0], None);
        assert_relative_eq!(out[1].unwrap(), 0.10);
    }

    #[test]
    fn gap_breaks_both_adjacent_changes() {
        let out = pct_change_column(&[Some(100.0), None, Some(90.0), Some(81.0)]);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_eq!(out[2], None);
        assert_relative_eq!(out[3].unwrap(), -0.10);
    }

    #[test]
    fn frame_wrapper_preserves_axes() {
        let frame = single_asset_frame(vec![Some(50.0), Some(55.0), Some(44.0)]);
        let out = pct_change(&frame);

        assert!(out.same_axes(&frame));
        assert_relative_eq!(out.get(1, 0).unwrap(), 0.10);
        assert_relative_eq!(out.get(2, 0).unwrap(), -0.20);
    }
}
