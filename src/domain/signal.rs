//! Elementwise entry-eligibility conditions.
//!
//! Each condition maps aligned frames to a [`Mask`]. A missing operand makes
//! the output cell false: a condition is never satisfied by omission.

use crate::domain::frame::{Frame, Mask};

fn map1<F>(frame: &Frame, f: F) -> Mask
where
    F: Fn(f64) -> bool,
{
    let columns = frame
        .columns
        .iter()
        .map(|col| col.iter().map(|v| v.is_some_and(&f)).collect())
        .collect();
    Mask::like_frame(frame, columns)
}

fn map2<F>(a: &Frame, b: &Frame, f: F) -> Mask
where
    F: Fn(f64, f64) -> bool,
{
    debug_assert!(a.same_axes(b));
    let columns = a
        .columns
        .iter()
        .zip(&b.columns)
        .map(|(ca, cb)| {
            ca.iter()
                .zip(cb)
                .map(|(va, vb)| match (va, vb) {
                    (Some(x), Some(y)) => f(*x, *y),
                    _ => false,
                })
                .collect()
        })
        .collect();
    Mask::like_frame(a, columns)
}

/// Short RSI not overbought, mid and long RSI both in bullish territory.
pub fn trend_confirmation(rsi_short: &Frame, rsi_mid: &Frame, rsi_long: &Frame) -> Mask {
    map1(rsi_short, |v| v < 70.0)
        .and(&map1(rsi_mid, |v| v > 50.0))
        .and(&map1(rsi_long, |v| v > 50.0))
}

/// Price strictly above the floor, in currency units.
pub fn price_floor(price: &Frame, floor: f64) -> Mask {
    map1(price, |v| v > floor)
}

/// Price strictly above its trailing moving average.
pub fn trend_filter(price: &Frame, ma: &Frame) -> Mask {
    map2(price, ma, |p, m| p > m)
}

/// Valuation observation present on that date.
pub fn valid_valuation(valuation: &Frame) -> Mask {
    let columns = valuation
        .columns
        .iter()
        .map(|col| col.iter().map(|v| v.is_some()).collect())
        .collect();
    Mask::like_frame(valuation, columns)
}

/// Conjunction of all entry-eligibility conditions.
pub fn pre_filter(trend: &Mask, floor: &Mask, above_ma: &Mask, valuation_ok: &Mask) -> Mask {
    trend.and(floor).and(above_ma).and(valuation_ok)
}
