//! The signal-to-position engine.
//!
//! Converts per-day entry and exit triggers into a temporally consistent
//! holding schedule. This is the one stage with genuine state: each asset is
//! a strict left-to-right fold over the date axis carrying a single "held"
//! boolean. Entry is a trigger, not a maintenance condition; an open position
//! survives the entry signal going false and is released only by the exit
//! signal.
//!
//! Collision semantics, fixed by the branch order below:
//! - entry and exit both true while *not* held: the position opens (exit is
//!   only consulted while holding);
//! - entry and exit both true while held: the position closes, with no
//!   same-day re-entry (a later date's entry signal may reopen it).
//!
//! There is no elementwise closed form for this because of that branch
//! asymmetry; do not replace the fold with `entry | (prev & !exit)`, which
//! gets the same-day collision cases wrong. Columns are independent, so the
//! folds run in parallel across assets.

use crate::domain::error::ValuescreenError;
use crate::domain::frame::{require_same_axes, Mask};
use rayon::prelude::*;

/// One asset's scan: ordered entry/exit triggers in, held-per-day out.
fn scan_column(entry: &[bool], exit: &[bool]) -> Vec<bool> {
    let mut held = false;
    entry
        .iter()
        .zip(exit)
        .map(|(enter, leave)| {
            if !held {
                held = *enter;
            } else if *leave {
                held = false;
            }
            held
        })
        .collect()
}

/// Produce the holding matrix from aligned entry and exit signals.
///
/// Both inputs must share date axis and asset universe; a mismatch is a
/// fatal precondition violation, never silently re-aligned. The output has
/// a definite true/false in every cell.
pub fn generate_holdings(entry: &Mask, exit: &Mask) -> Result<Mask, ValuescreenError> {
    require_same_axes(
        "entry signal",
        &entry.dates,
        &entry.assets,
        "exit signal",
        &exit.dates,
        &exit.assets,
    )?;

    let columns: Vec<Vec<bool>> = entry
        .columns
        .par_iter()
        .zip(&exit.columns)
        .map(|(e, x)| scan_column(e, x))
        .collect();

    Ok(Mask {
        dates: entry.dates.clone(),
        assets: entry.assets.clone(),
        columns,
    })
}
