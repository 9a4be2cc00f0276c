//! Cross-sectional cheapest-valuation selection.
//!
//! Per date, the pre-filtered valuations are ranked ascending across the
//! asset axis; an asset enters the selection when its rank is at most
//! `top_n`. Missing cells are excluded from ranking entirely, so a day on
//! which fewer than `top_n` assets pass the pre-filter selects fewer than
//! `top_n` assets.
//!
//! Ties take the average of the tied positions (1-based). A tie straddling
//! the cutoff can therefore admit more or fewer than `top_n` assets; that is
//! the reference behavior and is kept as-is.

use crate::domain::frame::{Frame, Mask};

/// Valuation where the pre-filter holds, missing elsewhere.
pub fn masked_valuation(valuation: &Frame, pre_filter: &Mask) -> Frame {
    debug_assert!(valuation.dates == pre_filter.dates && valuation.assets == pre_filter.assets);
    let columns = valuation
        .columns
        .iter()
        .zip(&pre_filter.columns)
        .map(|(values, keep)| {
            values
                .iter()
                .zip(keep)
                .map(|(v, k)| if *k { *v } else { None })
                .collect()
        })
        .collect();
    valuation.like(columns)
}

/// Ascending average ranks for one cross-section. `None` cells receive no
/// rank; ranks are 1-based.
fn average_ranks(row: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut present: Vec<(f64, usize)> = row
        .iter()
        .enumerate()
        .filter_map(|(idx, v)| v.map(|value| (value, idx)))
        .collect();
    // total order is fine: frames never hold non-finite values
    present.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut ranks = vec![None; row.len()];
    let mut i = 0;
    while i < present.len() {
        let mut j = i;
        while j + 1 < present.len() && present[j + 1].0 == present[i].0 {
            j += 1;
        }
        // positions i+1 ..= j+1 share the averaged rank
        let rank = (i + 1 + j + 1) as f64 / 2.0;
        for k in i..=j {
            ranks[present[k].1] = Some(rank);
        }
        i = j + 1;
    }
    ranks
}

/// Entry signal: true where the masked valuation ranks within the cheapest
/// `top_n` on that date; false wherever the rank is missing.
pub fn entry_signal(masked: &Frame, top_n: usize) -> Mask {
    let n_dates = masked.n_dates();
    let n_assets = masked.n_assets();
    let mut columns = vec![vec![false; n_dates]; n_assets];

    let mut row = vec![None; n_assets];
    for t in 0..n_dates {
        for a in 0..n_assets {
            row[a] = masked.columns[a][t];
        }
        for (a, rank) in average_ranks(&row).into_iter().enumerate() {
            if let Some(r) = rank {
                columns[a][t] = r <= top_n as f64;
            }
        }
    }

    Mask::like_frame(masked, columns)
}
