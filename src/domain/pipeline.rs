//! Full signal pipeline: Indicator -> Signal -> {Ranking, Exit} -> Holding.
//!
//! Deterministic and side-effect-free: every derived table is recomputed
//! from the raw frames per invocation, and re-running with the same inputs
//! reproduces the same holding matrix bit for bit.

use crate::domain::error::ValuescreenError;
use crate::domain::frame::{require_same_axes, Frame, Mask};
use crate::domain::holding::generate_holdings;
use crate::domain::indicator::{moving_average, rsi};
use crate::domain::params::StrategyParams;
use crate::domain::ranking::{entry_signal, masked_valuation};
use crate::domain::signal::{
    pre_filter, price_floor, trend_confirmation, trend_filter, valid_valuation,
};
use crate::domain::stop_loss::stop_loss;

/// The two trigger matrices the holding engine consumes.
#[derive(Debug, Clone)]
pub struct Signals {
    pub entry: Mask,
    pub exit: Mask,
}

/// Derive entry and exit signals from aligned price and valuation frames.
pub fn derive_signals(
    price: &Frame,
    valuation: &Frame,
    params: &StrategyParams,
) -> Result<Signals, ValuescreenError> {
    require_same_axes(
        "price",
        &price.dates,
        &price.assets,
        "valuation",
        &valuation.dates,
        &valuation.assets,
    )?;

    let rsi_short = rsi(price, params.rsi_short);
    let rsi_mid = rsi(price, params.rsi_mid);
    let rsi_long = rsi(price, params.rsi_long);
    let ma = moving_average(price, params.ma_window);

    let eligible = pre_filter(
        &trend_confirmation(&rsi_short, &rsi_mid, &rsi_long),
        &price_floor(price, params.price_floor),
        &trend_filter(price, &ma),
        &valid_valuation(valuation),
    );

    let entry = entry_signal(&masked_valuation(valuation, &eligible), params.top_n);
    let exit = stop_loss(price, params.drop_threshold);

    Ok(Signals { entry, exit })
}

/// Run the whole pipeline and produce the holding matrix.
pub fn run(
    price: &Frame,
    valuation: &Frame,
    params: &StrategyParams,
) -> Result<Mask, ValuescreenError> {
    let signals = derive_signals(price, valuation, params)?;
    generate_holdings(&signals.entry, &signals.exit)
}
