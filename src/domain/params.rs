//! Strategy parameters.
//!
//! Every layer takes its tunables from [`StrategyParams`] rather than ambient
//! constants, so the pipeline is reentrant and testable with alternate
//! parameterizations. Defaults match the reference strategy: RSI windows
//! 14/50/200, a 60-day trend filter, a 5-unit price floor, a 10% stop-loss
//! and a cheapest-10 valuation cut.

use std::fmt;
use std::str::FromStr;

/// Cadence at which the downstream simulation collaborator re-evaluates the
/// holding matrix. Carried on the parameters for the handoff; the holding
/// computation itself is daily regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rebalance {
    Daily,
    Monthly,
    Quarterly,
}

impl FromStr for Rebalance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "d" => Ok(Rebalance::Daily),
            "monthly" | "m" => Ok(Rebalance::Monthly),
            "quarterly" | "q" => Ok(Rebalance::Quarterly),
            other => Err(format!(
                "unknown rebalance frequency '{other}' (expected daily, monthly or quarterly)"
            )),
        }
    }
}

impl fmt::Display for Rebalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rebalance::Daily => write!(f, "daily"),
            Rebalance::Monthly => write!(f, "monthly"),
            Rebalance::Quarterly => write!(f, "quarterly"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StrategyParams {
    /// Short RSI window; entry requires RSI below 70 here (not overbought).
    pub rsi_short: usize,
    /// Mid RSI window; entry requires RSI above 50.
    pub rsi_mid: usize,
    /// Long RSI window; entry requires RSI above 50. This is the longest
    /// indicator window and therefore bounds the warm-up period.
    pub rsi_long: usize,
    /// Trend-filter moving average window.
    pub ma_window: usize,
    /// Minimum price, in currency units, for entry eligibility.
    pub price_floor: f64,
    /// Day-over-day drop that forces an exit (0.10 = 10%).
    pub drop_threshold: f64,
    /// Number of cheapest-valuation assets selected per day.
    pub top_n: usize,
    /// Simulation cadence, handed through to the collaborator.
    pub rebalance: Rebalance,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            rsi_short: 14,
            rsi_mid: 50,
            rsi_long: 200,
            ma_window: 60,
            price_floor: 5.0,
            drop_threshold: 0.10,
            top_n: 10,
            rebalance: Rebalance::Quarterly,
        }
    }
}

impl StrategyParams {
    /// Longest indicator window; dates before this many observations have
    /// accumulated can never carry an entry signal.
    pub fn longest_window(&self) -> usize {
        self.rsi_short
            .max(self.rsi_mid)
            .max(self.rsi_long)
            .max(self.ma_window)
    }
}
