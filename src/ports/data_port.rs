//! Market data access port trait.

use crate::domain::error::ValuescreenError;
use crate::domain::frame::Frame;
use chrono::NaiveDate;

/// Source of the two raw tables the pipeline consumes. Implementations
/// return frames on their own native axes; callers outer-align the pair
/// before running the pipeline.
pub trait MarketDataPort {
    /// Daily closing prices, optionally restricted to a date window.
    fn fetch_prices(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Frame, ValuescreenError>;

    /// Daily valuation ratios (price-to-book style), same contract.
    fn fetch_valuations(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Frame, ValuescreenError>;
}
