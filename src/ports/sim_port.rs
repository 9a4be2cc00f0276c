//! Performance-simulation handoff port trait.
//!
//! The holding matrix is this crate's terminal artifact; simulating returns,
//! drawdown and reporting belongs to an external collaborator. Its whole
//! contract with us is this trait: a complete (no missing cells) boolean
//! date × asset table plus the rebalance cadence to re-evaluate at.

use crate::domain::error::ValuescreenError;
use crate::domain::frame::Mask;
use crate::domain::params::Rebalance;

pub trait SimulationPort {
    fn simulate(&self, holdings: &Mask, rebalance: Rebalance) -> Result<(), ValuescreenError>;
}
