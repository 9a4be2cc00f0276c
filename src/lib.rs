//! valuescreen turns daily price and valuation tables into a boolean
//! holding matrix for downstream performance simulation.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
