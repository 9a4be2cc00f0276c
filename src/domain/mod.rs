//! Core domain types and logic.

pub mod config_validation;
pub mod error;
pub mod frame;
pub mod holding;
pub mod indicator;
pub mod params;
pub mod pipeline;
pub mod ranking;
pub mod signal;
pub mod stop_loss;
