//! Configuration validation.
//!
//! Checks all config fields before any data is touched, so a bad value fails
//! fast with a section/key-qualified error.

use crate::domain::error::ValuescreenError;
use crate::domain::params::Rebalance;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), ValuescreenError> {
    require_path(config, "price_path")?;
    require_path(config, "valuation_path")?;
    validate_date(config, "start_date")?;
    validate_date(config, "end_date")?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), ValuescreenError> {
    validate_window(config, "rsi_short")?;
    validate_window(config, "rsi_mid")?;
    validate_window(config, "rsi_long")?;
    validate_window(config, "ma_window")?;
    validate_price_floor(config)?;
    validate_drop_threshold(config)?;
    validate_top_n(config)?;
    validate_rebalance(config)?;
    Ok(())
}

fn require_path(config: &dyn ConfigPort, key: &str) -> Result<(), ValuescreenError> {
    match config.get_string("data", key) {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ValuescreenError::ConfigMissing {
            section: "data".to_string(),
            key: key.to_string(),
        }),
    }
}

fn validate_date(config: &dyn ConfigPort, key: &str) -> Result<(), ValuescreenError> {
    if let Some(value) = config.get_string("data", key) {
        NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| {
            ValuescreenError::ConfigInvalid {
                section: "data".to_string(),
                key: key.to_string(),
                reason: "invalid date format (expected YYYY-MM-DD)".to_string(),
            }
        })?;
    }
    Ok(())
}

fn validate_window(config: &dyn ConfigPort, key: &str) -> Result<(), ValuescreenError> {
    let value = config.get_int("strategy", key, 1);
    if value < 1 {
        return Err(ValuescreenError::ConfigInvalid {
            section: "strategy".to_string(),
            key: key.to_string(),
            reason: format!("window must be at least 1, got {value}"),
        });
    }
    Ok(())
}

fn validate_price_floor(config: &dyn ConfigPort) -> Result<(), ValuescreenError> {
    let value = config.get_double("strategy", "price_floor", 0.0);
    if value < 0.0 {
        return Err(ValuescreenError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "price_floor".to_string(),
            reason: "price_floor must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_drop_threshold(config: &dyn ConfigPort) -> Result<(), ValuescreenError> {
    let value = config.get_double("strategy", "drop_threshold", 0.10);
    if value <= 0.0 || value >= 1.0 {
        return Err(ValuescreenError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "drop_threshold".to_string(),
            reason: format!("drop_threshold must be in (0, 1), got {value}"),
        });
    }
    Ok(())
}

fn validate_top_n(config: &dyn ConfigPort) -> Result<(), ValuescreenError> {
    let value = config.get_int("strategy", "top_n", 1);
    if value < 1 {
        return Err(ValuescreenError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "top_n".to_string(),
            reason: format!("top_n must be at least 1, got {value}"),
        });
    }
    Ok(())
}

fn validate_rebalance(config: &dyn ConfigPort) -> Result<(), ValuescreenError> {
    if let Some(value) = config.get_string("strategy", "rebalance") {
        value
            .parse::<Rebalance>()
            .map_err(|reason| ValuescreenError::ConfigInvalid {
                section: "strategy".to_string(),
                key: "rebalance".to_string(),
                reason,
            })?;
    }
    Ok(())
}
