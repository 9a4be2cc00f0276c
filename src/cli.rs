//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::{self, CsvAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{validate_data_config, validate_strategy_config};
use crate::domain::error::ValuescreenError;
use crate::domain::frame::outer_align;
use crate::domain::params::{Rebalance, StrategyParams};
use crate::domain::pipeline;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::MarketDataPort;

#[derive(Parser, Debug)]
#[command(
    name = "valuescreen",
    about = "Valuation-ranked holding schedule generator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the holding matrix and write it as CSV
    Run {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show per-asset observation counts and date ranges
    Info {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            output,
            dry_run,
        } => {
            if dry_run {
                run_validate(&config)
            } else {
                run_screen(&config, output.as_ref())
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::Info { config } => run_info(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = ValuescreenError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Read strategy parameters from config, defaulting any absent key.
pub fn build_strategy_params(
    config: &dyn ConfigPort,
) -> Result<StrategyParams, ValuescreenError> {
    let defaults = StrategyParams::default();

    let rebalance = match config.get_string("strategy", "rebalance") {
        Some(value) => value
            .parse::<Rebalance>()
            .map_err(|reason| ValuescreenError::ConfigInvalid {
                section: "strategy".into(),
                key: "rebalance".into(),
                reason,
            })?,
        None => defaults.rebalance,
    };

    Ok(StrategyParams {
        rsi_short: config.get_int("strategy", "rsi_short", defaults.rsi_short as i64) as usize,
        rsi_mid: config.get_int("strategy", "rsi_mid", defaults.rsi_mid as i64) as usize,
        rsi_long: config.get_int("strategy", "rsi_long", defaults.rsi_long as i64) as usize,
        ma_window: config.get_int("strategy", "ma_window", defaults.ma_window as i64) as usize,
        price_floor: config.get_double("strategy", "price_floor", defaults.price_floor),
        drop_threshold: config.get_double("strategy", "drop_threshold", defaults.drop_threshold),
        top_n: config.get_int("strategy", "top_n", defaults.top_n as i64) as usize,
        rebalance,
    })
}

pub fn data_window(
    config: &dyn ConfigPort,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), ValuescreenError> {
    Ok((
        parse_date(config, "start_date")?,
        parse_date(config, "end_date")?,
    ))
}

fn parse_date(
    config: &dyn ConfigPort,
    key: &str,
) -> Result<Option<NaiveDate>, ValuescreenError> {
    match config.get_string("data", key) {
        Some(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ValuescreenError::ConfigInvalid {
                section: "data".into(),
                key: key.into(),
                reason: "invalid date format (expected YYYY-MM-DD)".into(),
            }),
        None => Ok(None),
    }
}

fn build_data_adapter(config: &dyn ConfigPort) -> Result<CsvAdapter, ValuescreenError> {
    let price_path =
        config
            .get_string("data", "price_path")
            .ok_or_else(|| ValuescreenError::ConfigMissing {
                section: "data".into(),
                key: "price_path".into(),
            })?;
    let valuation_path =
        config
            .get_string("data", "valuation_path")
            .ok_or_else(|| ValuescreenError::ConfigMissing {
                section: "data".into(),
                key: "valuation_path".into(),
            })?;
    Ok(CsvAdapter::new(
        PathBuf::from(price_path),
        PathBuf::from(valuation_path),
    ))
}

fn run_screen(config_path: &PathBuf, output_override: Option<&PathBuf>) -> ExitCode {
    // Stage 1: load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_data_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 2: resolve parameters
    let params = match build_strategy_params(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let (start, end) = match data_window(&adapter) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 3: load the raw tables
    let data_port = match build_data_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let price = match data_port.fetch_prices(start, end) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let valuation = match data_port.fetch_valuations(start, end) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!(
        "Loaded {} dates x {} assets (prices), {} dates x {} assets (valuations)",
        price.n_dates(),
        price.n_assets(),
        valuation.n_dates(),
        valuation.n_assets()
    );

    // Stage 4: align onto shared axes and run the pipeline
    let (price, valuation) = outer_align(&price, &valuation);
    eprintln!(
        "Screening {} assets over {} dates (top {} by valuation, {} rebalance)",
        price.n_assets(),
        price.n_dates(),
        params.top_n,
        params.rebalance
    );

    let holdings = match pipeline::run(&price, &valuation, &params) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let held_days: usize = (0..holdings.n_dates())
        .map(|t| holdings.true_count_on(t))
        .sum();
    eprintln!("Holding matrix complete: {held_days} held asset-days");
    if let Some(last) = holdings.n_dates().checked_sub(1) {
        let held: Vec<&str> = (0..holdings.n_assets())
            .filter(|a| holdings.get(last, *a))
            .map(|a| holdings.assets[a].as_str())
            .collect();
        eprintln!(
            "Held on {}: {}",
            holdings.dates[last],
            if held.is_empty() {
                "(none)".to_string()
            } else {
                held.join(", ")
            }
        );
    }

    // Stage 5: export
    let output = output_override
        .cloned()
        .or_else(|| adapter.get_string("output", "path").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("holdings.csv"));

    match csv_adapter::write_mask(&output, &holdings) {
        Ok(()) => {
            eprintln!("Holding matrix written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_data_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let params = match build_strategy_params(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nResolved parameters:");
    eprintln!("  RSI windows:     {}/{}/{}", params.rsi_short, params.rsi_mid, params.rsi_long);
    eprintln!("  MA window:       {}", params.ma_window);
    eprintln!("  price floor:     {}", params.price_floor);
    eprintln!("  drop threshold:  {}", params.drop_threshold);
    eprintln!("  top N:           {}", params.top_n);
    eprintln!("  rebalance:       {}", params.rebalance);
    eprintln!("\nConfiguration is valid");
    ExitCode::SUCCESS
}

fn run_info(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_data_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let (start, end) = match data_window(&adapter) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let data_port = match build_data_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let price = match data_port.fetch_prices(start, end) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for (a, code) in price.assets.iter().enumerate() {
        let observed: Vec<usize> = price
            .column(a)
            .iter()
            .enumerate()
            .filter_map(|(t, v)| v.map(|_| t))
            .collect();
        match (observed.first(), observed.last()) {
            (Some(first), Some(last)) => println!(
                "{}: {} observations, {} to {}",
                code,
                observed.len(),
                price.dates[*first],
                price.dates[*last]
            ),
            _ => println!("{code}: no observations"),
        }
    }
    eprintln!("{} assets, {} dates", price.n_assets(), price.n_dates());
    ExitCode::SUCCESS
}
