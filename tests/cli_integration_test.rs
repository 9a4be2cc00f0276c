//! CLI-level integration: config files on disk, CSV tables in, CSV holdings out.

mod common;

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use valuescreen::adapters::csv_adapter::{self, CsvAdapter};
use valuescreen::cli::{build_strategy_params, data_window, load_config};
use valuescreen::domain::config_validation::{validate_data_config, validate_strategy_config};
use valuescreen::domain::frame::outer_align;
use valuescreen::domain::params::Rebalance;
use valuescreen::domain::pipeline;
use valuescreen::ports::data_port::MarketDataPort;

use common::date;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("valuescreen.ini");
    fs::write(&path, content).unwrap();
    path
}

mod config_loading {
    use super::*;

    #[test]
    fn defaults_apply_when_strategy_section_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[data]\nprice_path = prices.csv\nvaluation_path = pbr.csv\n",
        );

        let adapter = load_config(&path).unwrap();
        let params = build_strategy_params(&adapter).unwrap();

        assert_eq!(params.rsi_short, 14);
        assert_eq!(params.rsi_mid, 50);
        assert_eq!(params.rsi_long, 200);
        assert_eq!(params.ma_window, 60);
        assert_eq!(params.price_floor, 5.0);
        assert_eq!(params.drop_threshold, 0.10);
        assert_eq!(params.top_n, 10);
        assert_eq!(params.rebalance, Rebalance::Quarterly);
    }

    #[test]
    fn overrides_replace_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[data]\n\
             price_path = prices.csv\n\
             valuation_path = pbr.csv\n\
             start_date = 2020-06-01\n\
             end_date = 2023-12-29\n\
             \n\
             [strategy]\n\
             rsi_short = 7\n\
             top_n = 3\n\
             drop_threshold = 0.15\n\
             rebalance = monthly\n",
        );

        let adapter = load_config(&path).unwrap();
        assert!(validate_data_config(&adapter).is_ok());
        assert!(validate_strategy_config(&adapter).is_ok());

        let params = build_strategy_params(&adapter).unwrap();
        assert_eq!(params.rsi_short, 7);
        assert_eq!(params.rsi_long, 200);
        assert_eq!(params.top_n, 3);
        assert_eq!(params.drop_threshold, 0.15);
        assert_eq!(params.rebalance, Rebalance::Monthly);

        let (start, end) = data_window(&adapter).unwrap();
        assert_eq!(start, Some(date(2020, 6, 1)));
        assert_eq!(end, Some(date(2023, 12, 29)));
    }

    #[test]
    fn bad_rebalance_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[data]\nprice_path = a\nvaluation_path = b\n[strategy]\nrebalance = weekly\n",
        );

        let adapter = load_config(&path).unwrap();
        assert!(validate_strategy_config(&adapter).is_err());
        assert!(build_strategy_params(&adapter).is_err());
    }

    #[test]
    fn bad_window_date_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[data]\nprice_path = a\nvaluation_path = b\nstart_date = June 1st\n",
        );

        let adapter = load_config(&path).unwrap();
        assert!(data_window(&adapter).is_err());
    }

    #[test]
    fn missing_config_file_reports_exit_code() {
        let path = PathBuf::from("/nonexistent/valuescreen.ini");
        assert!(load_config(&path).is_err());
    }
}

mod file_round_trip {
    use super::*;

    /// Alternating +2/-1 closes, then a 20% crash and a rebound. With 2-day
    /// windows this opens on day 4, rides the zigzag and stops out on the
    /// crash day.
    const CLOSES: [f64; 8] = [10.0, 12.0, 11.0, 13.0, 12.0, 14.0, 11.2, 13.2];

    fn write_tables(dir: &TempDir) -> (PathBuf, PathBuf) {
        let prices = dir.path().join("prices.csv");
        let valuations = dir.path().join("pbr.csv");

        let mut price_rows = String::from("date,TSM\n");
        let mut valuation_rows = String::from("date,TSM\n");
        for (i, close) in CLOSES.iter().enumerate() {
            let d = date(2024, 1, 1 + i as u32);
            price_rows.push_str(&format!("{d},{close}\n"));
            valuation_rows.push_str(&format!("{d},1.0\n"));
        }
        fs::write(&prices, price_rows).unwrap();
        fs::write(&valuations, valuation_rows).unwrap();
        (prices, valuations)
    }

    #[test]
    fn csv_in_holdings_csv_out() {
        let dir = TempDir::new().unwrap();
        let (prices, valuations) = write_tables(&dir);
        let config_path = write_config(
            &dir,
            &format!(
                "[data]\n\
                 price_path = {}\n\
                 valuation_path = {}\n\
                 \n\
                 [strategy]\n\
                 rsi_short = 2\n\
                 rsi_mid = 2\n\
                 rsi_long = 2\n\
                 ma_window = 2\n\
                 top_n = 1\n",
                prices.display(),
                valuations.display()
            ),
        );

        let adapter = load_config(&config_path).unwrap();
        validate_data_config(&adapter).unwrap();
        validate_strategy_config(&adapter).unwrap();
        let params = build_strategy_params(&adapter).unwrap();
        let (start, end) = data_window(&adapter).unwrap();

        let port = CsvAdapter::new(prices, valuations);
        let price = port.fetch_prices(start, end).unwrap();
        let valuation = port.fetch_valuations(start, end).unwrap();
        let (price, valuation) = outer_align(&price, &valuation);

        let holdings = pipeline::run(&price, &valuation, &params).unwrap();
        assert_eq!(
            holdings.column(0),
            &[false, false, false, true, true, true, false, false]
        );

        let output = dir.path().join("holdings.csv");
        csv_adapter::write_mask(&output, &holdings).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "date,TSM");
        assert_eq!(lines[1], "2024-01-01,false");
        assert_eq!(lines[4], "2024-01-04,true");
        assert_eq!(lines[7], "2024-01-07,false");
    }

    #[test]
    fn date_window_trims_before_screening() {
        let dir = TempDir::new().unwrap();
        let (prices, valuations) = write_tables(&dir);

        let port = CsvAdapter::new(prices, valuations);
        let price = port
            .fetch_prices(Some(date(2024, 1, 3)), Some(date(2024, 1, 6)))
            .unwrap();
        assert_eq!(price.n_dates(), 4);
        assert_eq!(price.dates[0], date(2024, 1, 3));
    }
}
