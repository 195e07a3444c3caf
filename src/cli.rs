//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::result_cache::ResultCache;
use crate::adapters::tables;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::adapters::trade_log_adapter::TradeLogAdapter;
use crate::domain::backtest::{self as backtest_engine, BacktestConfig, BacktestResult};
use crate::domain::bar::Bar;
use crate::domain::config_validation::{
    backtest_config_from, check_pct, compare_configs, data_window, parse_direction,
    validate_config,
};
use crate::domain::direction::Direction;
use crate::domain::error::WeekenderError;
use crate::domain::moving_average::LookbackPeriod;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "weekender", about = "Weekend-holding strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Price history CSV (overrides [data] path)
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Moving average lookback: 20, 50, 100, 200 or 252
        #[arg(long)]
        lookback: Option<usize>,
        /// Percentage change threshold against the prior trading day
        #[arg(long)]
        pct: Option<f64>,
        /// long or short
        #[arg(long)]
        direction: Option<Direction>,
        /// Trade log CSV path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Text summary report path
        #[arg(long)]
        summary: Option<PathBuf>,
    },
    /// Run the two [compare] combinations side by side
    Compare {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(long)]
        direction: Option<Direction>,
        /// Directory for the two trade logs
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the date range of the price history
    Info {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Backtest {
            config,
            data,
            lookback,
            pct,
            direction,
            output,
            summary,
        } => {
            let overrides = RunOverrides {
                lookback,
                pct,
                direction,
            };
            run_backtest(
                config.as_ref(),
                data.as_ref(),
                &overrides,
                output.as_ref(),
                summary.as_ref(),
            )
        }
        Command::Compare {
            config,
            data,
            direction,
            output_dir,
        } => run_compare(&config, data.as_ref(), direction, output_dir.as_ref()),
        Command::Validate { config } => run_validate(&config),
        Command::Info { config, data } => run_info(config.as_ref(), data.as_ref()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            (&e).into()
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub lookback: Option<usize>,
    pub pct: Option<f64>,
    pub direction: Option<Direction>,
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, WeekenderError> {
    info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| WeekenderError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn load_optional_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, WeekenderError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn build_data_port(
    config: &dyn ConfigPort,
    data_override: Option<&PathBuf>,
) -> Result<CsvAdapter, WeekenderError> {
    let path = match data_override {
        Some(p) => p.clone(),
        None => config
            .get_value("data", "path")
            .map(PathBuf::from)
            .ok_or_else(|| WeekenderError::ConfigMissing {
                section: "data".into(),
                key: "path".into(),
            })?,
    };
    let adapter = CsvAdapter::new(path);
    Ok(match config.get_value("data", "date_format") {
        Some(fmt) => adapter.with_date_format(fmt),
        None => adapter,
    })
}

pub fn build_backtest_config(
    config: &dyn ConfigPort,
    overrides: &RunOverrides,
) -> Result<BacktestConfig, WeekenderError> {
    let mut bt = backtest_config_from(config, "backtest", "")?;
    if let Some(days) = overrides.lookback {
        bt.lookback = LookbackPeriod::try_from(days)?;
    }
    if let Some(pct) = overrides.pct {
        bt.pct_threshold =
            check_pct(pct).map_err(|reason| WeekenderError::invalid("backtest", "pct_change", reason))?;
    }
    if let Some(direction) = overrides.direction {
        bt.direction = direction;
    }
    Ok(bt)
}

pub fn load_bars(port: &dyn DataPort, config: &dyn ConfigPort) -> Result<Vec<Bar>, WeekenderError> {
    let (start, end) = data_window(config)?;
    let bars = port.fetch_bars(start, end)?;
    if bars.is_empty() {
        return Err(WeekenderError::NoData {
            source_name: "price history".into(),
        });
    }
    tracing::debug!(bars = bars.len(), "price history loaded");
    Ok(bars)
}

/// Trade log path: CLI flag, then `[report] trade_log`, then the
/// parameter-derived default name.
pub fn trade_log_path(
    config: &dyn ConfigPort,
    output_override: Option<&PathBuf>,
    bt: &BacktestConfig,
) -> PathBuf {
    output_override
        .cloned()
        .or_else(|| config.get_value("report", "trade_log").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(bt.trade_log_name()))
}

pub fn run_backtest(
    config_path: Option<&PathBuf>,
    data_override: Option<&PathBuf>,
    overrides: &RunOverrides,
    output_path: Option<&PathBuf>,
    summary_path: Option<&PathBuf>,
) -> Result<(), WeekenderError> {
    let config = load_optional_config(config_path)?;
    let bt = build_backtest_config(&config, overrides)?;
    let port = build_data_port(&config, data_override)?;

    info!("Loading price history from {}", port.path().display());
    let bars = load_bars(&port, &config)?;
    warn_if_short(&bars, &bt);

    info!(
        lookback = bt.lookback.days(),
        pct = bt.pct_threshold,
        direction = %bt.direction,
        "Running backtest over {} bars",
        bars.len()
    );
    let result = backtest_engine::run(&bars, &bt);
    warn_if_empty(&result);

    print!("{}", tables::render_run_summary(&bt, result.data_range));
    println!();
    print!("{}", tables::render_metrics_table(&result.metrics));

    let log_path = trade_log_path(&config, output_path, &bt);
    TradeLogAdapter::new().write(&result, &log_path)?;
    info!("Trade log written to: {}", log_path.display());

    let summary = summary_path
        .cloned()
        .or_else(|| config.get_value("report", "summary").map(PathBuf::from));
    if let Some(path) = summary {
        TextReportAdapter::new().write(&result, &path)?;
        info!("Summary written to: {}", path.display());
    }

    Ok(())
}

pub fn run_compare(
    config_path: &Path,
    data_override: Option<&PathBuf>,
    direction_override: Option<Direction>,
    output_dir: Option<&PathBuf>,
) -> Result<(), WeekenderError> {
    let config = load_config(config_path)?;
    validate_config(&config)?;
    if !config.has_section("compare") {
        return Err(WeekenderError::ConfigMissing {
            section: "compare".into(),
            key: "lookback_1".into(),
        });
    }

    let direction = match direction_override {
        Some(d) => d,
        None => parse_direction(&config)?.unwrap_or_default(),
    };
    let (first, second) = compare_configs(&config, direction)?;

    let port = build_data_port(&config, data_override)?;
    info!("Loading price history from {}", port.path().display());
    let bars = load_bars(&port, &config)?;

    let mut cache = ResultCache::new();
    let left = run_cached(&mut cache, &bars, &first);
    let right = run_cached(&mut cache, &bars, &second);
    tracing::debug!(
        entries = cache.len(),
        hits = cache.hits(),
        misses = cache.misses(),
        "compare finished"
    );

    print!(
        "{}",
        tables::render_side_by_side((&left.config, &left.metrics), (&right.config, &right.metrics))
    );

    let dir = output_dir.cloned().unwrap_or_else(|| PathBuf::from("."));
    let left_path = dir.join(left.config.trade_log_name());
    let right_path = dir.join(right.config.trade_log_name());
    TradeLogAdapter::new().write_all(&[
        (&left, left_path.as_path()),
        (&right, right_path.as_path()),
    ])?;
    info!(
        "Trade logs written to: {} and {}",
        left_path.display(),
        right_path.display()
    );
    Ok(())
}

fn run_cached(cache: &mut ResultCache, bars: &[Bar], bt: &BacktestConfig) -> BacktestResult {
    warn_if_short(bars, bt);
    let result = cache.get_or_run(bars, bt).clone();
    warn_if_empty(&result);
    result
}

pub fn run_validate(config_path: &Path) -> Result<(), WeekenderError> {
    let config = load_config(config_path)?;
    validate_config(&config)?;

    let bt = backtest_config_from(&config, "backtest", "")?;
    info!(
        "Backtest: lookback {} days, pct_change {:.2}%, {}",
        bt.lookback, bt.pct_threshold, bt.direction
    );
    if config.has_section("compare") {
        let (a, b) = compare_configs(&config, bt.direction)?;
        info!(
            "Compare: {} days / {:.2}% vs {} days / {:.2}%",
            a.lookback, a.pct_threshold, b.lookback, b.pct_threshold
        );
    }
    info!("Configuration is valid.");
    Ok(())
}

pub fn run_info(
    config_path: Option<&PathBuf>,
    data_override: Option<&PathBuf>,
) -> Result<(), WeekenderError> {
    let config = load_optional_config(config_path)?;
    let port = build_data_port(&config, data_override)?;

    match port.get_data_range()? {
        Some((first, last, count)) => {
            println!("{}: {} bars, {} to {}", port.path().display(), count, first, last);
            let usable: Vec<String> = LookbackPeriod::ALL
                .iter()
                .filter(|p| p.days() <= count)
                .map(|p| p.to_string())
                .collect();
            println!("usable lookbacks: {}", usable.join(", "));
        }
        None => warn!("{}: no data found", port.path().display()),
    }
    Ok(())
}

fn warn_if_short(bars: &[Bar], bt: &BacktestConfig) {
    if bars.len() < bt.lookback.days() {
        warn!(
            "only {} bars for a {}-day lookback; no trades can qualify",
            bars.len(),
            bt.lookback
        );
    }
}

fn warn_if_empty(result: &BacktestResult) {
    if result.trades.is_empty() {
        warn!(
            "no qualifying trades for lookback {} / {:.2}% {}; rates and profit factor are undefined",
            result.config.lookback, result.config.pct_threshold, result.config.direction
        );
    }
}
