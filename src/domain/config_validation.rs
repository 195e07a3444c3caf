//! Configuration parsing and validation.
//!
//! Validates all config fields before a backtest runs.

use crate::domain::backtest::BacktestConfig;
use crate::domain::direction::Direction;
use crate::domain::error::WeekenderError;
use crate::domain::moving_average::LookbackPeriod;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const DEFAULT_LOOKBACK: LookbackPeriod = LookbackPeriod::Days200;
pub const DEFAULT_PCT_CHANGE: f64 = 0.15;
pub const MAX_PCT_CHANGE: f64 = 100.0;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), WeekenderError> {
    validate_data(config)?;
    validate_window(config)?;
    backtest_config_from(config, "backtest", "")?;
    if config.has_section("compare") {
        validate_compare(config)?;
    }
    Ok(())
}

fn validate_data(config: &dyn ConfigPort) -> Result<(), WeekenderError> {
    if config.get_value("data", "path").is_none() {
        return Err(WeekenderError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        });
    }
    Ok(())
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), WeekenderError> {
    let (start, end) = data_window(config)?;
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(WeekenderError::invalid(
                "data",
                "start_date",
                "start_date must be on or before end_date",
            ));
        }
    }
    Ok(())
}

fn validate_compare(config: &dyn ConfigPort) -> Result<(), WeekenderError> {
    for slot in ["1", "2"] {
        for key in ["lookback", "pct_change"] {
            let key = format!("{key}_{slot}");
            if config.get_value("compare", &key).is_none() {
                return Err(WeekenderError::ConfigMissing {
                    section: "compare".to_string(),
                    key,
                });
            }
        }
    }
    compare_configs(config, Direction::default())?;
    Ok(())
}

/// Optional inclusive (start, end) window from `[data]`.
pub fn data_window(
    config: &dyn ConfigPort,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), WeekenderError> {
    Ok((
        parse_date(config, "data", "start_date")?,
        parse_date(config, "data", "end_date")?,
    ))
}

/// Builds a run configuration from `section`, reading `lookback{suffix}` and
/// `pct_change{suffix}`. Direction always comes from `[backtest]`.
pub fn backtest_config_from(
    config: &dyn ConfigPort,
    section: &str,
    suffix: &str,
) -> Result<BacktestConfig, WeekenderError> {
    let lookback = parse_lookback(config, section, &format!("lookback{suffix}"))?
        .unwrap_or(DEFAULT_LOOKBACK);
    let pct = parse_pct(config, section, &format!("pct_change{suffix}"))?
        .unwrap_or(DEFAULT_PCT_CHANGE);
    let direction = parse_direction(config)?.unwrap_or_default();
    BacktestConfig::new(lookback, pct, direction)
}

/// The two side-by-side combinations from `[compare]`.
pub fn compare_configs(
    config: &dyn ConfigPort,
    direction: Direction,
) -> Result<(BacktestConfig, BacktestConfig), WeekenderError> {
    let mut first = backtest_config_from(config, "compare", "_1")?;
    let mut second = backtest_config_from(config, "compare", "_2")?;
    first.direction = direction;
    second.direction = direction;
    Ok((first, second))
}

pub fn parse_lookback(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<LookbackPeriod>, WeekenderError> {
    let Some(raw) = config.get_value(section, key) else {
        return Ok(None);
    };
    let days: usize = raw
        .parse()
        .map_err(|_| WeekenderError::invalid(section, key, format!("'{raw}' is not a whole number")))?;
    LookbackPeriod::try_from(days)
        .map(Some)
        .map_err(|_| WeekenderError::invalid(section, key, "lookback must be one of 20, 50, 100, 200, 252"))
}

pub fn parse_pct(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<f64>, WeekenderError> {
    let Some(raw) = config.get_value(section, key) else {
        return Ok(None);
    };
    let pct: f64 = raw
        .parse()
        .map_err(|_| WeekenderError::invalid(section, key, format!("'{raw}' is not a number")))?;
    check_pct(pct).map_err(|reason| WeekenderError::invalid(section, key, reason))?;
    Ok(Some(pct))
}

/// Percentage change threshold must lie in [0, 100].
pub fn check_pct(pct: f64) -> Result<f64, String> {
    if !pct.is_finite() || !(0.0..=MAX_PCT_CHANGE).contains(&pct) {
        return Err(format!("pct_change must be between 0 and {MAX_PCT_CHANGE}"));
    }
    Ok(pct)
}

pub fn parse_direction(config: &dyn ConfigPort) -> Result<Option<Direction>, WeekenderError> {
    config
        .get_value("backtest", "direction")
        .map(|raw| raw.parse::<Direction>())
        .transpose()
}

fn parse_date(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<NaiveDate>, WeekenderError> {
    config
        .get_value(section, key)
        .map(|raw| {
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                WeekenderError::invalid(section, key, "invalid date format (expected YYYY-MM-DD)")
            })
        })
        .transpose()
}
