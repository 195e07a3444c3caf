//! Backtest engine entry points.
//!
//! `run_backtest` annotates the series with its moving average, evaluates every
//! Friday and prices the qualifying weekends. It is pure: identical inputs
//! always give identical trade lists, and the caller's bars are only borrowed.

use crate::domain::bar::{is_strictly_ascending, Bar};
use crate::domain::calendar::TradingCalendar;
use crate::domain::direction::Direction;
use crate::domain::error::WeekenderError;
use crate::domain::metrics::PerformanceMetrics;
use crate::domain::moving_average::{annotate, LookbackPeriod};
use crate::domain::signal::evaluate_with_calendar;
use crate::domain::trade::{build_with_calendar, Trade};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacktestConfig {
    pub lookback: LookbackPeriod,
    pub pct_threshold: f64,
    pub direction: Direction,
}

impl BacktestConfig {
    pub fn new(
        lookback: LookbackPeriod,
        pct_threshold: f64,
        direction: Direction,
    ) -> Result<Self, WeekenderError> {
        if !pct_threshold.is_finite() || pct_threshold < 0.0 {
            return Err(WeekenderError::invalid(
                "backtest",
                "pct_change",
                "pct_change must be a non-negative number",
            ));
        }
        Ok(Self {
            lookback,
            pct_threshold,
            direction,
        })
    }

    /// Default trade log file name, e.g. `trade_log_200_0.15.csv`. Whole
    /// percentages keep their decimal point (`trade_log_20_1.0.csv`).
    pub fn trade_log_name(&self) -> String {
        format!("trade_log_{}_{:?}.csv", self.lookback, self.pct_threshold)
    }
}

/// One complete run: its parameters, trade log and summary.
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub config: BacktestConfig,
    pub trades: Vec<Trade>,
    pub metrics: PerformanceMetrics,
    /// First date, last date and bar count of the input series.
    pub data_range: Option<(NaiveDate, NaiveDate, usize)>,
}

impl BacktestResult {
    pub fn new(config: BacktestConfig, trades: Vec<Trade>) -> Self {
        let metrics = compute_metrics(&trades);
        Self {
            config,
            trades,
            metrics,
            data_range: None,
        }
    }

    pub fn with_data_range(mut self, bars: &[Bar]) -> Self {
        self.data_range = match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, bars.len())),
            _ => None,
        };
        self
    }
}

pub fn run_backtest(bars: &[Bar], config: &BacktestConfig) -> Vec<Trade> {
    debug_assert!(is_strictly_ascending(bars), "bars must be date-ordered and unique");
    let annotated = annotate(bars, config.lookback.days());
    if annotated.is_empty() {
        tracing::debug!(
            bars = bars.len(),
            lookback = config.lookback.days(),
            "not enough bars for lookback"
        );
        return Vec::new();
    }

    let calendar = TradingCalendar::new(annotated.iter().map(|a| a.bar.date).collect());
    let signals = evaluate_with_calendar(
        &annotated,
        &calendar,
        config.pct_threshold,
        config.direction,
    );
    let trades = build_with_calendar(&annotated, &calendar, &signals, config.direction);

    tracing::debug!(
        bars = bars.len(),
        signals = signals.len(),
        trades = trades.len(),
        "backtest complete"
    );
    trades
}

pub fn compute_metrics(trades: &[Trade]) -> PerformanceMetrics {
    PerformanceMetrics::compute(trades)
}

/// Runs and summarizes in one step.
pub fn run(bars: &[Bar], config: &BacktestConfig) -> BacktestResult {
    BacktestResult::new(*config, run_backtest(bars, config)).with_data_range(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Datelike, Weekday};

    /// Weekday bars from Monday 2024-01-01 with the given closes.
    fn weekday_bars(closes: &[f64]) -> Vec<Bar> {
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut bars = Vec::with_capacity(closes.len());
        for &close in closes {
            while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                date = date.succ_opt().unwrap();
            }
            bars.push(Bar::new(date, close));
            date = date.succ_opt().unwrap();
        }
        bars
    }

    /// 23 flat bars, then Thu 2024-02-01 = 100, Fri = 101.5, Mon = 103.
    fn rising_weekend(friday_close: f64) -> Vec<Bar> {
        let mut closes = vec![95.0; 23];
        closes.extend([100.0, friday_close, 103.0]);
        weekday_bars(&closes)
    }

    fn config(pct: f64, direction: Direction) -> BacktestConfig {
        BacktestConfig::new(LookbackPeriod::Days20, pct, direction).unwrap()
    }

    #[test]
    fn qualifying_friday_produces_trade() {
        let bars = rising_weekend(101.5);
        let trades = run_backtest(&bars, &config(1.0, Direction::Long));

        assert_eq!(trades.len(), 1);
        let t = &trades[0];
        assert_eq!(t.entry_date, NaiveDate::from_ymd_opt(2024, 2, 2).unwrap());
        assert_eq!(t.exit_date, NaiveDate::from_ymd_opt(2024, 2, 5).unwrap());
        assert_relative_eq!(t.absolute_return, 1.5);
        assert_relative_eq!(t.percent_return, 1.48);
        assert!(t.is_win);
    }

    #[test]
    fn small_friday_move_produces_nothing() {
        let bars = rising_weekend(100.5);
        assert!(run_backtest(&bars, &config(1.0, Direction::Long)).is_empty());
    }

    #[test]
    fn insufficient_data_is_empty_not_error() {
        let bars = weekday_bars(&[100.0; 10]);
        let result = run(&bars, &config(0.0, Direction::Long));
        assert!(result.trades.is_empty());
        assert_eq!(result.metrics.win_rate_pct, None);
        assert_eq!(result.data_range.map(|r| r.2), Some(10));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let bars = rising_weekend(101.5);
        let cfg = config(1.0, Direction::Long);
        assert_eq!(run_backtest(&bars, &cfg), run_backtest(&bars, &cfg));
    }

    #[test]
    fn negative_threshold_rejected() {
        assert!(BacktestConfig::new(LookbackPeriod::Days20, -0.1, Direction::Long).is_err());
        assert!(BacktestConfig::new(LookbackPeriod::Days20, f64::NAN, Direction::Long).is_err());
    }

    #[test]
    fn trade_log_name_uses_parameters() {
        let cfg = BacktestConfig::new(LookbackPeriod::Days200, 0.15, Direction::Long).unwrap();
        assert_eq!(cfg.trade_log_name(), "trade_log_200_0.15.csv");

        let whole = BacktestConfig::new(LookbackPeriod::Days20, 1.0, Direction::Long).unwrap();
        assert_eq!(whole.trade_log_name(), "trade_log_20_1.0.csv");
    }
}
