//! Plain-text tables for metrics output.
//!
//! Provides:
//! - the two-column metric/value table shown after a run
//! - a side-by-side table comparing two runs
//! - the run parameter summary

use crate::domain::backtest::BacktestConfig;
use crate::domain::metrics::PerformanceMetrics;
use chrono::NaiveDate;

pub const UNDEFINED: &str = "undefined";

/// Metric labels with their meaning, in display order.
pub const GLOSSARY: [(&str, &str); 13] = [
    ("Total Trades", "count of all trades that satisfied the entry criteria"),
    ("Winning Trades", "count of trades with a positive return"),
    ("Win Rate %", "share of winning trades among all trades"),
    ("Loss Rate %", "share of non-winning trades among all trades"),
    ("Avg Points", "mean points gained over winning trades"),
    ("Median Points", "median points gained over winning trades"),
    ("Total Win Points", "sum of points gained over winning trades"),
    ("Total Loss Points", "sum of points lost over losing trades, as a positive number"),
    ("Max Win Points", "largest points gained in a single trade"),
    ("Profit Factor", "total win points divided by total loss points"),
    ("OAPF", "profit factor after removing the single largest win"),
    ("Winning Streak", "longest run of consecutive winning trades"),
    ("Losing Streak", "longest run of consecutive losing trades"),
];

pub fn format_opt(value: Option<f64>) -> String {
    value.map_or_else(|| UNDEFINED.to_string(), |v| format!("{:.2}", v))
}

/// (label, value) pairs in the same order as [`GLOSSARY`].
pub fn metric_rows(m: &PerformanceMetrics) -> Vec<(&'static str, String)> {
    let values = [
        m.total_trades.to_string(),
        m.total_winning_trades.to_string(),
        format_opt(m.win_rate_pct),
        format_opt(m.loss_rate_pct),
        format_opt(m.avg_points),
        format_opt(m.median_points),
        format!("{:.2}", m.total_win_points),
        format!("{:.2}", m.total_loss_points),
        format_opt(m.max_win_points),
        format_opt(m.profit_factor),
        format_opt(m.oapf),
        m.winning_streak.to_string(),
        m.losing_streak.to_string(),
    ];
    GLOSSARY
        .iter()
        .map(|(label, _)| *label)
        .zip(values)
        .collect()
}

pub fn render_metrics_table(m: &PerformanceMetrics) -> String {
    let rows = metric_rows(m);
    let width = label_width();
    let mut output = String::new();
    for (label, value) in rows {
        output.push_str(&format!("{:<width$}  {:>12}\n", label, value));
    }
    output
}

pub fn render_side_by_side(
    left: (&BacktestConfig, &PerformanceMetrics),
    right: (&BacktestConfig, &PerformanceMetrics),
) -> String {
    let width = label_width();
    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:>16}  {:>16}\n",
        "",
        column_title(left.0),
        column_title(right.0)
    ));
    for ((label, l), (_, r)) in metric_rows(left.1).into_iter().zip(metric_rows(right.1)) {
        output.push_str(&format!("{:<width$}  {:>16}  {:>16}\n", label, l, r));
    }
    output
}

pub fn render_run_summary(
    config: &BacktestConfig,
    range: Option<(NaiveDate, NaiveDate, usize)>,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("DMA lookback period: {} days\n", config.lookback));
    output.push_str(&format!("% change:            {:.2}%\n", config.pct_threshold));
    output.push_str(&format!("Direction:           {}\n", config.direction));
    if let Some((start, end, count)) = range {
        output.push_str(&format!(
            "Data:                {} bars, {} to {}\n",
            count, start, end
        ));
    }
    output
}

pub fn render_glossary() -> String {
    let width = label_width();
    GLOSSARY
        .iter()
        .map(|(label, meaning)| format!("{:<width$}  {}\n", label, meaning))
        .collect()
}

fn column_title(config: &BacktestConfig) -> String {
    format!("{} / {:.2}%", config.lookback, config.pct_threshold)
}

fn label_width() -> usize {
    GLOSSARY.iter().map(|(l, _)| l.len()).max().unwrap_or(0)
}
