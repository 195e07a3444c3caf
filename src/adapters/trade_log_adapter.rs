//! CSV trade log export implementing ReportPort.

use crate::domain::backtest::BacktestResult;
use crate::domain::direction::Direction;
use crate::domain::error::WeekenderError;
use crate::domain::metrics::streak_counts;
use crate::domain::trade::Trade;
use crate::ports::report_port::ReportPort;
use chrono::NaiveDate;
use serde::Serialize;
use std::io;
use std::path::Path;

/// One row of the exported trade log.
#[derive(Debug, Serialize)]
pub struct TradeLogRow {
    pub signal_date: NaiveDate,
    pub signal_close: f64,
    pub entry_date: NaiveDate,
    pub entry_close: f64,
    pub exit_date: NaiveDate,
    pub exit_close: f64,
    pub direction: Direction,
    pub abs_return: f64,
    pub pct_return: f64,
    pub win: u8,
    pub streak: usize,
}

impl TradeLogRow {
    fn from_trade(trade: &Trade, streak: usize) -> Self {
        Self {
            signal_date: trade.signal_date,
            signal_close: trade.signal_close,
            entry_date: trade.entry_date,
            entry_close: trade.entry_close,
            exit_date: trade.exit_date,
            exit_close: trade.exit_close,
            direction: trade.direction,
            abs_return: trade.absolute_return,
            pct_return: trade.percent_return,
            win: u8::from(trade.is_win),
            streak,
        }
    }
}

pub fn trade_log_rows(trades: &[Trade]) -> Vec<TradeLogRow> {
    trades
        .iter()
        .zip(streak_counts(trades))
        .map(|(t, streak)| TradeLogRow::from_trade(t, streak))
        .collect()
}

/// Serializes the trade log to any writer. The header row is written even
/// when there are no trades.
pub fn write_trade_log<W: io::Write>(trades: &[Trade], writer: W) -> Result<(), WeekenderError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record([
        "signal_date",
        "signal_close",
        "entry_date",
        "entry_close",
        "exit_date",
        "exit_close",
        "direction",
        "abs_return",
        "pct_return",
        "win",
        "streak",
    ])?;
    for row in trade_log_rows(trades) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub struct TradeLogAdapter;

impl TradeLogAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TradeLogAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for TradeLogAdapter {
    fn write(&self, result: &BacktestResult, output_path: &Path) -> Result<(), WeekenderError> {
        let file = std::fs::File::create(output_path).map_err(|e| WeekenderError::Report {
            reason: format!("failed to create {}: {}", output_path.display(), e),
        })?;
        write_trade_log(&result.trades, io::BufWriter::new(file))
    }
}
