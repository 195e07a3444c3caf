//! Weekend trades: Friday close to the next trading day's close.

use crate::domain::calendar::TradingCalendar;
use crate::domain::direction::Direction;
use crate::domain::moving_average::AnnotatedBar;
use crate::domain::signal::Signal;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub signal_date: NaiveDate,
    pub signal_close: f64,
    pub entry_date: NaiveDate,
    pub entry_close: f64,
    pub exit_date: NaiveDate,
    pub exit_close: f64,
    pub direction: Direction,
    pub absolute_return: f64,
    pub percent_return: f64,
    pub is_win: bool,
}

impl Trade {
    /// Prices a round trip; returns are rounded to 2 decimals and a
    /// rounded return of exactly zero is not a win.
    pub fn open_close(
        signal: &AnnotatedBar,
        entry: &AnnotatedBar,
        exit: &AnnotatedBar,
        direction: Direction,
    ) -> Self {
        let entry_close = entry.bar.close;
        let exit_close = exit.bar.close;
        let raw = match direction {
            Direction::Long => exit_close - entry_close,
            Direction::Short => entry_close - exit_close,
        };
        let percent_return = round2(raw / entry_close * 100.0);

        Trade {
            signal_date: signal.bar.date,
            signal_close: signal.bar.close,
            entry_date: entry.bar.date,
            entry_close,
            exit_date: exit.bar.date,
            exit_close,
            direction,
            absolute_return: round2(raw),
            percent_return,
            is_win: percent_return > 0.0,
        }
    }

    pub fn holding_days(&self) -> i64 {
        (self.exit_date - self.entry_date).num_days()
    }
}

/// Rounds half away from zero to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Builds one trade per signal whose Friday has a following trading day.
///
/// Output is ordered by entry date because signals are.
pub fn build_trades(annotated: &[AnnotatedBar], signals: &[Signal], direction: Direction) -> Vec<Trade> {
    let calendar = TradingCalendar::new(annotated.iter().map(|a| a.bar.date).collect());
    build_with_calendar(annotated, &calendar, signals, direction)
}

pub fn build_with_calendar(
    annotated: &[AnnotatedBar],
    calendar: &TradingCalendar,
    signals: &[Signal],
    direction: Direction,
) -> Vec<Trade> {
    signals
        .iter()
        .filter_map(|s| {
            let exit = calendar.next_index(s.friday)?;
            Some(Trade::open_close(
                &annotated[s.prior],
                &annotated[s.friday],
                &annotated[exit],
                direction,
            ))
        })
        .collect()
}
