//! Daily closing-price bar.

use chrono::{Datelike, NaiveDate, Weekday};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub close: f64,
    pub weekday: Weekday,
}

impl Bar {
    /// Builds a bar, deriving the weekday from the date.
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            close,
            weekday: date.weekday(),
        }
    }

    pub fn is_friday(&self) -> bool {
        self.weekday == Weekday::Fri
    }
}

/// Returns true when dates are strictly ascending (which also rules out duplicates).
pub fn is_strictly_ascending(bars: &[Bar]) -> bool {
    bars.windows(2).all(|w| w[0].date < w[1].date)
}
