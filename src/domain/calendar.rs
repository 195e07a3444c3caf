//! Trading calendar: previous/next trading day over an ordered series.
//!
//! Adjacency is defined by position in the date-ordered series, so a holiday
//! simply shifts the neighbour (a Friday after a Thursday holiday pairs with
//! Wednesday; a Monday holiday pushes the exit to Tuesday).

use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct TradingCalendar {
    dates: Vec<NaiveDate>,
}

impl TradingCalendar {
    /// `dates` must be strictly ascending.
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self { dates }
    }

    /// Position of the trading day before `index`.
    pub fn previous_index(&self, index: usize) -> Option<usize> {
        if index == 0 || index >= self.dates.len() {
            None
        } else {
            Some(index - 1)
        }
    }

    /// Position of the trading day after `index`.
    pub fn next_index(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        (next < self.dates.len()).then_some(next)
    }
}
