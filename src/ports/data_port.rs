//! Price series access port.

use crate::domain::bar::Bar;
use crate::domain::error::WeekenderError;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars ascending by date with unique dates, optionally limited to an
    /// inclusive window.
    fn fetch_bars(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Bar>, WeekenderError>;

    /// First date, last date and bar count, or `None` for an empty source.
    fn get_data_range(&self) -> Result<Option<(NaiveDate, NaiveDate, usize)>, WeekenderError>;
}
