//! CSV price history adapter.
//!
//! Reads index exports such as
//! `Index Name,Date,Open,High,Low,Close` / `NIFTY 50,30 Apr 2014,...`.
//! Only the `Date` and `Close` columns are used; they are located by header
//! name, case-insensitively, so column order and extra columns do not matter.

use crate::domain::bar::Bar;
use crate::domain::error::WeekenderError;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Date formats tried after the configured one.
pub const FALLBACK_DATE_FORMATS: [&str; 3] = ["%d %b %Y", "%Y-%m-%d", "%d-%b-%Y"];

#[derive(Debug)]
pub struct CsvAdapter {
    path: PathBuf,
    date_format: Option<String>,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            date_format: None,
        }
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_date(&self, raw: &str, line: u64) -> Result<NaiveDate, WeekenderError> {
        self.date_format
            .iter()
            .map(String::as_str)
            .chain(FALLBACK_DATE_FORMATS)
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .ok_or_else(|| WeekenderError::Data {
                reason: format!("line {line}: unparsable date '{raw}'"),
            })
    }

    fn read_all(&self) -> Result<Vec<Bar>, WeekenderError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| WeekenderError::Data {
                reason: format!("failed to read {}: {}", self.path.display(), e),
            })?;

        let headers = rdr.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| WeekenderError::Data {
                    reason: format!("missing {name} column in {}", self.path.display()),
                })
        };
        let date_col = column("date")?;
        let close_col = column("close")?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let date_str = record.get(date_col).unwrap_or_default();
            let date = self.parse_date(date_str, line)?;

            let close_str = record.get(close_col).unwrap_or_default();
            let close: f64 = close_str
                .replace(',', "")
                .parse()
                .map_err(|e| WeekenderError::Data {
                    reason: format!("line {line}: invalid close value '{close_str}': {e}"),
                })?;
            if !close.is_finite() || close <= 0.0 {
                return Err(WeekenderError::Data {
                    reason: format!("line {line}: close must be positive, got {close}"),
                });
            }

            bars.push(Bar::new(date, close));
        }

        bars.sort_by_key(|b| b.date);
        if let Some(w) = bars.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(WeekenderError::Data {
                reason: format!("duplicate date {}", w[0].date),
            });
        }
        Ok(bars)
    }
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Bar>, WeekenderError> {
        let bars = self
            .read_all()?
            .into_iter()
            .filter(|b| start_date.is_none_or(|s| b.date >= s))
            .filter(|b| end_date.is_none_or(|e| b.date <= e))
            .collect();
        Ok(bars)
    }

    fn get_data_range(&self) -> Result<Option<(NaiveDate, NaiveDate, usize)>, WeekenderError> {
        let bars = self.read_all()?;
        Ok(match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, bars.len())),
            _ => None,
        })
    }
}
