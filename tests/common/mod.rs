#![allow(dead_code)]

use chrono::{Datelike, NaiveDate, Weekday};
use weekender::domain::backtest::BacktestConfig;
use weekender::domain::bar::Bar;
use weekender::domain::direction::Direction;
use weekender::domain::error::WeekenderError;
use weekender::domain::moving_average::LookbackPeriod;
use weekender::ports::data_port::DataPort;

pub struct MockDataPort {
    pub bars: Vec<Bar>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            bars: Vec::new(),
            error: None,
        }
    }

    pub fn with_bars(mut self, bars: Vec<Bar>) -> Self {
        self.bars = bars;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Bar>, WeekenderError> {
        if let Some(reason) = &self.error {
            return Err(WeekenderError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .bars
            .iter()
            .filter(|b| start_date.is_none_or(|s| b.date >= s))
            .filter(|b| end_date.is_none_or(|e| b.date <= e))
            .copied()
            .collect())
    }

    fn get_data_range(&self) -> Result<Option<(NaiveDate, NaiveDate, usize)>, WeekenderError> {
        if let Some(reason) = &self.error {
            return Err(WeekenderError::Data {
                reason: reason.clone(),
            });
        }
        Ok(match (self.bars.first(), self.bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, self.bars.len())),
            _ => None,
        })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(date_str: &str, close: f64) -> Bar {
    Bar::new(
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        close,
    )
}

/// Consecutive weekday bars starting at `start` (skipping weekends).
pub fn weekday_bars_from(start: NaiveDate, closes: &[f64]) -> Vec<Bar> {
    let mut date = start;
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

/// Weekday bars from Monday 2024-01-01.
pub fn weekday_bars(closes: &[f64]) -> Vec<Bar> {
    weekday_bars_from(date(2024, 1, 1), closes)
}

/// 23 bars at 95, then Thu 2024-02-01 = 100, Fri 2024-02-02 = `friday_close`,
/// Mon 2024-02-05 = 103. With a 20-day lookback the Thursday average is 95.25.
pub fn rising_weekend(friday_close: f64) -> Vec<Bar> {
    let mut closes = vec![95.0; 23];
    closes.extend([100.0, friday_close, 103.0]);
    weekday_bars(&closes)
}

pub fn config(lookback: LookbackPeriod, pct: f64, direction: Direction) -> BacktestConfig {
    BacktestConfig::new(lookback, pct, direction).unwrap()
}

pub fn csv_content(bars: &[Bar]) -> String {
    let mut out = String::from("Index Name,Date,Open,High,Low,Close\n");
    for bar in bars {
        out.push_str(&format!(
            "NIFTY 50,{},0,0,0,{}\n",
            bar.date.format("%d %b %Y"),
            bar.close
        ));
    }
    out
}
