//! Trailing simple moving average over closing prices.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i])
//! Warmup: the first (n-1) bars carry no average.

use crate::domain::bar::Bar;
use crate::domain::error::WeekenderError;
use std::fmt;

/// Lookback presets offered for the moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookbackPeriod {
    Days20,
    Days50,
    Days100,
    Days200,
    Days252,
}

impl LookbackPeriod {
    pub const ALL: [LookbackPeriod; 5] = [
        LookbackPeriod::Days20,
        LookbackPeriod::Days50,
        LookbackPeriod::Days100,
        LookbackPeriod::Days200,
        LookbackPeriod::Days252,
    ];

    pub fn days(self) -> usize {
        match self {
            LookbackPeriod::Days20 => 20,
            LookbackPeriod::Days50 => 50,
            LookbackPeriod::Days100 => 100,
            LookbackPeriod::Days200 => 200,
            LookbackPeriod::Days252 => 252,
        }
    }
}

impl TryFrom<usize> for LookbackPeriod {
    type Error = WeekenderError;

    fn try_from(days: usize) -> Result<Self, Self::Error> {
        LookbackPeriod::ALL
            .into_iter()
            .find(|p| p.days() == days)
            .ok_or_else(|| {
                WeekenderError::invalid(
                    "backtest",
                    "lookback",
                    format!("{days} is not one of 20, 50, 100, 200, 252"),
                )
            })
    }
}

impl fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.days())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotatedBar {
    pub bar: Bar,
    pub moving_average: Option<f64>,
}

/// Annotates every bar with its trailing moving average.
///
/// Returns an empty vector when there are fewer than `period` bars.
pub fn annotate(bars: &[Bar], period: usize) -> Vec<AnnotatedBar> {
    if period == 0 || bars.len() < period {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(bars.len());
    let mut window_sum = 0.0_f64;

    for (i, bar) in bars.iter().enumerate() {
        window_sum += bar.close;
        if i >= period {
            window_sum -= bars[i - period].close;
        }

        let moving_average = if i + 1 >= period {
            Some(window_sum / period as f64)
        } else {
            None
        };

        out.push(AnnotatedBar {
            bar: *bar,
            moving_average,
        });
    }

    out
}
