//! Performance statistics over a trade list.
//!
//! Ratios that would divide by zero are `None` and displayed as "undefined";
//! they are never coerced to zero.

use super::trade::{round2, Trade};

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    pub total_trades: usize,
    pub total_winning_trades: usize,
    pub win_rate_pct: Option<f64>,
    pub loss_rate_pct: Option<f64>,
    pub avg_points: Option<f64>,
    pub median_points: Option<f64>,
    pub total_win_points: f64,
    pub total_loss_points: f64,
    pub max_win_points: Option<f64>,
    pub profit_factor: Option<f64>,
    pub oapf: Option<f64>,
    pub winning_streak: usize,
    pub losing_streak: usize,
}

/// Maximal run of consecutive trades sharing the same outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakRun {
    pub is_win: bool,
    pub start: usize,
    pub len: usize,
}

impl PerformanceMetrics {
    pub fn compute(trades: &[Trade]) -> Self {
        let total_trades = trades.len();

        let mut wins: Vec<f64> = Vec::new();
        let mut loss_sum = 0.0_f64;
        for trade in trades {
            if trade.is_win {
                wins.push(trade.absolute_return);
            } else {
                loss_sum += trade.absolute_return;
            }
        }

        let total_winning_trades = wins.len();
        let win_sum: f64 = wins.iter().sum();
        let total_win_points = round2(win_sum);
        let total_loss_points = round2(-loss_sum);

        let win_rate_pct = (total_trades > 0)
            .then(|| round2(total_winning_trades as f64 * 100.0 / total_trades as f64));
        let loss_rate_pct = win_rate_pct.map(|w| round2(100.0 - w));

        let avg_points = (!wins.is_empty()).then(|| round2(win_sum / wins.len() as f64));
        let median_points = median(&wins).map(round2);
        let max_win_points = wins.iter().copied().reduce(f64::max);

        let profit_factor = ratio(total_win_points, total_loss_points);
        let oapf = ratio(
            total_win_points - max_win_points.unwrap_or(0.0),
            total_loss_points,
        );

        let runs = streak_runs(trades);
        let longest = |is_win: bool| {
            runs.iter()
                .filter(|r| r.is_win == is_win)
                .map(|r| r.len)
                .max()
                .unwrap_or(0)
        };

        PerformanceMetrics {
            total_trades,
            total_winning_trades,
            win_rate_pct,
            loss_rate_pct,
            avg_points,
            median_points,
            total_win_points,
            total_loss_points,
            max_win_points,
            profit_factor,
            oapf,
            winning_streak: longest(true),
            losing_streak: longest(false),
        }
    }

    pub fn total_losing_trades(&self) -> usize {
        self.total_trades - self.total_winning_trades
    }
}

/// Splits the trade list, in order, into maximal same-outcome runs.
pub fn streak_runs(trades: &[Trade]) -> Vec<StreakRun> {
    let mut runs: Vec<StreakRun> = Vec::new();
    for (i, trade) in trades.iter().enumerate() {
        match runs.last_mut() {
            Some(run) if run.is_win == trade.is_win => run.len += 1,
            _ => runs.push(StreakRun {
                is_win: trade.is_win,
                start: i,
                len: 1,
            }),
        }
    }
    runs
}

/// Running streak counter per trade: 1 on the first trade and on every flip.
pub fn streak_counts(trades: &[Trade]) -> Vec<usize> {
    streak_runs(trades)
        .iter()
        .flat_map(|run| 1..=run.len)
        .collect()
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0).then(|| round2(numerator / denominator))
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
