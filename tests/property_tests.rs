//! Property tests for backtest invariants.
//!
//! Uses proptest to verify:
//! 1. Moving average coverage: undefined for exactly the first N-1 bars
//! 2. Trade shape: entry on a Friday, signal and exit are its neighbouring bars
//! 3. Entry conditions hold for every trade
//! 4. Determinism: repeated runs give identical trade lists
//! 5. Streak runs partition the trade list
//! 6. Undefined metrics appear exactly when their denominator is zero

mod common;

use common::*;
use proptest::prelude::*;
use weekender::domain::backtest::run_backtest;
use weekender::domain::bar::Bar;
use weekender::domain::direction::Direction;
use weekender::domain::metrics::{streak_counts, streak_runs, PerformanceMetrics};
use weekender::domain::moving_average::{annotate, LookbackPeriod};
use weekender::domain::signal::exceeds_threshold;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_close() -> impl Strategy<Value = f64> {
    (50.0..150.0_f64).prop_map(|c| (c * 100.0).round() / 100.0)
}

/// Weekday series with random holidays removed.
fn arb_series() -> impl Strategy<Value = Vec<Bar>> {
    prop::collection::vec((arb_close(), prop::bool::weighted(0.05)), 0..160).prop_map(|rows| {
        let closes: Vec<f64> = rows.iter().map(|(c, _)| *c).collect();
        weekday_bars(&closes)
            .into_iter()
            .zip(rows)
            .filter(|(_, (_, holiday))| !holiday)
            .map(|(bar, _)| bar)
            .collect()
    })
}

fn arb_lookback() -> impl Strategy<Value = LookbackPeriod> {
    prop::sample::select(vec![LookbackPeriod::Days20, LookbackPeriod::Days50])
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Long), Just(Direction::Short)]
}

fn arb_pct() -> impl Strategy<Value = f64> {
    prop::sample::select(vec![0.0, 0.15, 0.5, 1.0, 2.0])
}

// ── 1. Moving average coverage ───────────────────────────────────────

proptest! {
    #[test]
    fn moving_average_defined_from_nth_bar(bars in arb_series(), lookback in arb_lookback()) {
        let n = lookback.days();
        let annotated = annotate(&bars, n);
        if bars.len() < n {
            prop_assert!(annotated.is_empty());
        } else {
            prop_assert_eq!(annotated.len(), bars.len());
            let undefined = annotated.iter().filter(|a| a.moving_average.is_none()).count();
            prop_assert_eq!(undefined, n - 1);
            prop_assert!(annotated[n - 1].moving_average.is_some());
        }
    }
}

// ── 2-4. Trade shape, entry conditions, determinism ──────────────────

proptest! {
    #[test]
    fn trades_follow_the_weekend_rules(
        bars in arb_series(),
        lookback in arb_lookback(),
        pct in arb_pct(),
        direction in arb_direction(),
    ) {
        let cfg = config(lookback, pct, direction);
        let trades = run_backtest(&bars, &cfg);
        let annotated = annotate(&bars, lookback.days());

        for trade in &trades {
            let entry = bars.iter().position(|b| b.date == trade.entry_date).unwrap();
            prop_assert!(bars[entry].is_friday());
            prop_assert!(entry >= 1 && entry + 1 < bars.len());
            prop_assert_eq!(bars[entry - 1].date, trade.signal_date);
            prop_assert_eq!(bars[entry + 1].date, trade.exit_date);

            let prior_ma = annotated[entry - 1].moving_average.unwrap();
            prop_assert!(trade.entry_close > prior_ma);
            prop_assert!(exceeds_threshold(trade.signal_close, trade.entry_close, pct, direction));
            prop_assert_eq!(trade.is_win, trade.percent_return > 0.0);
        }

        prop_assert_eq!(&trades, &run_backtest(&bars, &cfg));
    }
}

// ── 5-6. Streaks and undefined metrics ───────────────────────────────

proptest! {
    #[test]
    fn streaks_and_undefined_metrics(
        bars in arb_series(),
        pct in arb_pct(),
        direction in arb_direction(),
    ) {
        let trades = run_backtest(&bars, &config(LookbackPeriod::Days20, pct, direction));
        let runs = streak_runs(&trades);

        prop_assert_eq!(runs.iter().map(|r| r.len).sum::<usize>(), trades.len());
        prop_assert!(runs.windows(2).all(|w| w[0].is_win != w[1].is_win));
        prop_assert_eq!(streak_counts(&trades).len(), trades.len());

        let m = PerformanceMetrics::compute(&trades);
        prop_assert_eq!(m.win_rate_pct.is_none(), trades.is_empty());
        prop_assert_eq!(m.profit_factor.is_none(), m.total_loss_points == 0.0);
        prop_assert_eq!(m.avg_points.is_none(), m.total_winning_trades == 0);
        prop_assert_eq!(m.total_winning_trades + m.total_losing_trades(), m.total_trades);
    }
}
