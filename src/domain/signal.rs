//! Friday entry signals.
//!
//! A Friday F qualifies when, against the trading day P immediately before it:
//! - F.close > SMA through P (the average never includes F itself)
//! - long:  F.close > P.close * (1 + pct/100)
//!   short: F.close < P.close * (1 - pct/100)
//!
//! Both comparisons are strict. The percentage move is evaluated in decimal
//! arithmetic, so a close exactly at the threshold never qualifies.
//! Fridays are taken from the rows actually present, so a holiday Friday
//! simply produces no candidate.

use crate::domain::calendar::TradingCalendar;
use crate::domain::direction::Direction;
use crate::domain::moving_average::AnnotatedBar;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Positions of a qualifying Friday and its prior trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal {
    pub prior: usize,
    pub friday: usize,
}

pub fn evaluate_signals(
    annotated: &[AnnotatedBar],
    pct_threshold: f64,
    direction: Direction,
) -> Vec<Signal> {
    let calendar = TradingCalendar::new(annotated.iter().map(|a| a.bar.date).collect());
    evaluate_with_calendar(annotated, &calendar, pct_threshold, direction)
}

pub fn evaluate_with_calendar(
    annotated: &[AnnotatedBar],
    calendar: &TradingCalendar,
    pct_threshold: f64,
    direction: Direction,
) -> Vec<Signal> {
    annotated
        .iter()
        .enumerate()
        .filter(|(_, a)| a.bar.is_friday())
        .filter_map(|(friday, _)| {
            let prior = calendar.previous_index(friday)?;
            qualifies(&annotated[prior], &annotated[friday], pct_threshold, direction)
                .then_some(Signal { prior, friday })
        })
        .collect()
}

/// Entry test for one Friday against its prior trading day.
pub fn qualifies(
    prior: &AnnotatedBar,
    friday: &AnnotatedBar,
    pct_threshold: f64,
    direction: Direction,
) -> bool {
    let Some(prior_ma) = prior.moving_average else {
        return false;
    };
    let close = friday.bar.close;
    close > prior_ma && exceeds_threshold(prior.bar.close, close, pct_threshold, direction)
}

/// Strict percentage-move test of `close` against `prior_close`:
/// above `prior * (1 + pct/100)` for long, below `prior * (1 - pct/100)` for short.
pub fn exceeds_threshold(
    prior_close: f64,
    close: f64,
    pct_threshold: f64,
    direction: Direction,
) -> bool {
    let (Some(prior), Some(close), Some(pct)) =
        (decimal(prior_close), decimal(close), decimal(pct_threshold))
    else {
        return false;
    };
    let Some(step) = prior
        .checked_mul(pct)
        .and_then(|m| m.checked_div(Decimal::ONE_HUNDRED))
    else {
        return false;
    };
    match direction {
        Direction::Long => prior.checked_add(step).is_some_and(|bound| close > bound),
        Direction::Short => prior.checked_sub(step).is_some_and(|bound| close < bound),
    }
}

/// Decimal value of a price or percentage as written (0.15, not its nearest
/// binary fraction).
fn decimal(value: f64) -> Option<Decimal> {
    Decimal::from_str(&value.to_string()).ok()
}
