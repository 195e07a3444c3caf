//! Core domain types and logic.

pub mod bar;
pub mod calendar;
pub mod moving_average;
pub mod direction;
pub mod signal;
pub mod trade;
pub mod backtest;
pub mod metrics;
pub mod config_validation;
pub mod error;
