//! weekender: weekend-holding strategy backtester.
//!
//! Buys (or shorts) at the Friday close when the day's move and a moving
//! average filter agree, and exits at the next trading day's close.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
