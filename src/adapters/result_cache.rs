//! Memoized backtest results keyed by a content fingerprint.
//!
//! The fingerprint hashes the run parameters together with every bar's date and
//! close, so a changed data snapshot never hits a stale entry.

use std::collections::HashMap;
use std::fmt;

use crate::domain::backtest::{self, BacktestConfig, BacktestResult};
use crate::domain::bar::Bar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(blake3::Hash);

impl Fingerprint {
    pub fn of(bars: &[Bar], config: &BacktestConfig) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(config.lookback.days() as u64).to_le_bytes());
        hasher.update(&config.pct_threshold.to_bits().to_le_bytes());
        hasher.update(config.direction.as_str().as_bytes());
        hasher.update(&(bars.len() as u64).to_le_bytes());
        for bar in bars {
            hasher.update(bar.date.to_string().as_bytes());
            hasher.update(&bar.close.to_bits().to_le_bytes());
        }
        Fingerprint(hasher.finalize())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_hex()[..16])
    }
}

#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<Fingerprint, BacktestResult>,
    hits: usize,
    misses: usize,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result for these inputs, running the backtest on a miss.
    pub fn get_or_run(&mut self, bars: &[Bar], config: &BacktestConfig) -> &BacktestResult {
        let key = Fingerprint::of(bars, config);
        if self.entries.contains_key(&key) {
            self.hits += 1;
            tracing::debug!(fingerprint = %key, "result cache hit");
        } else {
            self.misses += 1;
            tracing::debug!(fingerprint = %key, "result cache miss");
        }
        self.entries
            .entry(key)
            .or_insert_with(|| backtest::run(bars, config))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
