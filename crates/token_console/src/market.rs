//! Market data capability.
//!
//! Price, 24h change and liquidity are display-only. They come from an
//! injected [`MarketFeed`] so tests can pin them.

use serde::Serialize;

use crate::types::Chain;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    /// USD.
    pub price: f64,
    /// Percent.
    pub change_24h: f64,
    pub liquidity_usd: f64,
}

pub trait MarketFeed {
    fn snapshot(&mut self, symbol: &str, chain: Chain) -> MarketSnapshot;
}

/// Simulated market with reproducible output per seed.
#[derive(Clone, Debug)]
pub struct SeededMarket {
    rng: fastrand::Rng,
}

impl SeededMarket {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + self.rng.f64() * (high - low)
    }
}

impl MarketFeed for SeededMarket {
    fn snapshot(&mut self, _symbol: &str, _chain: Chain) -> MarketSnapshot {
        MarketSnapshot {
            price: self.range(0.000_1, 0.01),
            change_24h: self.range(-10.0, 10.0),
            liquidity_usd: self.range(1_000.0, 50_000.0),
        }
    }
}

/// Feed that always returns the same snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedMarket(pub MarketSnapshot);

impl MarketFeed for FixedMarket {
    fn snapshot(&mut self, _symbol: &str, _chain: Chain) -> MarketSnapshot {
        self.0
    }
}
