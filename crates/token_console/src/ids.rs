//! Identifier generation: token / project / transaction ids, synthetic
//! transaction hashes and simulated contract addresses.
//!
//! Backed by a seedable [`fastrand::Rng`] so that a seeded console produces
//! the same identifiers on every run.

use chrono::{DateTime, Utc};

use crate::types::Chain;

const HEX: &[u8] = b"0123456789abcdef";
const BASE58: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const BASE64_URL: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

#[derive(Clone, Debug)]
pub struct IdGenerator {
    rng: fastrand::Rng,
    sequence: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
            sequence: 0,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            sequence: 0,
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(Self::with_seed).unwrap_or_default()
    }

    pub fn token_id(&mut self, now: DateTime<Utc>) -> String {
        format!("{}{}", now.timestamp_millis(), self.pick(HEX, 6))
    }

    pub fn project_id(&mut self, now: DateTime<Utc>) -> String {
        format!("lp-{}{}", now.timestamp_millis(), self.pick(HEX, 6))
    }

    /// Millisecond timestamp plus a per-generator sequence number, so two
    /// transactions in the same millisecond still get distinct ids.
    pub fn transaction_id(&mut self, now: DateTime<Utc>) -> String {
        self.sequence += 1;
        format!("{}-{}", now.timestamp_millis(), self.sequence)
    }

    pub fn tx_hash(&mut self) -> String {
        format!("0x{}", self.pick(HEX, 64))
    }

    /// A plausible-looking address in the chain's native format.
    pub fn contract_address(&mut self, chain: Chain) -> String {
        match chain {
            Chain::Bnb => format!("0x{}", self.pick(HEX, 40)),
            Chain::Sol => self.pick(BASE58, 44),
            Chain::Ton => format!("EQ{}", self.pick(BASE64_URL, 46)),
        }
    }

    pub fn wallet_address(&mut self, chain: Chain) -> String {
        self.contract_address(chain)
    }

    fn pick(&mut self, alphabet: &[u8], len: usize) -> String {
        (0..len)
            .map(|_| alphabet[self.rng.usize(..alphabet.len())] as char)
            .collect()
    }
}
