//! # Configuration
//!
//! Console-wide constants plus the overridable [`ConsoleConfig`].
//!
//! | Constant                 | Value     | Used by                          |
//! |--------------------------|-----------|----------------------------------|
//! | `PLATFORM_FEE_PERCENT`   | `0.03`    | [`crate::fees::compute_fee`]     |
//! | `SWAP_RATE`              | `5000`    | swap transition (tokens / native)|
//! | `MAX_SYMBOL_LEN`         | `10`      | token creation                   |
//! | `CONFIRMATION_DELAY_MS`  | `2000`    | DEPLOYING → ACTIVE               |
//! | `SERVICE_FEE_FLOOR`      | `0.01`    | ownership renouncement           |
//! | `FAUCET_AMOUNT`          | `0.5`     | testnet faucet                   |
//!
//! The platform fee percentage is fixed and therefore not part of the
//! overridable config.

use serde::{Deserialize, Serialize};

use crate::types::{Chain, NetworkMode};
use crate::Error;

// ── Economic constants ───────────────────────────────────────────────

/// Share of the principal taken as platform fee.
pub const PLATFORM_FEE_PERCENT: f64 = 0.03;

/// Tokens received per native unit on swaps.
pub const SWAP_RATE: f64 = 5_000.0;

/// Native amount debited when ownership is renounced.
pub const SERVICE_FEE_FLOOR: f64 = 0.01;

/// Native amount credited by one testnet faucet drip.
pub const FAUCET_AMOUNT: f64 = 0.5;

// ── Lifecycle constants ──────────────────────────────────────────────

/// Symbols longer than this fail deployment.
pub const MAX_SYMBOL_LEN: usize = 10;

/// Simulated block confirmation time for a freshly created token.
pub const CONFIRMATION_DELAY_MS: i64 = 2_000;

// ── Storage keys ─────────────────────────────────────────────────────

pub const TOKENS_KEY: &str = "tokens";
pub const LAUNCHPAD_KEY: &str = "launchpad_projects";

/// Network fee estimate for one chain, per network mode.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeFees {
    pub mainnet: f64,
    pub testnet: f64,
}

impl ModeFees {
    pub fn for_mode(&self, mode: NetworkMode) -> f64 {
        match mode {
            NetworkMode::Mainnet => self.mainnet,
            NetworkMode::Testnet => self.testnet,
        }
    }
}

/// Gas / network fee estimates handed to the fee model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkFees {
    pub bnb: ModeFees,
    pub sol: ModeFees,
    pub ton: ModeFees,
}

impl NetworkFees {
    pub fn estimate(&self, chain: Chain, mode: NetworkMode) -> f64 {
        match chain {
            Chain::Bnb => self.bnb.for_mode(mode),
            Chain::Sol => self.sol.for_mode(mode),
            Chain::Ton => self.ton.for_mode(mode),
        }
    }

    fn all(&self) -> [f64; 6] {
        [
            self.bnb.mainnet,
            self.bnb.testnet,
            self.sol.mainnet,
            self.sol.testnet,
            self.ton.mainnet,
            self.ton.testnet,
        ]
    }
}

impl Default for NetworkFees {
    fn default() -> Self {
        Self {
            bnb: ModeFees { mainnet: 0.0021, testnet: 0.001 },
            sol: ModeFees { mainnet: 0.000_005, testnet: 0.000_005 },
            ton: ModeFees { mainnet: 0.05, testnet: 0.01 },
        }
    }
}

/// Tunable console parameters.
///
/// Every field has a default, so a partial JSON document only overrides
/// what it names:
///
/// ```
/// use token_console::config::ConsoleConfig;
///
/// let config = ConsoleConfig::from_json(r#"{ "faucetAmount": 2.0, "seed": 7 }"#).unwrap();
/// assert_eq!(config.faucet_amount, 2.0);
/// assert_eq!(config.swap_rate, 5_000.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsoleConfig {
    pub swap_rate: f64,
    pub service_fee_floor: f64,
    pub faucet_amount: f64,
    pub confirmation_delay_ms: i64,
    pub max_symbol_len: usize,
    pub network_fees: NetworkFees,
    /// Seed for ids, synthetic hashes and the simulated market feed.
    /// `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            swap_rate: SWAP_RATE,
            service_fee_floor: SERVICE_FEE_FLOOR,
            faucet_amount: FAUCET_AMOUNT,
            confirmation_delay_ms: CONFIRMATION_DELAY_MS,
            max_symbol_len: MAX_SYMBOL_LEN,
            network_fees: NetworkFees::default(),
            seed: None,
        }
    }
}

impl ConsoleConfig {
    /// Parse a (possibly partial) JSON override document and validate it.
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let config: ConsoleConfig =
            serde_json::from_str(raw).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn network_fee(&self, chain: Chain, mode: NetworkMode) -> f64 {
        self.network_fees.estimate(chain, mode)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.swap_rate.is_finite() && self.swap_rate > 0.0) {
            return Err(Error::InvalidConfig("swapRate must be a positive number".into()));
        }
        if !is_non_negative(self.service_fee_floor) {
            return Err(Error::InvalidConfig(
                "serviceFeeFloor must be a non-negative number".into(),
            ));
        }
        if !(self.faucet_amount.is_finite() && self.faucet_amount > 0.0) {
            return Err(Error::InvalidConfig("faucetAmount must be a positive number".into()));
        }
        if self.confirmation_delay_ms < 0 {
            return Err(Error::InvalidConfig("confirmationDelayMs must not be negative".into()));
        }
        if self.max_symbol_len == 0 {
            return Err(Error::InvalidConfig("maxSymbolLen must be at least 1".into()));
        }
        if !self.network_fees.all().iter().copied().all(is_non_negative) {
            return Err(Error::InvalidConfig(
                "networkFees must be non-negative numbers".into(),
            ));
        }
        Ok(())
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
