//! # Types
//!
//! Shared data structures used across all modules of the console.
//!
//! ## Wire format
//!
//! Every record serialises to the console's persisted JSON layout: camelCase
//! fields, upper-case enum tags and dates as ISO-8601 strings in
//! `toISOString` form (`2024-05-01T12:00:00.000Z`). See [`iso8601`].
//!
//! ## Token status as a finite-state machine
//!
//! ```text
//! Deploying ──► Active
//!     └───────► Error
//! ```
//!
//! `Active` and `Error` are terminal. Economic transitions are only accepted
//! while a token is `Active`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Supported chain families.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Chain {
    #[serde(rename = "BNB")]
    Bnb,
    #[serde(rename = "SOL")]
    Sol,
    #[serde(rename = "TON")]
    Ton,
}

impl Chain {
    pub const ALL: [Chain; 3] = [Chain::Bnb, Chain::Sol, Chain::Ton];
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkMode {
    Mainnet,
    Testnet,
}

/// Lifecycle state of a token deployment.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenStatus {
    /// Created, waiting for the simulated confirmation.
    Deploying,
    /// Confirmed; accepts ledger transitions.
    Active,
    /// Deployment failed; the token never becomes usable.
    Error,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Liquidity,
    Burn,
    Mint,
    Lock,
    Swap,
    Bridge,
    Verify,
    Renounce,
    Faucet,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Success,
    Failed,
}

/// Immutable audit record appended by every successful ledger transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Time-derived unique id.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    /// Display string, e.g. `"500000 GEM"` or `"1 BNB → 5000 GEM"`.
    pub amount: String,
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
    /// Synthetic hash-like identifier for explorer links.
    pub hash: String,
}

/// A user-created fungible token and its ledger state.
///
/// Fields are public for display and serialisation; mutation goes through
/// [`crate::ledger`] so that every change is validated and logged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: String,
    pub name: String,
    /// Upper-case ticker.
    pub symbol: String,
    pub chain: Chain,
    pub network_mode: NetworkMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    pub total_supply: f64,
    /// Balance of the single tracked holder; never exceeds `total_supply`.
    pub holder_balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    pub status: TokenStatus,

    /// Flips false → true once and never reverts.
    pub ownership_renounced: bool,
    pub liquidity_locked: bool,
    /// Sum of all lock actions.
    pub locked_amount: f64,
    /// Unlock date of the most recent lock; earlier locks are overwritten.
    #[serde(
        default,
        with = "iso8601::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub unlock_date: Option<DateTime<Utc>>,

    // Market snapshot, display only.
    pub price: f64,
    pub liquidity_usd: f64,

    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
    /// Newest first.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Token {
    pub fn is_active(&self) -> bool {
        self.status == TokenStatus::Active
    }

    /// A contract address has been assigned by a confirmed deployment.
    pub fn has_verified_contract(&self) -> bool {
        self.contract_address
            .as_deref()
            .map(|address| !address.trim().is_empty())
            .unwrap_or(false)
    }

    /// Most recent transaction, if any.
    pub fn latest_transaction(&self) -> Option<&Transaction> {
        self.transactions.first()
    }

    /// Prepend `tx` so the log stays newest-first.
    pub(crate) fn record(&mut self, tx: Transaction) {
        self.transactions.insert(0, tx);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LaunchpadStatus {
    Live,
    Ended,
}

/// A fundraising project derived from a console token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchpadProject {
    pub id: String,
    pub token_id: String,
    pub token_name: String,
    pub token_symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_logo: Option<String>,
    pub chain: Chain,
    /// Native currency. Strictly below `hard_cap` at creation.
    pub soft_cap: f64,
    pub hard_cap: f64,
    /// Tokens per native unit, fixed at creation.
    pub rate: f64,
    pub raised_amount: f64,
    pub participants: u32,
    #[serde(with = "iso8601")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "iso8601")]
    pub end_time: DateTime<Utc>,
    pub status: LaunchpadStatus,
}

impl LaunchpadProject {
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.status == LaunchpadStatus::Live && now < self.end_time
    }

    /// Raised amount as a percentage of the hard cap.
    pub fn progress_percent(&self) -> f64 {
        if self.hard_cap <= 0.0 {
            return 0.0;
        }
        self.raised_amount / self.hard_cap * 100.0
    }

    pub fn soft_cap_reached(&self) -> bool {
        self.raised_amount >= self.soft_cap
    }
}

/// Native-currency balance of the connected wallet on one chain / mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeAccount {
    pub chain: Chain,
    pub network_mode: NetworkMode,
    pub balance: f64,
}

impl NativeAccount {
    pub fn empty(chain: Chain, network_mode: NetworkMode) -> Self {
        Self {
            chain,
            network_mode,
            balance: 0.0,
        }
    }
}

/// The connected wallet. Accounts are created lazily with a zero balance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub accounts: Vec<NativeAccount>,
}

impl Wallet {
    pub fn balance(&self, chain: Chain, mode: NetworkMode) -> f64 {
        self.account(chain, mode).map(|a| a.balance).unwrap_or(0.0)
    }

    pub fn account(&self, chain: Chain, mode: NetworkMode) -> Option<&NativeAccount> {
        self.accounts
            .iter()
            .find(|a| a.chain == chain && a.network_mode == mode)
    }

    /// Balances must be finite and non-negative.
    pub fn set_balance(&mut self, chain: Chain, mode: NetworkMode, balance: f64) -> Result<()> {
        if !(balance.is_finite() && balance >= 0.0) {
            return Err(Error::InvalidAmount);
        }
        self.account_mut(chain, mode).balance = balance;
        Ok(())
    }

    /// Replace the account for `account`'s chain and mode.
    pub(crate) fn store_account(&mut self, account: NativeAccount) {
        let (chain, mode) = (account.chain, account.network_mode);
        *self.account_mut(chain, mode) = account;
    }

    pub fn account_mut(&mut self, chain: Chain, mode: NetworkMode) -> &mut NativeAccount {
        let position = self
            .accounts
            .iter()
            .position(|a| a.chain == chain && a.network_mode == mode);
        let index = match position {
            Some(index) => index,
            None => {
                self.accounts.push(NativeAccount::empty(chain, mode));
                self.accounts.len() - 1
            }
        };
        &mut self.accounts[index]
    }
}

/// Serde adapter writing `DateTime<Utc>` the way `Date.prototype.toISOString`
/// does (millisecond precision, `Z` suffix). Any RFC 3339 string is accepted
/// on the way back in.
pub mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw).map(|d| d.with_timezone(&Utc))
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(D::Error::custom)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(date) => s.serialize_some(&super::format(date)),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(d)?
                .map(|raw| super::parse(&raw).map_err(D::Error::custom))
                .transpose()
        }
    }
}
