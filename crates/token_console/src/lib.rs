//! # Token Console Ledger
//!
//! Core of a multi-chain (BNB, Solana, TON) token management console: the
//! token lifecycle state machine, the launchpad ledger, the fee model and
//! trust scoring. Chains are simulated by a deterministic local ledger; real
//! wallets, chain RPC, the AI service and persistence are reached through
//! small traits.
//!
//! | Phase        | Entry Point(s)                                          |
//! |--------------|---------------------------------------------------------|
//! | Bootstrap    | [`Console::new`], [`Console::open`]                     |
//! | Creation     | [`Console::create_token`], [`Console::deploy_token`]    |
//! | Confirmation | [`Console::confirm_deployments`]                        |
//! | Transitions  | [`Console::execute`], [`Console::verify_contract`]      |
//! | Launchpad    | `create_project`, `record_contribution`, `refresh_launchpad` |
//! | Derived      | [`Console::quote`], [`Console::trust_score`]            |
//! | Queries      | `tokens`, `token`, `projects`, `project`, `events`, `wallet` |
//!
//! ## Architecture
//!
//! Transition rules live in [`ledger`] and [`launchpad`]; derived values in
//! [`fees`] and [`quality`]; persistence in [`storage`]. This file contains
//! only the public entry points and event emission.
//!
//! Every entry point that depends on the clock has an `*_at(now)` variant;
//! the plain variant uses `Utc::now()`.

use chrono::{DateTime, Utc};

pub mod adapter;
pub mod assistant;
pub mod chain;
pub mod config;
pub mod events;
pub mod fees;
pub mod ids;
pub mod launchpad;
pub mod ledger;
pub mod market;
pub mod quality;
pub mod storage;
pub mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

use adapter::{AdapterError, ChainAdapter};
use assistant::{AssistantSession, TextCompletion};
use events::EventLog;
use ids::IdGenerator;
use market::{MarketFeed, SeededMarket};
use storage::{KeyValueStore, StorageError};
use types::NativeAccount;

pub use config::ConsoleConfig;
pub use fees::FeeBreakdown;
pub use launchpad::{ContributionPolicy, LaunchpadLedger, ProjectTerms, Uncapped};
pub use ledger::{Action, CreateTokenRequest, SwapDirection, RENOUNCE_PHRASE};
pub use quality::{TrustLabel, TrustScore};
pub use types::{
    Chain, LaunchpadProject, LaunchpadStatus, NetworkMode, Token, TokenStatus, Transaction,
    TransactionKind, TransactionStatus, Wallet,
};

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Every failure a console operation can report. Validation variants name
/// the precondition that did not hold; the ledger is unchanged whenever one
/// is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("token not found")]
    TokenNotFound,
    #[error("launchpad project not found")]
    ProjectNotFound,
    #[error("amount must be a positive number")]
    InvalidAmount,
    #[error("duration must be at least one day")]
    InvalidDuration,
    #[error("insufficient token balance: required {required}, available {available}")]
    InsufficientBalance { required: f64, available: f64 },
    #[error("insufficient native balance: required {required}, available {available}")]
    InsufficientNativeBalance { required: f64, available: f64 },
    #[error("insufficient pool liquidity: required {required}, available {available}")]
    InsufficientLiquidity { required: f64, available: f64 },
    #[error("ownership has been renounced; minting is disabled")]
    OwnershipRenounced,
    #[error("ownership is already renounced")]
    AlreadyRenounced,
    #[error("confirmation text does not match; type RENOUNCE exactly")]
    ConfirmationMismatch,
    #[error("the faucet is only available on testnet")]
    FaucetMainnet,
    #[error("token is not active")]
    TokenNotActive,
    #[error("token name must not be empty")]
    InvalidName,
    #[error("token symbol is empty or too long")]
    InvalidSymbol,
    #[error("supply must be a positive number")]
    InvalidSupply,
    #[error("caps must be positive and the hard cap must exceed the soft cap")]
    InvalidCaps,
    #[error("rate must be a positive number")]
    InvalidRate,
    #[error("contract address and source code are required")]
    EmptyVerificationInput,
    #[error("contribution rejected: {0}")]
    ContributionRejected(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("resulting amount is too large to represent")]
    AmountOverflow,
    #[error(transparent)]
    Chain(#[from] AdapterError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Error {
    /// Stable numeric code for shells that map errors to their own messages.
    pub fn code(&self) -> u32 {
        match self {
            Error::TokenNotFound => 1,
            Error::ProjectNotFound => 2,
            Error::InvalidAmount => 3,
            Error::InvalidDuration => 4,
            Error::InsufficientBalance { .. } => 5,
            Error::InsufficientNativeBalance { .. } => 6,
            Error::InsufficientLiquidity { .. } => 7,
            Error::OwnershipRenounced => 8,
            Error::AlreadyRenounced => 9,
            Error::ConfirmationMismatch => 10,
            Error::FaucetMainnet => 11,
            Error::TokenNotActive => 12,
            Error::InvalidName => 13,
            Error::InvalidSymbol => 14,
            Error::InvalidSupply => 15,
            Error::InvalidCaps => 16,
            Error::InvalidRate => 17,
            Error::EmptyVerificationInput => 18,
            Error::ContributionRejected(_) => 19,
            Error::InvalidConfig(_) => 20,
            Error::Chain(_) => 21,
            Error::Storage(_) => 22,
            Error::AmountOverflow => 23,
        }
    }
}

/// Outcome of [`Console::verify_contract`].
#[derive(Clone, Debug, PartialEq)]
pub struct VerifyReport {
    pub transaction: Transaction,
    /// Assistant review; display only, never stored on the token.
    pub audit: String,
}

pub struct Console {
    config: ConsoleConfig,
    ids: IdGenerator,
    wallet: Wallet,
    tokens: Vec<Token>,
    launchpad: LaunchpadLedger,
    events: EventLog,
    market: Box<dyn MarketFeed>,
    store: Option<Box<dyn KeyValueStore>>,
}

impl Console {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Empty console without persistence.
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        config.validate()?;
        let market: Box<dyn MarketFeed> = match config.seed {
            Some(seed) => Box::new(SeededMarket::new(seed)),
            None => Box::new(SeededMarket::from_entropy()),
        };
        Ok(Self {
            ids: IdGenerator::from_seed(config.seed),
            config,
            wallet: Wallet::default(),
            tokens: Vec::new(),
            launchpad: LaunchpadLedger::new(),
            events: EventLog::new(),
            market,
            store: None,
        })
    }

    /// Load the snapshot held by `store`, then write back to it after every
    /// successful change.
    pub fn open(config: ConsoleConfig, store: impl KeyValueStore + 'static) -> Result<Self> {
        let mut console = Self::new(config)?;
        let snapshot = storage::load_snapshot(&store)?;
        tracing::info!(
            tokens = snapshot.tokens.len(),
            projects = snapshot.projects.len(),
            "console restored"
        );
        console.tokens = snapshot.tokens;
        console.launchpad = LaunchpadLedger::from_projects(snapshot.projects);
        console.store = Some(Box::new(store));
        Ok(console)
    }

    pub fn with_market(mut self, feed: impl MarketFeed + 'static) -> Self {
        self.market = Box::new(feed);
        self
    }

    pub fn with_contribution_policy(mut self, policy: impl ContributionPolicy + 'static) -> Self {
        self.launchpad.set_policy(policy);
        self
    }

    /// Write the current snapshot to `store`.
    pub fn persist_to(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        storage::save_snapshot(store, &self.tokens, self.launchpad.projects())?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, id: &str) -> Result<&Token> {
        self.tokens
            .iter()
            .find(|t| t.id == id)
            .ok_or(Error::TokenNotFound)
    }

    pub fn projects(&self) -> &[LaunchpadProject] {
        self.launchpad.projects()
    }

    pub fn project(&self, id: &str) -> Result<&LaunchpadProject> {
        self.launchpad.get(id).ok_or(Error::ProjectNotFound)
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn store(&self) -> Option<&dyn KeyValueStore> {
        self.store.as_deref()
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn native_balance(&self, chain: Chain, mode: NetworkMode) -> f64 {
        self.wallet.balance(chain, mode)
    }

    /// Set the wallet balance reported by the connected wallet. Rejects
    /// negative and non-finite balances.
    pub fn set_native_balance(&mut self, chain: Chain, mode: NetworkMode, balance: f64) -> Result<()> {
        self.wallet.set_balance(chain, mode, balance)
    }

    // ─────────────────────────────────────────────────────────
    // Token lifecycle
    // ─────────────────────────────────────────────────────────

    pub fn create_token(&mut self, request: CreateTokenRequest) -> Result<Token> {
        self.create_token_at(request, Utc::now())
    }

    /// Simulated deployment. The token starts `Deploying` (or `Error` when
    /// the symbol is too long) and is picked up by
    /// [`confirm_deployments`](Self::confirm_deployments).
    pub fn create_token_at(
        &mut self,
        request: CreateTokenRequest,
        now: DateTime<Utc>,
    ) -> Result<Token> {
        ledger::validate_request(&request)?;
        let market = self.market.snapshot(&request.symbol, request.chain);
        let mut ctx = ledger::Context {
            config: &self.config,
            ids: &mut self.ids,
            now,
        };
        let token = ledger::create_token(request, market, &mut ctx)?;

        tracing::info!(token = %token.id, symbol = %token.symbol, status = ?token.status, "token created");
        events::emit_token_created(&mut self.events, &token);
        self.tokens.push(token.clone());
        self.autosave();
        Ok(token)
    }

    /// Real deployment through `adapter`. Nothing is recorded unless both
    /// the wallet connection and the deployment succeed.
    pub fn deploy_token(
        &mut self,
        adapter: &mut dyn ChainAdapter,
        request: CreateTokenRequest,
    ) -> Result<Token> {
        self.deploy_token_at(adapter, request, Utc::now())
    }

    pub fn deploy_token_at(
        &mut self,
        adapter: &mut dyn ChainAdapter,
        request: CreateTokenRequest,
        now: DateTime<Utc>,
    ) -> Result<Token> {
        let (name, symbol) = ledger::validate_deployable(&request, &self.config)?;
        let connection = adapter.connect().inspect_err(|e| {
            tracing::warn!(error = %e, "wallet connection failed");
        })?;
        let address = adapter
            .deploy_contract(&name, &symbol, request.supply)
            .inspect_err(|e| tracing::warn!(error = %e, %symbol, "deployment failed"))?;
        self.wallet.address = Some(connection.address);

        let market = self.market.snapshot(&symbol, request.chain);
        let mut ctx = ledger::Context {
            config: &self.config,
            ids: &mut self.ids,
            now,
        };
        let token = ledger::create_deployed_token(request, address, market, &mut ctx)?;

        tracing::info!(token = %token.id, symbol = %token.symbol, "token deployed on chain");
        events::emit_token_created(&mut self.events, &token);
        events::emit_token_activated(&mut self.events, &token);
        self.tokens.push(token.clone());
        self.autosave();
        Ok(token)
    }

    pub fn confirm_deployments(&mut self) -> Vec<String> {
        self.confirm_deployments_at(Utc::now())
    }

    /// Activate every deploying token whose confirmation delay has passed.
    /// Returns the ids that became active.
    pub fn confirm_deployments_at(&mut self, now: DateTime<Utc>) -> Vec<String> {
        let delay = self.config.confirmation_delay_ms;
        let mut activated = Vec::new();
        for token in self.tokens.iter_mut() {
            if ledger::confirm_deployment(token, now, delay) {
                tracing::info!(token = %token.id, "deployment confirmed");
                events::emit_token_activated(&mut self.events, token);
                activated.push(token.id.clone());
            }
        }
        if !activated.is_empty() {
            self.autosave();
        }
        activated
    }

    pub fn execute(&mut self, token_id: &str, action: Action) -> Result<Transaction> {
        self.execute_at(token_id, action, Utc::now())
    }

    /// Run one ledger transition against `token_id`.
    pub fn execute_at(
        &mut self,
        token_id: &str,
        action: Action,
        now: DateTime<Utc>,
    ) -> Result<Transaction> {
        let index = self.token_index(token_id)?;
        let token = &mut self.tokens[index];
        // Work on a copy so a rejected transition leaves the wallet as it was.
        let mut account = self
            .wallet
            .account(token.chain, token.network_mode)
            .cloned()
            .unwrap_or_else(|| NativeAccount::empty(token.chain, token.network_mode));
        let mut ctx = ledger::Context {
            config: &self.config,
            ids: &mut self.ids,
            now,
        };
        let kind = action.kind();
        let applied = ledger::apply(token, &mut account, action, &mut ctx).inspect_err(|e| {
            tracing::warn!(token = token_id, ?kind, error = %e, "transition rejected");
        })?;

        self.wallet.store_account(account);
        self.events.publish(applied.event);
        self.autosave();
        Ok(applied.transaction)
    }

    pub fn verify_contract<C: TextCompletion>(
        &mut self,
        token_id: &str,
        address: &str,
        source: &str,
        assistant: &mut AssistantSession<C>,
    ) -> Result<VerifyReport> {
        self.verify_contract_at(token_id, address, source, assistant, Utc::now())
    }

    /// Record a verification request, then ask the assistant for an audit
    /// of the submitted source. The audit is only requested once the
    /// transition succeeded.
    pub fn verify_contract_at<C: TextCompletion>(
        &mut self,
        token_id: &str,
        address: &str,
        source: &str,
        assistant: &mut AssistantSession<C>,
        now: DateTime<Utc>,
    ) -> Result<VerifyReport> {
        let action = Action::Verify {
            address: address.to_string(),
            source: source.to_string(),
        };
        let transaction = self.execute_at(token_id, action, now)?;
        let audit = assistant.audit_contract(address.trim(), source);
        Ok(VerifyReport { transaction, audit })
    }

    // ─────────────────────────────────────────────────────────
    // Derived values
    // ─────────────────────────────────────────────────────────

    /// Fee breakdown for running `action` on `token_id`. Read-only.
    pub fn quote(&self, token_id: &str, action: &Action) -> Result<FeeBreakdown> {
        let token = self.token(token_id)?;
        Ok(fees::quote(action, token.chain, token.network_mode, &self.config))
    }

    pub fn trust_score(&self, token_id: &str) -> Result<TrustScore> {
        Ok(quality::score(self.token(token_id)?))
    }

    // ─────────────────────────────────────────────────────────
    // Launchpad
    // ─────────────────────────────────────────────────────────

    pub fn create_project(&mut self, token_id: &str, terms: ProjectTerms) -> Result<LaunchpadProject> {
        self.create_project_at(token_id, terms, Utc::now())
    }

    pub fn create_project_at(
        &mut self,
        token_id: &str,
        terms: ProjectTerms,
        now: DateTime<Utc>,
    ) -> Result<LaunchpadProject> {
        let token = self
            .tokens
            .iter()
            .find(|t| t.id == token_id)
            .ok_or(Error::TokenNotFound)?;
        let project = self
            .launchpad
            .create_project(token, terms, &mut self.ids, now)
            .inspect_err(|e| tracing::warn!(token = token_id, error = %e, "project rejected"))?;

        events::emit_project_created(
            &mut self.events,
            &project.id,
            &project.token_id,
            project.soft_cap,
            project.hard_cap,
        );
        self.autosave();
        Ok(project)
    }

    pub fn record_contribution(&mut self, project_id: &str, amount: f64) -> Result<LaunchpadProject> {
        self.record_contribution_at(project_id, amount, Utc::now())
    }

    pub fn record_contribution_at(
        &mut self,
        project_id: &str,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<LaunchpadProject> {
        let before = self.project(project_id)?.raised_amount;
        let project = self.launchpad.record_contribution(project_id, amount, now)?;

        events::emit_contribution_recorded(
            &mut self.events,
            &project.id,
            project.raised_amount - before,
            project.raised_amount,
            project.participants,
        );
        self.autosave();
        Ok(project)
    }

    pub fn refresh_launchpad(&mut self) -> Vec<String> {
        self.refresh_launchpad_at(Utc::now())
    }

    /// End every project whose window has closed.
    pub fn refresh_launchpad_at(&mut self, now: DateTime<Utc>) -> Vec<String> {
        let ended = self.launchpad.refresh_statuses(now);
        if !ended.is_empty() {
            tracing::info!(count = ended.len(), "launchpad projects ended");
            self.autosave();
        }
        ended
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    fn token_index(&self, id: &str) -> Result<usize> {
        self.tokens
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::TokenNotFound)
    }

    /// Persist after a change. A failed write is logged and does not undo
    /// the change.
    fn autosave(&mut self) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        if let Err(e) = storage::save_snapshot(store.as_mut(), &self.tokens, self.launchpad.projects()) {
            tracing::warn!(error = %e, "autosave failed");
        }
    }
}
