//! Audit events published after every successful mutation.
//!
//! Each event carries a short topic (`"minted"`, `"locked"`, …) and a typed
//! payload. Publishing records the event in the console's [`EventLog`] and
//! emits a `tracing` record under the `token_console::events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ledger::SwapDirection;
use crate::types::{iso8601, Chain, NetworkMode, Token, TokenStatus};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCreated {
    pub token_id: String,
    pub symbol: String,
    pub chain: Chain,
    pub network_mode: NetworkMode,
    pub supply: f64,
    pub status: TokenStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenActivated {
    pub token_id: String,
    pub contract_address: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensMinted {
    pub token_id: String,
    pub amount: f64,
    pub total_supply: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensBurned {
    pub token_id: String,
    pub amount: f64,
    pub total_supply: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityLocked {
    pub token_id: String,
    pub amount: f64,
    pub locked_amount: f64,
    #[serde(with = "iso8601")]
    pub unlock_date: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityAdded {
    pub token_id: String,
    pub native_amount: f64,
    pub token_amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensSwapped {
    pub token_id: String,
    pub direction: SwapDirection,
    pub input_amount: f64,
    pub output_amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeRequested {
    pub token_id: String,
    pub amount: f64,
    pub destination: Chain,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractVerified {
    pub token_id: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipRenounced {
    pub token_id: String,
    pub fee: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetDripped {
    pub token_id: String,
    pub chain: Chain,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreated {
    pub project_id: String,
    pub token_id: String,
    pub soft_cap: f64,
    pub hard_cap: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRecorded {
    pub project_id: String,
    pub amount: f64,
    pub raised_amount: f64,
    pub participants: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "topic", content = "data", rename_all = "snake_case")]
pub enum ConsoleEvent {
    Created(TokenCreated),
    Activated(TokenActivated),
    Minted(TokensMinted),
    Burned(TokensBurned),
    Locked(LiquidityLocked),
    Liquidity(LiquidityAdded),
    Swapped(TokensSwapped),
    Bridged(BridgeRequested),
    Verified(ContractVerified),
    Renounced(OwnershipRenounced),
    Faucet(FaucetDripped),
    ProjectCreated(ProjectCreated),
    Contributed(ContributionRecorded),
}

impl ConsoleEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            ConsoleEvent::Created(_) => "created",
            ConsoleEvent::Activated(_) => "activated",
            ConsoleEvent::Minted(_) => "minted",
            ConsoleEvent::Burned(_) => "burned",
            ConsoleEvent::Locked(_) => "locked",
            ConsoleEvent::Liquidity(_) => "liquidity",
            ConsoleEvent::Swapped(_) => "swapped",
            ConsoleEvent::Bridged(_) => "bridged",
            ConsoleEvent::Verified(_) => "verified",
            ConsoleEvent::Renounced(_) => "renounced",
            ConsoleEvent::Faucet(_) => "faucet",
            ConsoleEvent::ProjectCreated(_) => "project_created",
            ConsoleEvent::Contributed(_) => "contributed",
        }
    }

    /// Token or project the event refers to.
    pub fn subject(&self) -> &str {
        match self {
            ConsoleEvent::Created(e) => &e.token_id,
            ConsoleEvent::Activated(e) => &e.token_id,
            ConsoleEvent::Minted(e) => &e.token_id,
            ConsoleEvent::Burned(e) => &e.token_id,
            ConsoleEvent::Locked(e) => &e.token_id,
            ConsoleEvent::Liquidity(e) => &e.token_id,
            ConsoleEvent::Swapped(e) => &e.token_id,
            ConsoleEvent::Bridged(e) => &e.token_id,
            ConsoleEvent::Verified(e) => &e.token_id,
            ConsoleEvent::Renounced(e) => &e.token_id,
            ConsoleEvent::Faucet(e) => &e.token_id,
            ConsoleEvent::ProjectCreated(e) => &e.project_id,
            ConsoleEvent::Contributed(e) => &e.project_id,
        }
    }
}

/// Append-only, in-order record of published events.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<ConsoleEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, event: ConsoleEvent) {
        tracing::info!(
            target: "token_console::events",
            topic = event.topic(),
            subject = event.subject(),
            "event published"
        );
        self.events.push(event);
    }

    pub fn all(&self) -> &[ConsoleEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&ConsoleEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn with_topic<'a>(&'a self, topic: &'a str) -> impl Iterator<Item = &'a ConsoleEvent> + 'a {
        self.events.iter().filter(move |e| e.topic() == topic)
    }
}

// ── Emit helpers ─────────────────────────────────────────────────────

pub fn emit_project_created(
    log: &mut EventLog,
    project_id: &str,
    token_id: &str,
    soft_cap: f64,
    hard_cap: f64,
) {
    log.publish(ConsoleEvent::ProjectCreated(ProjectCreated {
        project_id: project_id.to_string(),
        token_id: token_id.to_string(),
        soft_cap,
        hard_cap,
    }));
}

pub fn emit_contribution_recorded(
    log: &mut EventLog,
    project_id: &str,
    amount: f64,
    raised_amount: f64,
    participants: u32,
) {
    log.publish(ConsoleEvent::Contributed(ContributionRecorded {
        project_id: project_id.to_string(),
        amount,
        raised_amount,
        participants,
    }));
}

pub fn emit_token_created(log: &mut EventLog, token: &Token) {
    log.publish(ConsoleEvent::Created(TokenCreated {
        token_id: token.id.clone(),
        symbol: token.symbol.clone(),
        chain: token.chain,
        network_mode: token.network_mode,
        supply: token.total_supply,
        status: token.status,
    }));
}

pub fn emit_token_activated(log: &mut EventLog, token: &Token) {
    log.publish(ConsoleEvent::Activated(TokenActivated {
        token_id: token.id.clone(),
        contract_address: token.contract_address.clone(),
    }));
}
