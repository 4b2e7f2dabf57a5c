#![allow(dead_code)]

use crate::types::{LaunchpadProject, LaunchpadStatus, Token, TokenStatus};

/// INV-1: The tracked holder never owns more than the supply.
pub fn assert_holder_within_supply(token: &Token) {
    assert!(
        token.holder_balance <= token.total_supply,
        "INV-1 violated: token {} holder balance {} exceeds supply {}",
        token.id,
        token.holder_balance,
        token.total_supply
    );
}

/// INV-2: Balances, supply and locked amount are never negative.
pub fn assert_non_negative(token: &Token) {
    assert!(
        token.holder_balance >= 0.0,
        "INV-2 violated: token {} has negative holder balance ({})",
        token.id,
        token.holder_balance
    );
    assert!(
        token.total_supply >= 0.0,
        "INV-2 violated: token {} has negative supply ({})",
        token.id,
        token.total_supply
    );
    assert!(
        token.locked_amount >= 0.0,
        "INV-2 violated: token {} has negative locked amount ({})",
        token.id,
        token.locked_amount
    );
}

/// INV-3: Lock flag and amount agree.
pub fn assert_lock_consistent(token: &Token) {
    if token.locked_amount > 0.0 {
        assert!(
            token.liquidity_locked && token.unlock_date.is_some(),
            "INV-3 violated: token {} has locked amount without lock state",
            token.id
        );
    }
}

/// INV-4: A rejected transition changes nothing, including the log.
pub fn assert_unchanged(before: &Token, after: &Token) {
    assert_eq!(before, after, "INV-4 violated: rejected transition mutated token {}", before.id);
}

/// INV-5: Identity fields never change after creation.
pub fn assert_identity_unchanged(original: &Token, current: &Token) {
    assert_eq!(original.id, current.id, "INV-5 violated: token id changed");
    assert_eq!(original.name, current.name, "INV-5 violated: token name changed");
    assert_eq!(original.symbol, current.symbol, "INV-5 violated: token symbol changed");
    assert_eq!(original.chain, current.chain, "INV-5 violated: token chain changed");
    assert_eq!(
        original.network_mode, current.network_mode,
        "INV-5 violated: token network mode changed"
    );
    assert_eq!(
        original.contract_address, current.contract_address,
        "INV-5 violated: contract address changed"
    );
}

/// INV-6: The log only grows at the front; older entries stay as they were.
pub fn assert_log_appended(before: &Token, after: &Token, added: usize) {
    assert_eq!(
        after.transactions.len(),
        before.transactions.len() + added,
        "INV-6 violated: expected {} new log entries on token {}",
        added,
        before.id
    );
    assert_eq!(
        &after.transactions[added..],
        &before.transactions[..],
        "INV-6 violated: existing log entries of token {} were modified",
        before.id
    );
}

/// INV-7: Ownership renouncement is never undone.
pub fn assert_renounce_monotonic(before: &Token, after: &Token) {
    if before.ownership_renounced {
        assert!(
            after.ownership_renounced,
            "INV-7 violated: token {} regained ownership",
            before.id
        );
    }
}

/// INV-8: Launchpad caps are ordered and raised amounts never shrink.
pub fn assert_project_valid(project: &LaunchpadProject) {
    assert!(
        project.hard_cap > project.soft_cap,
        "INV-8 violated: project {} hard cap {} not above soft cap {}",
        project.id,
        project.hard_cap,
        project.soft_cap
    );
    assert!(
        project.raised_amount >= 0.0,
        "INV-8 violated: project {} has negative raise",
        project.id
    );
    assert!(
        project.end_time > project.start_time,
        "INV-8 violated: project {} ends before it starts",
        project.id
    );
}

pub fn assert_raise_monotonic(before: &LaunchpadProject, after: &LaunchpadProject) {
    assert!(
        after.raised_amount >= before.raised_amount,
        "INV-9 violated: project {} raise decreased",
        before.id
    );
    assert!(
        after.participants >= before.participants,
        "INV-9 violated: project {} lost participants",
        before.id
    );
    if before.status == LaunchpadStatus::Ended {
        assert_eq!(after.status, LaunchpadStatus::Ended);
    }
}

/// Run all stateless token invariants.
pub fn assert_all_token_invariants(token: &Token) {
    assert_holder_within_supply(token);
    assert_non_negative(token);
    assert_lock_consistent(token);
    if token.status == TokenStatus::Error {
        assert!(token.transactions.is_empty(), "failed deployments have no log");
    }
}
