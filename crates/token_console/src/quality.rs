//! # Trust scoring
//!
//! Three equally weighted signals add up to exactly 100:
//!
//! | Signal                      | Points |
//! |-----------------------------|--------|
//! | verified contract address   | 33     |
//! | ownership renounced         | 33     |
//! | liquidity locked            | 34     |
//!
//! | Value        | Label       |
//! |--------------|-------------|
//! | `100`        | Excellent   |
//! | `61..=99`    | Good        |
//! | `0..=60`     | Risk        |
//!
//! Scores are recomputed from the token on every call.

use std::fmt;

use serde::Serialize;

use crate::types::Token;

pub const VERIFIED_POINTS: u8 = 33;
pub const RENOUNCED_POINTS: u8 = 33;
pub const LOCKED_POINTS: u8 = 34;

const GOOD_THRESHOLD: u8 = 60;
const MAX_SCORE: u8 = 100;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum TrustLabel {
    Excellent,
    Good,
    Risk,
}

impl fmt::Display for TrustLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrustLabel::Excellent => "Excellent",
            TrustLabel::Good => "Good",
            TrustLabel::Risk => "Risk",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustSignals {
    pub verified_contract: bool,
    pub ownership_renounced: bool,
    pub liquidity_locked: bool,
}

impl TrustSignals {
    pub fn from_token(token: &Token) -> Self {
        Self {
            verified_contract: token.has_verified_contract(),
            ownership_renounced: token.ownership_renounced,
            liquidity_locked: token.liquidity_locked,
        }
    }

    pub fn count(&self) -> usize {
        [
            self.verified_contract,
            self.ownership_renounced,
            self.liquidity_locked,
        ]
        .iter()
        .filter(|s| **s)
        .count()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct TrustScore {
    pub value: u8,
    pub label: TrustLabel,
    pub signals: TrustSignals,
}

impl TrustScore {
    /// No signal is set. Callers show the high-risk warning instead of a
    /// plain low score.
    pub fn has_no_signals(&self) -> bool {
        self.signals.count() == 0
    }

    pub fn risk_message(&self) -> &'static str {
        if self.has_no_signals() {
            return "High risk: contract unverified, ownership retained and liquidity unlocked.";
        }
        match self.label {
            TrustLabel::Excellent => "Fully verified, renounced and locked.",
            TrustLabel::Good => "Most trust signals present.",
            TrustLabel::Risk => "Few trust signals present; trade with caution.",
        }
    }
}

pub fn score(token: &Token) -> TrustScore {
    score_signals(TrustSignals::from_token(token))
}

pub fn score_signals(signals: TrustSignals) -> TrustScore {
    let mut value: u8 = 0;
    if signals.verified_contract {
        value += VERIFIED_POINTS;
    }
    if signals.ownership_renounced {
        value += RENOUNCED_POINTS;
    }
    if signals.liquidity_locked {
        value += LOCKED_POINTS;
    }
    let value = value.min(MAX_SCORE);
    TrustScore {
        value,
        label: label_for(value),
        signals,
    }
}

pub fn label_for(value: u8) -> TrustLabel {
    if value >= MAX_SCORE {
        TrustLabel::Excellent
    } else if value > GOOD_THRESHOLD {
        TrustLabel::Good
    } else {
        TrustLabel::Risk
    }
}
