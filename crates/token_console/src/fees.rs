//! # Fee model
//!
//! `total = network_fee + base_amount * PLATFORM_FEE_PERCENT`
//!
//! The breakdown is derived on demand and never stored on a token. Callers
//! validate amounts before they get here; negative input is a caller bug and
//! is not checked.

use serde::Serialize;

use crate::config::{ConsoleConfig, PLATFORM_FEE_PERCENT};
use crate::ledger::{Action, SwapDirection};
use crate::types::{Chain, NetworkMode};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    pub network_fee: f64,
    pub platform_fee: f64,
    pub total: f64,
}

pub fn compute_fee(base_amount: f64, network_fee_estimate: f64) -> FeeBreakdown {
    let platform_fee = base_amount * PLATFORM_FEE_PERCENT;
    FeeBreakdown {
        network_fee: network_fee_estimate,
        platform_fee,
        total: network_fee_estimate + platform_fee,
    }
}

/// Native-currency principal the platform fee is charged on.
///
/// Only actions that move native currency have one; renouncement is charged
/// on its flat service fee. Everything else pays the network fee alone.
pub fn principal(action: &Action, config: &ConsoleConfig) -> f64 {
    match action {
        Action::AddLiquidity { native_amount, .. } => *native_amount,
        Action::Swap {
            direction: SwapDirection::Buy,
            input_amount,
        } => *input_amount,
        Action::Swap {
            direction: SwapDirection::Sell,
            input_amount,
        } => *input_amount / config.swap_rate,
        Action::RenounceOwnership { .. } => config.service_fee_floor,
        Action::Mint { .. }
        | Action::Burn { .. }
        | Action::Lock { .. }
        | Action::Bridge { .. }
        | Action::Verify { .. }
        | Action::Faucet => 0.0,
    }
}

/// Fee breakdown shown before running `action` on a `chain` / `mode` token.
pub fn quote(
    action: &Action,
    chain: Chain,
    mode: NetworkMode,
    config: &ConsoleConfig,
) -> FeeBreakdown {
    compute_fee(principal(action, config), config.network_fee(chain, mode))
}
