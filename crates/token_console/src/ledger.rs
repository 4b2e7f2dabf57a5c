//! # Token ledger
//!
//! State machine over a single [`Token`] and the wallet's native account on
//! the token's chain / network mode.
//!
//! | Action              | Precondition                                   | Effect                                        |
//! |---------------------|------------------------------------------------|-----------------------------------------------|
//! | `Mint`              | not renounced                                  | supply += a, holder += a                      |
//! | `Burn`              | a ≤ holder                                     | supply −= a, holder −= a                      |
//! | `Lock`              | a ≤ holder, days > 0                           | holder −= a, locked += a, unlock = now + days |
//! | `AddLiquidity`      | n ≤ native, t ≤ holder                         | native −= n, holder −= t                      |
//! | `Swap` (buy)        | x ≤ native, x·R ≤ supply − holder              | native −= x, holder += x·R                    |
//! | `Swap` (sell)       | x ≤ holder                                     | holder −= x, native += x / R                  |
//! | `Bridge`            | none                                           | log only                                      |
//! | `Verify`            | address and source non-empty                   | log only                                      |
//! | `RenounceOwnership` | phrase is `RENOUNCE`, not renounced, fee ≤ native | native −= fee, renounced = true            |
//! | `Faucet`            | testnet                                        | native += faucet amount                       |
//!
//! All amounts must be finite and strictly positive, and so must every
//! balance they produce (`AmountOverflow` otherwise). Every transition
//! requires an `Active` token, checks all of its preconditions before
//! touching any field, and on success prepends exactly one [`Transaction`].
//! A rejected transition leaves token and account exactly as they were.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::chain;
use crate::config::ConsoleConfig;
use crate::events::{
    BridgeRequested, ConsoleEvent, ContractVerified, FaucetDripped, LiquidityAdded,
    LiquidityLocked, OwnershipRenounced, TokensBurned, TokensMinted, TokensSwapped,
};
use crate::ids::IdGenerator;
use crate::market::MarketSnapshot;
use crate::types::{
    Chain, NativeAccount, NetworkMode, Token, TokenStatus, Transaction, TransactionKind,
    TransactionStatus,
};
use crate::{Error, Result};

/// Exact text the user must type to renounce ownership.
pub const RENOUNCE_PHRASE: &str = "RENOUNCE";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapDirection {
    /// Native in, tokens out.
    Buy,
    /// Tokens in, native out.
    Sell,
}

/// A user-initiated transition request.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Mint { amount: f64 },
    Burn { amount: f64 },
    Lock { amount: f64, duration_days: u32 },
    AddLiquidity { native_amount: f64, token_amount: f64 },
    Swap { direction: SwapDirection, input_amount: f64 },
    /// Records intent only; nothing is debited on the source chain.
    Bridge { amount: f64, destination: Chain },
    Verify { address: String, source: String },
    RenounceOwnership { confirmation: String },
    Faucet,
}

impl Action {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Action::Mint { .. } => TransactionKind::Mint,
            Action::Burn { .. } => TransactionKind::Burn,
            Action::Lock { .. } => TransactionKind::Lock,
            Action::AddLiquidity { .. } => TransactionKind::Liquidity,
            Action::Swap { .. } => TransactionKind::Swap,
            Action::Bridge { .. } => TransactionKind::Bridge,
            Action::Verify { .. } => TransactionKind::Verify,
            Action::RenounceOwnership { .. } => TransactionKind::Renounce,
            Action::Faucet => TransactionKind::Faucet,
        }
    }
}

/// Input of the creation transition.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateTokenRequest {
    pub name: String,
    pub symbol: String,
    pub chain: Chain,
    pub network_mode: NetworkMode,
    pub supply: f64,
    pub logo: Option<String>,
}

impl CreateTokenRequest {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        chain: Chain,
        network_mode: NetworkMode,
        supply: f64,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            chain,
            network_mode,
            supply,
            logo: None,
        }
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }
}

/// Everything a transition needs besides the token and account.
pub struct Context<'a> {
    pub config: &'a ConsoleConfig,
    pub ids: &'a mut IdGenerator,
    pub now: DateTime<Utc>,
}

/// Result of a successful transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Applied {
    pub transaction: Transaction,
    pub event: ConsoleEvent,
}

struct Receipt {
    kind: TransactionKind,
    description: String,
    amount: String,
    event: ConsoleEvent,
}

// ─────────────────────────────────────────────────────────
// Creation & confirmation
// ─────────────────────────────────────────────────────────

/// Create a simulated token.
///
/// Invalid input is rejected without creating anything. A symbol longer
/// than `max_symbol_len` still produces a token, in `Error` status and
/// without a contract address, so the failure can be shown and explained.
pub fn create_token(
    request: CreateTokenRequest,
    market: MarketSnapshot,
    ctx: &mut Context<'_>,
) -> Result<Token> {
    let (name, symbol) = validate_request(&request)?;
    let failed = symbol.chars().count() > ctx.config.max_symbol_len;
    let (status, contract_address) = if failed {
        tracing::warn!(%symbol, "deployment failed: symbol too long");
        (TokenStatus::Error, None)
    } else {
        (
            TokenStatus::Deploying,
            Some(ctx.ids.contract_address(request.chain)),
        )
    };
    Ok(new_token(request, name, symbol, status, contract_address, market, ctx))
}

/// Create a token for a contract that was already deployed on chain.
/// The token starts `Active` with the given address.
pub fn create_deployed_token(
    request: CreateTokenRequest,
    contract_address: String,
    market: MarketSnapshot,
    ctx: &mut Context<'_>,
) -> Result<Token> {
    let (name, symbol) = validate_deployable(&request, ctx.config)?;
    Ok(new_token(
        request,
        name,
        symbol,
        TokenStatus::Active,
        Some(contract_address),
        market,
        ctx,
    ))
}

/// Check name, symbol and supply without creating anything.
pub fn validate_request(request: &CreateTokenRequest) -> Result<(String, String)> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(Error::InvalidName);
    }
    let symbol = request.symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(Error::InvalidSymbol);
    }
    if !(request.supply.is_finite() && request.supply > 0.0) {
        return Err(Error::InvalidSupply);
    }
    Ok((name.to_string(), symbol))
}

/// [`validate_request`] plus the symbol length limit, which a real
/// deployment enforces up front instead of failing afterwards.
pub fn validate_deployable(
    request: &CreateTokenRequest,
    config: &ConsoleConfig,
) -> Result<(String, String)> {
    let (name, symbol) = validate_request(request)?;
    if symbol.chars().count() > config.max_symbol_len {
        return Err(Error::InvalidSymbol);
    }
    Ok((name, symbol))
}

fn new_token(
    request: CreateTokenRequest,
    name: String,
    symbol: String,
    status: TokenStatus,
    contract_address: Option<String>,
    market: MarketSnapshot,
    ctx: &mut Context<'_>,
) -> Token {
    Token {
        id: ctx.ids.token_id(ctx.now),
        name,
        symbol,
        chain: request.chain,
        network_mode: request.network_mode,
        logo: request.logo,
        total_supply: request.supply,
        holder_balance: request.supply,
        contract_address,
        status,
        ownership_renounced: false,
        liquidity_locked: false,
        locked_amount: 0.0,
        unlock_date: None,
        price: market.price,
        liquidity_usd: market.liquidity_usd,
        created_at: ctx.now,
        transactions: Vec::new(),
    }
}

/// Flip `Deploying` to `Active` once `delay_ms` has elapsed since creation.
/// Returns whether the token changed.
pub fn confirm_deployment(token: &mut Token, now: DateTime<Utc>, delay_ms: i64) -> bool {
    if token.status != TokenStatus::Deploying {
        return false;
    }
    if now < token.created_at + Duration::milliseconds(delay_ms) {
        return false;
    }
    token.status = TokenStatus::Active;
    true
}

// ─────────────────────────────────────────────────────────
// Transitions
// ─────────────────────────────────────────────────────────

/// Validate and apply `action`.
///
/// `account` must be the wallet account for the token's chain and network
/// mode.
pub fn apply(
    token: &mut Token,
    account: &mut NativeAccount,
    action: Action,
    ctx: &mut Context<'_>,
) -> Result<Applied> {
    if !token.is_active() {
        return Err(Error::TokenNotActive);
    }
    let config = ctx.config;
    let receipt = match action {
        Action::Mint { amount } => mint(token, amount)?,
        Action::Burn { amount } => burn(token, amount)?,
        Action::Lock {
            amount,
            duration_days,
        } => lock(token, amount, duration_days, ctx.now)?,
        Action::AddLiquidity {
            native_amount,
            token_amount,
        } => add_liquidity(token, account, native_amount, token_amount)?,
        Action::Swap {
            direction,
            input_amount,
        } => swap(token, account, direction, input_amount, config.swap_rate)?,
        Action::Bridge {
            amount,
            destination,
        } => bridge(token, amount, destination)?,
        Action::Verify { address, source } => verify(token, &address, &source)?,
        Action::RenounceOwnership { confirmation } => {
            renounce(token, account, &confirmation, config.service_fee_floor)?
        }
        Action::Faucet => faucet(token, account, config.faucet_amount)?,
    };

    let transaction = Transaction {
        id: ctx.ids.transaction_id(ctx.now),
        kind: receipt.kind,
        description: receipt.description,
        amount: receipt.amount,
        timestamp: ctx.now,
        status: TransactionStatus::Success,
        hash: ctx.ids.tx_hash(),
    };
    token.record(transaction.clone());
    tracing::info!(
        token = %token.id,
        kind = ?transaction.kind,
        amount = %transaction.amount,
        "transition applied"
    );
    Ok(Applied {
        transaction,
        event: receipt.event,
    })
}

fn mint(token: &mut Token, amount: f64) -> Result<Receipt> {
    if token.ownership_renounced {
        return Err(Error::OwnershipRenounced);
    }
    require_positive(amount)?;
    let total_supply = require_finite(token.total_supply + amount)?;
    let holder_balance = require_finite(token.holder_balance + amount)?;

    token.total_supply = total_supply;
    token.holder_balance = holder_balance;

    Ok(Receipt {
        kind: TransactionKind::Mint,
        description: format!("Minted {}", units(amount, &token.symbol)),
        amount: units(amount, &token.symbol),
        event: ConsoleEvent::Minted(TokensMinted {
            token_id: token.id.clone(),
            amount,
            total_supply: token.total_supply,
        }),
    })
}

fn burn(token: &mut Token, amount: f64) -> Result<Receipt> {
    require_positive(amount)?;
    require_holder_balance(token, amount)?;

    token.total_supply -= amount;
    token.holder_balance -= amount;

    Ok(Receipt {
        kind: TransactionKind::Burn,
        description: format!("Burned {}", units(amount, &token.symbol)),
        amount: units(amount, &token.symbol),
        event: ConsoleEvent::Burned(TokensBurned {
            token_id: token.id.clone(),
            amount,
            total_supply: token.total_supply,
        }),
    })
}

fn lock(token: &mut Token, amount: f64, duration_days: u32, now: DateTime<Utc>) -> Result<Receipt> {
    require_positive(amount)?;
    if duration_days == 0 {
        return Err(Error::InvalidDuration);
    }
    require_holder_balance(token, amount)?;
    let unlock_date = now
        .checked_add_signed(Duration::days(i64::from(duration_days)))
        .ok_or(Error::InvalidDuration)?;
    let locked_amount = require_finite(token.locked_amount + amount)?;

    token.holder_balance -= amount;
    token.locked_amount = locked_amount;
    token.liquidity_locked = true;
    // Last lock wins; earlier unlock dates are not kept.
    token.unlock_date = Some(unlock_date);

    Ok(Receipt {
        kind: TransactionKind::Lock,
        description: format!(
            "Locked {} for {} days",
            units(amount, &token.symbol),
            duration_days
        ),
        amount: units(amount, &token.symbol),
        event: ConsoleEvent::Locked(LiquidityLocked {
            token_id: token.id.clone(),
            amount,
            locked_amount: token.locked_amount,
            unlock_date,
        }),
    })
}

fn add_liquidity(
    token: &mut Token,
    account: &mut NativeAccount,
    native_amount: f64,
    token_amount: f64,
) -> Result<Receipt> {
    require_positive(native_amount)?;
    require_positive(token_amount)?;
    require_native_balance(account, native_amount)?;
    require_holder_balance(token, token_amount)?;

    account.balance -= native_amount;
    token.holder_balance -= token_amount;

    let native = units(native_amount, chain::currency_symbol(token.chain));
    let tokens = units(token_amount, &token.symbol);
    Ok(Receipt {
        kind: TransactionKind::Liquidity,
        description: format!("Added liquidity: {native} + {tokens}"),
        amount: format!("{native} + {tokens}"),
        event: ConsoleEvent::Liquidity(LiquidityAdded {
            token_id: token.id.clone(),
            native_amount,
            token_amount,
        }),
    })
}

fn swap(
    token: &mut Token,
    account: &mut NativeAccount,
    direction: SwapDirection,
    input_amount: f64,
    rate: f64,
) -> Result<Receipt> {
    require_positive(input_amount)?;
    let currency = chain::currency_symbol(token.chain);

    let (output_amount, amount) = match direction {
        SwapDirection::Buy => {
            require_native_balance(account, input_amount)?;
            let received = input_amount * rate;
            // Tokens bought come from outside the holder's balance, so the
            // holder can never end up with more than the supply.
            let available = (token.total_supply - token.holder_balance).max(0.0);
            if received > available {
                return Err(Error::InsufficientLiquidity {
                    required: received,
                    available,
                });
            }
            account.balance -= input_amount;
            token.holder_balance = (token.holder_balance + received).min(token.total_supply);
            (
                received,
                format!(
                    "{} → {}",
                    units(input_amount, currency),
                    units(received, &token.symbol)
                ),
            )
        }
        SwapDirection::Sell => {
            require_holder_balance(token, input_amount)?;
            let received = input_amount / rate;
            let balance = require_finite(account.balance + received)?;
            token.holder_balance -= input_amount;
            account.balance = balance;
            (
                received,
                format!(
                    "{} → {}",
                    units(input_amount, &token.symbol),
                    units(received, currency)
                ),
            )
        }
    };

    Ok(Receipt {
        kind: TransactionKind::Swap,
        description: match direction {
            SwapDirection::Buy => format!("Bought {}", token.symbol),
            SwapDirection::Sell => format!("Sold {}", token.symbol),
        },
        amount,
        event: ConsoleEvent::Swapped(TokensSwapped {
            token_id: token.id.clone(),
            direction,
            input_amount,
            output_amount,
        }),
    })
}

fn bridge(token: &Token, amount: f64, destination: Chain) -> Result<Receipt> {
    require_positive(amount)?;

    Ok(Receipt {
        kind: TransactionKind::Bridge,
        description: format!(
            "Bridge {} to {}",
            units(amount, &token.symbol),
            chain::lookup(destination).name
        ),
        amount: units(amount, &token.symbol),
        event: ConsoleEvent::Bridged(BridgeRequested {
            token_id: token.id.clone(),
            amount,
            destination,
        }),
    })
}

fn verify(token: &Token, address: &str, source: &str) -> Result<Receipt> {
    let address = address.trim();
    if address.is_empty() || source.trim().is_empty() {
        return Err(Error::EmptyVerificationInput);
    }

    Ok(Receipt {
        kind: TransactionKind::Verify,
        description: format!("Submitted source verification for {address}"),
        amount: "-".to_string(),
        event: ConsoleEvent::Verified(ContractVerified {
            token_id: token.id.clone(),
            address: address.to_string(),
        }),
    })
}

fn renounce(
    token: &mut Token,
    account: &mut NativeAccount,
    confirmation: &str,
    fee: f64,
) -> Result<Receipt> {
    if confirmation != RENOUNCE_PHRASE {
        return Err(Error::ConfirmationMismatch);
    }
    if token.ownership_renounced {
        return Err(Error::AlreadyRenounced);
    }
    require_native_balance(account, fee)?;

    account.balance -= fee;
    token.ownership_renounced = true;

    let fee_display = units(fee, chain::currency_symbol(token.chain));
    Ok(Receipt {
        kind: TransactionKind::Renounce,
        description: format!("Renounced ownership of {}", token.symbol),
        amount: fee_display,
        event: ConsoleEvent::Renounced(OwnershipRenounced {
            token_id: token.id.clone(),
            fee,
        }),
    })
}

fn faucet(token: &mut Token, account: &mut NativeAccount, amount: f64) -> Result<Receipt> {
    if token.network_mode != NetworkMode::Testnet {
        return Err(Error::FaucetMainnet);
    }
    let balance = require_finite(account.balance + amount)?;

    account.balance = balance;

    let currency = chain::currency_symbol(token.chain);
    Ok(Receipt {
        kind: TransactionKind::Faucet,
        description: format!("Received testnet {currency}"),
        amount: units(amount, currency),
        event: ConsoleEvent::Faucet(FaucetDripped {
            token_id: token.id.clone(),
            chain: token.chain,
            amount,
        }),
    })
}

// ─────────────────────────────────────────────────────────
// Guards
// ─────────────────────────────────────────────────────────

/// Finite and strictly positive. NaN fails the comparison.
fn require_positive(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidAmount)
    }
}

/// Rejects sums that left the representable range; a non-finite amount
/// cannot be persisted.
fn require_finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::AmountOverflow)
    }
}

fn require_holder_balance(token: &Token, amount: f64) -> Result<()> {
    if !(amount <= token.holder_balance) {
        return Err(Error::InsufficientBalance {
            required: amount,
            available: token.holder_balance,
        });
    }
    Ok(())
}

fn require_native_balance(account: &NativeAccount, amount: f64) -> Result<()> {
    if !(amount <= account.balance) {
        return Err(Error::InsufficientNativeBalance {
            required: amount,
            available: account.balance,
        });
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Display helpers
// ─────────────────────────────────────────────────────────

/// Up to six decimals, trailing zeros dropped: `1.5`, `500000`, `0.0002`.
pub fn display_amount(value: f64) -> String {
    let fixed = format!("{value:.6}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn units(value: f64, unit: &str) -> String {
    format!("{} {}", display_amount(value), unit)
}
