//! Chain adapter boundary for the real-deployment path.
//!
//! The ledger never calls a chain itself. The console drives an adapter to
//! connect and deploy, and only records a token once the deployment has
//! returned an address.

use crate::chain;
use crate::ids::IdGenerator;
use crate::types::{Chain, NetworkMode};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletConnection {
    pub address: String,
    pub chain_id: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    #[error("wallet connection rejected: {0}")]
    Rejected(String),
    #[error("wallet not connected")]
    NotConnected,
    #[error("transaction failed: {0}")]
    TransactionFailed(String),
    #[error("contract deployment failed: {0}")]
    DeployFailed(String),
}

pub trait ChainAdapter {
    fn connect(&mut self) -> Result<WalletConnection, AdapterError>;
    /// Returns the transaction hash.
    fn send_value(&mut self, to: &str, amount: f64) -> Result<String, AdapterError>;
    /// Returns the deployed contract address.
    fn deploy_contract(
        &mut self,
        name: &str,
        symbol: &str,
        supply: f64,
    ) -> Result<String, AdapterError>;
}

/// In-process adapter with switchable failures.
#[derive(Clone, Debug)]
pub struct SimulatedChain {
    chain: Chain,
    mode: NetworkMode,
    ids: IdGenerator,
    connection: Option<WalletConnection>,
    reject_connect: bool,
    fail_deploy: bool,
}

impl SimulatedChain {
    pub fn new(chain: Chain, mode: NetworkMode, seed: u64) -> Self {
        Self {
            chain,
            mode,
            ids: IdGenerator::with_seed(seed),
            connection: None,
            reject_connect: false,
            fail_deploy: false,
        }
    }

    pub fn rejecting_connection(mut self) -> Self {
        self.reject_connect = true;
        self
    }

    pub fn failing_deployment(mut self) -> Self {
        self.fail_deploy = true;
        self
    }

    pub fn connection(&self) -> Option<&WalletConnection> {
        self.connection.as_ref()
    }
}

impl ChainAdapter for SimulatedChain {
    fn connect(&mut self) -> Result<WalletConnection, AdapterError> {
        if self.reject_connect {
            return Err(AdapterError::Rejected("user rejected the request".to_string()));
        }
        let connection = WalletConnection {
            address: self.ids.wallet_address(self.chain),
            chain_id: chain::lookup(self.chain).evm_chain_id(self.mode).unwrap_or(0),
        };
        self.connection = Some(connection.clone());
        Ok(connection)
    }

    fn send_value(&mut self, to: &str, amount: f64) -> Result<String, AdapterError> {
        if self.connection.is_none() {
            return Err(AdapterError::NotConnected);
        }
        if to.trim().is_empty() || !(amount.is_finite() && amount > 0.0) {
            return Err(AdapterError::TransactionFailed(
                "invalid recipient or amount".to_string(),
            ));
        }
        Ok(self.ids.tx_hash())
    }

    fn deploy_contract(
        &mut self,
        _name: &str,
        _symbol: &str,
        _supply: f64,
    ) -> Result<String, AdapterError> {
        if self.connection.is_none() {
            return Err(AdapterError::NotConnected);
        }
        if self.fail_deploy {
            return Err(AdapterError::DeployFailed("execution reverted".to_string()));
        }
        Ok(self.ids.contract_address(self.chain))
    }
}
