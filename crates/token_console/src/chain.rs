//! # Chain registry
//!
//! Static metadata per supported chain family. Pure lookup, no state.
//!
//! | Chain | Currency | Mainnet explorer          | Testnet explorer                    |
//! |-------|----------|---------------------------|-------------------------------------|
//! | BNB   | `BNB`    | `https://bscscan.com`     | `https://testnet.bscscan.com`       |
//! | SOL   | `SOL`    | `https://solscan.io`      | `https://solscan.io` (`?cluster=devnet`) |
//! | TON   | `TON`    | `https://tonviewer.com`   | `https://testnet.tonviewer.com`     |

use crate::types::{Chain, NetworkMode};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Explorer {
    pub base_url: &'static str,
    /// Appended to every explorer link (cluster selectors and the like).
    pub query: &'static str,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChainInfo {
    pub chain: Chain,
    pub name: &'static str,
    pub currency_symbol: &'static str,
    pub icon: &'static str,
    mainnet: Explorer,
    testnet: Explorer,
    tx_path: &'static str,
    address_path: &'static str,
    /// EVM chain ids; `None` for non-EVM chains.
    evm_chain_ids: Option<(u64, u64)>,
}

impl ChainInfo {
    pub fn explorer(&self, mode: NetworkMode) -> Explorer {
        match mode {
            NetworkMode::Mainnet => self.mainnet,
            NetworkMode::Testnet => self.testnet,
        }
    }

    pub fn explorer_url(&self, mode: NetworkMode) -> String {
        let explorer = self.explorer(mode);
        format!("{}{}", explorer.base_url, explorer.query)
    }

    pub fn explorer_tx_url(&self, mode: NetworkMode, hash: &str) -> String {
        let explorer = self.explorer(mode);
        format!("{}{}{}{}", explorer.base_url, self.tx_path, hash, explorer.query)
    }

    pub fn explorer_address_url(&self, mode: NetworkMode, address: &str) -> String {
        let explorer = self.explorer(mode);
        format!(
            "{}{}{}{}",
            explorer.base_url, self.address_path, address, explorer.query
        )
    }

    pub fn evm_chain_id(&self, mode: NetworkMode) -> Option<u64> {
        self.evm_chain_ids.map(|(mainnet, testnet)| match mode {
            NetworkMode::Mainnet => mainnet,
            NetworkMode::Testnet => testnet,
        })
    }
}

static BNB: ChainInfo = ChainInfo {
    chain: Chain::Bnb,
    name: "BNB Smart Chain",
    currency_symbol: "BNB",
    icon: "🟡",
    mainnet: Explorer { base_url: "https://bscscan.com", query: "" },
    testnet: Explorer { base_url: "https://testnet.bscscan.com", query: "" },
    tx_path: "/tx/",
    address_path: "/address/",
    evm_chain_ids: Some((56, 97)),
};

static SOL: ChainInfo = ChainInfo {
    chain: Chain::Sol,
    name: "Solana",
    currency_symbol: "SOL",
    icon: "🟣",
    mainnet: Explorer { base_url: "https://solscan.io", query: "" },
    testnet: Explorer { base_url: "https://solscan.io", query: "?cluster=devnet" },
    tx_path: "/tx/",
    address_path: "/account/",
    evm_chain_ids: None,
};

static TON: ChainInfo = ChainInfo {
    chain: Chain::Ton,
    name: "TON",
    currency_symbol: "TON",
    icon: "💎",
    mainnet: Explorer { base_url: "https://tonviewer.com", query: "" },
    testnet: Explorer { base_url: "https://testnet.tonviewer.com", query: "" },
    tx_path: "/transaction/",
    address_path: "/",
    evm_chain_ids: None,
};

pub fn lookup(chain: Chain) -> &'static ChainInfo {
    match chain {
        Chain::Bnb => &BNB,
        Chain::Sol => &SOL,
        Chain::Ton => &TON,
    }
}

/// Shorthand for the native currency ticker.
pub fn currency_symbol(chain: Chain) -> &'static str {
    lookup(chain).currency_symbol
}
