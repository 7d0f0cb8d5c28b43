//! Chain catalog and target selection.
//!
//! Burner accounts are a test-network tool, so the built-in catalog ships
//! testnets only; anything else goes through [`ChainTarget::custom`].

use anyhow::{Context, Result};
use url::Url;

/// A predefined EVM network with label, chain ID, native token, and default
/// RPC endpoint.
#[derive(Clone, Debug)]
pub struct Network {
    pub label: &'static str,
    pub chain_id: u64,
    pub native_token: &'static str,
    pub default_rpc: &'static str,
}

impl Network {
    pub const fn new(
        label: &'static str,
        chain_id: u64,
        native_token: &'static str,
        default_rpc: &'static str,
    ) -> Self {
        Self {
            label,
            chain_id,
            native_token,
            default_rpc,
        }
    }
}

/// Built-in test networks, Sepolia first (the default target).
pub const NETWORKS: &[Network] = &[
    Network::new("Sepolia", 11155111, "ETH", "https://rpc.sepolia.org"),
    Network::new("Holesky", 17000, "ETH", "https://ethereum-holesky-rpc.publicnode.com"),
    Network::new("Base Sepolia", 84532, "ETH", "https://sepolia.base.org"),
    Network::new("Arbitrum Sepolia", 421614, "ETH", "https://sepolia-rollup.arbitrum.io/rpc"),
];

/// Find a network by chain ID
pub fn find_network_by_chain_id(chain_id: u64) -> Option<&'static Network> {
    NETWORKS.iter().find(|n| n.chain_id == chain_id)
}

/// Check if a chain ID is used by a built-in network
pub fn is_builtin_chain_id(chain_id: u64) -> bool {
    NETWORKS.iter().any(|n| n.chain_id == chain_id)
}

/// Get the block explorer base URL for a given chain ID
pub fn get_block_explorer_url(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        11155111 => Some("https://sepolia.etherscan.io"),
        17000 => Some("https://holesky.etherscan.io"),
        84532 => Some("https://sepolia.basescan.org"),
        421614 => Some("https://sepolia.arbiscan.io"),
        _ => None,
    }
}

/// Get the full URL to view a transaction on the block explorer
pub fn get_tx_explorer_url(chain_id: u64, tx_hash: &str) -> Option<String> {
    get_block_explorer_url(chain_id).map(|base| format!("{}/tx/{}", base, tx_hash))
}

/// Get the full URL to view an address on the block explorer
pub fn get_address_explorer_url(chain_id: u64, address: &str) -> Option<String> {
    get_block_explorer_url(chain_id).map(|base| format!("{}/address/{}", base, address))
}

/// Where transactions are sent: a named RPC endpoint plus its chain ID.
///
/// Immutable once built. Targets have no ownership relation to accounts -
/// any account may transact on any target.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainTarget {
    pub label: String,
    pub rpc_url: Url,
    pub chain_id: u64,
    pub native_token: String,
}

impl ChainTarget {
    pub fn from_network(network: &Network) -> Self {
        Self {
            label: network.label.to_string(),
            rpc_url: Url::parse(network.default_rpc)
                .expect("catalog RPC URL is invalid - this is a programming error"),
            chain_id: network.chain_id,
            native_token: network.native_token.to_string(),
        }
    }

    /// Build a target for a network outside the built-in catalog.
    pub fn custom(label: &str, rpc_url: &str, chain_id: u64, native_token: &str) -> Result<Self> {
        let rpc_url =
            Url::parse(rpc_url).with_context(|| format!("invalid RPC URL '{}'", rpc_url))?;
        Ok(Self {
            label: label.to_string(),
            rpc_url,
            chain_id,
            native_token: native_token.to_string(),
        })
    }

    /// The same target with its RPC endpoint swapped out.
    pub fn with_rpc(&self, rpc_url: &str) -> Result<Self> {
        let rpc_url =
            Url::parse(rpc_url).with_context(|| format!("invalid RPC URL '{}'", rpc_url))?;
        Ok(Self {
            rpc_url,
            ..self.clone()
        })
    }

    /// Explorer link for a transaction on this target, if one is known.
    pub fn tx_explorer_url(&self, tx_hash: &str) -> Option<String> {
        get_tx_explorer_url(self.chain_id, tx_hash)
    }
}

impl Default for ChainTarget {
    fn default() -> Self {
        Self::from_network(&NETWORKS[0])
    }
}
