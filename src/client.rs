//! Chain client seam: the narrow capability surface the dispatcher and
//! executor need from an EVM node, plus the ethers-backed implementation.
//!
//! Everything network-shaped goes through [`ChainClient`], which keeps the
//! dispatch and execute paths testable against a scripted double.

use anyhow::{anyhow, Context, Result};
use ethers::middleware::SignerMiddleware;
use ethers::prelude::*;
use ethers::providers::{Http, Provider};
use url::Url;

use crate::keys;

/// Fields of one transaction to sign and broadcast.
///
/// `nonce: None` lets the chain client fill it fresh (single-shot calls);
/// batch dispatch always sets it explicitly from its local counter.
#[derive(Debug, Clone)]
pub struct TxFields {
    pub to: Address,
    pub value: U256,
    pub data: Option<Bytes>,
    pub nonce: Option<u64>,
}

/// Capability surface over one RPC connection.
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// Current native-token balance of `address`.
    async fn balance(&self, address: Address) -> Result<U256>;

    /// The next unused sequence number for `address`.
    async fn next_nonce(&self, address: Address) -> Result<u64>;

    /// Sign `tx` with `secret_key` and submit it, returning the transaction
    /// hash the node acknowledged. Any node-side rejection is an error.
    async fn sign_and_broadcast(&self, secret_key: &str, tx: &TxFields) -> Result<TxHash>;
}

/// Chain client backed by an ethers HTTP provider and local-key signing.
#[derive(Clone)]
pub struct EthersClient {
    provider: Provider<Http>,
    chain_id: u64,
}

impl EthersClient {
    /// Connect to an RPC endpoint, discovering its chain ID from the node.
    ///
    /// Used for freeform RPC overrides where the operator supplies only a
    /// URL.
    pub async fn connect(rpc_url: &Url) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url.as_str())
            .with_context(|| format!("invalid RPC endpoint {}", rpc_url))?;
        let chain_id = provider
            .get_chainid()
            .await
            .with_context(|| format!("failed to query chain id from {}", rpc_url))?
            .as_u64();
        Ok(Self { provider, chain_id })
    }

    /// Connect when the chain ID is already known, skipping the discovery
    /// round trip.
    pub fn connect_with_chain_id(rpc_url: &Url, chain_id: u64) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url.as_str())
            .with_context(|| format!("invalid RPC endpoint {}", rpc_url))?;
        Ok(Self { provider, chain_id })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl ChainClient for EthersClient {
    async fn balance(&self, address: Address) -> Result<U256> {
        Ok(self.provider.get_balance(address, None).await?)
    }

    async fn next_nonce(&self, address: Address) -> Result<u64> {
        Ok(self
            .provider
            .get_transaction_count(address, None)
            .await?
            .as_u64())
    }

    async fn sign_and_broadcast(&self, secret_key: &str, tx: &TxFields) -> Result<TxHash> {
        let signer = keys::parse_secret_key(secret_key)?.with_chain_id(self.chain_id);
        let client = SignerMiddleware::new(self.provider.clone(), signer);

        let mut request = TransactionRequest::new().to(tx.to).value(tx.value);
        if let Some(ref data) = tx.data {
            request = request.data(data.clone());
        }
        if let Some(nonce) = tx.nonce {
            request = request.nonce(nonce);
        }

        let pending = client
            .send_transaction(request, None)
            .await
            .map_err(|e| anyhow!("node rejected transaction: {}", e))?;
        Ok(pending.tx_hash())
    }
}
