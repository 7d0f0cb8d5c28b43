//! Single contract calls assembled from a hand-typed function signature.
//!
//! One transaction per call, so there is no local nonce counter here: the
//! chain client fills the nonce fresh at broadcast.

use ethers::types::{Address, TxHash, U256};
use tracing::info;
use url::Url;

use crate::calldata;
use crate::client::{ChainClient, EthersClient, TxFields};
use crate::error::ExecuteError;
use crate::keys;
use crate::types::Account;

/// One contract invocation. Built per execute call, never persisted.
#[derive(Debug, Clone)]
pub struct ContractCallIntent {
    pub executor: Account,
    pub rpc_url: Url,
    pub contract: Address,
    pub function_signature: String,
    pub raw_args: String,
    pub value: U256,
}

/// Execute a single contract call, connecting to the intent's RPC endpoint.
///
/// The chain ID is discovered from the node, so freeform RPC overrides work
/// without the operator supplying one.
pub async fn execute(intent: ContractCallIntent) -> Result<TxHash, ExecuteError> {
    let client = EthersClient::connect(&intent.rpc_url)
        .await
        .map_err(|e| ExecuteError::Broadcast(e.to_string()))?;
    execute_call(&client, &intent).await
}

/// Execute against an already connected client.
///
/// Calldata errors propagate unchanged; any chain-client failure (RPC
/// unreachable, insufficient funds, revert) surfaces as `Broadcast`.
pub async fn execute_call<C: ChainClient>(
    client: &C,
    intent: &ContractCallIntent,
) -> Result<TxHash, ExecuteError> {
    if let Err(e) = keys::parse_secret_key(&intent.executor.secret_key) {
        return Err(ExecuteError::InvalidIntent(format!(
            "executor secret key: {}",
            e
        )));
    }

    let call = calldata::build_calldata(&intent.function_signature, &intent.raw_args)?;
    info!(
        "Calling {}() on {:?} with value {}",
        call.function_name, intent.contract, intent.value
    );

    let tx = TxFields {
        to: intent.contract,
        value: intent.value,
        data: Some(call.data),
        nonce: None,
    };
    client
        .sign_and_broadcast(&intent.executor.secret_key, &tx)
        .await
        .map_err(|e| ExecuteError::Broadcast(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalldataError;
    use anyhow::anyhow;
    use chrono::Utc;
    use std::sync::Mutex;

    /// Chain double that records the broadcast request and answers with a
    /// fixed outcome.
    struct RecordingClient {
        accept: bool,
        sent: Mutex<Vec<TxFields>>,
    }

    impl RecordingClient {
        fn accepting() -> Self {
            Self {
                accept: true,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn rejecting() -> Self {
            Self {
                accept: false,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<TxFields> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl ChainClient for RecordingClient {
        async fn balance(&self, _address: Address) -> anyhow::Result<U256> {
            Ok(U256::zero())
        }

        async fn next_nonce(&self, _address: Address) -> anyhow::Result<u64> {
            Ok(0)
        }

        async fn sign_and_broadcast(
            &self,
            _secret_key: &str,
            tx: &TxFields,
        ) -> anyhow::Result<TxHash> {
            self.sent.lock().unwrap().push(tx.clone());
            if self.accept {
                Ok(TxHash::from_low_u64_be(0xfeed))
            } else {
                Err(anyhow!("execution reverted"))
            }
        }
    }

    fn test_intent() -> ContractCallIntent {
        let secret_key = keys::generate_secret_key();
        let executor = Account {
            address: keys::derive_address(&secret_key).unwrap(),
            secret_key,
            created_at: Utc::now(),
            label: None,
        };
        ContractCallIntent {
            executor,
            rpc_url: "https://rpc.sepolia.org".parse().unwrap(),
            contract: Address::from_low_u64_be(0xc0ffee),
            function_signature: "mint(uint256)".to_string(),
            raw_args: "1".to_string(),
            value: U256::zero(),
        }
    }

    // ==================== execute_call tests ====================

    #[tokio::test]
    async fn test_execute_call_broadcasts_encoded_calldata() {
        let client = RecordingClient::accepting();
        let intent = test_intent();

        let hash = execute_call(&client, &intent).await.unwrap();

        assert_eq!(hash, TxHash::from_low_u64_be(0xfeed));
        let sent = client.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, intent.contract);
        assert_eq!(sent[0].nonce, None);
        let expected = calldata::build_calldata("mint(uint256)", "1").unwrap();
        assert_eq!(sent[0].data.as_ref().unwrap(), &expected.data);
    }

    #[tokio::test]
    async fn test_execute_call_forwards_value() {
        let client = RecordingClient::accepting();
        let mut intent = test_intent();
        intent.value = U256::from(5u64);

        execute_call(&client, &intent).await.unwrap();

        assert_eq!(client.sent()[0].value, U256::from(5u64));
    }

    #[tokio::test]
    async fn test_execute_call_propagates_calldata_errors() {
        let client = RecordingClient::accepting();
        let mut intent = test_intent();
        intent.raw_args = "1, 2".to_string();

        let result = execute_call(&client, &intent).await;

        assert!(matches!(
            result,
            Err(ExecuteError::Calldata(CalldataError::SignatureMismatch {
                expected: 1,
                got: 2
            }))
        ));
        assert!(client.sent().is_empty());
    }

    #[tokio::test]
    async fn test_execute_call_rejected_broadcast() {
        let client = RecordingClient::rejecting();
        let intent = test_intent();

        let result = execute_call(&client, &intent).await;

        match result {
            Err(ExecuteError::Broadcast(reason)) => assert!(reason.contains("reverted")),
            other => panic!("expected Broadcast, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_call_invalid_executor_key() {
        let client = RecordingClient::accepting();
        let mut intent = test_intent();
        intent.executor.secret_key = "garbage".to_string();

        let result = execute_call(&client, &intent).await;

        assert!(matches!(result, Err(ExecuteError::InvalidIntent(_))));
        assert!(client.sent().is_empty());
    }
}
