//! Gas drip batches: one native-value transfer from a funding account to
//! each recipient in an ordered list, on one chain target.
//!
//! Nonces are assigned from a local counter fetched once before the loop and
//! incremented exactly once per accepted broadcast; submissions never wait
//! for confirmation. Throughput over safety is the point: the counter is
//! owned by the single in-flight dispatch task and is never re-read from the
//! network mid-batch, so the caller must not run two dispatches for the same
//! funder concurrently.

use ethers::types::{Address, TxHash, U256};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

use crate::client::{ChainClient, EthersClient, TxFields};
use crate::config::ChainTarget;
use crate::error::DispatchError;
use crate::keys;
use crate::types::Account;
use crate::utils;

/// One batch of identical-value transfers. Built per dispatch call, never
/// persisted.
#[derive(Debug, Clone)]
pub struct TransferIntent {
    pub funder: Account,
    pub chain: ChainTarget,
    pub recipients: Vec<Address>,
    pub amount_per_recipient: U256,
}

impl TransferIntent {
    /// Caller-level preconditions, checked before any event is emitted.
    fn validate(&self) -> Result<(), DispatchError> {
        if self.recipients.is_empty() {
            return Err(DispatchError::InvalidIntent(
                "recipient list is empty".to_string(),
            ));
        }
        if self.amount_per_recipient.is_zero() {
            return Err(DispatchError::InvalidIntent(
                "amount per recipient must be positive".to_string(),
            ));
        }
        if let Err(e) = keys::parse_secret_key(&self.funder.secret_key) {
            return Err(DispatchError::InvalidIntent(format!(
                "funder secret key: {}",
                e
            )));
        }
        Ok(())
    }
}

/// Progress of an in-flight drip, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchEvent {
    /// Advisory context, e.g. the funder balance read before the loop.
    Info(String),
    /// One transfer accepted by the node; its nonce is consumed.
    Submitted { recipient: Address, tx_hash: TxHash },
    /// A node-side rejection. The remaining recipients are abandoned; a
    /// fresh dispatch call is required to continue.
    Failed { reason: String },
    /// Every recipient was submitted.
    Completed,
}

/// Validate and dispatch a drip, returning its event sequence.
///
/// Invalid intents fail here and emit nothing. The sequence is finite and
/// not restartable; dropping the receiver cancels the batch, which stops
/// further submissions but cannot recall what was already broadcast.
pub async fn dispatch(
    intent: TransferIntent,
) -> Result<UnboundedReceiver<DispatchEvent>, DispatchError> {
    intent.validate()?;

    let (events, receiver) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let client =
            match EthersClient::connect_with_chain_id(&intent.chain.rpc_url, intent.chain.chain_id)
            {
                Ok(client) => client,
                Err(e) => {
                    let _ = events.send(DispatchEvent::Failed {
                        reason: e.to_string(),
                    });
                    return;
                }
            };
        if let Err(e) = drip(&client, &intent, &events).await {
            warn!("Drip aborted: {}", e);
        }
    });
    Ok(receiver)
}

/// Run one drip against an already connected client, emitting events in
/// order.
///
/// Broadcast failure emits `Failed` and aborts the rest of the batch - the
/// local nonce counter cannot be trusted to resynchronize silently after a
/// rejected transaction, so skip-and-continue is never attempted.
pub async fn drip<C: ChainClient>(
    client: &C,
    intent: &TransferIntent,
    events: &UnboundedSender<DispatchEvent>,
) -> Result<(), DispatchError> {
    intent.validate()?;

    let funder = intent.funder.address;

    // Advisory only: insufficient funds surface per-transaction at
    // broadcast, not as an up-front refusal.
    let balance = match client.balance(funder).await {
        Ok(balance) => balance,
        Err(e) => return abort(events, format!("balance query failed: {}", e)),
    };
    let _ = events.send(DispatchEvent::Info(format!(
        "balance: {} {}",
        utils::format_ether(balance),
        intent.chain.native_token
    )));

    let mut nonce = match client.next_nonce(funder).await {
        Ok(nonce) => nonce,
        Err(e) => return abort(events, format!("nonce query failed: {}", e)),
    };

    info!(
        "Dripping {} {} to {} recipient(s) on {} starting at nonce {}",
        utils::format_ether(intent.amount_per_recipient),
        intent.chain.native_token,
        intent.recipients.len(),
        intent.chain.label,
        nonce
    );

    for recipient in &intent.recipients {
        // Receiver dropped means the operator cancelled: stop submitting.
        // Transfers already broadcast stay broadcast; a public ledger has
        // no rollback.
        if events.is_closed() {
            return Ok(());
        }

        let tx = TxFields {
            to: *recipient,
            value: intent.amount_per_recipient,
            data: None,
            nonce: Some(nonce),
        };
        match client.sign_and_broadcast(&intent.funder.secret_key, &tx).await {
            Ok(tx_hash) => {
                // The local counter is the only nonce authority mid-batch;
                // it moves exactly once per accepted broadcast.
                nonce += 1;
                let _ = events.send(DispatchEvent::Submitted {
                    recipient: *recipient,
                    tx_hash,
                });
            }
            Err(e) => return abort(events, e.to_string()),
        }
    }

    let _ = events.send(DispatchEvent::Completed);
    Ok(())
}

fn abort(events: &UnboundedSender<DispatchEvent>, reason: String) -> Result<(), DispatchError> {
    let _ = events.send(DispatchEvent::Failed {
        reason: reason.clone(),
    });
    Err(DispatchError::Broadcast(reason))
}
