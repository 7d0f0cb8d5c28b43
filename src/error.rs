//! Typed error taxonomy for the public operations.
//!
//! Network and storage edges use `anyhow`; everything surfaced to callers of
//! the vault, calldata, drip, and execute paths is one of the enums below.
//! Nothing here is retried automatically - retry is a caller policy layered
//! on a fresh invocation.

use thiserror::Error;

/// Vault-level failures. Surfaced immediately, never retried.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The supplied secret is not a well-formed private key.
    #[error("invalid secret key: {0}")]
    InvalidKey(String),
    /// The derived address is already held; the vault is left unchanged.
    #[error("account {0} already exists in the vault")]
    DuplicateAccount(String),
    /// The backing store rejected a write.
    #[error("vault storage error: {0}")]
    Storage(anyhow::Error),
}

/// Calldata-builder failures. No partial encoding is ever returned.
#[derive(Debug, Error)]
pub enum CalldataError {
    /// The signature does not parse as `name(type,type,...)`.
    #[error("malformed function signature '{0}'")]
    InvalidSignature(String),
    /// Argument count does not match the declared parameter count.
    #[error("signature mismatch: {expected} declared parameter(s), {got} argument(s)")]
    SignatureMismatch { expected: usize, got: usize },
    /// One argument would not coerce to its declared type.
    #[error("argument {index} ('{value}') does not encode as {param}: {reason}")]
    ArgumentEncoding {
        index: usize,
        value: String,
        param: String,
        reason: String,
    },
}

/// Batch dispatcher failures.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A caller-level precondition was violated; no events were emitted.
    #[error("invalid transfer intent: {0}")]
    InvalidIntent(String),
    /// A chain-side rejection terminated the batch.
    #[error("broadcast failed: {0}")]
    Broadcast(String),
}

/// Single contract-call failures.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// A caller-level precondition was violated.
    #[error("invalid call intent: {0}")]
    InvalidIntent(String),
    /// Calldata construction failed; passed through unchanged.
    #[error(transparent)]
    Calldata(#[from] CalldataError),
    /// The chain client rejected the transaction.
    #[error("broadcast failed: {0}")]
    Broadcast(String),
}
