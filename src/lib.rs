//! Cinder core: disposable EVM accounts and the operations against them.
//!
//! Console skins come and go; this crate owns the three subsystems they all
//! wrap: a key vault for locally held burner accounts, a batch gas-drip
//! dispatcher with locally assigned nonces, and a calldata builder for
//! hand-typed contract calls. No CLI, GUI, or wire protocol lives here.

pub mod calldata;
pub mod client;
pub mod config;
pub mod contract_call;
pub mod drip;
pub mod error;
pub mod keys;
pub mod store;
pub mod types;
pub mod utils;
pub mod vault;

pub use config::{ChainTarget, Network, NETWORKS};
pub use contract_call::{execute, ContractCallIntent};
pub use drip::{dispatch, DispatchEvent, TransferIntent};
pub use error::{CalldataError, DispatchError, ExecuteError, VaultError};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::Account;
pub use vault::Vault;
