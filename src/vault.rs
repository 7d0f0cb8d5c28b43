//! Locally held burner accounts: generate, import, list, delete.
//!
//! The vault reads its full entry set once at open and rewrites the full set
//! after every mutation, so no partial state is ever visible in the store. A
//! corrupt stored blob degrades to an empty vault instead of a startup
//! failure; for a lab tool, availability beats losing a session to one bad
//! record.

use crate::error::VaultError;
use crate::keys;
use crate::store::KeyValueStore;
use crate::types::Account;
use chrono::{DateTime, TimeZone, Utc};
use ethers::signers::Signer;
use ethers::types::Address;
use ethers::utils::to_checksum;
use tracing::{info, warn};

/// Fixed storage key the serialized account list lives under.
pub const STORAGE_KEY: &str = "burner_wallets_v1";

/// Creation timestamps are stored with millisecond precision; truncate up
/// front so the in-memory value is identical to what a reload produces.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    Utc.timestamp_millis_opt(now.timestamp_millis())
        .single()
        .unwrap_or(now)
}

/// The set of locally held accounts, in insertion order.
pub struct Vault<S: KeyValueStore> {
    store: S,
    accounts: Vec<Account>,
}

impl<S: KeyValueStore> Vault<S> {
    /// Open the vault, loading whatever the store holds under
    /// [`STORAGE_KEY`].
    pub fn open(store: S) -> Self {
        let accounts = match store.get(STORAGE_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<Account>>(&blob) {
                Ok(accounts) => {
                    info!("Loaded {} account(s) from the store", accounts.len());
                    accounts
                }
                Err(e) => {
                    warn!("Stored account blob is unreadable, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read the account store, starting empty: {}", e);
                Vec::new()
            }
        };
        Self { store, accounts }
    }

    /// Generate a fresh random account and persist it.
    ///
    /// `label` defaults to `Burner #n` with n = vault size + 1.
    pub fn generate(&mut self, label: Option<String>) -> Result<Account, VaultError> {
        let secret_key = keys::generate_secret_key();
        let address = keys::derive_address(&secret_key)
            .expect("freshly generated secret key failed to derive - this is a programming error");
        let label = label.unwrap_or_else(|| format!("Burner #{}", self.accounts.len() + 1));

        let account = Account {
            address,
            secret_key,
            created_at: now_millis(),
            label: Some(label),
        };
        self.accounts.push(account.clone());
        self.persist()?;
        info!("Generated burner account {}", account.checksummed_address());
        Ok(account)
    }

    /// Import a caller-supplied secret key and persist the derived account.
    ///
    /// The address is re-derived from the secret, never trusted from the
    /// caller. A malformed secret fails with `InvalidKey`; a secret whose
    /// address is already held fails with `DuplicateAccount`. The vault is
    /// left untouched on either failure. `label` defaults to `Imported #n`.
    pub fn import(&mut self, secret_key: &str, label: Option<String>) -> Result<Account, VaultError> {
        let wallet = keys::parse_secret_key(secret_key)
            .map_err(|e| VaultError::InvalidKey(e.to_string()))?;
        let address = wallet.address();

        if self.accounts.iter().any(|a| a.address == address) {
            return Err(VaultError::DuplicateAccount(to_checksum(&address, None)));
        }

        let label = label.unwrap_or_else(|| format!("Imported #{}", self.accounts.len() + 1));
        let account = Account {
            address,
            // Canonical 0x form regardless of how the key was typed.
            secret_key: keys::to_hex(&wallet),
            created_at: now_millis(),
            label: Some(label),
        };
        self.accounts.push(account.clone());
        self.persist()?;
        info!("Imported account {}", account.checksummed_address());
        Ok(account)
    }

    /// Remove the account with the given address and persist the new set.
    ///
    /// An absent address is a no-op, not an error, and leaves the persisted
    /// set untouched.
    pub fn remove(&mut self, address: Address) -> Result<(), VaultError> {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.address != address);
        if self.accounts.len() == before {
            return Ok(());
        }
        self.persist()?;
        info!("Removed account {}", to_checksum(&address, None));
        Ok(())
    }

    /// Accounts in insertion order.
    pub fn list(&self) -> &[Account] {
        &self.accounts
    }

    /// Look up a held account by address.
    pub fn find(&self, address: Address) -> Option<&Account> {
        self.accounts.iter().find(|a| a.address == address)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn persist(&self) -> Result<(), VaultError> {
        let blob = serde_json::to_string(&self.accounts)
            .map_err(|e| VaultError::Storage(e.into()))?;
        self.store.set(STORAGE_KEY, &blob).map_err(VaultError::Storage)
    }
}
