//! Secret-key primitives for burner accounts.
//!
//! Keys are carried as 0x-prefixed hex strings at module boundaries (that is
//! the operator's authoring format) and parsed into signers exactly where
//! they are used.

use anyhow::{anyhow, Result};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;

/// Generate a fresh random secret key as a 0x-prefixed hex string.
///
/// Entropy comes from the OS CSPRNG via `rand::thread_rng`; there is no
/// fallback source and no retry.
pub fn generate_secret_key() -> String {
    let wallet = LocalWallet::new(&mut rand::thread_rng());
    to_hex(&wallet)
}

/// Derive the account address controlled by `secret_key`.
///
/// Accepts hex with or without a 0x prefix; fails on anything that is not
/// valid key material.
pub fn derive_address(secret_key: &str) -> Result<Address> {
    Ok(parse_secret_key(secret_key)?.address())
}

/// Parse a secret key into a signer.
pub(crate) fn parse_secret_key(secret_key: &str) -> Result<LocalWallet> {
    let stripped = secret_key.trim();
    let stripped = stripped.strip_prefix("0x").unwrap_or(stripped);
    let bytes = hex::decode(stripped).map_err(|e| anyhow!("secret key is not valid hex: {}", e))?;
    LocalWallet::from_bytes(&bytes).map_err(|e| anyhow!("secret key rejected: {}", e))
}

/// Canonical 0x-prefixed hex form of a signer's secret key.
pub(crate) fn to_hex(wallet: &LocalWallet) -> String {
    format!("0x{}", hex::encode(wallet.signer().to_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== generate_secret_key tests ====================

    #[test]
    fn test_generate_secret_key_shape() {
        let secret = generate_secret_key();
        assert!(secret.starts_with("0x"));
        assert_eq!(secret.len(), 2 + 64);
    }

    #[test]
    fn test_generate_secret_key_is_unique() {
        assert_ne!(generate_secret_key(), generate_secret_key());
    }

    #[test]
    fn test_generated_key_derives_an_address() {
        let secret = generate_secret_key();
        assert!(derive_address(&secret).is_ok());
    }

    // ==================== derive_address tests ====================

    #[test]
    fn test_derive_address_known_vector() {
        // Keccak test key from the ethers documentation.
        let secret = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
        let address = derive_address(secret).unwrap();
        let without_prefix = derive_address(&secret[2..]).unwrap();
        assert_eq!(address, without_prefix);
    }

    #[test]
    fn test_derive_address_prefix_insensitive() {
        let secret = generate_secret_key();
        let bare = secret.trim_start_matches("0x").to_string();
        assert_eq!(
            derive_address(&secret).unwrap(),
            derive_address(&bare).unwrap()
        );
    }

    #[test]
    fn test_derive_address_rejects_non_hex() {
        assert!(derive_address("0xnothex").is_err());
    }

    #[test]
    fn test_derive_address_rejects_short_key() {
        assert!(derive_address("0xabcd").is_err());
    }

    #[test]
    fn test_derive_address_rejects_empty() {
        assert!(derive_address("").is_err());
    }
}
