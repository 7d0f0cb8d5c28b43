//! Common types shared across modules.

use chrono::{DateTime, Utc};
use ethers::types::Address;
use ethers::utils::to_checksum;
use serde::{Deserialize, Serialize};

/// A locally held burner account: an address plus the secret key that
/// controls it.
///
/// The serialized form matches the console's storage records: checksummed
/// `address`, 0x-prefixed `privateKey`, `createdAt` in epoch milliseconds,
/// optional `name`. The address is always re-derivable from the secret key;
/// [`crate::vault::Vault`] enforces that on import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    #[serde(with = "checksummed")]
    pub address: Address,
    #[serde(rename = "privateKey")]
    pub secret_key: String,
    #[serde(rename = "createdAt", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Account {
    /// EIP-55 checksummed rendering of the address.
    pub fn checksummed_address(&self) -> String {
        to_checksum(&self.address, None)
    }
}

/// Serialize addresses in their checksummed form; accept any-case hex back.
mod checksummed {
    use ethers::types::Address;
    use ethers::utils::to_checksum;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_checksum(address, None))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
