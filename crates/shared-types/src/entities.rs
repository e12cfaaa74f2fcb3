//! # Core Domain Entities
//!
//! Primitive identifiers shared by every beacon subsystem.

use serde::{Deserialize, Deserializer, Serializer};

/// A 20-byte account address.
pub type Address = [u8; 20];

/// Identifier of a registered beacon. Zero is never allocated.
pub type BeaconId = u64;

/// Per-beacon timestamp identifier. Starts at 1 and strictly increases.
pub type TimestampId = u64;

/// Unix timestamp in seconds since epoch.
pub type UnixSeconds = u64;

/// Maximum moniker length in characters.
pub const MAX_MONIKER_LEN: usize = 64;

/// Maximum beacon name length in characters.
pub const MAX_NAME_LEN: usize = 128;

/// Maximum submitted hash length in characters.
pub const MAX_HASH_LEN: usize = 66;

/// Renders an address as lowercase hex for logs and error messages.
pub fn format_address(address: &Address) -> String {
    hex::encode(address)
}

/// Parses a 40-character hex string (optional `0x` prefix) into an address.
pub fn parse_address(s: &str) -> Option<Address> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).ok()?;
    bytes.try_into().ok()
}

/// Serde adapter that encodes an [`Address`] as a hex string.
///
/// Used on every `owner` field so genesis files and transaction batches stay
/// human-readable.
pub mod hex_address {
    use super::*;

    pub fn serialize<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_address(address))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_address(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid address: {s}")))
    }
}

/// Like [`hex_address`], for optional addresses.
pub mod hex_address_opt {
    use super::*;

    pub fn serialize<S: Serializer>(
        address: &Option<Address>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match address {
            Some(a) => serializer.serialize_some(&format_address(a)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Address>, D::Error> {
        let s: Option<String> = Option::deserialize(deserializer)?;
        s.map(|s| {
            parse_address(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid address: {s}")))
        })
        .transpose()
    }
}
