//! Chain Identifiers
//!
//! Chains are identified by an opaque 4-byte value. Messages carry it as
//! `Binary`, storage keys use the raw bytes and attributes render it as a
//! `0x`-prefixed 8 digit hex string.

use cosmwasm_std::{Binary, StdError, StdResult};

/// 4-byte opaque chain identifier
pub type ChainId = [u8; 4];

/// Default chain id of the hub (interim) chain the router is deployed on
pub const INTERIM_CHAIN_ID: ChainId = [0xff, 0xff, 0xff, 0xff];

/// Convert a message-level `Binary` into a `ChainId`
pub fn chain_id_from_binary(value: &Binary) -> StdResult<ChainId> {
    value.as_slice().try_into().map_err(|_| {
        StdError::generic_err(format!(
            "Invalid chain ID: expected 4 bytes, got {}",
            value.len()
        ))
    })
}

/// Render a chain id as `0x` + 8 lowercase hex digits
pub fn chain_id_to_hex(chain_id: &ChainId) -> String {
    format!("0x{}", hex::encode(chain_id))
}

/// Parse a chain id from hex, with or without the `0x` prefix
pub fn chain_id_from_hex(value: &str) -> StdResult<ChainId> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(stripped)
        .map_err(|e| StdError::generic_err(format!("Invalid chain ID hex: {}", e)))?;
    bytes.as_slice().try_into().map_err(|_| {
        StdError::generic_err(format!(
            "Invalid chain ID: expected 4 bytes, got {}",
            bytes.len()
        ))
    })
}
