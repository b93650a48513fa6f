//! Error types for the bridge router
//!
//! Codec failures (`AddressError`, `MetadataError`) are pure and
//! carry no host types; `ContractError` wraps them for the entry points.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Metadata(#[from] MetadataError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Caller is not an admin: {role} required")]
    Unauthorized { role: String },

    #[error("New owner must differ from the current owner")]
    OwnerUnchanged,

    // ========================================================================
    // Routing Errors
    // ========================================================================

    #[error("Unroutable: no vault registered for chain {chain_id} and no safe vault configured")]
    Unroutable { chain_id: String },

    #[error("Invalid chain ID: expected 4 bytes, got {got}")]
    InvalidChainId { got: usize },

    #[error("Invalid chain ID: zero is reserved")]
    ZeroChainId,

    #[error("Invalid amount: must be greater than zero")]
    ZeroAmount,

    #[error("Amount {amount} is fully consumed by a fee of {fee_amount}")]
    AmountConsumedByFee { amount: Uint128, fee_amount: Uint128 },

    #[error("Fee quote does not conserve the amount: {reason}")]
    InvalidFeeQuote { reason: String },

    #[error("Invalid destination address for the interim chain: {address}")]
    InvalidInterimRecipient { address: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AddressError {
    #[error("expected 20 bytes, got {got}")]
    InvalidLength { got: usize },

    #[error("invalid hex: {reason}")]
    InvalidHex { reason: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MetadataError {
    #[error("Empty metadata envelope")]
    Empty,

    #[error("Unrecognized metadata version: 0x{version:02x}")]
    UnrecognizedVersion { version: u8 },

    #[error("Malformed metadata: {reason}")]
    Abi { reason: String },

    #[error("Invalid address in metadata: {0}")]
    Address(#[from] AddressError),

    #[error("Invalid chain ID in metadata: expected 4 bytes, got {got}")]
    InvalidChainId { got: usize },

    #[error("Destination chain ID and destination address must be set together")]
    IncompleteDestination,

    #[error("Metadata version 0x{version:02x} requires a destination chain ID and address")]
    MissingDestination { version: u8 },

    #[error("Metadata version 0x{version:02x} does not carry {field}")]
    UnsupportedField { version: u8, field: &'static str },
}

impl From<alloy_sol_types::Error> for MetadataError {
    fn from(err: alloy_sol_types::Error) -> Self {
        MetadataError::Abi {
            reason: err.to_string(),
        }
    }
}
