//! Bridge Router for TerraClassic
//!
//! Receives CW20 transfers that carry a versioned metadata envelope, decodes
//! the destination, takes the bridge fee and either delivers locally, forwards
//! to a vault (falling back to the safe vault) or redeems on the token's
//! native chain.

pub mod address_codec;
pub mod contract;
pub mod error;
pub mod execute;
pub mod metadata;
pub mod msg;
pub mod query;
pub mod routing;
pub mod state;
pub mod user_data;
pub mod vault_registry;

pub use crate::error::ContractError;
