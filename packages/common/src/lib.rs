//! Common - Shared Types and Interfaces for the Bridge Router Contracts
//!
//! This package provides the pieces every contract in the workspace agrees on:
//! - `chain_id` - the 4-byte chain identifier and its conversions
//! - `access` - role-based access control storage
//! - `interfaces` - messages exchanged between the router, vaults and pTokens

pub mod access;
pub mod chain_id;
pub mod interfaces;

pub use access::{Role, ROLE_MEMBERS};
pub use chain_id::{
    chain_id_from_binary, chain_id_from_hex, chain_id_to_hex, ChainId, INTERIM_CHAIN_ID,
};
pub use interfaces::{
    query_origin_chain_id, ChainIdentityQueryMsg, OriginChainIdResponse, PTokenExecuteMsg,
    VaultReceiveMsg,
};
