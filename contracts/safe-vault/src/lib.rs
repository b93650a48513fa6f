//! Safe Vault
//!
//! The router forwards a peg-in here whenever no vault is registered for the
//! destination chain. Every forwarded transfer is recorded with its metadata
//! so the owner can later move the tokens where they belong.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
