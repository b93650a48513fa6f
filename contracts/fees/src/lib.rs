//! Bridge Fee Engine
//!
//! Computes the protocol fee for a routed transfer. Two schedules exist:
//! - `Directional`: global peg-in/peg-out defaults, per-token custom
//!   overrides and a fee exception list
//! - `Classed`: per-token fees keyed by crossing class, with a USD
//!   denominated minimum fee floor
//!
//! The router queries `QuoteFee` and pays the returned payouts.

pub mod contract;
pub mod error;
pub mod fee_manager;
pub mod msg;
pub mod query;
pub mod state;

pub use crate::error::ContractError;
