//! State definitions for the bridge router
//!
//! The vault registry lives in `vault_registry`; role membership lives in
//! `common::access`.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

use common::ChainId;

pub const CONTRACT_NAME: &str = "crates.io:bridge-router";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cw_serde]
pub struct Config {
    /// Chain the router is deployed on; also its `ORIGIN_CHAIN_ID`
    pub interim_chain_id: ChainId,
}

#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub total_peg_ins: u64,
    pub total_peg_outs: u64,
    pub total_interim_deliveries: u64,
    /// Peg-ins that fell back to the safe vault
    pub total_safe_vault_fallbacks: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Fee engine contract; no fees are taken while unset
pub const FEE_CONTRACT: Item<Addr> = Item::new("fee_contract");

pub const STATS: Item<Stats> = Item::new("stats");
