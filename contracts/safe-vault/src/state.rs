use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Uint128};
use cw_storage_plus::{Item, Map};

use common::ChainId;

pub const CONTRACT_NAME: &str = "crates.io:bridge-safe-vault";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const OWNER: Item<Addr> = Item::new("owner");

/// Chain this vault natively belongs to
pub const ORIGIN_CHAIN_ID: Item<ChainId> = Item::new("origin_chain_id");

/// Next peg-in record nonce
pub const PEG_IN_NONCE: Item<u64> = Item::new("peg_in_nonce");

#[cw_serde]
pub struct PegInRecord {
    pub nonce: u64,
    pub token: Addr,
    /// Account that sent the tokens (the router for forwarded peg-ins)
    pub sender: Addr,
    pub amount: Uint128,
    pub destination_address: String,
    pub destination_chain_id: Binary,
    pub user_data: Binary,
    pub metadata: Binary,
}

/// nonce => peg-in record
pub const PEG_INS: Map<u64, PegInRecord> = Map::new("peg_ins");
