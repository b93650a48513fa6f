use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};
use cw20::Cw20ReceiveMsg;

use common::OriginChainIdResponse;

use crate::state::PegInRecord;

#[cw_serde]
pub struct InstantiateMsg {
    /// Defaults to the sender
    pub owner: Option<String>,
    /// Defaults to the interim chain id (0xffffffff)
    pub origin_chain_id: Option<Binary>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// CW20 hook; the embedded message must be a `VaultReceiveMsg`
    Receive(Cw20ReceiveMsg),
    /// Owner: move held tokens out of the vault
    Transfer {
        token_address: String,
        recipient: String,
        amount: Uint128,
    },
    /// Owner: hand the vault to a new owner
    TransferOwnership { new_owner: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(OriginChainIdResponse)]
    OriginChainId {},
    #[returns(OwnerResponse)]
    Owner {},
    #[returns(PegInRecord)]
    PegIn { nonce: u64 },
    #[returns(PegInsResponse)]
    PegIns {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
}

#[cw_serde]
pub struct PegInsResponse {
    pub peg_ins: Vec<PegInRecord>,
}
