//! Cross-Contract Interfaces
//!
//! Messages the router sends to, or expects from, its peer contracts:
//! - vaults receive forwarded tokens through a CW20 `Send` whose hook
//!   message is [`VaultReceiveMsg::PegIn`]
//! - pTokens are asked to burn and release on their native chain with
//!   [`PTokenExecuteMsg::Redeem`]
//! - every peer answers [`ChainIdentityQueryMsg::OriginChainId`]

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, QuerierWrapper, StdResult, Uint128};

use crate::chain_id::{chain_id_from_binary, ChainId};

/// Hook message carried inside a CW20 `Send` to a vault
#[cw_serde]
pub enum VaultReceiveMsg {
    PegIn {
        destination_address: String,
        destination_chain_id: Binary,
        user_data: Binary,
        /// The router's incoming metadata envelope, forwarded untouched
        metadata: Binary,
    },
}

/// Execute message understood by pToken contracts
#[cw_serde]
pub enum PTokenExecuteMsg {
    /// Burn `amount` from the caller and release it on the destination chain
    Redeem {
        amount: Uint128,
        user_data: Binary,
        destination_address: String,
        destination_chain_id: Binary,
    },
}

/// The `ORIGIN_CHAIN_ID` accessor shared by routers, vaults and pTokens
#[cw_serde]
#[derive(QueryResponses)]
pub enum ChainIdentityQueryMsg {
    #[returns(OriginChainIdResponse)]
    OriginChainId {},
}

#[cw_serde]
pub struct OriginChainIdResponse {
    pub origin_chain_id: Binary,
}

/// Ask `contract` which chain it natively belongs to
pub fn query_origin_chain_id(querier: &QuerierWrapper, contract: &Addr) -> StdResult<ChainId> {
    let response: OriginChainIdResponse =
        querier.query_wasm_smart(contract, &ChainIdentityQueryMsg::OriginChainId {})?;
    chain_id_from_binary(&response.origin_chain_id)
}
