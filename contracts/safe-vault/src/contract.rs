use cosmwasm_std::{
    entry_point, from_json, to_json_binary, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo,
    Order, Response, StdResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw20::{Cw20ExecuteMsg, Cw20ReceiveMsg};
use cw_storage_plus::Bound;

use common::{
    chain_id_from_binary, chain_id_to_hex, OriginChainIdResponse, VaultReceiveMsg,
    INTERIM_CHAIN_ID,
};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, OwnerResponse, PegInsResponse, QueryMsg};
use crate::state::{
    PegInRecord, CONTRACT_NAME, CONTRACT_VERSION, ORIGIN_CHAIN_ID, OWNER, PEG_INS, PEG_IN_NONCE,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender,
    };
    OWNER.save(deps.storage, &owner)?;

    let origin_chain_id = match msg.origin_chain_id {
        Some(id) => chain_id_from_binary(&id)?,
        None => INTERIM_CHAIN_ID,
    };
    ORIGIN_CHAIN_ID.save(deps.storage, &origin_chain_id)?;
    PEG_IN_NONCE.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("origin_chain_id", chain_id_to_hex(&origin_chain_id)))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Receive(receive) => execute_receive(deps, info, receive),
        ExecuteMsg::Transfer {
            token_address,
            recipient,
            amount,
        } => execute_transfer(deps, info, token_address, recipient, amount),
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
    }
}

fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    receive: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    if receive.amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let VaultReceiveMsg::PegIn {
        destination_address,
        destination_chain_id,
        user_data,
        metadata,
    } = from_json::<VaultReceiveMsg>(&receive.msg)?;
    let chain_id = chain_id_from_binary(&destination_chain_id)?;

    let nonce = PEG_IN_NONCE.load(deps.storage)?;
    let record = PegInRecord {
        nonce,
        token: info.sender,
        sender: deps.api.addr_validate(&receive.sender)?,
        amount: receive.amount,
        destination_address,
        destination_chain_id,
        user_data,
        metadata,
    };
    PEG_INS.save(deps.storage, nonce, &record)?;
    PEG_IN_NONCE.save(deps.storage, &(nonce + 1))?;

    Ok(Response::new()
        .add_attribute("method", "peg_in")
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("token_address", record.token)
        .add_attribute("amount", record.amount)
        .add_attribute("destination_address", record.destination_address)
        .add_attribute("destination_chain_id", chain_id_to_hex(&chain_id)))
}

fn execute_transfer(
    deps: DepsMut,
    info: MessageInfo,
    token_address: String,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let owner = OWNER.load(deps.storage)?;
    if info.sender != owner {
        return Err(ContractError::Unauthorized);
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let token = deps.api.addr_validate(&token_address)?;
    let recipient = deps.api.addr_validate(&recipient)?;

    let transfer_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(transfer_msg)
        .add_attribute("method", "transfer")
        .add_attribute("token_address", token)
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount))
}

fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let owner = OWNER.load(deps.storage)?;
    if info.sender != owner {
        return Err(ContractError::Unauthorized);
    }

    let new_owner = deps.api.addr_validate(&new_owner)?;
    OWNER.save(deps.storage, &new_owner)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_ownership")
        .add_attribute("previous_owner", owner)
        .add_attribute("new_owner", new_owner))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::OriginChainId {} => to_json_binary(&query_origin_chain_id(deps)?),
        QueryMsg::Owner {} => to_json_binary(&OwnerResponse {
            owner: OWNER.load(deps.storage)?,
        }),
        QueryMsg::PegIn { nonce } => to_json_binary(&PEG_INS.load(deps.storage, nonce)?),
        QueryMsg::PegIns { start_after, limit } => {
            to_json_binary(&query_peg_ins(deps, start_after, limit)?)
        }
    }
}

fn query_origin_chain_id(deps: Deps) -> StdResult<OriginChainIdResponse> {
    let origin_chain_id = ORIGIN_CHAIN_ID.load(deps.storage)?;
    Ok(OriginChainIdResponse {
        origin_chain_id: Binary::from(origin_chain_id.to_vec()),
    })
}

fn query_peg_ins(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<PegInsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let peg_ins = PEG_INS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, record)| record))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(PegInsResponse { peg_ins })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("method", "migrate"))
}
