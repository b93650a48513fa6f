//! Bridge Router Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//! - `routing` - Route planning shared by `Receive` and `SimulateRoute`

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use common::{access, chain_id_from_binary, chain_id_to_hex, Role, INTERIM_CHAIN_ID};

use crate::error::ContractError;
use crate::execute::{
    execute_add_vault_address, execute_receive, execute_remove_vault_address,
    execute_set_fee_contract_address, execute_set_role, execute_transfer_owner,
    execute_update_safe_vault_address,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_decode_metadata, query_decode_user_data, query_encode_metadata,
    query_encode_user_data, query_has_role, query_origin_chain_id_of,
    query_origin_chain_id_of_router, query_role_id, query_role_members, query_safe_vault_address,
    query_safely_get_vault_address, query_simulate_route, query_stats, query_vault_address,
    query_vault_addresses,
};
use crate::state::{Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, FEE_CONTRACT, STATS};
use crate::vault_registry::update_safe_vault_address;

// ============================================================================
// Instantiate
// ============================================================================

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

    let interim_chain_id = match msg.interim_chain_id {
        Some(chain_id) => chain_id_from_binary(&chain_id)?,
        None => INTERIM_CHAIN_ID,
    };
    CONFIG.save(deps.storage, &Config { interim_chain_id })?;
    STATS.save(deps.storage, &Stats::default())?;

    if let Some(safe_vault) = msg.safe_vault_address {
        let safe_vault = deps.api.addr_validate(&safe_vault)?;
        update_safe_vault_address(deps.storage, &safe_vault)?;
    }
    if let Some(fee_contract) = msg.fee_contract_address {
        let fee_contract = deps.api.addr_validate(&fee_contract)?;
        FEE_CONTRACT.save(deps.storage, &fee_contract)?;
    }

    access::grant_role(deps.storage, Role::DefaultAdmin, &owner)?;
    access::grant_role(deps.storage, Role::Admin, &owner)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("interim_chain_id", chain_id_to_hex(&interim_chain_id)))
}

// ============================================================================
// Execute
// ============================================================================

/// Role needed to run `msg`; `None` for the public transfer hook
fn required_role(msg: &ExecuteMsg) -> Option<Role> {
    match msg {
        ExecuteMsg::Receive(_) => None,
        ExecuteMsg::TransferOwner { .. }
        | ExecuteMsg::GrantAdminRole { .. }
        | ExecuteMsg::RevokeAdminRole { .. } => Some(Role::DefaultAdmin),
        ExecuteMsg::AddVaultAddress { .. }
        | ExecuteMsg::RemoveVaultAddress { .. }
        | ExecuteMsg::UpdateSafeVaultAddress { .. }
        | ExecuteMsg::SetFeeContractAddress { .. }
        | ExecuteMsg::GrantMinterRole { .. }
        | ExecuteMsg::RevokeMinterRole { .. }
        | ExecuteMsg::GrantRedeemerRole { .. }
        | ExecuteMsg::RevokeRedeemerRole { .. } => Some(Role::Admin),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    if let Some(role) = required_role(&msg) {
        if !access::has_role(deps.storage, role, &info.sender)? {
            return Err(ContractError::Unauthorized {
                role: role.as_str().to_string(),
            });
        }
    }

    match msg {
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, info, cw20_msg),
        ExecuteMsg::AddVaultAddress {
            chain_id,
            vault_address,
        } => execute_add_vault_address(deps, chain_id, vault_address),
        ExecuteMsg::RemoveVaultAddress { chain_id } => execute_remove_vault_address(deps, chain_id),
        ExecuteMsg::UpdateSafeVaultAddress { safe_vault_address } => {
            execute_update_safe_vault_address(deps, safe_vault_address)
        }
        ExecuteMsg::SetFeeContractAddress {
            fee_contract_address,
        } => execute_set_fee_contract_address(deps, fee_contract_address),
        ExecuteMsg::TransferOwner { new_owner } => execute_transfer_owner(deps, info, new_owner),
        ExecuteMsg::GrantAdminRole { address } => {
            execute_set_role(deps, Role::Admin, address, true)
        }
        ExecuteMsg::RevokeAdminRole { address } => {
            execute_set_role(deps, Role::Admin, address, false)
        }
        ExecuteMsg::GrantMinterRole { address } => {
            execute_set_role(deps, Role::Minter, address, true)
        }
        ExecuteMsg::RevokeMinterRole { address } => {
            execute_set_role(deps, Role::Minter, address, false)
        }
        ExecuteMsg::GrantRedeemerRole { address } => {
            execute_set_role(deps, Role::Redeemer, address, true)
        }
        ExecuteMsg::RevokeRedeemerRole { address } => {
            execute_set_role(deps, Role::Redeemer, address, false)
        }
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::OriginChainId {} => to_json_binary(&query_origin_chain_id_of_router(deps)?),
        QueryMsg::OriginChainIdOf { contract } => {
            to_json_binary(&query_origin_chain_id_of(deps, contract)?)
        }
        QueryMsg::VaultAddress { chain_id } => to_json_binary(&query_vault_address(deps, chain_id)?),
        QueryMsg::VaultAddresses { start_after, limit } => {
            to_json_binary(&query_vault_addresses(deps, start_after, limit)?)
        }
        QueryMsg::SafeVaultAddress {} => to_json_binary(&query_safe_vault_address(deps)?),
        QueryMsg::SafelyGetVaultAddress { chain_id } => {
            to_json_binary(&query_safely_get_vault_address(deps, chain_id)?)
        }
        QueryMsg::DecodeMetadata { metadata } => to_json_binary(&query_decode_metadata(metadata)?),
        QueryMsg::EncodeMetadata { version, fields } => {
            to_json_binary(&query_encode_metadata(version, fields)?)
        }
        QueryMsg::DecodeUserData { user_data } => {
            to_json_binary(&query_decode_user_data(user_data)?)
        }
        QueryMsg::EncodeUserData {
            destination_chain_id,
            destination_address,
        } => to_json_binary(&query_encode_user_data(
            destination_chain_id,
            destination_address,
        )?),
        QueryMsg::SimulateRoute {
            token_address,
            amount,
            metadata,
        } => to_json_binary(&query_simulate_route(deps, token_address, amount, metadata)?),
        QueryMsg::HasRole { role, address } => to_json_binary(&query_has_role(deps, role, address)?),
        QueryMsg::RoleMembers { role } => to_json_binary(&query_role_members(deps, role)?),
        QueryMsg::RoleId { role } => to_json_binary(&query_role_id(role)),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
