//! Vault registry and fee engine configuration.

use cosmwasm_std::{Binary, DepsMut, Response};

use common::{chain_id_from_binary, chain_id_to_hex, ChainId};

use crate::error::ContractError;
use crate::state::FEE_CONTRACT;
use crate::vault_registry::{add_vault_address, remove_vault_address, update_safe_vault_address};

/// Chain ids must be exactly four bytes and non-zero
pub(crate) fn validate_chain_id(chain_id: &Binary) -> Result<ChainId, ContractError> {
    if chain_id.len() != 4 {
        return Err(ContractError::InvalidChainId {
            got: chain_id.len(),
        });
    }
    let chain_id = chain_id_from_binary(chain_id)?;
    if chain_id == [0u8; 4] {
        return Err(ContractError::ZeroChainId);
    }
    Ok(chain_id)
}

pub fn execute_add_vault_address(
    deps: DepsMut,
    chain_id: Binary,
    vault_address: String,
) -> Result<Response, ContractError> {
    let chain_id = validate_chain_id(&chain_id)?;
    let vault = deps.api.addr_validate(&vault_address)?;

    let previous = add_vault_address(deps.storage, &chain_id, &vault)?;

    let mut response = Response::new()
        .add_attribute("method", "add_vault_address")
        .add_attribute("chain_id", chain_id_to_hex(&chain_id))
        .add_attribute("vault_address", vault);
    if let Some(previous) = previous {
        response = response.add_attribute("replaced", previous);
    }
    Ok(response)
}

pub fn execute_remove_vault_address(
    deps: DepsMut,
    chain_id: Binary,
) -> Result<Response, ContractError> {
    let chain_id = validate_chain_id(&chain_id)?;
    let removed = remove_vault_address(deps.storage, &chain_id)?;

    Ok(Response::new()
        .add_attribute("method", "remove_vault_address")
        .add_attribute("chain_id", chain_id_to_hex(&chain_id))
        .add_attribute(
            "removed",
            removed.map(|addr| addr.to_string()).unwrap_or_default(),
        ))
}

pub fn execute_update_safe_vault_address(
    deps: DepsMut,
    safe_vault_address: String,
) -> Result<Response, ContractError> {
    let vault = deps.api.addr_validate(&safe_vault_address)?;
    update_safe_vault_address(deps.storage, &vault)?;

    Ok(Response::new()
        .add_attribute("method", "update_safe_vault_address")
        .add_attribute("safe_vault_address", vault))
}

pub fn execute_set_fee_contract_address(
    deps: DepsMut,
    fee_contract_address: Option<String>,
) -> Result<Response, ContractError> {
    let fee_contract = match fee_contract_address {
        Some(address) => {
            let address = deps.api.addr_validate(&address)?;
            FEE_CONTRACT.save(deps.storage, &address)?;
            address.to_string()
        }
        None => {
            FEE_CONTRACT.remove(deps.storage);
            "none".to_string()
        }
    };

    Ok(Response::new()
        .add_attribute("method", "set_fee_contract_address")
        .add_attribute("fee_contract_address", fee_contract))
}
