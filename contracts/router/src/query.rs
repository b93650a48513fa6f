//! Query handlers for the bridge router
//!
//! Contract errors surface as `StdError::generic_err` carrying their display
//! text.

use cosmwasm_std::{Binary, Deps, StdError, StdResult, Uint128};

use common::{
    access, chain_id_from_binary, query_origin_chain_id, OriginChainIdResponse, Role,
};

use crate::address_codec::EvmAddress;
use crate::error::ContractError;
use crate::metadata::{decode_metadata, encode_metadata};
use crate::msg::{
    ConfigResponse, EncodedMetadataResponse, EncodedUserDataResponse, HasRoleResponse,
    MetadataFields, MetadataResponse, ResolvedVaultResponse, RoleIdResponse,
    RoleMembersResponse, RouteSimulationResponse, SafeVaultAddressResponse, UserDataResponse,
    VaultAddressEntry, VaultAddressResponse, VaultAddressesResponse,
};
use crate::routing::plan_route;
use crate::state::{Stats, CONFIG, FEE_CONTRACT, STATS};
use crate::user_data::{decode_user_data, encode_user_data};
use crate::vault_registry::{
    safe_vault_address, safely_get_vault_address, vault_address, vault_addresses,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

fn to_std(err: impl Into<ContractError>) -> StdError {
    match err.into() {
        ContractError::Std(err) => err,
        err => StdError::generic_err(err.to_string()),
    }
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        interim_chain_id: Binary::from(config.interim_chain_id.to_vec()),
        safe_vault_address: safe_vault_address(deps.storage)?,
        fee_contract_address: FEE_CONTRACT.may_load(deps.storage)?,
    })
}

pub fn query_stats(deps: Deps) -> StdResult<Stats> {
    Ok(STATS.may_load(deps.storage)?.unwrap_or_default())
}

pub fn query_origin_chain_id_of_router(deps: Deps) -> StdResult<OriginChainIdResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(OriginChainIdResponse {
        origin_chain_id: Binary::from(config.interim_chain_id.to_vec()),
    })
}

pub fn query_origin_chain_id_of(deps: Deps, contract: String) -> StdResult<OriginChainIdResponse> {
    let contract = deps.api.addr_validate(&contract)?;
    let chain_id = query_origin_chain_id(&deps.querier, &contract)?;
    Ok(OriginChainIdResponse {
        origin_chain_id: Binary::from(chain_id.to_vec()),
    })
}

pub fn query_vault_address(deps: Deps, chain_id: Binary) -> StdResult<VaultAddressResponse> {
    let id = chain_id_from_binary(&chain_id)?;
    Ok(VaultAddressResponse {
        vault_address: vault_address(deps.storage, &id)?,
        chain_id,
    })
}

pub fn query_vault_addresses(
    deps: Deps,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<VaultAddressesResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_after = start_after
        .map(|id| chain_id_from_binary(&id))
        .transpose()?;

    let vaults = vault_addresses(deps.storage, start_after.as_ref(), limit)?
        .into_iter()
        .map(|(chain_id, vault_address)| VaultAddressEntry {
            chain_id: Binary::from(chain_id.to_vec()),
            vault_address,
        })
        .collect();

    Ok(VaultAddressesResponse { vaults })
}

pub fn query_safe_vault_address(deps: Deps) -> StdResult<SafeVaultAddressResponse> {
    Ok(SafeVaultAddressResponse {
        safe_vault_address: safe_vault_address(deps.storage)?,
    })
}

pub fn query_safely_get_vault_address(
    deps: Deps,
    chain_id: Binary,
) -> StdResult<ResolvedVaultResponse> {
    let chain_id = chain_id_from_binary(&chain_id)?;
    let resolved = safely_get_vault_address(deps.storage, &chain_id).map_err(to_std)?;
    Ok(ResolvedVaultResponse {
        vault_address: resolved.address,
        is_safe_vault: resolved.is_safe_vault,
    })
}

pub fn query_decode_metadata(metadata: Binary) -> StdResult<MetadataResponse> {
    let decoded = decode_metadata(metadata.as_slice()).map_err(to_std)?;
    let (destination_chain_id, destination_address) = match decoded.destination() {
        Some((chain_id, address)) => (
            Some(Binary::from(chain_id.to_vec())),
            Some(address.to_display_string()),
        ),
        None => (None, None),
    };

    Ok(MetadataResponse {
        version: decoded.version().tag(),
        user_data: Binary::from(decoded.user_data().to_vec()),
        origin_chain_id: Binary::from(decoded.origin_chain_id().to_vec()),
        origin_address: decoded.origin_address().to_display_string(),
        destination_chain_id,
        destination_address,
        protocol_options: Binary::from(decoded.protocol_options().to_vec()),
        protocol_receipt: Binary::from(decoded.protocol_receipt().to_vec()),
    })
}

pub fn query_encode_metadata(
    version: u8,
    fields: MetadataFields,
) -> StdResult<EncodedMetadataResponse> {
    let metadata = encode_metadata(version, &fields).map_err(to_std)?;
    Ok(EncodedMetadataResponse {
        metadata: Binary::from(metadata),
    })
}

pub fn query_decode_user_data(user_data: Binary) -> StdResult<UserDataResponse> {
    let (chain_id, address) = decode_user_data(user_data.as_slice()).map_err(to_std)?;
    Ok(UserDataResponse {
        destination_chain_id: Binary::from(chain_id.to_vec()),
        destination_address: address.to_checksum(),
    })
}

pub fn query_encode_user_data(
    destination_chain_id: Binary,
    destination_address: String,
) -> StdResult<EncodedUserDataResponse> {
    let chain_id = chain_id_from_binary(&destination_chain_id)?;
    let address = EvmAddress::from_hex(&destination_address)
        .map_err(|err| StdError::generic_err(err.to_string()))?;
    Ok(EncodedUserDataResponse {
        user_data: Binary::from(encode_user_data(&chain_id, &address)),
    })
}

pub fn query_simulate_route(
    deps: Deps,
    token_address: String,
    amount: Uint128,
    metadata: Binary,
) -> StdResult<RouteSimulationResponse> {
    let token = deps.api.addr_validate(&token_address)?;
    let plan = plan_route(deps, &token, amount, &metadata).map_err(to_std)?;
    Ok(RouteSimulationResponse {
        route: plan.route,
        recipient: plan.recipient,
        is_safe_vault: plan.is_safe_vault,
        destination_chain_id: Binary::from(plan.destination_chain_id.to_vec()),
        destination_address: plan.destination_address,
        user_data: plan.user_data,
        fee_amount: plan.fee.fee_amount,
        amount_minus_fee: plan.fee.amount_minus_fee,
        payouts: plan.fee.payouts,
    })
}

pub fn query_has_role(deps: Deps, role: Role, address: String) -> StdResult<HasRoleResponse> {
    let account = deps.api.addr_validate(&address)?;
    Ok(HasRoleResponse {
        has_role: access::has_role(deps.storage, role, &account)?,
    })
}

pub fn query_role_members(deps: Deps, role: Role) -> StdResult<RoleMembersResponse> {
    Ok(RoleMembersResponse {
        members: access::role_members(deps.storage, role)?,
        role,
    })
}

pub fn query_role_id(role: Role) -> RoleIdResponse {
    RoleIdResponse {
        id: format!("0x{}", hex::encode(role.id())),
        role,
    }
}
