//! Fee Engine Contract - Entry Points
//!
//! Every execute message is role-gated. `required_role` maps each message to
//! the role it needs and the check runs once, before dispatch.

use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, Decimal, Deps, DepsMut, Env, MessageInfo,
    Response, StdResult, Uint128,
};
use cw2::set_contract_version;

use common::{access, chain_id_from_binary, chain_id_to_hex, Role};

use crate::error::ContractError;
use crate::fee_manager::{custom_fees, sanity_check_basis_points};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{
    ClassFee, CrossingClass, CustomFees, FeeConfig, FeeModel, FeeSink, TokenClassFees, CLASS_FEES,
    CONTRACT_NAME, CONTRACT_VERSION, CUSTOM_FEES, DEFAULT_MAX_FEE_BASIS_POINTS,
    FEE_BASIS_POINTS_DIVISOR, FEE_CONFIG, FEE_EXCEPTIONS, USD_EXCHANGE_RATES,
};

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

    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender,
    };

    let max_fee_basis_points = msg
        .max_fee_basis_points
        .unwrap_or(DEFAULT_MAX_FEE_BASIS_POINTS);
    validate_max_fee_basis_points(max_fee_basis_points)?;

    let fee_sink_address = deps.api.addr_validate(&msg.fee_sink_address)?;
    let fee_sink = match msg.node_operators_fee_sink_address {
        Some(node_operators) => split_sink(
            fee_sink_address,
            deps.api.addr_validate(&node_operators)?,
        )?,
        None => FeeSink::Single { fee_sink_address },
    };

    let mut config = FeeConfig {
        max_fee_basis_points,
        peg_in_basis_points: 0,
        peg_out_basis_points: 0,
        fee_sink,
        fee_model: FeeModel::Directional,
        node_operators_minimum_fee_multiplier: Decimal::zero(),
    };
    config.peg_in_basis_points = sanity_check_basis_points(&config, msg.peg_in_basis_points)?;
    config.peg_out_basis_points = sanity_check_basis_points(&config, msg.peg_out_basis_points)?;
    FEE_CONFIG.save(deps.storage, &config)?;

    access::grant_role(deps.storage, Role::DefaultAdmin, &admin)?;
    access::grant_role(deps.storage, Role::Admin, &admin)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", admin)
        .add_attribute("peg_in_basis_points", config.peg_in_basis_points.to_string())
        .add_attribute("peg_out_basis_points", config.peg_out_basis_points.to_string())
        .add_attribute("max_fee_basis_points", max_fee_basis_points.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

fn required_role(msg: &ExecuteMsg) -> Role {
    match msg {
        ExecuteMsg::GrantAdminRole { .. } | ExecuteMsg::RevokeAdminRole { .. } => {
            Role::DefaultAdmin
        }
        _ => Role::Admin,
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let role = required_role(&msg);
    if !access::has_role(deps.storage, role, &info.sender)? {
        return Err(ContractError::Unauthorized {
            role: role.as_str().to_string(),
        });
    }

    match msg {
        ExecuteMsg::SetPegInBasisPoints { basis_points } => {
            execute_set_default_basis_points(deps, true, basis_points)
        }
        ExecuteMsg::SetPegOutBasisPoints { basis_points } => {
            execute_set_default_basis_points(deps, false, basis_points)
        }
        ExecuteMsg::SetFees {
            token_address,
            peg_in_basis_points,
            peg_out_basis_points,
        } => execute_set_fees(deps, token_address, peg_in_basis_points, peg_out_basis_points),
        ExecuteMsg::SetCustomPegInFee {
            token_address,
            basis_points,
        } => execute_set_custom_fee(deps, token_address, true, basis_points),
        ExecuteMsg::SetCustomPegOutFee {
            token_address,
            basis_points,
        } => execute_set_custom_fee(deps, token_address, false, basis_points),
        ExecuteMsg::AddFeeException { token_address } => {
            execute_add_fee_exception(deps, token_address)
        }
        ExecuteMsg::RemoveFeeException { token_address } => {
            execute_remove_fee_exception(deps, token_address)
        }
        ExecuteMsg::SetMaxFeeBasisPoints {
            max_fee_basis_points,
        } => execute_set_max_fee_basis_points(deps, max_fee_basis_points),
        ExecuteMsg::SetFeeSinkAddress { fee_sink_address } => {
            execute_set_fee_sink_address(deps, fee_sink_address)
        }
        ExecuteMsg::SetFeeSinkAddresses {
            network_fee_sink_address,
            node_operators_fee_sink_address,
        } => execute_set_fee_sink_addresses(
            deps,
            network_fee_sink_address,
            node_operators_fee_sink_address,
        ),
        ExecuteMsg::SetClassFees {
            token_address,
            host_to_host,
            host_to_native,
            native_to_host,
            native_to_native,
        } => execute_set_class_fees(
            deps,
            token_address,
            TokenClassFees {
                host_to_host,
                host_to_native,
                native_to_host,
                native_to_native,
            },
        ),
        ExecuteMsg::SetClassFee {
            token_address,
            class,
            fee,
        } => execute_set_class_fee(deps, token_address, class, fee),
        ExecuteMsg::SetUsdExchangeRate { chain_id, rate } => {
            execute_set_usd_exchange_rate(deps, chain_id, rate)
        }
        ExecuteMsg::SetNodeOperatorsMinimumFeeMultiplier { multiplier } => {
            execute_set_node_operators_minimum_fee_multiplier(deps, multiplier)
        }
        ExecuteMsg::SetFeeModel { fee_model } => execute_set_fee_model(deps, fee_model),
        ExecuteMsg::GrantAdminRole { address } => execute_grant_admin_role(deps, address),
        ExecuteMsg::RevokeAdminRole { address } => execute_revoke_admin_role(deps, address),
    }
}

fn validate_max_fee_basis_points(max_fee_basis_points: u64) -> Result<(), ContractError> {
    if max_fee_basis_points > FEE_BASIS_POINTS_DIVISOR {
        return Err(ContractError::MaxBasisPointsAboveDivisor {
            max_fee_basis_points,
            divisor: FEE_BASIS_POINTS_DIVISOR,
        });
    }
    Ok(())
}

fn split_sink(
    network_fee_sink_address: Addr,
    node_operators_fee_sink_address: Addr,
) -> Result<FeeSink, ContractError> {
    if network_fee_sink_address == node_operators_fee_sink_address {
        return Err(ContractError::DuplicateFeeSink);
    }
    Ok(FeeSink::Split {
        network_fee_sink_address,
        node_operators_fee_sink_address,
    })
}

fn execute_set_default_basis_points(
    deps: DepsMut,
    is_peg_in: bool,
    basis_points: u64,
) -> Result<Response, ContractError> {
    let mut config = FEE_CONFIG.load(deps.storage)?;
    let basis_points = sanity_check_basis_points(&config, basis_points)?;
    let method = if is_peg_in {
        config.peg_in_basis_points = basis_points;
        "set_peg_in_basis_points"
    } else {
        config.peg_out_basis_points = basis_points;
        "set_peg_out_basis_points"
    };
    FEE_CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", method)
        .add_attribute("basis_points", basis_points.to_string()))
}

fn execute_set_fees(
    deps: DepsMut,
    token_address: String,
    peg_in_basis_points: u64,
    peg_out_basis_points: u64,
) -> Result<Response, ContractError> {
    let config = FEE_CONFIG.load(deps.storage)?;
    let token = deps.api.addr_validate(&token_address)?;
    let custom = CustomFees {
        peg_in_basis_points: Some(sanity_check_basis_points(&config, peg_in_basis_points)?),
        peg_out_basis_points: Some(sanity_check_basis_points(&config, peg_out_basis_points)?),
    };
    CUSTOM_FEES.save(deps.storage, &token, &custom)?;

    Ok(Response::new()
        .add_attribute("method", "set_fees")
        .add_attribute("token_address", token)
        .add_attribute("peg_in_basis_points", peg_in_basis_points.to_string())
        .add_attribute("peg_out_basis_points", peg_out_basis_points.to_string()))
}

fn execute_set_custom_fee(
    deps: DepsMut,
    token_address: String,
    is_peg_in: bool,
    basis_points: Option<u64>,
) -> Result<Response, ContractError> {
    let config = FEE_CONFIG.load(deps.storage)?;
    let token = deps.api.addr_validate(&token_address)?;
    let basis_points = basis_points
        .map(|bps| sanity_check_basis_points(&config, bps))
        .transpose()?;

    let mut custom = custom_fees(deps.storage, &token)?;
    let method = if is_peg_in {
        custom.peg_in_basis_points = basis_points;
        "set_custom_peg_in_fee"
    } else {
        custom.peg_out_basis_points = basis_points;
        "set_custom_peg_out_fee"
    };
    if custom.is_empty() {
        CUSTOM_FEES.remove(deps.storage, &token);
    } else {
        CUSTOM_FEES.save(deps.storage, &token, &custom)?;
    }

    Ok(Response::new()
        .add_attribute("method", method)
        .add_attribute("token_address", token)
        .add_attribute(
            "basis_points",
            basis_points.map_or_else(|| "default".to_string(), |bps| bps.to_string()),
        ))
}

fn execute_add_fee_exception(
    deps: DepsMut,
    token_address: String,
) -> Result<Response, ContractError> {
    let token = deps.api.addr_validate(&token_address)?;
    FEE_EXCEPTIONS.save(deps.storage, &token, &true)?;

    Ok(Response::new()
        .add_attribute("method", "add_fee_exception")
        .add_attribute("token_address", token))
}

fn execute_remove_fee_exception(
    deps: DepsMut,
    token_address: String,
) -> Result<Response, ContractError> {
    let token = deps.api.addr_validate(&token_address)?;
    FEE_EXCEPTIONS.remove(deps.storage, &token);

    Ok(Response::new()
        .add_attribute("method", "remove_fee_exception")
        .add_attribute("token_address", token))
}

fn execute_set_max_fee_basis_points(
    deps: DepsMut,
    max_fee_basis_points: u64,
) -> Result<Response, ContractError> {
    validate_max_fee_basis_points(max_fee_basis_points)?;
    FEE_CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.max_fee_basis_points = max_fee_basis_points;
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("method", "set_max_fee_basis_points")
        .add_attribute("max_fee_basis_points", max_fee_basis_points.to_string()))
}

fn execute_set_fee_sink_address(
    deps: DepsMut,
    fee_sink_address: String,
) -> Result<Response, ContractError> {
    let fee_sink_address = deps.api.addr_validate(&fee_sink_address)?;
    FEE_CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.fee_sink = FeeSink::Single {
            fee_sink_address: fee_sink_address.clone(),
        };
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("method", "set_fee_sink_address")
        .add_attribute("fee_sink_address", fee_sink_address))
}

fn execute_set_fee_sink_addresses(
    deps: DepsMut,
    network_fee_sink_address: String,
    node_operators_fee_sink_address: String,
) -> Result<Response, ContractError> {
    let network = deps.api.addr_validate(&network_fee_sink_address)?;
    let node_operators = deps.api.addr_validate(&node_operators_fee_sink_address)?;
    let fee_sink = split_sink(network.clone(), node_operators.clone())?;

    let mut config = FEE_CONFIG.load(deps.storage)?;
    config.fee_sink = fee_sink;
    FEE_CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_fee_sink_addresses")
        .add_attribute("network_fee_sink_address", network)
        .add_attribute("node_operators_fee_sink_address", node_operators))
}

fn execute_set_class_fees(
    deps: DepsMut,
    token_address: String,
    fees: TokenClassFees,
) -> Result<Response, ContractError> {
    let config = FEE_CONFIG.load(deps.storage)?;
    let token = deps.api.addr_validate(&token_address)?;
    for fee in [
        fees.host_to_host,
        fees.host_to_native,
        fees.native_to_host,
        fees.native_to_native,
    ] {
        sanity_check_basis_points(&config, fee.basis_points)?;
    }
    CLASS_FEES.save(deps.storage, &token, &fees)?;

    Ok(Response::new()
        .add_attribute("method", "set_class_fees")
        .add_attribute("token_address", token))
}

fn execute_set_class_fee(
    deps: DepsMut,
    token_address: String,
    class: CrossingClass,
    fee: ClassFee,
) -> Result<Response, ContractError> {
    let config = FEE_CONFIG.load(deps.storage)?;
    let token = deps.api.addr_validate(&token_address)?;
    sanity_check_basis_points(&config, fee.basis_points)?;

    let mut fees = CLASS_FEES
        .may_load(deps.storage, &token)?
        .unwrap_or_default();
    fees.set(class, fee);
    CLASS_FEES.save(deps.storage, &token, &fees)?;

    Ok(Response::new()
        .add_attribute("method", "set_class_fee")
        .add_attribute("token_address", token)
        .add_attribute("class", class.as_str())
        .add_attribute("multiplier", fee.multiplier.to_string())
        .add_attribute("basis_points", fee.basis_points.to_string()))
}

fn execute_set_usd_exchange_rate(
    deps: DepsMut,
    chain_id: Binary,
    rate: Option<Uint128>,
) -> Result<Response, ContractError> {
    let chain_id = chain_id_from_binary(&chain_id)?;
    let rate_attr = match rate {
        Some(rate) if rate.is_zero() => return Err(ContractError::ZeroExchangeRate),
        Some(rate) => {
            USD_EXCHANGE_RATES.save(deps.storage, &chain_id, &rate)?;
            rate.to_string()
        }
        None => {
            USD_EXCHANGE_RATES.remove(deps.storage, &chain_id);
            "none".to_string()
        }
    };

    Ok(Response::new()
        .add_attribute("method", "set_usd_exchange_rate")
        .add_attribute("chain_id", chain_id_to_hex(&chain_id))
        .add_attribute("usd_exchange_rate", rate_attr))
}

fn execute_set_node_operators_minimum_fee_multiplier(
    deps: DepsMut,
    multiplier: Decimal,
) -> Result<Response, ContractError> {
    FEE_CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.node_operators_minimum_fee_multiplier = multiplier;
        Ok(config)
    })?;

    Ok(Response::new()
        .add_attribute("method", "set_node_operators_minimum_fee_multiplier")
        .add_attribute("multiplier", multiplier.to_string()))
}

fn execute_set_fee_model(deps: DepsMut, fee_model: FeeModel) -> Result<Response, ContractError> {
    FEE_CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.fee_model = fee_model;
        Ok(config)
    })?;

    let model = match fee_model {
        FeeModel::Directional => "directional",
        FeeModel::Classed => "classed",
    };
    Ok(Response::new()
        .add_attribute("method", "set_fee_model")
        .add_attribute("fee_model", model))
}

fn execute_grant_admin_role(deps: DepsMut, address: String) -> Result<Response, ContractError> {
    let account = deps.api.addr_validate(&address)?;
    let granted = access::grant_role(deps.storage, Role::Admin, &account)?;

    Ok(Response::new()
        .add_attribute("method", "grant_admin_role")
        .add_attribute("account", account)
        .add_attribute("changed", granted.to_string()))
}

fn execute_revoke_admin_role(deps: DepsMut, address: String) -> Result<Response, ContractError> {
    let account = deps.api.addr_validate(&address)?;
    let revoked = access::revoke_role(deps.storage, Role::Admin, &account)?;

    Ok(Response::new()
        .add_attribute("method", "revoke_admin_role")
        .add_attribute("account", account)
        .add_attribute("changed", revoked.to_string()))
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query::query_config(deps)?),
        QueryMsg::TokenFees { token_address } => {
            to_json_binary(&query::query_token_fees(deps, token_address)?)
        }
        QueryMsg::FeeBasisPoints {
            token_address,
            is_peg_in,
        } => to_json_binary(&query::query_fee_basis_points(
            deps,
            token_address,
            is_peg_in,
        )?),
        QueryMsg::CalculateFee {
            token_address,
            amount,
            is_peg_in,
        } => to_json_binary(&query::query_calculate_fee(
            deps,
            token_address,
            amount,
            is_peg_in,
        )?),
        QueryMsg::QuoteFee {
            token_address,
            amount,
            is_peg_in,
            origin_chain_id,
            destination_chain_id,
            token_native_chain_id,
        } => to_json_binary(&query::query_quote_fee(
            deps,
            token_address,
            amount,
            is_peg_in,
            origin_chain_id,
            destination_chain_id,
            token_native_chain_id,
        )?),
        QueryMsg::SanityCheckBasisPoints { basis_points } => {
            to_json_binary(&query::query_sanity_check_basis_points(deps, basis_points)?)
        }
        QueryMsg::IsFeeException { token_address } => {
            to_json_binary(&query::query_is_fee_exception(deps, token_address)?)
        }
        QueryMsg::FeeExceptions { start_after, limit } => {
            to_json_binary(&query::query_fee_exceptions(deps, start_after, limit)?)
        }
        QueryMsg::ClassFees { token_address } => {
            to_json_binary(&query::query_class_fees(deps, token_address)?)
        }
        QueryMsg::UsdExchangeRate { chain_id } => {
            to_json_binary(&query::query_usd_exchange_rate(deps, chain_id)?)
        }
        QueryMsg::HasRole { role, address } => {
            to_json_binary(&query::query_has_role(deps, role, address)?)
        }
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
