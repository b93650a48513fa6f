//! Query handlers for the Fee Engine

use cosmwasm_std::{Addr, Binary, Deps, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use common::{access, chain_id_from_binary, Role};

use crate::fee_manager::{
    calculate_fee, custom_fees, get_fee_basis_points, is_fee_exception, quote_fee,
    sanity_check_basis_points, QuoteRequest,
};
use crate::msg::{
    CalculateFeeResponse, ClassFeesResponse, FeeBasisPointsResponse, FeeConfigResponse,
    FeeExceptionsResponse, FeeQuoteResponse, HasRoleResponse, IsFeeExceptionResponse,
    SanityCheckResponse, TokenFeesResponse, UsdExchangeRateResponse,
};
use crate::state::{
    CLASS_FEES, FEE_BASIS_POINTS_DIVISOR, FEE_CONFIG, FEE_EXCEPTIONS, USD_EXCHANGE_RATES,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

pub fn query_config(deps: Deps) -> StdResult<FeeConfigResponse> {
    let config = FEE_CONFIG.load(deps.storage)?;
    Ok(FeeConfigResponse {
        max_fee_basis_points: config.max_fee_basis_points,
        fee_basis_points_divisor: FEE_BASIS_POINTS_DIVISOR,
        peg_in_basis_points: config.peg_in_basis_points,
        peg_out_basis_points: config.peg_out_basis_points,
        fee_sink: config.fee_sink,
        fee_model: config.fee_model,
        node_operators_minimum_fee_multiplier: config.node_operators_minimum_fee_multiplier,
    })
}

pub fn query_token_fees(deps: Deps, token_address: String) -> StdResult<TokenFeesResponse> {
    let config = FEE_CONFIG.load(deps.storage)?;
    let token = deps.api.addr_validate(&token_address)?;
    let custom = custom_fees(deps.storage, &token)?;
    Ok(TokenFeesResponse {
        peg_in_basis_points: get_fee_basis_points(deps.storage, &config, true, &token)?,
        peg_out_basis_points: get_fee_basis_points(deps.storage, &config, false, &token)?,
        custom_peg_in_basis_points: custom.peg_in_basis_points,
        custom_peg_out_basis_points: custom.peg_out_basis_points,
        is_fee_exception: is_fee_exception(deps.storage, &token)?,
        token_address: token,
    })
}

pub fn query_fee_basis_points(
    deps: Deps,
    token_address: String,
    is_peg_in: bool,
) -> StdResult<FeeBasisPointsResponse> {
    let config = FEE_CONFIG.load(deps.storage)?;
    let token = deps.api.addr_validate(&token_address)?;
    Ok(FeeBasisPointsResponse {
        basis_points: get_fee_basis_points(deps.storage, &config, is_peg_in, &token)?,
    })
}

pub fn query_calculate_fee(
    deps: Deps,
    token_address: String,
    amount: Uint128,
    is_peg_in: bool,
) -> StdResult<CalculateFeeResponse> {
    let config = FEE_CONFIG.load(deps.storage)?;
    let token = deps.api.addr_validate(&token_address)?;
    let (fee_amount, amount_minus_fee) =
        calculate_fee(deps.storage, &config, &token, amount, is_peg_in)?;
    Ok(CalculateFeeResponse {
        fee_amount,
        amount_minus_fee,
    })
}

#[allow(clippy::too_many_arguments)]
pub fn query_quote_fee(
    deps: Deps,
    token_address: String,
    amount: Uint128,
    is_peg_in: bool,
    origin_chain_id: Binary,
    destination_chain_id: Binary,
    token_native_chain_id: Binary,
) -> StdResult<FeeQuoteResponse> {
    let config = FEE_CONFIG.load(deps.storage)?;
    let token = deps.api.addr_validate(&token_address)?;
    quote_fee(
        deps.storage,
        &config,
        &QuoteRequest {
            token: &token,
            amount,
            is_peg_in,
            origin_chain_id: chain_id_from_binary(&origin_chain_id)?,
            destination_chain_id: chain_id_from_binary(&destination_chain_id)?,
            token_native_chain_id: chain_id_from_binary(&token_native_chain_id)?,
        },
    )
}

pub fn query_sanity_check_basis_points(
    deps: Deps,
    basis_points: u64,
) -> StdResult<SanityCheckResponse> {
    let config = FEE_CONFIG.load(deps.storage)?;
    let basis_points = sanity_check_basis_points(&config, basis_points)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(SanityCheckResponse { basis_points })
}

pub fn query_is_fee_exception(
    deps: Deps,
    token_address: String,
) -> StdResult<IsFeeExceptionResponse> {
    let token = deps.api.addr_validate(&token_address)?;
    Ok(IsFeeExceptionResponse {
        is_fee_exception: is_fee_exception(deps.storage, &token)?,
    })
}

pub fn query_fee_exceptions(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<FeeExceptionsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_addr = start_after
        .map(|s| deps.api.addr_validate(&s))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let tokens = FEE_EXCEPTIONS
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<Vec<Addr>>>()?;

    Ok(FeeExceptionsResponse { tokens })
}

pub fn query_class_fees(deps: Deps, token_address: String) -> StdResult<ClassFeesResponse> {
    let token = deps.api.addr_validate(&token_address)?;
    let fees = CLASS_FEES
        .may_load(deps.storage, &token)?
        .unwrap_or_default();
    Ok(ClassFeesResponse {
        token_address: token,
        fees,
    })
}

pub fn query_usd_exchange_rate(deps: Deps, chain_id: Binary) -> StdResult<UsdExchangeRateResponse> {
    let id = chain_id_from_binary(&chain_id)?;
    Ok(UsdExchangeRateResponse {
        usd_exchange_rate: USD_EXCHANGE_RATES.may_load(deps.storage, &id)?,
        chain_id,
    })
}

pub fn query_has_role(deps: Deps, role: Role, address: String) -> StdResult<HasRoleResponse> {
    let address = deps.api.addr_validate(&address)?;
    Ok(HasRoleResponse {
        has_role: access::has_role(deps.storage, role, &address)?,
    })
}
