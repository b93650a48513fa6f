//! Fee Manager Module
//!
//! Fee resolution and arithmetic for both schedules.
//!
//! ## Directional basis points (highest priority first)
//!
//! 1. Fee exception for the token: 0
//! 2. Custom override for the requested direction, if set
//! 3. Global default for the direction
//!
//! ## Classed fee
//!
//! ```text
//! bps_fee     = floor(amount * class.basis_points / 10000)
//! minimum_fee = floor(usd_rate * minimum_fee_multiplier * class.multiplier)
//! fee_amount  = min(max(bps_fee, minimum_fee), amount)
//! ```
//!
//! All divisions truncate toward zero. The floor is computed in 256 bits and
//! a result beyond `Uint128` is an overflow error.

use cosmwasm_std::{Addr, Decimal, StdResult, Storage, Uint128, Uint256};

use common::ChainId;

use crate::error::ContractError;
use crate::msg::{FeePayout, FeeQuoteResponse};
use crate::state::{
    ClassFee, CrossingClass, CustomFees, FeeConfig, FeeModel, FeeSink, CLASS_FEES, CUSTOM_FEES,
    FEE_BASIS_POINTS_DIVISOR, FEE_EXCEPTIONS, USD_EXCHANGE_RATES,
};

/// Everything needed to price one routed transfer
pub struct QuoteRequest<'a> {
    pub token: &'a Addr,
    pub amount: Uint128,
    pub is_peg_in: bool,
    pub origin_chain_id: ChainId,
    pub destination_chain_id: ChainId,
    pub token_native_chain_id: ChainId,
}

/// Reject basis points above the configured maximum, otherwise pass through
pub fn sanity_check_basis_points(config: &FeeConfig, basis_points: u64) -> Result<u64, ContractError> {
    if basis_points > config.max_fee_basis_points {
        return Err(ContractError::BasisPointsExceeded {
            basis_points,
            max_fee_basis_points: config.max_fee_basis_points,
        });
    }
    Ok(basis_points)
}

pub fn is_fee_exception(storage: &dyn Storage, token: &Addr) -> StdResult<bool> {
    Ok(FEE_EXCEPTIONS.may_load(storage, token)?.unwrap_or(false))
}

pub fn custom_fees(storage: &dyn Storage, token: &Addr) -> StdResult<CustomFees> {
    Ok(CUSTOM_FEES.may_load(storage, token)?.unwrap_or_default())
}

pub fn get_fee_basis_points(
    storage: &dyn Storage,
    config: &FeeConfig,
    is_peg_in: bool,
    token: &Addr,
) -> StdResult<u64> {
    if is_fee_exception(storage, token)? {
        return Ok(0);
    }
    let custom = custom_fees(storage, token)?;
    let basis_points = if is_peg_in {
        custom
            .peg_in_basis_points
            .unwrap_or(config.peg_in_basis_points)
    } else {
        custom
            .peg_out_basis_points
            .unwrap_or(config.peg_out_basis_points)
    };
    Ok(basis_points)
}

pub fn calculate_fee_from_basis_points(amount: Uint128, basis_points: u64) -> Uint128 {
    amount.multiply_ratio(basis_points, FEE_BASIS_POINTS_DIVISOR)
}

/// Directional fee: `(fee_amount, amount_minus_fee)`
pub fn calculate_fee(
    storage: &dyn Storage,
    config: &FeeConfig,
    token: &Addr,
    amount: Uint128,
    is_peg_in: bool,
) -> StdResult<(Uint128, Uint128)> {
    let basis_points = get_fee_basis_points(storage, config, is_peg_in, token)?;
    let fee_amount = calculate_fee_from_basis_points(amount, basis_points);
    Ok((fee_amount, amount - fee_amount))
}

/// USD floor converted to token base units. Zero when no rate is known.
pub fn minimum_fee(
    config: &FeeConfig,
    class_fee: &ClassFee,
    usd_exchange_rate: Option<Uint128>,
) -> StdResult<Uint128> {
    let Some(rate) = usd_exchange_rate else {
        return Ok(Uint128::zero());
    };
    let numerator = Uint256::from(rate)
        .checked_mul(Uint256::from(class_fee.multiplier))?
        .checked_mul(Uint256::from(
            config.node_operators_minimum_fee_multiplier.atomics(),
        ))?;
    let floor = numerator.checked_div(Uint256::from(Decimal::one().atomics()))?;
    Ok(Uint128::try_from(floor)?)
}
