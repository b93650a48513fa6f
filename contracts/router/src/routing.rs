//! Route Planning
//!
//! Turns an incoming transfer plus its metadata envelope into a
//! [`RoutePlan`], then into the messages that carry it out. Planning only
//! reads state, so `SimulateRoute` and `Receive` share it.
//!
//! ```text
//! decode envelope -> destination (explicit, or from user_data for v1)
//!   destination == interim chain          -> InterimDelivery, no fee
//!   destination == token's native chain   -> PegOut (Redeem on the token)
//!   otherwise                             -> PegIn (Send to resolved vault)
//! ```

use cosmwasm_std::{
    to_json_binary, Addr, Binary, CosmosMsg, Deps, StdError, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use bridge_fees::msg::{FeePayout, FeeQuoteResponse, QueryMsg as FeeQueryMsg};
use common::{query_origin_chain_id, ChainId, PTokenExecuteMsg, VaultReceiveMsg};

use crate::address_codec::ChainAddress;
use crate::error::ContractError;
use crate::metadata::Metadata;
use crate::msg::RouteKind;
use crate::state::{CONFIG, FEE_CONTRACT};
use crate::user_data::decode_user_data;
use crate::vault_registry::safely_get_vault_address;

/// Fee split applied to a routed amount
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedFee {
    pub fee_amount: Uint128,
    pub amount_minus_fee: Uint128,
    pub payouts: Vec<FeePayout>,
}

impl AppliedFee {
    fn none(amount: Uint128) -> Self {
        Self {
            fee_amount: Uint128::zero(),
            amount_minus_fee: amount,
            payouts: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub route: RouteKind,
    pub token: Addr,
    pub amount: Uint128,
    pub recipient: Addr,
    pub is_safe_vault: bool,
    pub destination_chain_id: ChainId,
    pub destination_address: String,
    pub user_data: Binary,
    /// The incoming envelope, forwarded untouched on peg-ins
    pub metadata: Binary,
    pub fee: AppliedFee,
}

pub fn plan_route(
    deps: Deps,
    token: &Addr,
    amount: Uint128,
    raw_metadata: &Binary,
) -> Result<RoutePlan, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let metadata = Metadata::decode(raw_metadata.as_slice())?;
    let (destination_chain_id, destination) = match metadata.destination() {
        Some(destination) => destination,
        None => {
            let (chain_id, address) = decode_user_data(metadata.user_data())?;
            (chain_id, ChainAddress::Evm(address))
        }
    };
    let destination_address = destination.to_routing_string();
    let user_data = Binary::from(metadata.user_data().to_vec());
    let config = CONFIG.load(deps.storage)?;

    if destination_chain_id == config.interim_chain_id {
        let recipient = deps.api.addr_validate(&destination_address).map_err(|_| {
            ContractError::InvalidInterimRecipient {
                address: destination_address.clone(),
            }
        })?;
        return Ok(RoutePlan {
            route: RouteKind::InterimDelivery,
            token: token.clone(),
            amount,
            recipient,
            is_safe_vault: false,
            destination_chain_id,
            destination_address,
            user_data,
            metadata: raw_metadata.clone(),
            fee: AppliedFee::none(amount),
        });
    }

    let token_native_chain_id = query_origin_chain_id(&deps.querier, token)?;
    let (route, recipient, is_safe_vault) = if token_native_chain_id == destination_chain_id {
        (RouteKind::PegOut, token.clone(), false)
    } else {
        let vault = safely_get_vault_address(deps.storage, &destination_chain_id)?;
        (RouteKind::PegIn, vault.address, vault.is_safe_vault)
    };

    let fee = apply_fee(
        deps,
        token,
        amount,
        route == RouteKind::PegIn,
        &metadata.origin_chain_id(),
        &destination_chain_id,
        &token_native_chain_id,
    )?;
    if fee.amount_minus_fee.is_zero() {
        return Err(ContractError::AmountConsumedByFee {
            amount,
            fee_amount: fee.fee_amount,
        });
    }

    Ok(RoutePlan {
        route,
        token: token.clone(),
        amount,
        recipient,
        is_safe_vault,
        destination_chain_id,
        destination_address,
        user_data,
        metadata: raw_metadata.clone(),
        fee,
    })
}

fn apply_fee(
    deps: Deps,
    token: &Addr,
    amount: Uint128,
    is_peg_in: bool,
    origin_chain_id: &ChainId,
    destination_chain_id: &ChainId,
    token_native_chain_id: &ChainId,
) -> Result<AppliedFee, ContractError> {
    let Some(fee_contract) = FEE_CONTRACT.may_load(deps.storage)? else {
        return Ok(AppliedFee::none(amount));
    };

    let quote: FeeQuoteResponse = deps.querier.query_wasm_smart(
        &fee_contract,
        &FeeQueryMsg::QuoteFee {
            token_address: token.to_string(),
            amount,
            is_peg_in,
            origin_chain_id: Binary::from(origin_chain_id.to_vec()),
            destination_chain_id: Binary::from(destination_chain_id.to_vec()),
            token_native_chain_id: Binary::from(token_native_chain_id.to_vec()),
        },
    )?;

    let total = quote
        .fee_amount
        .checked_add(quote.amount_minus_fee)
        .map_err(StdError::from)?;
    if total != amount {
        return Err(ContractError::InvalidFeeQuote {
            reason: format!("fee {} + remainder {} != {}", quote.fee_amount, quote.amount_minus_fee, amount),
        });
    }
    let paid = quote
        .payouts
        .iter()
        .try_fold(Uint128::zero(), |acc, payout| acc.checked_add(payout.amount))
        .map_err(StdError::from)?;
    if paid != quote.fee_amount {
        return Err(ContractError::InvalidFeeQuote {
            reason: format!("payouts {} != fee {}", paid, quote.fee_amount),
        });
    }

    Ok(AppliedFee {
        fee_amount: quote.fee_amount,
        amount_minus_fee: quote.amount_minus_fee,
        payouts: quote.payouts,
    })
}

/// Fee payouts first, then the dispatch of `amount_minus_fee`
pub fn route_messages(plan: &RoutePlan) -> Result<Vec<CosmosMsg>, ContractError> {
    let mut messages = Vec::with_capacity(plan.fee.payouts.len() + 1);
    for payout in plan.fee.payouts.iter().filter(|p| !p.amount.is_zero()) {
        messages.push(cw20_execute(
            &plan.token,
            &Cw20ExecuteMsg::Transfer {
                recipient: payout.recipient.to_string(),
                amount: payout.amount,
            },
        )?);
    }

    let amount = plan.fee.amount_minus_fee;
    let dispatch = match plan.route {
        RouteKind::InterimDelivery => cw20_execute(
            &plan.token,
            &Cw20ExecuteMsg::Transfer {
                recipient: plan.recipient.to_string(),
                amount,
            },
        )?,
        RouteKind::PegIn => cw20_execute(
            &plan.token,
            &Cw20ExecuteMsg::Send {
                contract: plan.recipient.to_string(),
                amount,
                msg: to_json_binary(&VaultReceiveMsg::PegIn {
                    destination_address: plan.destination_address.clone(),
                    destination_chain_id: Binary::from(plan.destination_chain_id.to_vec()),
                    user_data: plan.user_data.clone(),
                    metadata: plan.metadata.clone(),
                })?,
            },
        )?,
        RouteKind::PegOut => CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: plan.token.to_string(),
            msg: to_json_binary(&PTokenExecuteMsg::Redeem {
                amount,
                user_data: plan.user_data.clone(),
                destination_address: plan.destination_address.clone(),
                destination_chain_id: Binary::from(plan.destination_chain_id.to_vec()),
            })?,
            funds: vec![],
        }),
    };
    messages.push(dispatch);

    Ok(messages)
}

fn cw20_execute(token: &Addr, msg: &Cw20ExecuteMsg) -> Result<CosmosMsg, ContractError> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}
