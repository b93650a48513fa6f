//! Incoming transfer handler.

use cosmwasm_std::{DepsMut, Event, MessageInfo, Response};
use cw20::Cw20ReceiveMsg;

use common::chain_id_to_hex;

use crate::error::ContractError;
use crate::msg::RouteKind;
use crate::routing::{plan_route, route_messages, RoutePlan};
use crate::state::STATS;

/// Route a CW20 transfer. The hook message is the raw metadata envelope.
pub fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let sender = deps.api.addr_validate(&cw20_msg.sender)?;
    let plan = plan_route(deps.as_ref(), &info.sender, cw20_msg.amount, &cw20_msg.msg)?;
    let messages = route_messages(&plan)?;

    let mut stats = STATS.may_load(deps.storage)?.unwrap_or_default();
    match plan.route {
        RouteKind::InterimDelivery => stats.total_interim_deliveries += 1,
        RouteKind::PegIn => {
            stats.total_peg_ins += 1;
            if plan.is_safe_vault {
                stats.total_safe_vault_fallbacks += 1;
            }
        }
        RouteKind::PegOut => stats.total_peg_outs += 1,
    }
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_event(route_event(&plan))
        .add_attribute("method", "receive")
        .add_attribute("route", route_name(plan.route))
        .add_attribute("sender", sender)
        .add_attribute("token", plan.token.to_string())
        .add_attribute("amount", plan.amount)
        .add_attribute("fee_amount", plan.fee.fee_amount))
}

fn route_name(route: RouteKind) -> &'static str {
    match route {
        RouteKind::InterimDelivery => "interim_delivery",
        RouteKind::PegIn => "peg_in",
        RouteKind::PegOut => "redeem",
    }
}

fn route_event(plan: &RoutePlan) -> Event {
    let event = Event::new(route_name(plan.route)).add_attribute("amount", plan.fee.amount_minus_fee);
    let destination_chain_id = chain_id_to_hex(&plan.destination_chain_id);
    let user_data = format!("0x{}", hex::encode(plan.user_data.as_slice()));

    match plan.route {
        RouteKind::InterimDelivery => event
            .add_attribute("token_address", plan.token.to_string())
            .add_attribute("recipient", plan.recipient.to_string()),
        RouteKind::PegIn => event
            .add_attribute("token_address", plan.token.to_string())
            .add_attribute("destination_address", &plan.destination_address)
            .add_attribute("user_data", user_data)
            .add_attribute("destination_chain_id", destination_chain_id)
            .add_attribute("vault_address", plan.recipient.to_string())
            .add_attribute("is_safe_vault", plan.is_safe_vault.to_string()),
        RouteKind::PegOut => event
            .add_attribute("user_data", user_data)
            .add_attribute("destination_address", &plan.destination_address)
            .add_attribute("destination_chain_id", destination_chain_id),
    }
}
