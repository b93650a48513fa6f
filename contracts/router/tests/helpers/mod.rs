//! Shared test harness for the router integration tests.
//!
//! The router needs tokens that answer `OriginChainId` and accept `Redeem`,
//! so a small mock pToken speaks that plus the CW20 subset the router uses
//! (`Transfer`, `Send`, `Balance`).

#![allow(dead_code)]

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError,
    StdResult, Uint128,
};
use cw20::{BalanceResponse, Cw20Coin, Cw20ReceiveMsg};
use cw_multi_test::{App, Contract, ContractWrapper, Executor};
use cw_storage_plus::{Item, Map};

use bridge_router::metadata::Metadata;
use bridge_router::msg::{ExecuteMsg, InstantiateMsg};
use common::OriginChainIdResponse;

pub const HUB_CHAIN: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
pub const ETH_CHAIN: [u8; 4] = [0x00, 0xf3, 0x43, 0x68];
pub const BSC_CHAIN: [u8; 4] = [0x00, 0x69, 0xc3, 0x22];

pub const ETH_ADDRESS_1: &str = "0xfEDFe2616EB3661CB8FEd2782F5F0cC91D59DCaC";
pub const ETH_ADDRESS_2: &str = "0xedB86cd455ef3ca43f0e227e00469C3bDFA40628";

pub const ADMIN: &str = "terra1admin";
pub const USER: &str = "terra1user";
pub const FEE_SINK: &str = "terra1feesink";

pub const PEG_IN_BASIS_POINTS: u64 = 666;
pub const PEG_OUT_BASIS_POINTS: u64 = 50;
pub const USER_BALANCE: u128 = 10_000_000;

// ============================================================================
// Mock pToken
// ============================================================================

#[cw_serde]
pub struct MockTokenInstantiateMsg {
    pub origin_chain_id: Binary,
    pub initial_balances: Vec<Cw20Coin>,
}

#[cw_serde]
pub enum MockTokenExecuteMsg {
    Transfer {
        recipient: String,
        amount: Uint128,
    },
    Send {
        contract: String,
        amount: Uint128,
        msg: Binary,
    },
    Redeem {
        amount: Uint128,
        user_data: Binary,
        destination_address: String,
        destination_chain_id: Binary,
    },
}

#[cw_serde]
pub enum MockTokenQueryMsg {
    Balance { address: String },
    OriginChainId {},
    Redemptions {},
}

#[cw_serde]
pub struct Redemption {
    pub redeemer: Addr,
    pub amount: Uint128,
    pub user_data: Binary,
    pub destination_address: String,
    pub destination_chain_id: Binary,
}

const ORIGIN_CHAIN_ID: Item<Binary> = Item::new("origin_chain_id");
const BALANCES: Map<&Addr, Uint128> = Map::new("balances");
const REDEMPTIONS: Item<Vec<Redemption>> = Item::new("redemptions");

fn mock_token_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: MockTokenInstantiateMsg,
) -> StdResult<Response> {
    ORIGIN_CHAIN_ID.save(deps.storage, &msg.origin_chain_id)?;
    REDEMPTIONS.save(deps.storage, &vec![])?;
    for coin in msg.initial_balances {
        let address = deps.api.addr_validate(&coin.address)?;
        BALANCES.save(deps.storage, &address, &coin.amount)?;
    }
    Ok(Response::new())
}

fn move_balance(deps: &mut DepsMut, from: &Addr, to: &Addr, amount: Uint128) -> StdResult<()> {
    debit(deps, from, amount)?;
    BALANCES.update(deps.storage, to, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_add(amount)?)
    })?;
    Ok(())
}

fn debit(deps: &mut DepsMut, from: &Addr, amount: Uint128) -> StdResult<()> {
    BALANCES.update(deps.storage, from, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_sub(amount)?)
    })?;
    Ok(())
}

fn mock_token_execute(
    mut deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: MockTokenExecuteMsg,
) -> StdResult<Response> {
    match msg {
        MockTokenExecuteMsg::Transfer { recipient, amount } => {
            let recipient = deps.api.addr_validate(&recipient)?;
            move_balance(&mut deps, &info.sender, &recipient, amount)?;
            Ok(Response::new().add_attribute("action", "transfer"))
        }
        MockTokenExecuteMsg::Send {
            contract,
            amount,
            msg,
        } => {
            let contract = deps.api.addr_validate(&contract)?;
            move_balance(&mut deps, &info.sender, &contract, amount)?;
            let hook = Cw20ReceiveMsg {
                sender: info.sender.to_string(),
                amount,
                msg,
            }
            .into_cosmos_msg(contract)?;
            Ok(Response::new().add_message(hook).add_attribute("action", "send"))
        }
        MockTokenExecuteMsg::Redeem {
            amount,
            user_data,
            destination_address,
            destination_chain_id,
        } => {
            if amount.is_zero() {
                return Err(StdError::generic_err("zero redeem"));
            }
            debit(&mut deps, &info.sender, amount)?;
            let mut redemptions = REDEMPTIONS.load(deps.storage)?;
            redemptions.push(Redemption {
                redeemer: info.sender,
                amount,
                user_data,
                destination_address,
                destination_chain_id,
            });
            REDEMPTIONS.save(deps.storage, &redemptions)?;
            Ok(Response::new().add_attribute("action", "redeem"))
        }
    }
}

fn mock_token_query(deps: Deps, _env: Env, msg: MockTokenQueryMsg) -> StdResult<Binary> {
    match msg {
        MockTokenQueryMsg::Balance { address } => {
            let address = deps.api.addr_validate(&address)?;
            let balance = BALANCES.may_load(deps.storage, &address)?.unwrap_or_default();
            to_json_binary(&BalanceResponse { balance })
        }
        MockTokenQueryMsg::OriginChainId {} => to_json_binary(&OriginChainIdResponse {
            origin_chain_id: ORIGIN_CHAIN_ID.load(deps.storage)?,
        }),
        MockTokenQueryMsg::Redemptions {} => to_json_binary(&REDEMPTIONS.load(deps.storage)?),
    }
}

// ============================================================================
// Contract Wrappers
// ============================================================================

pub fn contract_mock_token() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        mock_token_execute,
        mock_token_instantiate,
        mock_token_query,
    ))
}

pub fn contract_router() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        bridge_router::contract::execute,
        bridge_router::contract::instantiate,
        bridge_router::contract::query,
    ))
}

pub fn contract_fees() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        bridge_fees::contract::execute,
        bridge_fees::contract::instantiate,
        bridge_fees::contract::query,
    ))
}

pub fn contract_safe_vault() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        safe_vault::contract::execute,
        safe_vault::contract::instantiate,
        safe_vault::contract::query,
    ))
}

// ============================================================================
// Test Setup
// ============================================================================

pub struct TestEnv {
    pub app: App,
    pub router: Addr,
    pub fees: Addr,
    pub safe_vault: Addr,
    /// Native to BSC_CHAIN
    pub token: Addr,
    pub token_code_id: u64,
    pub safe_vault_code_id: u64,
}

impl TestEnv {
    pub fn admin() -> Addr {
        Addr::unchecked(ADMIN)
    }

    pub fn user() -> Addr {
        Addr::unchecked(USER)
    }

    pub fn fee_sink() -> Addr {
        Addr::unchecked(FEE_SINK)
    }

    /// A fresh mock token native to `origin_chain_id`, funded for USER
    pub fn new_token(&mut self, origin_chain_id: [u8; 4]) -> Addr {
        self.app
            .instantiate_contract(
                self.token_code_id,
                Self::admin(),
                &MockTokenInstantiateMsg {
                    origin_chain_id: Binary::from(origin_chain_id.to_vec()),
                    initial_balances: vec![Cw20Coin {
                        address: USER.to_string(),
                        amount: Uint128::new(USER_BALANCE),
                    }],
                },
                &[],
                "ptoken",
                None,
            )
            .unwrap()
    }

    /// Another safe-vault instance, usable as a registered vault
    pub fn new_vault(&mut self) -> Addr {
        self.app
            .instantiate_contract(
                self.safe_vault_code_id,
                Self::admin(),
                &safe_vault::msg::InstantiateMsg {
                    owner: None,
                    origin_chain_id: None,
                },
                &[],
                "vault",
                None,
            )
            .unwrap()
    }

    pub fn balance(&self, token: &Addr, address: &Addr) -> u128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token,
                &MockTokenQueryMsg::Balance {
                    address: address.to_string(),
                },
            )
            .unwrap();
        res.balance.u128()
    }

    pub fn redemptions(&self, token: &Addr) -> Vec<Redemption> {
        self.app
            .wrap()
            .query_wasm_smart(token, &MockTokenQueryMsg::Redemptions {})
            .unwrap()
    }

    /// USER sends `amount` of `token` to the router with `metadata` attached
    pub fn send_to_router(
        &mut self,
        token: &Addr,
        amount: u128,
        metadata: Vec<u8>,
    ) -> anyhow::Result<cw_multi_test::AppResponse> {
        let router = self.router.clone();
        self.app.execute_contract(
            Self::user(),
            token.clone(),
            &MockTokenExecuteMsg::Send {
                contract: router.to_string(),
                amount: Uint128::new(amount),
                msg: Binary::from(metadata),
            },
            &[],
        )
    }

    pub fn execute_router(
        &mut self,
        sender: &Addr,
        msg: &ExecuteMsg,
    ) -> anyhow::Result<cw_multi_test::AppResponse> {
        let router = self.router.clone();
        self.app.execute_contract(sender.clone(), router, msg, &[])
    }
}

pub fn setup() -> TestEnv {
    let mut app = App::default();
    let admin = TestEnv::admin();

    let fees_code_id = app.store_code(contract_fees());
    let fees = app
        .instantiate_contract(
            fees_code_id,
            admin.clone(),
            &bridge_fees::msg::InstantiateMsg {
                admin: None,
                fee_sink_address: FEE_SINK.to_string(),
                node_operators_fee_sink_address: None,
                peg_in_basis_points: PEG_IN_BASIS_POINTS,
                peg_out_basis_points: PEG_OUT_BASIS_POINTS,
                max_fee_basis_points: Some(1_000),
            },
            &[],
            "bridge-fees",
            None,
        )
        .unwrap();

    let safe_vault_code_id = app.store_code(contract_safe_vault());
    let safe_vault = app
        .instantiate_contract(
            safe_vault_code_id,
            admin.clone(),
            &safe_vault::msg::InstantiateMsg {
                owner: None,
                origin_chain_id: None,
            },
            &[],
            "safe-vault",
            None,
        )
        .unwrap();

    let router_code_id = app.store_code(contract_router());
    let router = app
        .instantiate_contract(
            router_code_id,
            admin.clone(),
            &InstantiateMsg {
                owner: None,
                safe_vault_address: Some(safe_vault.to_string()),
                fee_contract_address: Some(fees.to_string()),
                interim_chain_id: None,
            },
            &[],
            "bridge-router",
            Some(admin.to_string()),
        )
        .unwrap();

    let token_code_id = app.store_code(contract_mock_token());
    let mut env = TestEnv {
        app,
        router,
        fees,
        safe_vault,
        token: Addr::unchecked(""),
        token_code_id,
        safe_vault_code_id,
    };
    env.token = env.new_token(BSC_CHAIN);
    env
}

// ============================================================================
// Envelopes
// ============================================================================

pub fn v3_metadata(destination_chain_id: [u8; 4], destination_address: &str) -> Vec<u8> {
    Metadata::V3 {
        user_data: vec![0xd3, 0xca, 0xff],
        origin_chain_id: ETH_CHAIN,
        origin_address: ETH_ADDRESS_1.to_string(),
        destination_chain_id,
        destination_address: destination_address.to_string(),
        protocol_options: vec![],
        protocol_receipt: vec![],
    }
    .encode()
}

pub fn v2_metadata(destination_chain_id: [u8; 4], destination_address: &str) -> Vec<u8> {
    Metadata::V2 {
        user_data: vec![0xd3, 0xca, 0xff],
        origin_chain_id: ETH_CHAIN,
        origin_address: ETH_ADDRESS_1.parse().unwrap(),
        destination_chain_id,
        destination_address: destination_address.parse().unwrap(),
        protocol_options: vec![],
        protocol_receipt: vec![],
    }
    .encode()
}

/// V1 carries its destination inside `user_data`
pub fn v1_metadata(destination_chain_id: [u8; 4], destination_address: &str) -> Vec<u8> {
    let destination = destination_address.parse().unwrap();
    Metadata::V1 {
        user_data: bridge_router::user_data::encode_user_data(&destination_chain_id, &destination),
        origin_chain_id: ETH_CHAIN,
        origin_address: ETH_ADDRESS_1.parse().unwrap(),
    }
    .encode()
}
