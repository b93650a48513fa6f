//! Integration tests for the Fee Engine contract.
//!
//! Covers default and custom basis points, fee exceptions, the max basis
//! points ceiling, role gating, sinks and the crossing class model.

use cosmwasm_std::{Addr, Binary, Decimal, Uint128};
use cw_multi_test::{App, ContractWrapper, Executor};

use bridge_fees::msg::{
    CalculateFeeResponse, ClassFeesResponse, ExecuteMsg, FeeBasisPointsResponse,
    FeeConfigResponse, FeeExceptionsResponse, FeePayout, FeeQuoteResponse, HasRoleResponse,
    InstantiateMsg, QueryMsg, SanityCheckResponse, TokenFeesResponse,
};
use bridge_fees::state::{ClassFee, CrossingClass, FeeModel, FeeSink};
use common::Role;

const NATIVE_CHAIN: [u8; 4] = [0x00, 0xf3, 0x43, 0x68];
const HOST_CHAIN: [u8; 4] = [0x00, 0x69, 0xc3, 0x22];

// ============================================================================
// Test Setup
// ============================================================================

fn contract_fees() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        bridge_fees::contract::execute,
        bridge_fees::contract::instantiate,
        bridge_fees::contract::query,
    );
    Box::new(contract)
}

fn setup() -> (App, Addr) {
    let mut app = App::default();
    let admin = Addr::unchecked("terra1admin");

    let code_id = app.store_code(contract_fees());
    let fees_addr = app
        .instantiate_contract(
            code_id,
            admin.clone(),
            &InstantiateMsg {
                admin: None,
                fee_sink_address: "terra1sink".to_string(),
                node_operators_fee_sink_address: None,
                peg_in_basis_points: 10,
                peg_out_basis_points: 25,
                max_fee_basis_points: None,
            },
            &[],
            "bridge-fees",
            Some(admin.to_string()),
        )
        .unwrap();

    (app, fees_addr)
}

fn calculate_fee(app: &App, fees_addr: &Addr, token: &str, amount: u128, is_peg_in: bool) -> (u128, u128) {
    let res: CalculateFeeResponse = app
        .wrap()
        .query_wasm_smart(
            fees_addr,
            &QueryMsg::CalculateFee {
                token_address: token.to_string(),
                amount: Uint128::new(amount),
                is_peg_in,
            },
        )
        .unwrap();
    (res.fee_amount.u128(), res.amount_minus_fee.u128())
}

fn query_config(app: &App, fees_addr: &Addr) -> FeeConfigResponse {
    app.wrap()
        .query_wasm_smart(fees_addr, &QueryMsg::Config {})
        .unwrap()
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_instantiate_defaults() {
    let (app, fees_addr) = setup();

    let config = query_config(&app, &fees_addr);
    assert_eq!(config.max_fee_basis_points, 100);
    assert_eq!(config.fee_basis_points_divisor, 10_000);
    assert_eq!(config.peg_in_basis_points, 10);
    assert_eq!(config.peg_out_basis_points, 25);
    assert_eq!(config.fee_model, FeeModel::Directional);
    assert_eq!(
        config.fee_sink,
        FeeSink::Single {
            fee_sink_address: Addr::unchecked("terra1sink")
        }
    );

    let res: HasRoleResponse = app
        .wrap()
        .query_wasm_smart(
            &fees_addr,
            &QueryMsg::HasRole {
                role: Role::DefaultAdmin,
                address: "terra1admin".to_string(),
            },
        )
        .unwrap();
    assert!(res.has_role);
}

#[test]
fn test_instantiate_rejects_basis_points_above_max() {
    let mut app = App::default();
    let admin = Addr::unchecked("terra1admin");
    let code_id = app.store_code(contract_fees());

    let res = app.instantiate_contract(
        code_id,
        admin,
        &InstantiateMsg {
            admin: None,
            fee_sink_address: "terra1sink".to_string(),
            node_operators_fee_sink_address: None,
            peg_in_basis_points: 101,
            peg_out_basis_points: 25,
            max_fee_basis_points: None,
        },
        &[],
        "bridge-fees",
        None,
    );
    assert!(res.is_err());
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Basis points value exceeds maximum!"));
}

#[test]
fn test_calculate_fee_with_default_basis_points() {
    let (app, fees_addr) = setup();

    assert_eq!(
        calculate_fee(&app, &fees_addr, "terra1token", 1_337_000, true),
        (1_337, 1_335_663)
    );
    assert_eq!(
        calculate_fee(&app, &fees_addr, "terra1token", 1_337_000, false),
        (3_342, 1_333_658)
    );
}

// ============================================================================
// Mutators
// ============================================================================

#[test]
fn test_set_fees_computes_exact_fee() {
    let (mut app, fees_addr) = setup();
    let admin = Addr::unchecked("terra1admin");

    app.execute_contract(
        admin.clone(),
        fees_addr.clone(),
        &ExecuteMsg::SetMaxFeeBasisPoints {
            max_fee_basis_points: 1337,
        },
        &[],
    )
    .unwrap();

    app.execute_contract(
        admin,
        fees_addr.clone(),
        &ExecuteMsg::SetFees {
            token_address: "terra1token".to_string(),
            peg_in_basis_points: 666,
            peg_out_basis_points: 1337,
        },
        &[],
    )
    .unwrap();

    assert_eq!(
        calculate_fee(&app, &fees_addr, "terra1token", 1_000_000, true),
        (66_600, 933_400)
    );
    assert_eq!(
        calculate_fee(&app, &fees_addr, "terra1token", 1_000_000, false),
        (133_700, 866_300)
    );

    let fees: TokenFeesResponse = app
        .wrap()
        .query_wasm_smart(
            &fees_addr,
            &QueryMsg::TokenFees {
                token_address: "terra1token".to_string(),
            },
        )
        .unwrap();
    assert_eq!(fees.custom_peg_in_basis_points, Some(666));
    assert_eq!(fees.custom_peg_out_basis_points, Some(1337));

    // Other tokens keep the defaults
    assert_eq!(
        calculate_fee(&app, &fees_addr, "terra1other", 1_000_000, true),
        (1_000, 999_000)
    );
}

#[test]
fn test_basis_points_exceeded_keeps_prior_value() {
    let (mut app, fees_addr) = setup();
    let admin = Addr::unchecked("terra1admin");

    let res = app.execute_contract(
        admin.clone(),
        fees_addr.clone(),
        &ExecuteMsg::SetPegInBasisPoints { basis_points: 101 },
        &[],
    );
    assert!(res.is_err());
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Basis points value exceeds maximum!"));
    assert_eq!(query_config(&app, &fees_addr).peg_in_basis_points, 10);

    let res = app.execute_contract(
        admin,
        fees_addr.clone(),
        &ExecuteMsg::SetCustomPegOutFee {
            token_address: "terra1token".to_string(),
            basis_points: Some(500),
        },
        &[],
    );
    assert!(res.is_err());
    let fees: TokenFeesResponse = app
        .wrap()
        .query_wasm_smart(
            &fees_addr,
            &QueryMsg::TokenFees {
                token_address: "terra1token".to_string(),
            },
        )
        .unwrap();
    assert_eq!(fees.custom_peg_out_basis_points, None);
    assert_eq!(fees.peg_out_basis_points, 25);
}

#[test]
fn test_sanity_check_query() {
    let (app, fees_addr) = setup();

    let res: SanityCheckResponse = app
        .wrap()
        .query_wasm_smart(
            &fees_addr,
            &QueryMsg::SanityCheckBasisPoints { basis_points: 100 },
        )
        .unwrap();
    assert_eq!(res.basis_points, 100);

    let res: Result<SanityCheckResponse, _> = app.wrap().query_wasm_smart(
        &fees_addr,
        &QueryMsg::SanityCheckBasisPoints { basis_points: 101 },
    );
    assert!(res.is_err());
}

#[test]
fn test_custom_zero_fee_is_independent_of_other_direction() {
    let (mut app, fees_addr) = setup();
    let admin = Addr::unchecked("terra1admin");

    app.execute_contract(
        admin.clone(),
        fees_addr.clone(),
        &ExecuteMsg::SetCustomPegInFee {
            token_address: "terra1token".to_string(),
            basis_points: Some(0),
        },
        &[],
    )
    .unwrap();

    assert_eq!(
        calculate_fee(&app, &fees_addr, "terra1token", 1_000_000, true),
        (0, 1_000_000)
    );
    assert_eq!(
        calculate_fee(&app, &fees_addr, "terra1token", 1_000_000, false),
        (2_500, 997_500)
    );

    // Clearing the slot restores the default
    app.execute_contract(
        admin,
        fees_addr.clone(),
        &ExecuteMsg::SetCustomPegInFee {
            token_address: "terra1token".to_string(),
            basis_points: None,
        },
        &[],
    )
    .unwrap();
    assert_eq!(
        calculate_fee(&app, &fees_addr, "terra1token", 1_000_000, true),
        (1_000, 999_000)
    );
}

#[test]
fn test_fee_exceptions() {
    let (mut app, fees_addr) = setup();
    let admin = Addr::unchecked("terra1admin");

    for token in ["terra1tokenb", "terra1tokena"] {
        app.execute_contract(
            admin.clone(),
            fees_addr.clone(),
            &ExecuteMsg::AddFeeException {
                token_address: token.to_string(),
            },
            &[],
        )
        .unwrap();
    }

    assert_eq!(
        calculate_fee(&app, &fees_addr, "terra1tokena", 1_337_000, true),
        (0, 1_337_000)
    );

    let res: FeeExceptionsResponse = app
        .wrap()
        .query_wasm_smart(
            &fees_addr,
            &QueryMsg::FeeExceptions {
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
    assert_eq!(
        res.tokens,
        vec![
            Addr::unchecked("terra1tokena"),
            Addr::unchecked("terra1tokenb")
        ]
    );

    app.execute_contract(
        admin,
        fees_addr.clone(),
        &ExecuteMsg::RemoveFeeException {
            token_address: "terra1tokena".to_string(),
        },
        &[],
    )
    .unwrap();

    assert_eq!(
        calculate_fee(&app, &fees_addr, "terra1tokena", 1_337_000, true),
        (1_337, 1_335_663)
    );
    let res: FeeBasisPointsResponse = app
        .wrap()
        .query_wasm_smart(
            &fees_addr,
            &QueryMsg::FeeBasisPoints {
                token_address: "terra1tokenb".to_string(),
                is_peg_in: false,
            },
        )
        .unwrap();
    assert_eq!(res.basis_points, 0);
}

#[test]
fn test_max_fee_basis_points_cannot_exceed_divisor() {
    let (mut app, fees_addr) = setup();
    let admin = Addr::unchecked("terra1admin");

    let res = app.execute_contract(
        admin,
        fees_addr.clone(),
        &ExecuteMsg::SetMaxFeeBasisPoints {
            max_fee_basis_points: 10_001,
        },
        &[],
    );
    assert!(res.is_err());
    assert_eq!(query_config(&app, &fees_addr).max_fee_basis_points, 100);
}

// ============================================================================
// Access Control
// ============================================================================

#[test]
fn test_non_admin_cannot_mutate() {
    let (mut app, fees_addr) = setup();
    let user = Addr::unchecked("terra1user");

    let res = app.execute_contract(
        user,
        fees_addr.clone(),
        &ExecuteMsg::SetPegOutBasisPoints { basis_points: 50 },
        &[],
    );
    assert!(res.is_err());
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Caller is not an admin"));
    assert_eq!(query_config(&app, &fees_addr).peg_out_basis_points, 25);
}

#[test]
fn test_admin_role_management() {
    let (mut app, fees_addr) = setup();
    let admin = Addr::unchecked("terra1admin");
    let operator = Addr::unchecked("terra1operator");

    app.execute_contract(
        admin,
        fees_addr.clone(),
        &ExecuteMsg::GrantAdminRole {
            address: operator.to_string(),
        },
        &[],
    )
    .unwrap();

    // The new admin can mutate fees...
    app.execute_contract(
        operator.clone(),
        fees_addr.clone(),
        &ExecuteMsg::SetPegInBasisPoints { basis_points: 20 },
        &[],
    )
    .unwrap();
    assert_eq!(query_config(&app, &fees_addr).peg_in_basis_points, 20);

    // ...but cannot manage roles without DEFAULT_ADMIN_ROLE
    let res = app.execute_contract(
        operator.clone(),
        fees_addr.clone(),
        &ExecuteMsg::GrantAdminRole {
            address: "terra1other".to_string(),
        },
        &[],
    );
    assert!(res.is_err());
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("DEFAULT_ADMIN_ROLE"));
}

// ============================================================================
// Crossing Class Model
// ============================================================================

#[test]
fn test_classed_quote_with_split_sinks() {
    let (mut app, fees_addr) = setup();
    let admin = Addr::unchecked("terra1admin");

    let msgs = vec![
        ExecuteMsg::SetFeeSinkAddresses {
            network_fee_sink_address: "terra1network".to_string(),
            node_operators_fee_sink_address: "terra1nodeops".to_string(),
        },
        ExecuteMsg::SetClassFee {
            token_address: "terra1token".to_string(),
            class: CrossingClass::NativeToHost,
            fee: ClassFee {
                multiplier: 4,
                basis_points: 20,
            },
        },
        ExecuteMsg::SetUsdExchangeRate {
            chain_id: Binary::from(NATIVE_CHAIN.to_vec()),
            rate: Some(Uint128::new(1_000)),
        },
        ExecuteMsg::SetNodeOperatorsMinimumFeeMultiplier {
            multiplier: Decimal::percent(25),
        },
        ExecuteMsg::SetFeeModel {
            fee_model: FeeModel::Classed,
        },
    ];
    for msg in msgs {
        app.execute_contract(admin.clone(), fees_addr.clone(), &msg, &[])
            .unwrap();
    }

    let class_fees: ClassFeesResponse = app
        .wrap()
        .query_wasm_smart(
            &fees_addr,
            &QueryMsg::ClassFees {
                token_address: "terra1token".to_string(),
            },
        )
        .unwrap();
    assert_eq!(class_fees.fees.native_to_host.multiplier, 4);
    assert_eq!(class_fees.fees.host_to_host, ClassFee::default());

    // floor = 1000 * 0.25 * 4 = 1000; bps fee = 2_000_000 * 20 / 10000 = 4000
    let quote: FeeQuoteResponse = app
        .wrap()
        .query_wasm_smart(
            &fees_addr,
            &QueryMsg::QuoteFee {
                token_address: "terra1token".to_string(),
                amount: Uint128::new(2_000_000),
                is_peg_in: true,
                origin_chain_id: Binary::from(NATIVE_CHAIN.to_vec()),
                destination_chain_id: Binary::from(HOST_CHAIN.to_vec()),
                token_native_chain_id: Binary::from(NATIVE_CHAIN.to_vec()),
            },
        )
        .unwrap();
    assert_eq!(quote.crossing_class, Some(CrossingClass::NativeToHost));
    assert_eq!(quote.minimum_fee, Uint128::new(1_000));
    assert_eq!(quote.fee_amount, Uint128::new(4_000));
    assert_eq!(quote.amount_minus_fee, Uint128::new(1_996_000));
    assert_eq!(
        quote.payouts,
        vec![
            FeePayout {
                recipient: Addr::unchecked("terra1nodeops"),
                amount: Uint128::new(1_000),
            },
            FeePayout {
                recipient: Addr::unchecked("terra1network"),
                amount: Uint128::new(3_000),
            },
        ]
    );

    // The class limit applies to class basis points too
    let res = app.execute_contract(
        admin,
        fees_addr,
        &ExecuteMsg::SetClassFee {
            token_address: "terra1token".to_string(),
            class: CrossingClass::HostToHost,
            fee: ClassFee {
                multiplier: 1,
                basis_points: 101,
            },
        },
        &[],
    );
    assert!(res.is_err());
}
