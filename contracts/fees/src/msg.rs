//! Message types for the Fee Engine

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Decimal, Uint128};

use common::Role;

use crate::state::{ClassFee, CrossingClass, FeeModel, FeeSink, TokenClassFees};

#[cw_serde]
pub struct InstantiateMsg {
    /// Receives DEFAULT_ADMIN_ROLE and ADMIN_ROLE; defaults to the sender
    pub admin: Option<String>,
    pub fee_sink_address: String,
    /// Setting a node operators sink selects the split sink model, with
    /// `fee_sink_address` acting as the network sink
    pub node_operators_fee_sink_address: Option<String>,
    pub peg_in_basis_points: u64,
    pub peg_out_basis_points: u64,
    pub max_fee_basis_points: Option<u64>,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Directional schedule
    // ========================================================================
    SetPegInBasisPoints {
        basis_points: u64,
    },
    SetPegOutBasisPoints {
        basis_points: u64,
    },
    /// Set both custom slots of a token
    SetFees {
        token_address: String,
        peg_in_basis_points: u64,
        peg_out_basis_points: u64,
    },
    /// `None` clears the override so the global default applies again
    SetCustomPegInFee {
        token_address: String,
        basis_points: Option<u64>,
    },
    SetCustomPegOutFee {
        token_address: String,
        basis_points: Option<u64>,
    },
    AddFeeException {
        token_address: String,
    },
    RemoveFeeException {
        token_address: String,
    },
    SetMaxFeeBasisPoints {
        max_fee_basis_points: u64,
    },

    // ========================================================================
    // Sinks
    // ========================================================================
    SetFeeSinkAddress {
        fee_sink_address: String,
    },
    SetFeeSinkAddresses {
        network_fee_sink_address: String,
        node_operators_fee_sink_address: String,
    },

    // ========================================================================
    // Crossing class schedule
    // ========================================================================
    SetClassFees {
        token_address: String,
        host_to_host: ClassFee,
        host_to_native: ClassFee,
        native_to_host: ClassFee,
        native_to_native: ClassFee,
    },
    SetClassFee {
        token_address: String,
        class: CrossingClass,
        fee: ClassFee,
    },
    /// Token base units per 1 USD for tokens native to `chain_id`
    SetUsdExchangeRate {
        chain_id: Binary,
        rate: Option<Uint128>,
    },
    SetNodeOperatorsMinimumFeeMultiplier {
        multiplier: Decimal,
    },
    SetFeeModel {
        fee_model: FeeModel,
    },

    // ========================================================================
    // Roles
    // ========================================================================
    GrantAdminRole {
        address: String,
    },
    RevokeAdminRole {
        address: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(FeeConfigResponse)]
    Config {},

    #[returns(TokenFeesResponse)]
    TokenFees { token_address: String },

    #[returns(FeeBasisPointsResponse)]
    FeeBasisPoints {
        token_address: String,
        is_peg_in: bool,
    },

    /// Directional schedule only
    #[returns(CalculateFeeResponse)]
    CalculateFee {
        token_address: String,
        amount: Uint128,
        is_peg_in: bool,
    },

    /// Uses the configured fee model
    #[returns(FeeQuoteResponse)]
    QuoteFee {
        token_address: String,
        amount: Uint128,
        is_peg_in: bool,
        origin_chain_id: Binary,
        destination_chain_id: Binary,
        token_native_chain_id: Binary,
    },

    #[returns(SanityCheckResponse)]
    SanityCheckBasisPoints { basis_points: u64 },

    #[returns(IsFeeExceptionResponse)]
    IsFeeException { token_address: String },

    #[returns(FeeExceptionsResponse)]
    FeeExceptions {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(ClassFeesResponse)]
    ClassFees { token_address: String },

    #[returns(UsdExchangeRateResponse)]
    UsdExchangeRate { chain_id: Binary },

    #[returns(HasRoleResponse)]
    HasRole { role: Role, address: String },
}

#[cw_serde]
pub struct MigrateMsg {}

// ============================================================================
// Responses
// ============================================================================

#[cw_serde]
pub struct FeeConfigResponse {
    pub max_fee_basis_points: u64,
    pub fee_basis_points_divisor: u64,
    pub peg_in_basis_points: u64,
    pub peg_out_basis_points: u64,
    pub fee_sink: FeeSink,
    pub fee_model: FeeModel,
    pub node_operators_minimum_fee_multiplier: Decimal,
}

#[cw_serde]
pub struct TokenFeesResponse {
    pub token_address: Addr,
    /// Effective values after exceptions and overrides
    pub peg_in_basis_points: u64,
    pub peg_out_basis_points: u64,
    pub custom_peg_in_basis_points: Option<u64>,
    pub custom_peg_out_basis_points: Option<u64>,
    pub is_fee_exception: bool,
}

#[cw_serde]
pub struct FeeBasisPointsResponse {
    pub basis_points: u64,
}

#[cw_serde]
pub struct CalculateFeeResponse {
    pub fee_amount: Uint128,
    pub amount_minus_fee: Uint128,
}

#[cw_serde]
pub struct FeePayout {
    pub recipient: Addr,
    pub amount: Uint128,
}

#[cw_serde]
pub struct FeeQuoteResponse {
    pub fee_model: FeeModel,
    /// Set for the classed model only
    pub crossing_class: Option<CrossingClass>,
    pub basis_points: u64,
    pub minimum_fee: Uint128,
    pub fee_amount: Uint128,
    pub amount_minus_fee: Uint128,
    /// Non-zero shares of `fee_amount`, one per sink
    pub payouts: Vec<FeePayout>,
}

#[cw_serde]
pub struct SanityCheckResponse {
    pub basis_points: u64,
}

#[cw_serde]
pub struct IsFeeExceptionResponse {
    pub is_fee_exception: bool,
}

#[cw_serde]
pub struct FeeExceptionsResponse {
    pub tokens: Vec<Addr>,
}

#[cw_serde]
pub struct ClassFeesResponse {
    pub token_address: Addr,
    pub fees: TokenClassFees,
}

#[cw_serde]
pub struct UsdExchangeRateResponse {
    pub chain_id: Binary,
    pub usd_exchange_rate: Option<Uint128>,
}

#[cw_serde]
pub struct HasRoleResponse {
    pub has_role: bool,
}
