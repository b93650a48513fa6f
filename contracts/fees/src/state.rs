//! State definitions for the Fee Engine

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Decimal, Uint128};
use cw_storage_plus::{Item, Map};

use common::ChainId;

pub const CONTRACT_NAME: &str = "crates.io:bridge-fees";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Basis points denominator (10000 = 100%)
pub const FEE_BASIS_POINTS_DIVISOR: u64 = 10_000;

/// Default ceiling for any configured basis points value (1%)
pub const DEFAULT_MAX_FEE_BASIS_POINTS: u64 = 100;

// ============================================================================
// Fee Configuration
// ============================================================================

/// Where collected fees are paid
#[cw_serde]
pub enum FeeSink {
    Single {
        fee_sink_address: Addr,
    },
    /// Node operators receive the minimum-fee share, the network the rest
    Split {
        network_fee_sink_address: Addr,
        node_operators_fee_sink_address: Addr,
    },
}

/// Which schedule `QuoteFee` applies
#[cw_serde]
#[derive(Copy, Default)]
pub enum FeeModel {
    #[default]
    Directional,
    Classed,
}

#[cw_serde]
pub struct FeeConfig {
    pub max_fee_basis_points: u64,
    /// Global default for peg-ins
    pub peg_in_basis_points: u64,
    /// Global default for peg-outs
    pub peg_out_basis_points: u64,
    pub fee_sink: FeeSink,
    pub fee_model: FeeModel,
    /// Minimum fee in USD per unit of a class multiplier
    pub node_operators_minimum_fee_multiplier: Decimal,
}

/// Per-token override slots. `None` means the global default applies.
#[cw_serde]
#[derive(Default)]
pub struct CustomFees {
    pub peg_in_basis_points: Option<u64>,
    pub peg_out_basis_points: Option<u64>,
}

impl CustomFees {
    pub fn is_empty(&self) -> bool {
        self.peg_in_basis_points.is_none() && self.peg_out_basis_points.is_none()
    }
}

// ============================================================================
// Crossing Classes
// ============================================================================

/// How a transfer crosses relative to the token's native chain.
/// "Native" means the chain equals the token's native chain, "host" any other.
#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum CrossingClass {
    HostToHost,
    HostToNative,
    NativeToHost,
    NativeToNative,
}

impl CrossingClass {
    pub fn from_chains(
        origin_chain_id: &ChainId,
        destination_chain_id: &ChainId,
        token_native_chain_id: &ChainId,
    ) -> Self {
        let from_native = origin_chain_id == token_native_chain_id;
        let to_native = destination_chain_id == token_native_chain_id;
        match (from_native, to_native) {
            (false, false) => CrossingClass::HostToHost,
            (false, true) => CrossingClass::HostToNative,
            (true, false) => CrossingClass::NativeToHost,
            (true, true) => CrossingClass::NativeToNative,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CrossingClass::HostToHost => "host_to_host",
            CrossingClass::HostToNative => "host_to_native",
            CrossingClass::NativeToHost => "native_to_host",
            CrossingClass::NativeToNative => "native_to_native",
        }
    }
}

#[cw_serde]
#[derive(Copy, Default)]
pub struct ClassFee {
    /// Multiples of the node operators minimum fee charged as a floor
    pub multiplier: u64,
    pub basis_points: u64,
}

#[cw_serde]
#[derive(Default)]
pub struct TokenClassFees {
    pub host_to_host: ClassFee,
    pub host_to_native: ClassFee,
    pub native_to_host: ClassFee,
    pub native_to_native: ClassFee,
}

impl TokenClassFees {
    pub fn get(&self, class: CrossingClass) -> ClassFee {
        match class {
            CrossingClass::HostToHost => self.host_to_host,
            CrossingClass::HostToNative => self.host_to_native,
            CrossingClass::NativeToHost => self.native_to_host,
            CrossingClass::NativeToNative => self.native_to_native,
        }
    }

    pub fn set(&mut self, class: CrossingClass, fee: ClassFee) {
        match class {
            CrossingClass::HostToHost => self.host_to_host = fee,
            CrossingClass::HostToNative => self.host_to_native = fee,
            CrossingClass::NativeToHost => self.native_to_host = fee,
            CrossingClass::NativeToNative => self.native_to_native = fee,
        }
    }
}

// ============================================================================
// Storage
// ============================================================================

pub const FEE_CONFIG: Item<FeeConfig> = Item::new("fee_config");

/// token => custom override slots
pub const CUSTOM_FEES: Map<&Addr, CustomFees> = Map::new("custom_fees");

/// token => exempt from fees (key removed when the exception is lifted)
pub const FEE_EXCEPTIONS: Map<&Addr, bool> = Map::new("fee_exceptions");

/// token => crossing class fees
pub const CLASS_FEES: Map<&Addr, TokenClassFees> = Map::new("class_fees");

/// native chain id => token base units per 1 USD
pub const USD_EXCHANGE_RATES: Map<&[u8], Uint128> = Map::new("usd_exchange_rates");
