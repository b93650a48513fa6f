//! Message types for the bridge router

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};
use cw20::Cw20ReceiveMsg;

use bridge_fees::msg::FeePayout;
use common::{OriginChainIdResponse, Role};

use crate::state::Stats;

// ============================================================================
// Instantiate
// ============================================================================

#[cw_serde]
pub struct InstantiateMsg {
    /// Receives DEFAULT_ADMIN_ROLE and ADMIN_ROLE; defaults to the sender
    pub owner: Option<String>,
    pub safe_vault_address: Option<String>,
    pub fee_contract_address: Option<String>,
    /// Hub chain id, defaults to 0xffffffff
    pub interim_chain_id: Option<Binary>,
}

// ============================================================================
// Execute
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    /// CW20 hook. `msg` is the raw metadata envelope, not JSON.
    Receive(Cw20ReceiveMsg),

    // ========================================================================
    // Vault Registry (ADMIN_ROLE)
    // ========================================================================
    AddVaultAddress {
        chain_id: Binary,
        vault_address: String,
    },
    RemoveVaultAddress {
        chain_id: Binary,
    },
    UpdateSafeVaultAddress {
        safe_vault_address: String,
    },
    /// `None` disables fee collection
    SetFeeContractAddress {
        fee_contract_address: Option<String>,
    },

    // ========================================================================
    // Roles
    // ========================================================================
    /// DEFAULT_ADMIN_ROLE: hand both admin roles to `new_owner`
    TransferOwner {
        new_owner: String,
    },
    /// DEFAULT_ADMIN_ROLE
    GrantAdminRole {
        address: String,
    },
    /// DEFAULT_ADMIN_ROLE
    RevokeAdminRole {
        address: String,
    },
    GrantMinterRole {
        address: String,
    },
    RevokeMinterRole {
        address: String,
    },
    GrantRedeemerRole {
        address: String,
    },
    RevokeRedeemerRole {
        address: String,
    },
}

/// Loosely typed envelope fields for `EncodeMetadata`.
/// Versions 1 and 2 expect `0x` hex EVM addresses.
#[cw_serde]
pub struct MetadataFields {
    pub user_data: Binary,
    pub origin_chain_id: Binary,
    pub origin_address: String,
    pub destination_chain_id: Option<Binary>,
    pub destination_address: Option<String>,
    pub protocol_options: Option<Binary>,
    pub protocol_receipt: Option<Binary>,
}

// ============================================================================
// Query
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(Stats)]
    Stats {},

    /// The router's own chain id (the interim chain)
    #[returns(OriginChainIdResponse)]
    OriginChainId {},

    /// Ask another contract for its `ORIGIN_CHAIN_ID`
    #[returns(OriginChainIdResponse)]
    OriginChainIdOf { contract: String },

    #[returns(VaultAddressResponse)]
    VaultAddress { chain_id: Binary },

    #[returns(VaultAddressesResponse)]
    VaultAddresses {
        start_after: Option<Binary>,
        limit: Option<u32>,
    },

    #[returns(SafeVaultAddressResponse)]
    SafeVaultAddress {},

    /// Registered vault, falling back to the safe vault
    #[returns(ResolvedVaultResponse)]
    SafelyGetVaultAddress { chain_id: Binary },

    #[returns(MetadataResponse)]
    DecodeMetadata { metadata: Binary },

    #[returns(EncodedMetadataResponse)]
    EncodeMetadata { version: u8, fields: MetadataFields },

    #[returns(UserDataResponse)]
    DecodeUserData { user_data: Binary },

    #[returns(EncodedUserDataResponse)]
    EncodeUserData {
        destination_chain_id: Binary,
        destination_address: String,
    },

    /// Dry run of `Receive` without moving tokens
    #[returns(RouteSimulationResponse)]
    SimulateRoute {
        token_address: String,
        amount: Uint128,
        metadata: Binary,
    },

    #[returns(HasRoleResponse)]
    HasRole { role: Role, address: String },

    #[returns(RoleMembersResponse)]
    RoleMembers { role: Role },

    #[returns(RoleIdResponse)]
    RoleId { role: Role },
}

#[cw_serde]
pub struct MigrateMsg {}

// ============================================================================
// Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub interim_chain_id: Binary,
    pub safe_vault_address: Option<Addr>,
    pub fee_contract_address: Option<Addr>,
}

#[cw_serde]
pub struct VaultAddressResponse {
    pub chain_id: Binary,
    pub vault_address: Option<Addr>,
}

#[cw_serde]
pub struct VaultAddressesResponse {
    pub vaults: Vec<VaultAddressEntry>,
}

#[cw_serde]
pub struct VaultAddressEntry {
    pub chain_id: Binary,
    pub vault_address: Addr,
}

#[cw_serde]
pub struct SafeVaultAddressResponse {
    pub safe_vault_address: Option<Addr>,
}

#[cw_serde]
pub struct ResolvedVaultResponse {
    pub vault_address: Addr,
    pub is_safe_vault: bool,
}

#[cw_serde]
pub struct MetadataResponse {
    pub version: u8,
    pub user_data: Binary,
    pub origin_chain_id: Binary,
    /// EIP-55 checksummed for versions 1 and 2
    pub origin_address: String,
    pub destination_chain_id: Option<Binary>,
    pub destination_address: Option<String>,
    pub protocol_options: Binary,
    pub protocol_receipt: Binary,
}

#[cw_serde]
pub struct EncodedMetadataResponse {
    pub metadata: Binary,
}

#[cw_serde]
pub struct UserDataResponse {
    pub destination_chain_id: Binary,
    pub destination_address: String,
}

#[cw_serde]
pub struct EncodedUserDataResponse {
    pub user_data: Binary,
}

#[cw_serde]
#[derive(Copy)]
pub enum RouteKind {
    /// Destination is the interim chain: delivered in full on this chain
    InterimDelivery,
    /// Forwarded to a vault
    PegIn,
    /// Redeemed on the token's native chain
    PegOut,
}

#[cw_serde]
pub struct RouteSimulationResponse {
    pub route: RouteKind,
    /// Vault, local recipient or the token contract itself for peg-outs
    pub recipient: Addr,
    pub is_safe_vault: bool,
    pub destination_chain_id: Binary,
    pub destination_address: String,
    pub user_data: Binary,
    pub fee_amount: Uint128,
    pub amount_minus_fee: Uint128,
    pub payouts: Vec<FeePayout>,
}

#[cw_serde]
pub struct HasRoleResponse {
    pub has_role: bool,
}

#[cw_serde]
pub struct RoleMembersResponse {
    pub role: Role,
    pub members: Vec<Addr>,
}

#[cw_serde]
pub struct RoleIdResponse {
    pub role: Role,
    /// 32-byte identifier as `0x` hex
    pub id: String,
}
