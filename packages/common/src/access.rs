//! Role-Based Access Control
//!
//! Roles follow the familiar EVM access-control layout: a `DEFAULT_ADMIN_ROLE`
//! that manages the `ADMIN_ROLE`, which in turn gates day-to-day mutations.
//! `MINTER_ROLE` and `REDEEMER_ROLE` are recorded for peer contracts that
//! need to know which accounts may mint or redeem through the router.
//!
//! Membership is stored as `(role name, account) => true`. Revoking removes
//! the key, so an absent key always means "not a member".

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Order, StdResult, Storage};
use cw_storage_plus::Map;
use tiny_keccak::{Hasher, Keccak};

/// (role name, account) => member
pub const ROLE_MEMBERS: Map<(&str, &Addr), bool> = Map::new("role_members");

#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum Role {
    DefaultAdmin,
    Admin,
    Minter,
    Redeemer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::DefaultAdmin => "DEFAULT_ADMIN_ROLE",
            Role::Admin => "ADMIN_ROLE",
            Role::Minter => "MINTER_ROLE",
            Role::Redeemer => "REDEEMER_ROLE",
        }
    }

    /// 32-byte role identifier, compatible with EVM access control:
    /// zero for the default admin role, `keccak256(name)` otherwise.
    pub fn id(&self) -> [u8; 32] {
        match self {
            Role::DefaultAdmin => [0u8; 32],
            role => {
                let mut hasher = Keccak::v256();
                let mut output = [0u8; 32];
                hasher.update(role.as_str().as_bytes());
                hasher.finalize(&mut output);
                output
            }
        }
    }
}

pub fn has_role(storage: &dyn Storage, role: Role, account: &Addr) -> StdResult<bool> {
    Ok(ROLE_MEMBERS
        .may_load(storage, (role.as_str(), account))?
        .unwrap_or(false))
}

/// Grant `role` to `account`. Returns false if it was already held.
pub fn grant_role(storage: &mut dyn Storage, role: Role, account: &Addr) -> StdResult<bool> {
    if has_role(storage, role, account)? {
        return Ok(false);
    }
    ROLE_MEMBERS.save(storage, (role.as_str(), account), &true)?;
    Ok(true)
}

/// Revoke `role` from `account`. Returns false if it was not held.
pub fn revoke_role(storage: &mut dyn Storage, role: Role, account: &Addr) -> StdResult<bool> {
    if !has_role(storage, role, account)? {
        return Ok(false);
    }
    ROLE_MEMBERS.remove(storage, (role.as_str(), account));
    Ok(true)
}

/// All current members of `role`, in address order
pub fn role_members(storage: &dyn Storage, role: Role) -> StdResult<Vec<Addr>> {
    ROLE_MEMBERS
        .prefix(role.as_str())
        .keys(storage, None, None, Order::Ascending)
        .collect()
}
