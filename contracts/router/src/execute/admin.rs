//! Role management.
//!
//! Authorization is checked in `contract::execute` before these run.

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use common::{access, Role};

use crate::error::ContractError;

/// Grant or revoke `role`; a no-op change still succeeds
pub fn execute_set_role(
    deps: DepsMut,
    role: Role,
    address: String,
    grant: bool,
) -> Result<Response, ContractError> {
    let account = deps.api.addr_validate(&address)?;
    let changed = if grant {
        access::grant_role(deps.storage, role, &account)?
    } else {
        access::revoke_role(deps.storage, role, &account)?
    };

    let method = if grant { "grant_role" } else { "revoke_role" };
    Ok(Response::new()
        .add_attribute("method", method)
        .add_attribute("role", role.as_str())
        .add_attribute("account", account)
        .add_attribute("changed", changed.to_string()))
}

/// Move DEFAULT_ADMIN_ROLE and ADMIN_ROLE from the caller to `new_owner`
pub fn execute_transfer_owner(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let new_owner = deps.api.addr_validate(&new_owner)?;
    if new_owner == info.sender {
        return Err(ContractError::OwnerUnchanged);
    }

    for role in [Role::DefaultAdmin, Role::Admin] {
        access::grant_role(deps.storage, role, &new_owner)?;
        access::revoke_role(deps.storage, role, &info.sender)?;
    }

    Ok(Response::new()
        .add_attribute("method", "transfer_owner")
        .add_attribute("previous_owner", info.sender)
        .add_attribute("new_owner", new_owner))
}
