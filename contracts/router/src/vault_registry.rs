//! Vault Registry
//!
//! Maps a destination chain id to the vault that receives peg-ins for it.
//! An entry is either present or absent; there is no zero-address sentinel.
//! When an entry is absent the safe vault takes the transfer, so tokens are
//! never sent to an unset address.

use cosmwasm_std::{Addr, Order, StdError, StdResult, Storage};
use cw_storage_plus::{Bound, Item, Map};

use common::{chain_id_to_hex, ChainId};

use crate::error::ContractError;

/// chain id => vault
pub const VAULTS: Map<&[u8], Addr> = Map::new("vaults");

/// Fallback vault
pub const SAFE_VAULT: Item<Addr> = Item::new("safe_vault");

/// Result of a safe lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVault {
    pub address: Addr,
    /// True when no chain-specific vault was registered
    pub is_safe_vault: bool,
}

/// Insert or overwrite the vault for `chain_id`. Returns the previous entry.
pub fn add_vault_address(
    storage: &mut dyn Storage,
    chain_id: &ChainId,
    vault: &Addr,
) -> StdResult<Option<Addr>> {
    let previous = VAULTS.may_load(storage, chain_id)?;
    VAULTS.save(storage, chain_id, vault)?;
    Ok(previous)
}

/// Reset the entry for `chain_id` to absent. Returns the removed entry.
pub fn remove_vault_address(
    storage: &mut dyn Storage,
    chain_id: &ChainId,
) -> StdResult<Option<Addr>> {
    let previous = VAULTS.may_load(storage, chain_id)?;
    VAULTS.remove(storage, chain_id);
    Ok(previous)
}

pub fn vault_address(storage: &dyn Storage, chain_id: &ChainId) -> StdResult<Option<Addr>> {
    VAULTS.may_load(storage, chain_id)
}

pub fn safe_vault_address(storage: &dyn Storage) -> StdResult<Option<Addr>> {
    SAFE_VAULT.may_load(storage)
}

pub fn update_safe_vault_address(storage: &mut dyn Storage, vault: &Addr) -> StdResult<()> {
    SAFE_VAULT.save(storage, vault)
}

/// The registered vault for `chain_id`, else the safe vault, else `Unroutable`
pub fn safely_get_vault_address(
    storage: &dyn Storage,
    chain_id: &ChainId,
) -> Result<ResolvedVault, ContractError> {
    if let Some(address) = vault_address(storage, chain_id)? {
        return Ok(ResolvedVault {
            address,
            is_safe_vault: false,
        });
    }
    safe_vault_address(storage)?
        .map(|address| ResolvedVault {
            address,
            is_safe_vault: true,
        })
        .ok_or(ContractError::Unroutable {
            chain_id: chain_id_to_hex(chain_id),
        })
}

/// Registered entries in chain id order
pub fn vault_addresses(
    storage: &dyn Storage,
    start_after: Option<&ChainId>,
    limit: usize,
) -> StdResult<Vec<(ChainId, Addr)>> {
    let start = start_after.map(|id| Bound::exclusive(id.as_slice()));
    VAULTS
        .range(storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (key, vault) = item?;
            let chain_id: ChainId = key
                .as_slice()
                .try_into()
                .map_err(|_| StdError::generic_err("Corrupted vault registry key"))?;
            Ok((chain_id, vault))
        })
        .collect()
}
