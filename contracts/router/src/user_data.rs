//! User Data Codec
//!
//! Version 1 envelopes have no destination fields, so the routing target
//! travels inside `user_data` as `abi.encode(bytes4 chainId, address)`.

use alloy_primitives::{Address, FixedBytes};
use alloy_sol_types::{sol, SolValue};
use common::ChainId;

use crate::address_codec::EvmAddress;
use crate::error::MetadataError;

sol! {
    struct RoutingTarget {
        bytes4 destination_chain_id;
        address destination_address;
    }
}

pub fn encode_user_data(destination_chain_id: &ChainId, destination_address: &EvmAddress) -> Vec<u8> {
    RoutingTarget {
        destination_chain_id: FixedBytes(*destination_chain_id),
        destination_address: Address::from(destination_address.0),
    }
    .abi_encode_params()
}

pub fn decode_user_data(data: &[u8]) -> Result<(ChainId, EvmAddress), MetadataError> {
    let target = RoutingTarget::abi_decode_params(data, true)?;
    Ok((
        target.destination_chain_id.0,
        EvmAddress(target.destination_address.into_array()),
    ))
}
