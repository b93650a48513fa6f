//! Metadata Envelope Codec
//!
//! Every routed transfer carries an ABI encoded tuple whose first word holds
//! a one byte version tag:
//!
//! | Version | Fields |
//! |---------|--------|
//! | `0x01`  | tag, user_data, origin_chain_id, origin_address (`address`) |
//! | `0x02`  | v1 fields + destination_chain_id, destination_address (`address`), protocol_options, protocol_receipt |
//! | `0x03`  | as v2, with both addresses encoded as `string` |
//!
//! Decoding dispatches on the tag through [`MetadataVersion`]; adding a
//! version means adding a variant, which the compiler then forces through
//! every match below.

use alloy_primitives::{Address, Bytes, FixedBytes};
use alloy_sol_types::{sol, SolValue};
use common::ChainId;

use crate::address_codec::{ChainAddress, EvmAddress};
use crate::error::MetadataError;
use crate::msg::MetadataFields;

sol! {
    struct MetadataV1 {
        bytes1 version;
        bytes user_data;
        bytes4 origin_chain_id;
        address origin_address;
    }

    struct MetadataV2 {
        bytes1 version;
        bytes user_data;
        bytes4 origin_chain_id;
        address origin_address;
        bytes4 destination_chain_id;
        address destination_address;
        bytes protocol_options;
        bytes protocol_receipt;
    }

    struct MetadataV3 {
        bytes1 version;
        bytes user_data;
        bytes4 origin_chain_id;
        string origin_address;
        bytes4 destination_chain_id;
        string destination_address;
        bytes protocol_options;
        bytes protocol_receipt;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataVersion {
    V1,
    V2,
    V3,
}

impl MetadataVersion {
    pub fn tag(self) -> u8 {
        match self {
            MetadataVersion::V1 => 0x01,
            MetadataVersion::V2 => 0x02,
            MetadataVersion::V3 => 0x03,
        }
    }
}

impl TryFrom<u8> for MetadataVersion {
    type Error = MetadataError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0x01 => Ok(MetadataVersion::V1),
            0x02 => Ok(MetadataVersion::V2),
            0x03 => Ok(MetadataVersion::V3),
            version => Err(MetadataError::UnrecognizedVersion { version }),
        }
    }
}

/// A decoded metadata envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Metadata {
    V1 {
        user_data: Vec<u8>,
        origin_chain_id: ChainId,
        origin_address: EvmAddress,
    },
    V2 {
        user_data: Vec<u8>,
        origin_chain_id: ChainId,
        origin_address: EvmAddress,
        destination_chain_id: ChainId,
        destination_address: EvmAddress,
        protocol_options: Vec<u8>,
        protocol_receipt: Vec<u8>,
    },
    V3 {
        user_data: Vec<u8>,
        origin_chain_id: ChainId,
        origin_address: String,
        destination_chain_id: ChainId,
        destination_address: String,
        protocol_options: Vec<u8>,
        protocol_receipt: Vec<u8>,
    },
}

impl Metadata {
    pub fn version(&self) -> MetadataVersion {
        match self {
            Metadata::V1 { .. } => MetadataVersion::V1,
            Metadata::V2 { .. } => MetadataVersion::V2,
            Metadata::V3 { .. } => MetadataVersion::V3,
        }
    }

    pub fn user_data(&self) -> &[u8] {
        match self {
            Metadata::V1 { user_data, .. }
            | Metadata::V2 { user_data, .. }
            | Metadata::V3 { user_data, .. } => user_data,
        }
    }

    pub fn origin_chain_id(&self) -> ChainId {
        match self {
            Metadata::V1 {
                origin_chain_id, ..
            }
            | Metadata::V2 {
                origin_chain_id, ..
            }
            | Metadata::V3 {
                origin_chain_id, ..
            } => *origin_chain_id,
        }
    }

    pub fn origin_address(&self) -> ChainAddress {
        match self {
            Metadata::V1 { origin_address, .. } | Metadata::V2 { origin_address, .. } => {
                ChainAddress::Evm(*origin_address)
            }
            Metadata::V3 { origin_address, .. } => ChainAddress::Text(origin_address.clone()),
        }
    }

    /// Explicit destination; version 1 envelopes carry none
    pub fn destination(&self) -> Option<(ChainId, ChainAddress)> {
        match self {
            Metadata::V1 { .. } => None,
            Metadata::V2 {
                destination_chain_id,
                destination_address,
                ..
            } => Some((
                *destination_chain_id,
                ChainAddress::Evm(*destination_address),
            )),
            Metadata::V3 {
                destination_chain_id,
                destination_address,
                ..
            } => Some((
                *destination_chain_id,
                ChainAddress::Text(destination_address.clone()),
            )),
        }
    }

    pub fn protocol_options(&self) -> &[u8] {
        match self {
            Metadata::V1 { .. } => &[],
            Metadata::V2 {
                protocol_options, ..
            }
            | Metadata::V3 {
                protocol_options, ..
            } => protocol_options,
        }
    }

    pub fn protocol_receipt(&self) -> &[u8] {
        match self {
            Metadata::V1 { .. } => &[],
            Metadata::V2 {
                protocol_receipt, ..
            }
            | Metadata::V3 {
                protocol_receipt, ..
            } => protocol_receipt,
        }
    }

    /// Envelope bytes, laid out as `abi.encode(...)` of the version's fields
    pub fn encode(&self) -> Vec<u8> {
        let version = FixedBytes([self.version().tag()]);
        match self {
            Metadata::V1 {
                user_data,
                origin_chain_id,
                origin_address,
            } => MetadataV1 {
                version,
                user_data: Bytes::from(user_data.clone()),
                origin_chain_id: FixedBytes(*origin_chain_id),
                origin_address: Address::from(origin_address.0),
            }
            .abi_encode_params(),
            Metadata::V2 {
                user_data,
                origin_chain_id,
                origin_address,
                destination_chain_id,
                destination_address,
                protocol_options,
                protocol_receipt,
            } => MetadataV2 {
                version,
                user_data: Bytes::from(user_data.clone()),
                origin_chain_id: FixedBytes(*origin_chain_id),
                origin_address: Address::from(origin_address.0),
                destination_chain_id: FixedBytes(*destination_chain_id),
                destination_address: Address::from(destination_address.0),
                protocol_options: Bytes::from(protocol_options.clone()),
                protocol_receipt: Bytes::from(protocol_receipt.clone()),
            }
            .abi_encode_params(),
            Metadata::V3 {
                user_data,
                origin_chain_id,
                origin_address,
                destination_chain_id,
                destination_address,
                protocol_options,
                protocol_receipt,
            } => MetadataV3 {
                version,
                user_data: Bytes::from(user_data.clone()),
                origin_chain_id: FixedBytes(*origin_chain_id),
                origin_address: origin_address.clone(),
                destination_chain_id: FixedBytes(*destination_chain_id),
                destination_address: destination_address.clone(),
                protocol_options: Bytes::from(protocol_options.clone()),
                protocol_receipt: Bytes::from(protocol_receipt.clone()),
            }
            .abi_encode_params(),
        }
    }

    /// Strict decode: padding, UTF-8 and trailing bytes are all checked
    pub fn decode(data: &[u8]) -> Result<Self, MetadataError> {
        let tag = *data.first().ok_or(MetadataError::Empty)?;
        let version = MetadataVersion::try_from(tag)?;

        let metadata = match version {
            MetadataVersion::V1 => {
                let envelope = MetadataV1::abi_decode_params(data, true)?;
                Metadata::V1 {
                    user_data: envelope.user_data.to_vec(),
                    origin_chain_id: envelope.origin_chain_id.0,
                    origin_address: EvmAddress(envelope.origin_address.into_array()),
                }
            }
            MetadataVersion::V2 => {
                let envelope = MetadataV2::abi_decode_params(data, true)?;
                Metadata::V2 {
                    user_data: envelope.user_data.to_vec(),
                    origin_chain_id: envelope.origin_chain_id.0,
                    origin_address: EvmAddress(envelope.origin_address.into_array()),
                    destination_chain_id: envelope.destination_chain_id.0,
                    destination_address: EvmAddress(envelope.destination_address.into_array()),
                    protocol_options: envelope.protocol_options.to_vec(),
                    protocol_receipt: envelope.protocol_receipt.to_vec(),
                }
            }
            MetadataVersion::V3 => {
                let envelope = MetadataV3::abi_decode_params(data, true)?;
                Metadata::V3 {
                    user_data: envelope.user_data.to_vec(),
                    origin_chain_id: envelope.origin_chain_id.0,
                    origin_address: envelope.origin_address,
                    destination_chain_id: envelope.destination_chain_id.0,
                    destination_address: envelope.destination_address,
                    protocol_options: envelope.protocol_options.to_vec(),
                    protocol_receipt: envelope.protocol_receipt.to_vec(),
                }
            }
        };
        Ok(metadata)
    }

    /// Build an envelope of `version` from loosely typed fields
    pub fn from_fields(version: u8, fields: &MetadataFields) -> Result<Self, MetadataError> {
        let version = MetadataVersion::try_from(version)?;

        let user_data = fields.user_data.to_vec();
        let origin_chain_id = chain_id(fields.origin_chain_id.as_slice())?;
        let protocol_options = fields
            .protocol_options
            .as_ref()
            .map(|b| b.to_vec())
            .unwrap_or_default();
        let protocol_receipt = fields
            .protocol_receipt
            .as_ref()
            .map(|b| b.to_vec())
            .unwrap_or_default();

        let destination = match (&fields.destination_chain_id, &fields.destination_address) {
            (Some(chain), Some(address)) => Some((chain_id(chain.as_slice())?, address.as_str())),
            (None, None) => None,
            _ => return Err(MetadataError::IncompleteDestination),
        };

        match version {
            MetadataVersion::V1 => {
                reject_v2_fields(fields)?;
                Ok(Metadata::V1 {
                    user_data,
                    origin_chain_id,
                    origin_address: EvmAddress::from_hex(&fields.origin_address)?,
                })
            }
            MetadataVersion::V2 => {
                let (destination_chain_id, destination_address) =
                    destination.ok_or(MetadataError::MissingDestination {
                        version: version.tag(),
                    })?;
                Ok(Metadata::V2 {
                    user_data,
                    origin_chain_id,
                    origin_address: EvmAddress::from_hex(&fields.origin_address)?,
                    destination_chain_id,
                    destination_address: EvmAddress::from_hex(destination_address)?,
                    protocol_options,
                    protocol_receipt,
                })
            }
            MetadataVersion::V3 => {
                let (destination_chain_id, destination_address) =
                    destination.ok_or(MetadataError::MissingDestination {
                        version: version.tag(),
                    })?;
                Ok(Metadata::V3 {
                    user_data,
                    origin_chain_id,
                    origin_address: fields.origin_address.clone(),
                    destination_chain_id,
                    destination_address: destination_address.to_string(),
                    protocol_options,
                    protocol_receipt,
                })
            }
        }
    }
}

/// Version 1 has no slot for a destination, options or a receipt
fn reject_v2_fields(fields: &MetadataFields) -> Result<(), MetadataError> {
    let unsupported = |field: &'static str| MetadataError::UnsupportedField {
        version: MetadataVersion::V1.tag(),
        field,
    };
    if fields.destination_chain_id.is_some() || fields.destination_address.is_some() {
        return Err(unsupported("a destination"));
    }
    if fields.protocol_options.is_some() {
        return Err(unsupported("protocol options"));
    }
    if fields.protocol_receipt.is_some() {
        return Err(unsupported("a protocol receipt"));
    }
    Ok(())
}

fn chain_id(bytes: &[u8]) -> Result<ChainId, MetadataError> {
    bytes
        .try_into()
        .map_err(|_| MetadataError::InvalidChainId { got: bytes.len() })
}

/// Encode `fields` under `version`. Fails without output on an unknown version.
pub fn encode_metadata(version: u8, fields: &MetadataFields) -> Result<Vec<u8>, MetadataError> {
    Ok(Metadata::from_fields(version, fields)?.encode())
}

pub fn decode_metadata(data: &[u8]) -> Result<Metadata, MetadataError> {
    Metadata::decode(data)
}
