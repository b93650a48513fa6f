//! Cross-Chain Address Encoding
//!
//! Envelope versions 1 and 2 carry raw 20-byte EVM addresses; version 3
//! carries addresses as free-form strings so non-EVM chains can be targeted.
//!
//! ## String forms
//!
//! - routing strings (forwarded to vaults and pTokens): lowercase `0x` hex
//! - display strings (query responses): EIP-55 mixed-case checksum

use std::fmt;
use std::str::FromStr;

use tiny_keccak::{Hasher, Keccak};

use crate::error::AddressError;

// ============================================================================
// EVM Address
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvmAddress(pub [u8; 20]);

impl EvmAddress {
    /// Parse `0x` + 40 hex digits in any case. Checksums are not enforced.
    pub fn from_hex(value: &str) -> Result<Self, AddressError> {
        let stripped = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);
        let bytes = hex::decode(stripped).map_err(|e| AddressError::InvalidHex {
            reason: e.to_string(),
        })?;
        Self::from_slice(&bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let raw: [u8; 20] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidLength { got: bytes.len() })?;
        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_lower_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// EIP-55: uppercase each hex letter whose keccak nibble is >= 8
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl FromStr for EvmAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for EvmAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

// ============================================================================
// Chain Address
// ============================================================================

/// An address on some chain, as carried by a metadata envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainAddress {
    Evm(EvmAddress),
    /// Free-form address string (version 3 envelopes)
    Text(String),
}

impl ChainAddress {
    /// Form forwarded to vaults and pTokens
    pub fn to_routing_string(&self) -> String {
        match self {
            ChainAddress::Evm(address) => address.to_lower_hex(),
            ChainAddress::Text(text) => text.clone(),
        }
    }

    /// Form shown in query responses
    pub fn to_display_string(&self) -> String {
        match self {
            ChainAddress::Evm(address) => address.to_checksum(),
            ChainAddress::Text(text) => text.clone(),
        }
    }
}

impl From<EvmAddress> for ChainAddress {
    fn from(address: EvmAddress) -> Self {
        ChainAddress::Evm(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETH_ADDRESS_1: &str = "0xfEDFe2616EB3661CB8FEd2782F5F0cC91D59DCaC";
    const ETH_ADDRESS_2: &str = "0xedB86cd455ef3ca43f0e227e00469C3bDFA40628";
    const SAFE_VAULT: &str = "0xd757fd54b273BB1234d4d9993f27699d28d0EDD2";

    #[test]
    fn test_checksum_matches_reference_addresses() {
        for reference in [ETH_ADDRESS_1, ETH_ADDRESS_2, SAFE_VAULT] {
            let address = EvmAddress::from_hex(&reference.to_lowercase()).unwrap();
            assert_eq!(address.to_checksum(), reference);
            assert_eq!(address.to_string(), reference);
        }
    }

    #[test]
    fn test_lower_hex_routing_string() {
        let address: EvmAddress = ETH_ADDRESS_1.parse().unwrap();
        assert_eq!(
            address.to_lower_hex(),
            "0xfedfe2616eb3661cb8fed2782f5f0cc91d59dcac"
        );
        assert_eq!(
            ChainAddress::from(address).to_routing_string(),
            "0xfedfe2616eb3661cb8fed2782f5f0cc91d59dcac"
        );
        assert_eq!(
            ChainAddress::Text("terra1recipient".to_string()).to_routing_string(),
            "terra1recipient"
        );
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert_eq!(
            EvmAddress::from_hex("0x1234").unwrap_err(),
            AddressError::InvalidLength { got: 2 }
        );
        assert!(matches!(
            EvmAddress::from_hex("0xzzDFe2616EB3661CB8FEd2782F5F0cC91D59DCaC"),
            Err(AddressError::InvalidHex { .. })
        ));
        // Prefix is optional
        assert!(EvmAddress::from_hex("fedfe2616eb3661cb8fed2782f5f0cc91d59dcac").is_ok());
    }
}
