//! Ethereum addresses and EIP-55 checksum casing.
//!
//! The raw 20 bytes are canonical. The checksummed string is a pure
//! function of them and is never stored.

use core::fmt;
use core::str::FromStr;

use ethkit_common::{EthAddress, EthKitError, ADDRESS_LEN};

use crate::crypto::keccak256;
use crate::hexutil;
use crate::keys::PublicKey;

/// A 20-byte Ethereum address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(EthAddress);

impl Address {
    /// Address = keccak256(pubkey[1..])[12..32]
    ///
    /// Skips the 0x04 prefix of the uncompressed key and keeps the low
    /// 20 bytes of the hash.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let hash = keccak256(&public_key.as_bytes()[1..]);
        let mut address = [0u8; ADDRESS_LEN];
        address.copy_from_slice(&hash[12..]);
        Self(address)
    }

    /// Wraps raw bytes.
    pub const fn from_bytes(bytes: EthAddress) -> Self {
        Self(bytes)
    }

    /// Wraps a slice that must be exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EthKitError> {
        bytes
            .try_into()
            .map(Self)
            .map_err(|_| EthKitError::InvalidAddressLength)
    }

    /// Parses hex of any casing, with or without `0x`. Casing is not checked.
    pub fn from_hex(s: &str) -> Result<Self, EthKitError> {
        hexutil::decode_fixed::<ADDRESS_LEN>(s, EthKitError::InvalidAddressLength).map(Self)
    }

    /// Parses hex and, when the digits are mixed-case, verifies the
    /// EIP-55 checksum. All-lower and all-upper input carry no checksum
    /// and are accepted as-is.
    pub fn from_checksummed(s: &str) -> Result<Self, EthKitError> {
        let address = Self::from_hex(s)?;
        let digits = hexutil::strip_prefix(s);

        let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper && address.to_checksummed()[2..] != *digits {
            return Err(EthKitError::InvalidChecksum);
        }
        Ok(address)
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &EthAddress {
        &self.0
    }

    /// Lower-case hex without prefix.
    pub fn to_hex(&self) -> String {
        hexutil::encode(self.0)
    }

    /// Lower-case hex with `0x`.
    pub fn to_hex_prefixed(&self) -> String {
        hexutil::encode_prefixed(self.0)
    }

    /// EIP-55 mixed-case form: `0x` followed by 40 hex digits.
    pub fn to_checksummed(&self) -> String {
        to_checksummed_hex(&self.0)
    }
}

/// Derives the address of an uncompressed public key.
pub fn derive_address(public_key: &PublicKey) -> Address {
    Address::from_public_key(public_key)
}

/// Formats an address with EIP-55 checksum.
///
/// The keccak input is the ASCII lower-case hex string, not the raw
/// bytes. A letter is upper-cased when the hash nibble at the same
/// position is >= 8; digits keep their place in the indexing.
pub fn to_checksummed_hex(address: &EthAddress) -> String {
    let hex_lower = hexutil::encode(address);
    let hash = keccak256(hex_lower.as_bytes());

    let mut result = String::with_capacity(2 + 2 * ADDRESS_LEN);
    result.push_str("0x");

    for (i, c) in hex_lower.chars().enumerate() {
        let hash_byte = hash[i / 2];
        let nibble = if i % 2 == 0 {
            hash_byte >> 4
        } else {
            hash_byte & 0x0F
        };

        if c.is_ascii_alphabetic() && nibble >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }

    result
}

impl From<EthAddress> for Address {
    fn from(bytes: EthAddress) -> Self {
        Self(bytes)
    }
}

impl From<Address> for EthAddress {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksummed())
    }
}

impl FromStr for Address {
    type Err = EthKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_checksummed(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksummed())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str> as serde::Deserialize>::deserialize(deserializer)?;
        Address::from_checksummed(&s).map_err(serde::de::Error::custom)
    }
}
