//! Error types for the ethkit account library.
//!
//! Every fallible operation in the workspace returns [`EthKitError`].
//! Messages are intentionally terse and never carry key material.

use core::fmt;
use num_derive::{FromPrimitive, ToPrimitive};

/// Error codes for the ethkit core.
///
/// Codes are stable so that an outer collaborator (RPC layer, FFI
/// binding) can ship them across a boundary and map them back with
/// [`num_traits::FromPrimitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum EthKitError {
    /// Key material is not exactly 32 (private) or 65 (public) bytes.
    InvalidKeyLength = 0x01,

    /// The curve rejected the scalar (zero or not below the group order).
    KeyDerivationFailed = 0x02,

    /// Signing or recovery input is not a 32-byte digest.
    InvalidDigestLength = 0x03,

    /// Signing operation failed.
    SigningFailed = 0x04,

    /// Public key recovery failed (malformed r/s, bad recovery id, no point).
    RecoveryFailed = 0x05,

    /// Malformed hexadecimal or decimal input.
    InvalidHexInput = 0x06,

    /// Codec-internal invariant violated.
    EncodingFailed = 0x07,

    /// Address is not exactly 20 bytes.
    InvalidAddressLength = 0x08,

    /// Mixed-case address does not match its EIP-55 checksum.
    InvalidChecksum = 0x09,

    /// Malformed RLP payload.
    InvalidRlp = 0x0A,

    /// RLP payload is well formed but is not a legacy EIP-155 transaction.
    InvalidTransaction = 0x0B,

    /// Chain id does not fit the EIP-155 `v` arithmetic.
    InvalidChainId = 0x0C,

    /// Serialized signature has the wrong length or an unknown `v`.
    InvalidSignature = 0x0D,

    /// The operating system random source is unavailable.
    RandomSourceFailed = 0x0E,

    /// Public key bytes are not a valid uncompressed curve point.
    InvalidPublicKey = 0x0F,
}

impl EthKitError {
    /// Returns the error code as a u32.
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Returns true if the error was caused by malformed caller input.
    pub fn is_input_error(self) -> bool {
        matches!(
            self,
            EthKitError::InvalidKeyLength
                | EthKitError::InvalidDigestLength
                | EthKitError::InvalidHexInput
                | EthKitError::InvalidAddressLength
                | EthKitError::InvalidChecksum
                | EthKitError::InvalidRlp
                | EthKitError::InvalidTransaction
                | EthKitError::InvalidChainId
                | EthKitError::InvalidSignature
                | EthKitError::InvalidPublicKey
        )
    }

    /// Returns true if the curve library rejected the operation.
    pub fn is_crypto_error(self) -> bool {
        matches!(
            self,
            EthKitError::KeyDerivationFailed
                | EthKitError::SigningFailed
                | EthKitError::RecoveryFailed
        )
    }
}

impl fmt::Display for EthKitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EthKitError::InvalidKeyLength => write!(f, "Invalid key length"),
            EthKitError::KeyDerivationFailed => write!(f, "Key derivation failed"),
            EthKitError::InvalidDigestLength => write!(f, "Digest must be 32 bytes"),
            EthKitError::SigningFailed => write!(f, "Signing failed"),
            EthKitError::RecoveryFailed => write!(f, "Public key recovery failed"),
            EthKitError::InvalidHexInput => write!(f, "Invalid hex input"),
            EthKitError::EncodingFailed => write!(f, "Encoding failed"),
            EthKitError::InvalidAddressLength => write!(f, "Address must be 20 bytes"),
            EthKitError::InvalidChecksum => write!(f, "Invalid address checksum"),
            EthKitError::InvalidRlp => write!(f, "Invalid RLP"),
            EthKitError::InvalidTransaction => write!(f, "Invalid transaction"),
            EthKitError::InvalidChainId => write!(f, "Invalid chain id"),
            EthKitError::InvalidSignature => write!(f, "Invalid signature"),
            EthKitError::RandomSourceFailed => write!(f, "Random source unavailable"),
            EthKitError::InvalidPublicKey => write!(f, "Invalid public key"),
        }
    }
}

impl std::error::Error for EthKitError {}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn test_error_codes() {
        assert_eq!(EthKitError::InvalidKeyLength.code(), 0x01);
        assert_eq!(EthKitError::EncodingFailed.code(), 0x07);
        assert_eq!(EthKitError::RandomSourceFailed.code(), 0x0E);
    }

    #[test]
    fn test_error_code_roundtrip() {
        assert_eq!(
            EthKitError::from_u32(0x05),
            Some(EthKitError::RecoveryFailed)
        );
        assert_eq!(EthKitError::from_u32(0x00), None);
        assert_eq!(EthKitError::from_u32(0xFF), None);
    }

    #[test]
    fn test_error_classification() {
        assert!(EthKitError::InvalidHexInput.is_input_error());
        assert!(!EthKitError::InvalidHexInput.is_crypto_error());
        assert!(EthKitError::RecoveryFailed.is_crypto_error());
        assert!(!EthKitError::RecoveryFailed.is_input_error());
        assert!(!EthKitError::EncodingFailed.is_input_error());
    }
}
