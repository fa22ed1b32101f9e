//! Private and public key material.
//!
//! # Security
//!
//! - Private scalars are validated by k256 at construction and zeroized on drop
//! - `Debug` on [`PrivateKey`] never prints the scalar
//! - k256 needs no context object; each operation builds its own
//!   `SigningKey` and drops (zeroizing) it before returning

use core::fmt;

use ethkit_common::{EthKitError, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN};
use k256::{ecdsa::SigningKey, elliptic_curve::sec1::ToEncodedPoint};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::hexutil;

/// Upper bound on rejection-sampling attempts in [`PrivateKey::generate`].
///
/// A uniformly random 32-byte string is out of range with probability
/// below 2^-127, so hitting this bound means the random source is broken.
const MAX_GENERATE_ATTEMPTS: usize = 16;

// =============================================================================
// Private key
// =============================================================================

/// A secp256k1 private scalar in the valid range `[1, n)`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; PRIVATE_KEY_LEN]);

impl PrivateKey {
    /// Generates a key from the operating system CSPRNG.
    pub fn generate() -> Result<Self, EthKitError> {
        let mut bytes = [0u8; PRIVATE_KEY_LEN];
        for _ in 0..MAX_GENERATE_ATTEMPTS {
            getrandom::getrandom(&mut bytes).map_err(|_| EthKitError::RandomSourceFailed)?;
            let candidate = Self::from_bytes(&bytes);
            if candidate.is_ok() {
                bytes.zeroize();
                return candidate;
            }
        }
        bytes.zeroize();
        Err(EthKitError::RandomSourceFailed)
    }

    /// Imports a raw 32-byte scalar.
    pub fn from_bytes(bytes: &[u8; PRIVATE_KEY_LEN]) -> Result<Self, EthKitError> {
        // Only the range check is wanted; the SigningKey is dropped right away
        SigningKey::from_slice(bytes).map_err(|_| EthKitError::KeyDerivationFailed)?;
        Ok(Self(*bytes))
    }

    /// Imports a scalar from a slice that must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EthKitError> {
        let bytes: &[u8; PRIVATE_KEY_LEN] = bytes
            .try_into()
            .map_err(|_| EthKitError::InvalidKeyLength)?;
        Self::from_bytes(bytes)
    }

    /// Imports a scalar from hex, with or without `0x`.
    pub fn from_hex(s: &str) -> Result<Self, EthKitError> {
        let mut bytes = hexutil::decode_fixed::<PRIVATE_KEY_LEN>(s, EthKitError::InvalidKeyLength)?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Raw scalar bytes. Handle with care.
    pub fn expose_bytes(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.0
    }

    /// `0x`-prefixed hex export of the scalar. Handle with care.
    pub fn expose_hex(&self) -> String {
        hexutil::encode_prefixed(self.0)
    }

    /// Builds the k256 signing key for a single operation.
    pub(crate) fn signing_key(&self) -> Result<SigningKey, EthKitError> {
        SigningKey::from_slice(&self.0).map_err(|_| EthKitError::KeyDerivationFailed)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

// =============================================================================
// Public key
// =============================================================================

/// An uncompressed secp256k1 public key (`0x04 || X || Y`).
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    encoded: [u8; PUBLIC_KEY_LEN],
    point: k256::PublicKey,
}

impl PublicKey {
    /// Derives the public key of `private_key` (generator times scalar).
    pub fn from_private_key(private_key: &PrivateKey) -> Result<Self, EthKitError> {
        let signing_key = private_key.signing_key()?;
        let point: k256::PublicKey = signing_key.verifying_key().into();
        Ok(Self::from_point(point))
    }

    /// Parses a 65-byte uncompressed SEC1 public key.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EthKitError> {
        if bytes.len() != PUBLIC_KEY_LEN {
            return Err(EthKitError::InvalidKeyLength);
        }
        if bytes[0] != 0x04 {
            return Err(EthKitError::InvalidPublicKey);
        }
        let point =
            k256::PublicKey::from_sec1_bytes(bytes).map_err(|_| EthKitError::InvalidPublicKey)?;
        Ok(Self::from_point(point))
    }

    /// Parses a hex-encoded uncompressed public key.
    pub fn from_hex(s: &str) -> Result<Self, EthKitError> {
        Self::from_slice(&hexutil::decode(s)?)
    }

    pub(crate) fn from_point(point: k256::PublicKey) -> Self {
        let mut encoded = [0u8; PUBLIC_KEY_LEN];
        encoded.copy_from_slice(point.to_encoded_point(false).as_bytes());
        Self { encoded, point }
    }

    /// The 65-byte uncompressed encoding.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.encoded
    }

    /// The 33-byte compressed encoding.
    pub fn to_compressed(&self) -> [u8; 33] {
        let mut result = [0u8; 33];
        result.copy_from_slice(self.point.to_encoded_point(true).as_bytes());
        result
    }

    /// Lower-case hex of the uncompressed encoding, without prefix.
    pub fn to_hex(&self) -> String {
        hexutil::encode(self.encoded)
    }

    /// Lower-case hex of the uncompressed encoding, with `0x`.
    pub fn to_hex_prefixed(&self) -> String {
        hexutil::encode_prefixed(self.encoded)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex_prefixed())
    }
}

/// Derives the uncompressed public key of a private key.
pub fn derive_public_key(private_key: &PrivateKey) -> Result<PublicKey, EthKitError> {
    PublicKey::from_private_key(private_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const GENERATOR: [u8; 65] = hex!(
        "04"
        "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
    );

    fn scalar_one() -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        bytes
    }

    #[test]
    fn test_scalar_one_gives_generator() {
        let key = PrivateKey::from_bytes(&scalar_one()).unwrap();
        let public = derive_public_key(&key).unwrap();
        assert_eq!(public.as_bytes(), &GENERATOR);
        assert_eq!(public.as_bytes()[0], 0x04);
    }

    #[test]
    fn test_compressed_generator() {
        let public = PublicKey::from_slice(&GENERATOR).unwrap();
        let compressed = public.to_compressed();
        assert_eq!(compressed[0], 0x02);
        assert_eq!(&compressed[1..], &GENERATOR[1..33]);
    }

    #[test]
    fn test_zero_scalar_rejected() {
        let result = PrivateKey::from_bytes(&[0u8; 32]);
        assert!(matches!(result, Err(EthKitError::KeyDerivationFailed)));
    }

    #[test]
    fn test_scalar_above_order_rejected() {
        let result = PrivateKey::from_bytes(&[0xff; 32]);
        assert!(matches!(result, Err(EthKitError::KeyDerivationFailed)));
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(matches!(
            PrivateKey::from_slice(&[1u8; 31]),
            Err(EthKitError::InvalidKeyLength)
        ));
        assert!(matches!(
            PrivateKey::from_hex("0x0102"),
            Err(EthKitError::InvalidKeyLength)
        ));
        assert!(matches!(
            PrivateKey::from_hex("0xzz"),
            Err(EthKitError::InvalidHexInput)
        ));
    }

    #[test]
    fn test_hex_import_export() {
        let hex_key = "0x4646464646464646464646464646464646464646464646464646464646464646";
        let key = PrivateKey::from_hex(hex_key).unwrap();
        assert_eq!(key.expose_hex(), hex_key);
        assert_eq!(key.expose_bytes(), &[0x46; 32]);
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = PrivateKey::from_bytes(&[0x46; 32]).unwrap();
        let debug = format!("{:?}", key);
        assert!(!debug.contains("4646"));
    }

    #[test]
    fn test_generate_produces_distinct_valid_keys() {
        let a = PrivateKey::generate().unwrap();
        let b = PrivateKey::generate().unwrap();
        assert_ne!(a.expose_bytes(), b.expose_bytes());
        assert!(derive_public_key(&a).is_ok());
    }

    #[test]
    fn test_public_key_validation() {
        assert!(matches!(
            PublicKey::from_slice(&GENERATOR[..64]),
            Err(EthKitError::InvalidKeyLength)
        ));

        let mut compressed_prefix = GENERATOR;
        compressed_prefix[0] = 0x02;
        assert!(matches!(
            PublicKey::from_slice(&compressed_prefix),
            Err(EthKitError::InvalidPublicKey)
        ));

        let mut off_curve = GENERATOR;
        off_curve[64] ^= 0x01;
        assert!(matches!(
            PublicKey::from_slice(&off_curve),
            Err(EthKitError::InvalidPublicKey)
        ));
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let public = PublicKey::from_slice(&GENERATOR).unwrap();
        let parsed = PublicKey::from_hex(&public.to_hex_prefixed()).unwrap();
        assert_eq!(parsed, public);
    }
}
