//! Core value types shared across the ethkit workspace.

use crate::EthKitError;

/// Keccak256 hash or signing digest (32 bytes).
pub type Hash256 = [u8; 32];

/// Raw Ethereum address (20 bytes).
pub type EthAddress = [u8; 20];

/// Length of a secp256k1 private scalar.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Length of an uncompressed SEC1 public key (`0x04 || X || Y`).
pub const PUBLIC_KEY_LEN: usize = 65;

/// Length of a raw address.
pub const ADDRESS_LEN: usize = 20;

/// Chain id assumed when a transaction does not name one.
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Gas limit of a plain value transfer.
pub const DEFAULT_GAS_LIMIT: u64 = 21_000;

/// Number of decimal places between wei and ether.
pub const WEI_PER_ETHER_DECIMALS: usize = 18;

/// Well-known chain ids.
pub mod chain {
    pub const MAINNET: u64 = 1;
    pub const GOERLI: u64 = 5;
    pub const OPTIMISM: u64 = 10;
    pub const BSC: u64 = 56;
    pub const POLYGON: u64 = 137;
    pub const ARBITRUM: u64 = 42161;
    pub const SEPOLIA: u64 = 11155111;
}

// =============================================================================
// Signature
// =============================================================================

/// Recoverable ECDSA signature (r, s, recovery id).
///
/// `r` and `s` are always 32 bytes, big-endian and zero-padded. The
/// externally visible `v` depends on context: `recovery_id + 27` for
/// message signatures, `recovery_id + chain_id * 2 + 35` for EIP-155
/// transactions (see `ethkit::transaction`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SignatureFields"))]
pub struct Signature {
    /// R component (32 bytes, big-endian).
    pub r: [u8; 32],
    /// S component (32 bytes, big-endian, low-S normalized).
    pub s: [u8; 32],
    /// Always in `0..=MAX_RECOVERY_ID`.
    recovery_id: u8,
}

impl Signature {
    /// Offset added to the recovery id for message signatures.
    pub const MESSAGE_V_OFFSET: u8 = 27;

    /// Largest recovery id secp256k1 can produce.
    pub const MAX_RECOVERY_ID: u8 = 3;

    /// Creates a signature from its components.
    ///
    /// Recovery ids above [`Signature::MAX_RECOVERY_ID`] are rejected
    /// with `InvalidSignature`.
    pub fn new(r: [u8; 32], s: [u8; 32], recovery_id: u8) -> Result<Self, EthKitError> {
        if recovery_id > Self::MAX_RECOVERY_ID {
            return Err(EthKitError::InvalidSignature);
        }
        Ok(Self { r, s, recovery_id })
    }

    /// Recovery identifier (0 or 1 for low-S secp256k1 signatures).
    #[inline]
    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }

    /// Message-signature `v` value (27 or 28).
    #[inline]
    pub fn v(&self) -> u8 {
        // recovery_id <= 3, so this stays below 31
        self.recovery_id + Self::MESSAGE_V_OFFSET
    }

    /// Returns the signature as a 65-byte array (r || s || v).
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[0..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.v();
        bytes
    }

    /// Returns the 64-byte compact form (r || s) without the recovery byte.
    pub fn to_compact(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[0..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes
    }

    /// `0x`-prefixed lower-case hex of [`Signature::to_bytes`].
    pub fn to_hex_prefixed(&self) -> String {
        use core::fmt::Write;

        let mut out = String::with_capacity(2 + 65 * 2);
        out.push_str("0x");
        for b in self.to_bytes() {
            // Writing to a String cannot fail
            let _ = write!(out, "{:02x}", b);
        }
        out
    }

    /// Parses a 65-byte `r || s || v` signature.
    ///
    /// `v` may be given either as a raw recovery id (0..=3) or in the
    /// message form (27..=30).
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EthKitError> {
        if bytes.len() != 65 {
            return Err(EthKitError::InvalidSignature);
        }
        let recovery_id = match bytes[64] {
            v @ 0..=3 => v,
            v @ 27..=30 => v - Self::MESSAGE_V_OFFSET,
            _ => return Err(EthKitError::InvalidSignature),
        };
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[0..32]);
        s.copy_from_slice(&bytes[32..64]);
        Self::new(r, s, recovery_id)
    }

    /// Parses a 65-byte array (r || s || v).
    pub fn from_bytes(bytes: &[u8; 65]) -> Result<Self, EthKitError> {
        Self::from_slice(bytes)
    }
}

/// Unvalidated wire shape of [`Signature`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SignatureFields {
    r: [u8; 32],
    s: [u8; 32],
    recovery_id: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<SignatureFields> for Signature {
    type Error = EthKitError;

    fn try_from(fields: SignatureFields) -> Result<Self, Self::Error> {
        Signature::new(fields.r, fields.s, fields.recovery_id)
    }
}
