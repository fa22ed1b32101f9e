//! Recoverable ECDSA signing and public key recovery over secp256k1.
//!
//! # Security
//!
//! - Nonces are deterministic (RFC 6979) so signing the same digest with
//!   the same key always yields the same signature
//! - k256 produces low-S signatures and adjusts the recovery id to match
//! - Recovery doubles as verification; its failures are never swallowed

use ethkit_common::{EthKitError, Hash256, Signature};
use k256::ecdsa::{RecoveryId, Signature as K256Signature, VerifyingKey};

use crate::address::Address;
use crate::crypto::{keccak256, Keccak256Hasher};
use crate::keys::{PrivateKey, PublicKey};

/// EIP-191 personal message prefix.
pub const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

fn digest_from_slice(digest: &[u8]) -> Result<&Hash256, EthKitError> {
    digest
        .try_into()
        .map_err(|_| EthKitError::InvalidDigestLength)
}

/// Signs a 32-byte digest, returning `(r, s, recovery_id)`.
pub fn sign_digest(digest: &[u8], private_key: &PrivateKey) -> Result<Signature, EthKitError> {
    let digest = digest_from_slice(digest)?;
    let signing_key = private_key.signing_key()?;

    let (sig, recid) = signing_key
        .sign_prehash_recoverable(digest)
        .map_err(|_| EthKitError::SigningFailed)?;

    let bytes = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);

    Signature::new(r, s, recid.to_byte())
}

/// Recovers the public key that produced `signature` over `digest`.
pub fn recover_public_key(digest: &[u8], signature: &Signature) -> Result<PublicKey, EthKitError> {
    let digest = digest_from_slice(digest)?;

    let sig = K256Signature::from_slice(&signature.to_compact())
        .map_err(|_| EthKitError::RecoveryFailed)?;
    let recid = RecoveryId::from_byte(signature.recovery_id()).ok_or(EthKitError::RecoveryFailed)?;

    let verifying_key = VerifyingKey::recover_from_prehash(digest, &sig, recid)
        .map_err(|_| EthKitError::RecoveryFailed)?;

    Ok(PublicKey::from_point(k256::PublicKey::from(&verifying_key)))
}

/// Recovers the signer address of `signature` over `digest`.
pub fn recover_address(digest: &[u8], signature: &Signature) -> Result<Address, EthKitError> {
    recover_public_key(digest, signature).map(|public_key| Address::from_public_key(&public_key))
}

/// Digest of a plain message: keccak256 of the raw bytes.
pub fn hash_message(message: &[u8]) -> Hash256 {
    keccak256(message)
}

/// EIP-191 digest: keccak256("\x19Ethereum Signed Message:\n" + len + message).
pub fn hash_personal_message(message: &[u8]) -> Hash256 {
    let mut hasher = Keccak256Hasher::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX);
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message);
    hasher.finalize()
}

/// Signs keccak256(message).
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Result<Signature, EthKitError> {
    sign_digest(&hash_message(message), private_key)
}

/// Signs an EIP-191 personal message.
pub fn sign_personal_message(
    message: &[u8],
    private_key: &PrivateKey,
) -> Result<Signature, EthKitError> {
    sign_digest(&hash_personal_message(message), private_key)
}

/// Recovers the signer of an EIP-191 personal message.
pub fn recover_personal_message_signer(
    message: &[u8],
    signature: &Signature,
) -> Result<Address, EthKitError> {
    recover_address(&hash_personal_message(message), signature)
}
