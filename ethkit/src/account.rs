//! An externally owned account: a private key with its derived public
//! key and address.

use core::fmt;

use ethkit_common::{EthKitError, Signature, DEFAULT_GAS_LIMIT};

use crate::address::Address;
use crate::keys::{PrivateKey, PublicKey};
use crate::observer::SigningObserver;
use crate::signing;
use crate::transaction::{SignedTransaction, UnsignedTransaction};

/// A key pair and its address, derived once at construction.
#[derive(Clone)]
pub struct Account {
    private_key: PrivateKey,
    public_key: PublicKey,
    address: Address,
}

impl Account {
    /// Creates an account with a freshly generated key.
    pub fn generate() -> Result<Self, EthKitError> {
        Self::from_private_key(PrivateKey::generate()?)
    }

    /// Wraps an existing private key.
    pub fn from_private_key(private_key: PrivateKey) -> Result<Self, EthKitError> {
        let public_key = PublicKey::from_private_key(&private_key)?;
        let address = Address::from_public_key(&public_key);
        Ok(Self {
            private_key,
            public_key,
            address,
        })
    }

    /// Imports a hex private key, with or without `0x`.
    pub fn from_private_key_hex(s: &str) -> Result<Self, EthKitError> {
        Self::from_private_key(PrivateKey::from_hex(s)?)
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Signs a 32-byte digest.
    pub fn sign_digest(&self, digest: &[u8]) -> Result<Signature, EthKitError> {
        signing::sign_digest(digest, &self.private_key)
    }

    /// Signs keccak256(message).
    pub fn sign_message(&self, message: &[u8]) -> Result<Signature, EthKitError> {
        signing::sign_message(message, &self.private_key)
    }

    /// Signs an EIP-191 personal message.
    pub fn sign_personal_message(&self, message: &[u8]) -> Result<Signature, EthKitError> {
        signing::sign_personal_message(message, &self.private_key)
    }

    /// Builds a plain ether transfer with the default gas limit on the
    /// default chain. Adjust with the `with_*` builders before signing.
    pub fn transfer(
        &self,
        to: Address,
        value: u64,
        gas_price: u64,
        nonce: u64,
    ) -> UnsignedTransaction {
        UnsignedTransaction::new(nonce, gas_price, DEFAULT_GAS_LIMIT, to, value)
    }

    pub fn sign_transaction(
        &self,
        transaction: &UnsignedTransaction,
    ) -> Result<SignedTransaction, EthKitError> {
        transaction.sign(&self.private_key)
    }

    pub fn sign_transaction_observed(
        &self,
        transaction: &UnsignedTransaction,
        observer: &dyn SigningObserver,
    ) -> Result<SignedTransaction, EthKitError> {
        transaction.sign_observed(&self.private_key, observer)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Address:    {}", self.address)?;
        write!(f, "Public key: {}", self.public_key.to_hex_prefixed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::{recover_address, recover_personal_message_signer};

    const KEY_HEX: &str = "0x4646464646464646464646464646464646464646464646464646464646464646";

    #[test]
    fn test_account_from_hex() {
        let account = Account::from_private_key_hex(KEY_HEX).unwrap();
        assert_eq!(
            account.address().to_checksummed(),
            "0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F"
        );
        assert_eq!(account.public_key().as_bytes()[0], 0x04);
        assert_eq!(account.private_key().expose_hex(), KEY_HEX);
    }

    #[test]
    fn test_account_signatures_recover_to_address() {
        let account = Account::generate().unwrap();

        let sig = account.sign_message(b"Hello, Ethereum!").unwrap();
        let digest = signing::hash_message(b"Hello, Ethereum!");
        assert_eq!(recover_address(&digest, &sig).unwrap(), account.address());

        let sig = account.sign_personal_message(b"gm").unwrap();
        assert_eq!(
            recover_personal_message_signer(b"gm", &sig).unwrap(),
            account.address()
        );

        let sig = account.sign_digest(&[9u8; 32]).unwrap();
        assert_eq!(recover_address(&[9u8; 32], &sig).unwrap(), account.address());
    }

    #[test]
    fn test_transfer_defaults() {
        let account = Account::from_private_key_hex(KEY_HEX).unwrap();
        let to = Address::from_bytes([0x35; 20]);
        let tx = account.transfer(to, 1_000, 20_000_000_000, 3);
        assert_eq!(tx.gas_limit, 21_000);
        assert_eq!(tx.chain_id, 1);
        assert_eq!(tx.nonce, 3);
        assert!(tx.data.is_empty());

        let signed = account.sign_transaction(&tx).unwrap();
        assert_eq!(signed.recover_sender().unwrap(), account.address());
    }

    #[test]
    fn test_display_hides_private_key() {
        let account = Account::from_private_key_hex(KEY_HEX).unwrap();
        let shown = format!("{}", account);
        let debugged = format!("{:?}", account);
        assert!(shown.contains("0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F"));
        assert!(!shown.contains("46464646"));
        assert!(!debugged.contains("46464646"));
    }
}
