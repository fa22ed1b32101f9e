//! Ethereum account core
//!
//! Key derivation, recoverable signing and legacy transaction encoding
//! for Ethereum-compatible chains. Every function here is pure: no
//! network I/O, no persistence, no global logging.
//!
//! # Architecture
//!
//! Leaf to root:
//! 1. `rlp` encodes and decodes the canonical wire format
//! 2. `decimal` converts arbitrary-width hex quantities to decimal
//! 3. `keys` and `address` derive public keys and EIP-55 addresses
//! 4. `signing` produces and recovers secp256k1 signatures
//! 5. `transaction` builds EIP-155 signing preimages and signed payloads
//!
//! `account` and `balance` are the surfaces a node client consumes.
//!
//! # Security Model
//!
//! - Private keys are zeroized on drop and never printed by `Debug`
//! - Signing nonces are deterministic (RFC 6979), signatures are low-S
//! - Every fallible operation returns a typed [`EthKitError`]
//! - Observers passed to signing only see public data
//!
//! # Example
//!
//! ```
//! use ethkit::{Account, Address};
//!
//! let account = Account::from_private_key_hex(
//!     "0x4646464646464646464646464646464646464646464646464646464646464646",
//! )?;
//! let to = Address::from_bytes([0x35; 20]);
//! let tx = account.transfer(to, 1_000_000_000_000_000_000, 20_000_000_000, 9);
//! let signed = account.sign_transaction(&tx)?;
//! assert_eq!(signed.v(), 37);
//! # Ok::<(), ethkit::EthKitError>(())
//! ```

pub mod account;
pub mod address;
pub mod balance;
pub mod crypto;
pub mod decimal;
pub mod hexutil;
pub mod keys;
pub mod observer;
pub mod rlp;
pub mod signing;
pub mod transaction;

pub use account::Account;
pub use address::{derive_address, to_checksummed_hex, Address};
pub use balance::Balance;
pub use crypto::keccak256;
pub use decimal::{format_units, hex_to_decimal};
pub use keys::{derive_public_key, PrivateKey, PublicKey};
pub use observer::{LogObserver, NoopObserver, SigningObserver};
pub use rlp::RlpValue;
pub use signing::{
    hash_personal_message, recover_address, recover_public_key, sign_digest, sign_message,
    sign_personal_message,
};
pub use transaction::{eip155_v, SignedTransaction, UnsignedTransaction};

pub use ethkit_common::{
    chain, EthKitError, Hash256, Signature, DEFAULT_CHAIN_ID, DEFAULT_GAS_LIMIT,
    WEI_PER_ETHER_DECIMALS,
};
