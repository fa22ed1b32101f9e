//! Legacy transactions with EIP-155 replay protection.
//!
//! An [`UnsignedTransaction`] is signed into a [`SignedTransaction`]:
//!
//! 1. RLP-encode `[nonce, gasPrice, gasLimit, to, value, data, chainId, 0, 0]`
//! 2. keccak256 of that encoding is the signing digest
//! 3. Sign the digest (recoverable, deterministic nonce)
//! 4. `v = recovery_id + chain_id * 2 + 35`
//! 5. Broadcast payload is RLP `[nonce, gasPrice, gasLimit, to, value, data, v, r, s]`
//!
//! Both lists always have nine elements; zero values and empty data are
//! encoded as `0x80`, never omitted.

use ethkit_common::{EthKitError, Hash256, Signature, DEFAULT_CHAIN_ID};

use crate::address::Address;
use crate::crypto::keccak256;
use crate::hexutil;
use crate::keys::PrivateKey;
use crate::observer::{NoopObserver, SigningObserver};
use crate::rlp::{self, RlpItem, RlpValue};
use crate::signing;

/// Number of fields in both the signing preimage and the signed payload.
const LEGACY_FIELD_COUNT: usize = 9;

/// Offset in the EIP-155 `v` formula.
const EIP155_V_OFFSET: u64 = 35;

/// Computes the EIP-155 `v` value: `recovery_id + chain_id * 2 + 35`.
pub fn eip155_v(recovery_id: u8, chain_id: u64) -> Result<u64, EthKitError> {
    chain_id
        .checked_mul(2)
        .and_then(|x| x.checked_add(EIP155_V_OFFSET))
        .and_then(|x| x.checked_add(recovery_id as u64))
        .ok_or(EthKitError::InvalidChainId)
}

/// Splits an EIP-155 `v` back into `(chain_id, recovery_id)`.
pub fn split_eip155_v(v: u64) -> Result<(u64, u8), EthKitError> {
    if v < EIP155_V_OFFSET {
        // 27/28 are pre-EIP-155 signatures without replay protection
        return Err(EthKitError::InvalidTransaction);
    }
    let offset = v - EIP155_V_OFFSET;
    Ok((offset / 2, (offset % 2) as u8))
}

// =============================================================================
// Unsigned
// =============================================================================

/// A legacy transaction before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    pub nonce: u64,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub to: Address,
    /// Value in wei.
    pub value: u64,
    pub data: Vec<u8>,
    pub chain_id: u64,
}

impl UnsignedTransaction {
    /// Creates a transaction with empty data on mainnet.
    pub fn new(nonce: u64, gas_price: u64, gas_limit: u64, to: Address, value: u64) -> Self {
        Self {
            nonce,
            gas_price,
            gas_limit,
            to,
            value,
            data: Vec::new(),
            chain_id: DEFAULT_CHAIN_ID,
        }
    }

    /// Replaces the call data.
    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    /// Replaces the chain id.
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// The six fields shared by the preimage and the signed payload.
    fn common_fields(&self) -> Vec<RlpValue> {
        let mut fields = Vec::with_capacity(LEGACY_FIELD_COUNT);
        fields.push(RlpValue::UInt(self.nonce));
        fields.push(RlpValue::UInt(self.gas_price));
        fields.push(RlpValue::UInt(self.gas_limit));
        fields.push(RlpValue::Bytes(self.to.as_bytes().to_vec()));
        fields.push(RlpValue::UInt(self.value));
        fields.push(RlpValue::Bytes(self.data.clone()));
        fields
    }

    /// RLP of `[nonce, gasPrice, gasLimit, to, value, data, chainId, 0, 0]`.
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut fields = self.common_fields();
        fields.push(RlpValue::UInt(self.chain_id));
        fields.push(RlpValue::UInt(0));
        fields.push(RlpValue::UInt(0));
        RlpValue::List(fields).encode()
    }

    /// keccak256 of the signing payload.
    pub fn signing_digest(&self) -> Hash256 {
        keccak256(self.signing_payload())
    }

    /// Signs the transaction.
    pub fn sign(&self, private_key: &PrivateKey) -> Result<SignedTransaction, EthKitError> {
        self.sign_observed(private_key, &NoopObserver)
    }

    /// Signs the transaction, reporting each stage to `observer`.
    pub fn sign_observed(
        &self,
        private_key: &PrivateKey,
        observer: &dyn SigningObserver,
    ) -> Result<SignedTransaction, EthKitError> {
        let preimage = self.signing_payload();
        observer.preimage_encoded(&preimage);

        let digest = keccak256(&preimage);
        observer.digest_computed(&digest);

        let signature = signing::sign_digest(&digest, private_key)?;
        let signed = SignedTransaction::from_parts(self.clone(), signature)?;
        observer.transaction_signed(&signed);

        Ok(signed)
    }
}

// =============================================================================
// Signed
// =============================================================================

/// A legacy transaction with its EIP-155 signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    transaction: UnsignedTransaction,
    signature: Signature,
    v: u64,
}

impl SignedTransaction {
    /// Pairs a transaction with a signature and computes `v`.
    ///
    /// Does not check that the signature belongs to the transaction;
    /// use [`SignedTransaction::recover_sender`] for that.
    pub fn from_parts(
        transaction: UnsignedTransaction,
        signature: Signature,
    ) -> Result<Self, EthKitError> {
        let v = eip155_v(signature.recovery_id(), transaction.chain_id)?;
        Ok(Self {
            transaction,
            signature,
            v,
        })
    }

    pub fn transaction(&self) -> &UnsignedTransaction {
        &self.transaction
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The EIP-155 `v` value.
    pub fn v(&self) -> u64 {
        self.v
    }

    pub fn chain_id(&self) -> u64 {
        self.transaction.chain_id
    }

    /// The digest that was signed.
    pub fn signing_digest(&self) -> Hash256 {
        self.transaction.signing_digest()
    }

    /// RLP of `[nonce, gasPrice, gasLimit, to, value, data, v, r, s]`.
    ///
    /// r and s go on the wire as canonical integers (no leading zeros).
    pub fn encode(&self) -> Vec<u8> {
        let mut fields = self.transaction.common_fields();
        fields.push(RlpValue::UInt(self.v));
        fields.push(RlpValue::Bytes(rlp::trim_leading_zeros(&self.signature.r).to_vec()));
        fields.push(RlpValue::Bytes(rlp::trim_leading_zeros(&self.signature.s).to_vec()));
        RlpValue::List(fields).encode()
    }

    /// `0x`-prefixed hex of [`SignedTransaction::encode`], ready for
    /// `eth_sendRawTransaction`.
    pub fn encode_hex(&self) -> String {
        hexutil::encode_prefixed(self.encode())
    }

    /// Transaction hash: keccak256 of the broadcast payload.
    pub fn hash(&self) -> Hash256 {
        keccak256(self.encode())
    }

    /// Recovers the address that signed this transaction.
    pub fn recover_sender(&self) -> Result<Address, EthKitError> {
        signing::recover_address(&self.signing_digest(), &self.signature)
    }

    /// Parses a signed legacy EIP-155 transaction payload.
    pub fn decode(data: &[u8]) -> Result<Self, EthKitError> {
        let item = rlp::decode_exact(data)?;
        let fields = item.as_list().ok_or(EthKitError::InvalidTransaction)?;
        if fields.len() != LEGACY_FIELD_COUNT {
            return Err(EthKitError::InvalidTransaction);
        }

        let (chain_id, recovery_id) = split_eip155_v(field_u64(&fields[6])?)?;

        let transaction = UnsignedTransaction {
            nonce: field_u64(&fields[0])?,
            gas_price: field_u64(&fields[1])?,
            gas_limit: field_u64(&fields[2])?,
            to: fields[3]
                .as_address()
                .map(Address::from_bytes)
                .ok_or(EthKitError::InvalidTransaction)?,
            value: field_u64(&fields[4])?,
            data: fields[5]
                .as_string()
                .ok_or(EthKitError::InvalidTransaction)?
                .to_vec(),
            chain_id,
        };

        let r = fields[7].as_bytes32().ok_or(EthKitError::InvalidTransaction)?;
        let s = fields[8].as_bytes32().ok_or(EthKitError::InvalidTransaction)?;

        Self::from_parts(transaction, Signature::new(r, s, recovery_id)?)
    }

    /// Parses a hex payload, with or without `0x`.
    pub fn decode_hex(s: &str) -> Result<Self, EthKitError> {
        Self::decode(&hexutil::decode(s)?)
    }
}

fn field_u64(item: &RlpItem<'_>) -> Result<u64, EthKitError> {
    item.as_u64().ok_or(EthKitError::InvalidTransaction)
}
