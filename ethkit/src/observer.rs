//! Injected observation hooks for signing.
//!
//! The core never logs on its own. Callers that want visibility into a
//! signing run pass a [`SigningObserver`]; [`LogObserver`] forwards to
//! the `log` facade, [`NoopObserver`] discards everything.
//!
//! Observers only ever see public data: encodings, digests and the
//! finished signature. Private keys are never handed to them.

use ethkit_common::Hash256;

use crate::hexutil;
use crate::transaction::SignedTransaction;

/// Receives progress notifications from transaction signing.
pub trait SigningObserver {
    /// The EIP-155 signing preimage has been RLP-encoded.
    fn preimage_encoded(&self, _preimage: &[u8]) {}

    /// The signing digest (keccak256 of the preimage) is known.
    fn digest_computed(&self, _digest: &Hash256) {}

    /// The transaction has been signed.
    fn transaction_signed(&self, _tx: &SignedTransaction) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SigningObserver for NoopObserver {}

/// Observer that forwards notifications to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl SigningObserver for LogObserver {
    fn preimage_encoded(&self, preimage: &[u8]) {
        log::debug!("ethkit: RLP signing preimage is {} bytes", preimage.len());
        log::trace!("ethkit: preimage {}", hexutil::encode_prefixed(preimage));
    }

    fn digest_computed(&self, digest: &Hash256) {
        log::debug!("ethkit: signing digest {}", hexutil::encode_prefixed(digest));
    }

    fn transaction_signed(&self, tx: &SignedTransaction) {
        let sig = tx.signature();
        log::debug!(
            "ethkit: signed nonce={} chain_id={} v={} r={}... s={}...",
            tx.transaction().nonce,
            tx.chain_id(),
            tx.v(),
            hexutil::encode(&sig.r[..8]),
            hexutil::encode(&sig.s[..8]),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::keys::PrivateKey;
    use crate::transaction::UnsignedTransaction;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<&'static str>>,
        preimage_len: RefCell<usize>,
    }

    impl SigningObserver for Recorder {
        fn preimage_encoded(&self, preimage: &[u8]) {
            self.events.borrow_mut().push("preimage");
            *self.preimage_len.borrow_mut() = preimage.len();
        }

        fn digest_computed(&self, _digest: &Hash256) {
            self.events.borrow_mut().push("digest");
        }

        fn transaction_signed(&self, _tx: &SignedTransaction) {
            self.events.borrow_mut().push("signed");
        }
    }

    #[test]
    fn test_observer_sees_each_stage_in_order() {
        let key = PrivateKey::from_bytes(&[0x46; 32]).unwrap();
        let tx = UnsignedTransaction::new(
            9,
            20_000_000_000,
            21_000,
            Address::from_bytes([0x35; 20]),
            0,
        );

        let recorder = Recorder::default();
        let signed = tx.sign_observed(&key, &recorder).unwrap();

        assert_eq!(*recorder.events.borrow(), vec!["preimage", "digest", "signed"]);
        assert_eq!(*recorder.preimage_len.borrow(), tx.signing_payload().len());
        assert_eq!(signed, tx.sign(&key).unwrap());
    }

    #[test]
    fn test_log_observer_does_not_alter_output() {
        let key = PrivateKey::from_bytes(&[0x46; 32]).unwrap();
        let tx = UnsignedTransaction::new(0, 1, 21_000, Address::from_bytes([0x11; 20]), 5);
        let logged = tx.sign_observed(&key, &LogObserver).unwrap();
        assert_eq!(logged.encode(), tx.sign(&key).unwrap().encode());
    }
}
