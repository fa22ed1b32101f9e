//! Keccak256, Ethereum's hash function.
//!
//! Note that this is the original Keccak padding, not NIST SHA3-256.

use ethkit_common::Hash256;
use tiny_keccak::{Hasher as KeccakHasher, Keccak};

/// Keccak256 of `data`.
pub fn keccak256(data: impl AsRef<[u8]>) -> Hash256 {
    let mut hasher = Keccak::v256();
    hasher.update(data.as_ref());
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Streaming Keccak256 hasher for inputs assembled piecewise.
pub struct Keccak256Hasher {
    inner: Keccak,
}

impl Keccak256Hasher {
    pub fn new() -> Self {
        Self {
            inner: Keccak::v256(),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    pub fn finalize(self) -> Hash256 {
        let mut output = [0u8; 32];
        self.inner.finalize(&mut output);
        output
    }
}

impl Default for Keccak256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_keccak256_empty() {
        let expected = hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");
        assert_eq!(keccak256(b""), expected);
    }

    #[test]
    fn test_keccak256_hello() {
        let expected = hex!("1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8");
        assert_eq!(keccak256(b"hello"), expected);
    }

    #[test]
    fn test_keccak256_streaming() {
        let mut hasher = Keccak256Hasher::new();
        hasher.update(b"hello");
        hasher.update(b" ");
        hasher.update(b"world");
        assert_eq!(hasher.finalize(), keccak256(b"hello world"));
    }
}
