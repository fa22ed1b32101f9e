//! Hex conventions shared by every ethkit type.
//!
//! Byte quantities serialize to lower-case hex with an optional `0x`
//! prefix. Parsers accept input with or without the prefix and reject
//! odd-length strings and non-hex digits.

use ethkit_common::EthKitError;

/// Strips a leading `0x` or `0X` if present.
#[inline]
pub fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decodes a hex string of any even length.
pub fn decode(s: &str) -> Result<Vec<u8>, EthKitError> {
    hex::decode(strip_prefix(s)).map_err(|_| EthKitError::InvalidHexInput)
}

/// Decodes a hex string into exactly `N` bytes.
///
/// A well-formed string of the wrong length yields `length_error`, so
/// callers can report key and address lengths precisely.
pub fn decode_fixed<const N: usize>(
    s: &str,
    length_error: EthKitError,
) -> Result<[u8; N], EthKitError> {
    let bytes = decode(s)?;
    if bytes.len() != N {
        return Err(length_error);
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Encodes bytes as lower-case hex without prefix.
#[inline]
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// Encodes bytes as lower-case hex with a `0x` prefix.
pub fn encode_prefixed(bytes: impl AsRef<[u8]>) -> String {
    let mut out = String::with_capacity(2 + bytes.as_ref().len() * 2);
    out.push_str("0x");
    out.push_str(&hex::encode(bytes));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_with_and_without_prefix() {
        assert_eq!(decode("0xdead").unwrap(), vec![0xde, 0xad]);
        assert_eq!(decode("DEAD").unwrap(), vec![0xde, 0xad]);
        assert_eq!(decode("0x").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(decode("0xabc"), Err(EthKitError::InvalidHexInput));
        assert_eq!(decode("zz"), Err(EthKitError::InvalidHexInput));
    }

    #[test]
    fn test_decode_fixed_length() {
        let ok: [u8; 2] = decode_fixed("0x0102", EthKitError::InvalidKeyLength).unwrap();
        assert_eq!(ok, [1, 2]);

        let err = decode_fixed::<3>("0x0102", EthKitError::InvalidKeyLength);
        assert_eq!(err, Err(EthKitError::InvalidKeyLength));
    }

    #[test]
    fn test_encode_prefixed() {
        assert_eq!(encode_prefixed([0xABu8, 0x01]), "0xab01");
        assert_eq!(encode_prefixed(Vec::<u8>::new()), "0x");
    }
}
