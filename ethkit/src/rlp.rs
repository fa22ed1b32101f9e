//! RLP (Recursive Length Prefix) codec.
//!
//! RLP is the canonical wire format of Ethereum transactions. Encoding
//! works over a small value tree ([`RlpValue`]); decoding yields borrowed
//! [`RlpItem`]s over the input buffer.
//!
//! # Encoding rules
//!
//! - Single byte [0x00, 0x7f]: itself
//! - String [0x80, 0xb7]: 0x80 + len, then data
//! - String [0xb8, 0xbf]: 0xb7 + len_of_len, then len, then data
//! - List [0xc0, 0xf7]: 0xc0 + len, then items
//! - List [0xf8, 0xff]: 0xf7 + len_of_len, then len, then items
//!
//! Integers are encoded as their minimal big-endian byte string, so zero
//! and the empty string share the encoding `0x80`.
//!
//! # Decoding
//!
//! - Validates all length fields before access
//! - Rejects non-canonical encodings
//! - Bounded recursion depth (max 16)

use ethkit_common::EthKitError;

/// Maximum RLP nesting depth.
const MAX_DEPTH: usize = 16;

/// Payloads shorter than this use the single-byte length prefix.
const SHORT_LIMIT: usize = 56;

const STRING_OFFSET: u8 = 0x80;
const LONG_STRING_OFFSET: u8 = 0xb7;
const LIST_OFFSET: u8 = 0xc0;
const LONG_LIST_OFFSET: u8 = 0xf7;

// =============================================================================
// Encoding
// =============================================================================

/// A value to be RLP-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpValue {
    /// A byte string (may be empty).
    Bytes(Vec<u8>),
    /// An unsigned integer, encoded as its minimal big-endian bytes.
    UInt(u64),
    /// An ordered list of values.
    List(Vec<RlpValue>),
}

impl RlpValue {
    /// Encodes this value into a fresh buffer.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    /// Appends the encoding of this value to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            RlpValue::Bytes(data) => write_bytes(out, data),
            RlpValue::UInt(value) => write_bytes(out, &u64_to_minimal_bytes(*value)),
            RlpValue::List(items) => {
                let mut payload = Vec::new();
                for item in items {
                    item.encode_into(&mut payload);
                }
                write_header(out, LIST_OFFSET, LONG_LIST_OFFSET, payload.len());
                out.extend_from_slice(&payload);
            }
        }
    }
}

impl From<u64> for RlpValue {
    fn from(value: u64) -> Self {
        RlpValue::UInt(value)
    }
}

impl From<Vec<u8>> for RlpValue {
    fn from(data: Vec<u8>) -> Self {
        RlpValue::Bytes(data)
    }
}

impl From<&[u8]> for RlpValue {
    fn from(data: &[u8]) -> Self {
        RlpValue::Bytes(data.to_vec())
    }
}

/// Encodes a u64 as RLP bytes.
pub fn encode_u64(value: u64) -> Vec<u8> {
    RlpValue::UInt(value).encode()
}

/// Encodes a byte slice as RLP.
pub fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 9);
    write_bytes(&mut out, data);
    out
}

/// Wraps already-encoded items in a list header.
pub fn encode_list(items: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(items.len() + 9);
    write_header(&mut out, LIST_OFFSET, LONG_LIST_OFFSET, items.len());
    out.extend_from_slice(items);
    out
}

/// Minimal big-endian representation of `value` (empty for zero).
pub fn u64_to_minimal_bytes(value: u64) -> Vec<u8> {
    trim_leading_zeros(&value.to_be_bytes()).to_vec()
}

/// Strips leading zero bytes (used for big-endian integers such as r/s).
pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

fn write_bytes(out: &mut Vec<u8>, data: &[u8]) {
    if data.len() == 1 && data[0] < STRING_OFFSET {
        out.push(data[0]);
        return;
    }
    write_header(out, STRING_OFFSET, LONG_STRING_OFFSET, data.len());
    out.extend_from_slice(data);
}

fn write_header(out: &mut Vec<u8>, short_offset: u8, long_offset: u8, len: usize) {
    if len < SHORT_LIMIT {
        // len < 56 so the sum stays within the prefix range
        out.push(short_offset + len as u8);
    } else {
        let len_bytes = encode_length_bytes(len);
        // a usize is at most 8 bytes, so 0xb7 + 8 and 0xf7 + 8 never wrap
        out.push(long_offset + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
}

/// Encodes a length as minimal big-endian bytes.
fn encode_length_bytes(len: usize) -> Vec<u8> {
    trim_leading_zeros(&len.to_be_bytes()).to_vec()
}

// =============================================================================
// Decoding
// =============================================================================

/// RLP decoding errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RlpError {
    /// Input is empty when data expected.
    EmptyInput,
    /// Input too short for declared length.
    UnexpectedEof,
    /// Non-canonical encoding (leading zeros in length, short form fits).
    NonCanonical,
    /// Single byte should be encoded as itself.
    SingleByteMismatch,
    /// Length field is too large.
    LengthOverflow,
    /// Exceeded maximum nesting depth.
    TooDeep,
    /// Extra data after RLP item.
    TrailingData,
}

impl From<RlpError> for EthKitError {
    fn from(_: RlpError) -> Self {
        EthKitError::InvalidRlp
    }
}

/// A decoded RLP item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem<'a> {
    /// A byte string (may be empty).
    String(&'a [u8]),
    /// A list of items.
    List(Vec<RlpItem<'a>>),
}

impl<'a> RlpItem<'a> {
    /// Returns the string data if this is a string item.
    pub fn as_string(&self) -> Option<&'a [u8]> {
        match self {
            RlpItem::String(data) => Some(data),
            _ => None,
        }
    }

    /// Returns the list items if this is a list item.
    pub fn as_list(&self) -> Option<&[RlpItem<'a>]> {
        match self {
            RlpItem::List(items) => Some(items),
            _ => None,
        }
    }

    /// Converts string data to a u64 value (big-endian, canonical).
    pub fn as_u64(&self) -> Option<u64> {
        let data = self.as_string()?;
        if data.len() > 8 {
            return None;
        }
        // Canonical integers carry no leading zeros
        if !data.is_empty() && data[0] == 0 {
            return None;
        }
        Some(data.iter().fold(0u64, |acc, &b| acc << 8 | b as u64))
    }

    /// Converts string data to a 20-byte address.
    pub fn as_address(&self) -> Option<[u8; 20]> {
        let data = self.as_string()?;
        data.try_into().ok()
    }

    /// Converts a canonical integer string to a 32-byte value (right-aligned).
    pub fn as_bytes32(&self) -> Option<[u8; 32]> {
        let data = self.as_string()?;
        if data.len() > 32 || (!data.is_empty() && data[0] == 0) {
            return None;
        }
        let mut result = [0u8; 32];
        result[32 - data.len()..].copy_from_slice(data);
        Some(result)
    }

    /// Converts back into an owned [`RlpValue`].
    pub fn to_value(&self) -> RlpValue {
        match self {
            RlpItem::String(data) => RlpValue::Bytes(data.to_vec()),
            RlpItem::List(items) => RlpValue::List(items.iter().map(RlpItem::to_value).collect()),
        }
    }
}

/// Decodes one RLP item from the front of the input.
pub fn decode(input: &[u8]) -> Result<(RlpItem<'_>, &[u8]), RlpError> {
    decode_internal(input, 0)
}

/// Decodes a complete RLP item, rejecting trailing data.
pub fn decode_exact(input: &[u8]) -> Result<RlpItem<'_>, RlpError> {
    let (item, rest) = decode(input)?;
    if !rest.is_empty() {
        return Err(RlpError::TrailingData);
    }
    Ok(item)
}

fn decode_internal(input: &[u8], depth: usize) -> Result<(RlpItem<'_>, &[u8]), RlpError> {
    if depth > MAX_DEPTH {
        return Err(RlpError::TooDeep);
    }

    let first = *input.first().ok_or(RlpError::EmptyInput)?;

    match first {
        // Single byte
        0x00..=0x7f => Ok((RlpItem::String(&input[..1]), &input[1..])),

        // Short string (0-55 bytes)
        0x80..=0xb7 => {
            let len = (first - STRING_OFFSET) as usize;
            let (data, rest) = split_payload(input, 1, len)?;
            if len == 1 && data[0] < STRING_OFFSET {
                return Err(RlpError::SingleByteMismatch);
            }
            Ok((RlpItem::String(data), rest))
        }

        // Long string (56+ bytes)
        0xb8..=0xbf => {
            let len_of_len = (first - LONG_STRING_OFFSET) as usize;
            let len = read_long_length(input, len_of_len)?;
            let (data, rest) = split_payload(input, 1 + len_of_len, len)?;
            Ok((RlpItem::String(data), rest))
        }

        // Short list (0-55 bytes total)
        0xc0..=0xf7 => {
            let len = (first - LIST_OFFSET) as usize;
            let (payload, rest) = split_payload(input, 1, len)?;
            let items = decode_list_items(payload, depth + 1)?;
            Ok((RlpItem::List(items), rest))
        }

        // Long list (56+ bytes total)
        0xf8..=0xff => {
            let len_of_len = (first - LONG_LIST_OFFSET) as usize;
            let len = read_long_length(input, len_of_len)?;
            let (payload, rest) = split_payload(input, 1 + len_of_len, len)?;
            let items = decode_list_items(payload, depth + 1)?;
            Ok((RlpItem::List(items), rest))
        }
    }
}

/// Reads the big-endian length that follows a long-form prefix byte.
fn read_long_length(input: &[u8], len_of_len: usize) -> Result<usize, RlpError> {
    let len_bytes = input.get(1..1 + len_of_len).ok_or(RlpError::UnexpectedEof)?;

    if len_bytes[0] == 0 {
        return Err(RlpError::NonCanonical);
    }
    if len_bytes.len() > core::mem::size_of::<usize>() {
        return Err(RlpError::LengthOverflow);
    }

    let len = len_bytes
        .iter()
        .fold(0usize, |acc, &b| acc << 8 | b as usize);

    // Long form is only valid when the short form cannot hold the length
    if len < SHORT_LIMIT {
        return Err(RlpError::NonCanonical);
    }
    Ok(len)
}

fn split_payload(input: &[u8], start: usize, len: usize) -> Result<(&[u8], &[u8]), RlpError> {
    let end = start.checked_add(len).ok_or(RlpError::LengthOverflow)?;
    if input.len() < end {
        return Err(RlpError::UnexpectedEof);
    }
    Ok((&input[start..end], &input[end..]))
}

fn decode_list_items(mut data: &[u8], depth: usize) -> Result<Vec<RlpItem<'_>>, RlpError> {
    let mut items = Vec::new();
    while !data.is_empty() {
        let (item, rest) = decode_internal(data, depth)?;
        items.push(item);
        data = rest;
    }
    Ok(items)
}
