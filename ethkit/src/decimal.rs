//! Arbitrary-length hex to decimal conversion.
//!
//! Wei amounts arrive as big-endian hex quantities of unbounded width.
//! Converting them through a little-endian base-10 digit array keeps the
//! result exact; floating point is only used for display, elsewhere.

use ethkit_common::EthKitError;

use crate::hexutil;

/// Converts a hex quantity (optional `0x`, any length) to a decimal string.
///
/// Invalid characters are rejected. Empty input and all-zero input both
/// yield `"0"`. The result never has leading zeros.
pub fn hex_to_decimal(hex: &str) -> Result<String, EthKitError> {
    let digits = hexutil::strip_prefix(hex);

    // Little-endian base-10 digits of the running value
    let mut result: Vec<u8> = vec![0];

    for c in digits.chars() {
        let nibble = c.to_digit(16).ok_or(EthKitError::InvalidHexInput)?;

        let mut carry = nibble;
        for d in result.iter_mut() {
            let temp = *d as u32 * 16 + carry;
            *d = (temp % 10) as u8;
            carry = temp / 10;
        }
        while carry > 0 {
            result.push((carry % 10) as u8);
            carry /= 10;
        }
    }

    Ok(result
        .iter()
        .rev()
        .map(|&d| char::from(b'0' + d))
        .collect())
}

/// Formats a decimal integer string as a fixed-point number with
/// `decimals` fractional digits, trimming trailing fractional zeros.
///
/// `format_units("1500000000000000000", 18)` is `"1.5"`.
pub fn format_units(decimal: &str, decimals: usize) -> Result<String, EthKitError> {
    if !decimal.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EthKitError::InvalidHexInput);
    }
    let trimmed = decimal.trim_start_matches('0');
    if trimmed.is_empty() {
        return Ok("0".to_string());
    }

    let padded = if trimmed.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - trimmed.len() + 1), trimmed)
    } else {
        trimmed.to_string()
    };

    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        Ok(whole.to_string())
    } else {
        Ok(format!("{}.{}", whole, fraction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_wei_values() {
        assert_eq!(hex_to_decimal("5af3107a4000").unwrap(), "100000000000000");
        assert_eq!(
            hex_to_decimal("de0b6b3a7640000").unwrap(),
            "1000000000000000000"
        );
        assert_eq!(hex_to_decimal("0xff").unwrap(), "255");
        assert_eq!(hex_to_decimal("0XFF").unwrap(), "255");
    }

    #[test]
    fn test_zero_inputs() {
        assert_eq!(hex_to_decimal("").unwrap(), "0");
        assert_eq!(hex_to_decimal("0x").unwrap(), "0");
        assert_eq!(hex_to_decimal("0000").unwrap(), "0");
        assert_eq!(hex_to_decimal("0x0").unwrap(), "0");
    }

    #[test]
    fn test_leading_zeros_are_dropped() {
        assert_eq!(hex_to_decimal("000010").unwrap(), "16");
    }

    #[test]
    fn test_beyond_u128() {
        // 2^256 - 1
        let max = "f".repeat(64);
        assert_eq!(
            hex_to_decimal(&max).unwrap(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
    }

    #[test]
    fn test_matches_native_conversion() {
        for value in [1u128, 9, 10, 255, 4096, 123_456_789_012_345_678_901_234_567] {
            let hex = format!("{:x}", value);
            assert_eq!(hex_to_decimal(&hex).unwrap(), value.to_string());
        }
    }

    #[test]
    fn test_invalid_character_rejected() {
        assert_eq!(hex_to_decimal("12g4"), Err(EthKitError::InvalidHexInput));
        assert_eq!(hex_to_decimal("0x-1"), Err(EthKitError::InvalidHexInput));
        assert_eq!(hex_to_decimal(" 1"), Err(EthKitError::InvalidHexInput));
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units("1000000000000000000", 18).unwrap(), "1");
        assert_eq!(format_units("100000000000000", 18).unwrap(), "0.0001");
        assert_eq!(format_units("1500000000000000000", 18).unwrap(), "1.5");
        assert_eq!(format_units("0", 18).unwrap(), "0");
        assert_eq!(format_units("1", 18).unwrap(), "0.000000000000000001");
        assert_eq!(format_units("123", 0).unwrap(), "123");
        assert_eq!(format_units("12x", 2), Err(EthKitError::InvalidHexInput));
    }
}
