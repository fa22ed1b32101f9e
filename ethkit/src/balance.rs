//! Wei balances as reported by a node.
//!
//! The hex quantity is the source of truth. Decimal and ether views are
//! derived on demand; the `f64` ether value is for display only and must
//! not be used to decide whether funds suffice. Use [`Balance::covers`]
//! or the `Ord` impl, which compare the exact integer.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use ethkit_common::{EthKitError, WEI_PER_ETHER_DECIMALS};

use crate::decimal::{format_units, hex_to_decimal};
use crate::hexutil;

/// An unsigned wei amount of arbitrary width.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Balance {
    /// Lower-case hex digits without prefix or leading zeros; empty is zero.
    digits: String,
}

impl Balance {
    /// Parses a hex quantity such as `"0x5af3107a4000"`.
    ///
    /// Unlike byte strings, quantities may have odd length. An empty
    /// string (or bare `0x`) is zero.
    pub fn from_hex(s: &str) -> Result<Self, EthKitError> {
        let digits = hexutil::strip_prefix(s);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(EthKitError::InvalidHexInput);
        }
        Ok(Self {
            digits: digits.trim_start_matches('0').to_ascii_lowercase(),
        })
    }

    /// A balance of `wei`.
    pub fn from_wei(wei: u64) -> Self {
        if wei == 0 {
            return Self::default();
        }
        Self {
            digits: format!("{:x}", wei),
        }
    }

    /// The zero balance.
    pub fn zero() -> Self {
        Self::default()
    }

    /// `0x`-prefixed hex quantity, `"0x0"` for zero.
    pub fn raw(&self) -> String {
        if self.is_zero() {
            "0x0".to_string()
        } else {
            format!("0x{}", self.digits)
        }
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Exact decimal wei amount.
    pub fn to_wei_decimal(&self) -> String {
        // digits are validated at construction
        hex_to_decimal(&self.digits).unwrap_or_else(|_| "0".to_string())
    }

    /// Exact ether amount as a decimal string, e.g. `"1.5"`.
    pub fn to_ether_exact(&self) -> String {
        format_units(&self.to_wei_decimal(), WEI_PER_ETHER_DECIMALS)
            .unwrap_or_else(|_| "0".to_string())
    }

    /// Approximate ether amount. Display only.
    pub fn to_ether(&self) -> f64 {
        let wei = self
            .to_wei_decimal()
            .bytes()
            .fold(0f64, |acc, b| acc * 10.0 + (b - b'0') as f64);
        wei / 10f64.powi(WEI_PER_ETHER_DECIMALS as i32)
    }

    /// `"{ether:.N} ETH"`, or `"0 ETH"` for an empty balance.
    pub fn formatted(&self, decimals: usize) -> String {
        if self.is_zero() {
            return "0 ETH".to_string();
        }
        format!("{:.*} ETH", decimals, self.to_ether())
    }

    /// `"{wei} wei"` with the exact decimal amount.
    pub fn formatted_wei(&self) -> String {
        format!("{} wei", self.to_wei_decimal())
    }

    /// True if this balance is at least `amount`.
    pub fn covers(&self, amount: &Balance) -> bool {
        self >= amount
    }
}

impl From<u64> for Balance {
    fn from(wei: u64) -> Self {
        Self::from_wei(wei)
    }
}

impl Ord for Balance {
    fn cmp(&self, other: &Self) -> Ordering {
        // No leading zeros, so a longer digit string is a larger number
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl PartialOrd for Balance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ETH", self.to_ether_exact())
    }
}

impl FromStr for Balance {
    type Err = EthKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_conversions() {
        let balance = Balance::from_hex("0x5af3107a4000").unwrap();
        assert_eq!(balance.to_wei_decimal(), "100000000000000");
        assert_eq!(balance.to_ether_exact(), "0.0001");
        assert!((balance.to_ether() - 0.0001).abs() < 1e-12);
        assert_eq!(balance.raw(), "0x5af3107a4000");
    }

    #[test]
    fn test_one_ether() {
        let balance = Balance::from_hex("de0b6b3a7640000").unwrap();
        assert_eq!(balance.to_wei_decimal(), "1000000000000000000");
        assert_eq!(balance.to_ether(), 1.0);
        assert_eq!(balance.formatted(4), "1.0000 ETH");
        assert_eq!(balance.to_string(), "1 ETH");
    }

    #[test]
    fn test_zero_forms() {
        for s in ["", "0x", "0x0", "0000"] {
            let balance = Balance::from_hex(s).unwrap();
            assert!(balance.is_zero());
            assert_eq!(balance.raw(), "0x0");
            assert_eq!(balance.to_wei_decimal(), "0");
            assert_eq!(balance.formatted(6), "0 ETH");
            assert_eq!(balance, Balance::zero());
        }
    }

    #[test]
    fn test_odd_length_and_case() {
        let a = Balance::from_hex("0xABC").unwrap();
        let b = Balance::from_hex("0x0abc").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_wei_decimal(), "2748");
        assert_eq!(a.formatted_wei(), "2748 wei");
    }

    #[test]
    fn test_invalid_digit_rejected() {
        assert_eq!(
            Balance::from_hex("0x12g4"),
            Err(EthKitError::InvalidHexInput)
        );
    }

    #[test]
    fn test_exact_ordering() {
        // Both print as 1.0000 ETH but differ by one wei
        let one_ether = Balance::from_hex("de0b6b3a7640000").unwrap();
        let one_ether_and_a_wei = Balance::from_hex("de0b6b3a7640001").unwrap();
        assert_eq!(one_ether.formatted(4), one_ether_and_a_wei.formatted(4));
        assert!(one_ether_and_a_wei > one_ether);
        assert!(one_ether_and_a_wei.covers(&one_ether));
        assert!(!one_ether.covers(&one_ether_and_a_wei));
        assert!(one_ether.covers(&one_ether));
    }

    #[test]
    fn test_from_wei_matches_hex() {
        assert_eq!(Balance::from(255u64), Balance::from_hex("0xff").unwrap());
        assert_eq!(Balance::from_wei(0), Balance::zero());
        assert!(Balance::from_wei(1) > Balance::zero());
    }

    #[test]
    fn test_wide_balance() {
        let max = Balance::from_hex(&"f".repeat(64)).unwrap();
        assert_eq!(
            max.to_wei_decimal(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
        assert!(max > Balance::from_wei(u64::MAX));
    }
}
