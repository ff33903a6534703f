// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::U256;
use serde::{Serialize, Serializer};
use std::{cmp::Ordering, fmt};

/// A raw token integer together with the exponent that scales it for humans.
///
/// Scaling is done on the decimal digits of the raw value so no precision is lost for any
/// `uint256` balance.
#[derive(Clone, Copy, Debug)]
pub struct TokenAmount {
    raw: U256,
    decimals: u8,
}

impl TokenAmount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Whole and fractional digit strings. The fractional part is exactly `decimals` long.
    fn split(&self) -> (String, String) {
        let digits = self.raw.to_string();
        let decimals = self.decimals as usize;
        if decimals == 0 {
            return (digits, String::new());
        }
        let padded = format!("{:0>width$}", digits, width = decimals + 1);
        let (whole, frac) = padded.split_at(padded.len() - decimals);
        (whole.to_string(), frac.to_string())
    }

    /// Render with exactly `precision` fractional digits, truncating the rest
    pub fn format_fixed(&self, precision: usize) -> String {
        let (whole, frac) = self.split();
        if precision == 0 {
            return whole;
        }
        let frac: String = frac
            .chars()
            .chain(std::iter::repeat('0'))
            .take(precision)
            .collect();
        format!("{whole}.{frac}")
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, frac) = self.split();
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.{frac}")
        }
    }
}

impl Ord for TokenAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.decimals.cmp(&other.decimals) {
            Ordering::Equal => self.raw.cmp(&other.raw),
            Ordering::Less => rescaled_cmp(self.raw, other.raw, other.decimals - self.decimals),
            Ordering::Greater => {
                rescaled_cmp(other.raw, self.raw, self.decimals - other.decimals).reverse()
            }
        }
    }
}

/// Compare `coarse * 10^shift` against `fine`. Overflowing the multiplication means
/// `coarse` is the larger value as `fine` fits in a U256.
fn rescaled_cmp(coarse: U256, fine: U256, shift: u8) -> Ordering {
    if coarse.is_zero() {
        return U256::ZERO.cmp(&fine);
    }
    U256::from(10u64)
        .checked_pow(U256::from(shift))
        .and_then(|scale| coarse.checked_mul(scale))
        .map_or(Ordering::Greater, |scaled| scaled.cmp(&fine))
}

impl PartialOrd for TokenAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TokenAmount {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TokenAmount {}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn amount(raw: u64, decimals: u8) -> TokenAmount {
        TokenAmount::new(U256::from(raw), decimals)
    }

    #[test]
    fn test_scaling() {
        assert_eq!(amount(1_500_000, 6).to_string(), "1.5");
        assert_eq!(amount(1_500_000, 6).format_fixed(6), "1.500000");
        assert_eq!(amount(5, 6).to_string(), "0.000005");
        assert_eq!(amount(0, 18).to_string(), "0");
        assert_eq!(amount(42, 0).to_string(), "42");
        assert_eq!(amount(42, 0).format_fixed(2), "42.00");
        assert_eq!(amount(123_456_789, 3).format_fixed(2), "123456.78");
        assert_eq!(amount(123_456_789, 3).format_fixed(0), "123456");
    }

    #[test]
    fn test_no_precision_loss_on_large_supplies() {
        // 10^30 + 1 base units of an 18 decimal token, well past f64 precision
        let raw = U256::from(10u64).pow(U256::from(30)) + U256::from(1u64);
        let amount = TokenAmount::new(raw, 18);
        assert_eq!(amount.to_string(), "1000000000000.000000000000000001");
        assert_eq!(amount.format_fixed(6), "1000000000000.000000");
    }

    #[test]
    fn test_max_value_formats() {
        let amount = TokenAmount::new(U256::MAX, 18);
        let rendered = amount.to_string();
        assert!(rendered.starts_with("115792089237316195423570985008687907853269984665640"));
        assert!(rendered.contains('.'));
    }

    #[test]
    fn test_ordering_across_decimals() {
        assert_eq!(amount(10, 1), amount(100, 2));
        assert!(amount(11, 1) > amount(100, 2));
        assert!(amount(2, 0) > amount(1_999_999, 6));
        assert!(TokenAmount::new(U256::MAX, 0) > TokenAmount::new(U256::MAX, 18));
        // 10^100 overflows the rescale, zero must still compare as zero
        assert_eq!(amount(0, 0), amount(0, 100));
        assert!(amount(0, 0) < amount(1, 100));
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&amount(1_500_000, 6)).unwrap();
        assert_eq!(json, "\"1.5\"");
    }

    proptest! {
        #[test]
        fn ordering_matches_raw_for_equal_decimals(a in any::<u64>(), b in any::<u64>(), d in 0u8..30) {
            prop_assert_eq!(amount(a, d).cmp(&amount(b, d)), a.cmp(&b));
        }

        #[test]
        fn display_round_trips_digits(raw in any::<u64>(), d in 0u8..30) {
            let rendered = amount(raw, d).format_fixed(d as usize);
            let digits: String = rendered.chars().filter(|c| *c != '.').collect();
            let parsed: u128 = digits.parse().unwrap();
            prop_assert_eq!(parsed, raw as u128);
        }
    }
}
