use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed-point price as reported by a feed: `answer / 10^decimals`.
///
/// Ordering compares the represented value exactly, whatever the two
/// precisions are.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Price {
    pub answer: i128,
    pub decimals: u8,
}

impl Price {
    pub fn new(answer: i128, decimals: u8) -> Self {
        Self { answer, decimals }
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        let (x, y) = (self.answer.unsigned_abs(), other.answer.unsigned_abs());
        match self.decimals.cmp(&other.decimals) {
            Ordering::Equal => x.cmp(&y),
            Ordering::Less => cmp_scaled(x, other.decimals - self.decimals, y),
            Ordering::Greater => cmp_scaled(y, self.decimals - other.decimals, x).reverse(),
        }
    }
}

/// Compares `x * 10^shift` against `y` without overflowing.
///
/// Any product that does not fit in a `u128` is larger than every `i128`
/// magnitude, so overflow alone settles the comparison.
fn cmp_scaled(x: u128, shift: u8, y: u128) -> Ordering {
    if x == 0 {
        return 0.cmp(&y);
    }
    match 10u128
        .checked_pow(u32::from(shift))
        .and_then(|factor| x.checked_mul(factor))
    {
        Some(scaled) => scaled.cmp(&y),
        None => Ordering::Greater,
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.answer < 0, other.answer < 0) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => self.cmp_magnitude(other).reverse(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.decimals == 0 {
            return write!(f, "{}", self.answer);
        }
        let places = usize::from(self.decimals);
        let sign = if self.answer < 0 { "-" } else { "" };
        let digits = format!("{:0>width$}", self.answer.unsigned_abs(), width = places + 1);
        let (whole, frac) = digits.split_at(digits.len() - places);
        write!(f, "{sign}{whole}.{frac}")
    }
}

/// One oracle round: the price plus when the feed last updated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundData {
    pub round_id: u64,
    pub price: Price,
    pub updated_at_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_within_same_precision() {
        let a = Price::new(120_000_000, 8);
        let b = Price::new(100_000_000, 8);
        assert!(b < a);
        assert_eq!(a, Price::new(120_000_000, 8));
    }

    #[test]
    fn ordering_across_precisions_uses_value() {
        // 1.20 vs 1.2000
        assert_eq!(Price::new(120, 2), Price::new(12_000, 4));
        assert!(Price::new(119, 2) < Price::new(11_901, 4));
    }

    #[test]
    fn negative_answers_order_naturally() {
        assert!(Price::new(-5, 0) < Price::new(0, 0));
    }

    #[test]
    fn display_formats_fixed_point() {
        assert_eq!(Price::new(120_000_000, 8).to_string(), "1.20000000");
        assert_eq!(Price::new(-150, 2).to_string(), "-1.50");
        assert_eq!(Price::new(42, 0).to_string(), "42");
        assert_eq!(Price::new(5, 3).to_string(), "0.005");
    }

    #[test]
    fn ordering_survives_wide_precision_gaps() {
        // 1e-40 against values the old rescaling could not represent
        let tiny = Price::new(1, 40);
        assert!(tiny < Price::new(1, 0));
        assert!(Price::new(i128::MAX, 0) > Price::new(i128::MAX, 60));
        assert_ne!(Price::new(i128::MAX, 0), Price::new(i128::MAX - 1, 0));
        assert_ne!(Price::new(1, 0), Price::new(2, 0));
        assert!(Price::new(-1, 0) < Price::new(-1, 50));
        assert_eq!(Price::new(0, 0), Price::new(0, 200));
        assert!(Price::new(0, 0) < Price::new(1, 255));
    }

    #[test]
    fn ordering_matches_value_at_the_overflow_edge() {
        // 10^38 / 10^38 == 1 / 10^0
        let big = Price::new(10i128.pow(38), 38);
        assert_eq!(big, Price::new(1, 0));
        assert!(Price::new(10i128.pow(38) - 1, 38) < Price::new(1, 0));
        assert!(Price::new(2, 0) > big);
    }

    #[test]
    fn display_handles_precision_beyond_i128_range() {
        let p = Price::new(5, 40);
        assert_eq!(p.to_string(), format!("0.{}5", "0".repeat(39)));
        assert_eq!(Price::new(-12, 39).to_string(), format!("-0.{}12", "0".repeat(37)));
    }
}
