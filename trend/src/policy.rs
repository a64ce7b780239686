//! Trend policy: maps two successive price observations to a label.

use oracle::Price;

use crate::types::TrendLabel;

/// `Bear` iff `latest` is strictly below `previous`; flat or rising is `Bull`.
pub fn next_trend(previous: &Price, latest: &Price) -> TrendLabel {
    if latest < previous {
        TrendLabel::Bear
    } else {
        TrendLabel::Bull
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(answer: i128) -> Price {
        Price::new(answer, 8)
    }

    #[test]
    fn one_unit_down_is_bear() {
        assert_eq!(next_trend(&p(120_000_000), &p(119_999_999)), TrendLabel::Bear);
    }

    #[test]
    fn unchanged_is_bull() {
        assert_eq!(next_trend(&p(120_000_000), &p(120_000_000)), TrendLabel::Bull);
    }

    #[test]
    fn one_unit_up_is_bull() {
        assert_eq!(next_trend(&p(120_000_000), &p(120_000_001)), TrendLabel::Bull);
    }

    #[test]
    fn precision_change_compares_values() {
        // 1.2 at 8 decimals vs 1.19 at 2 decimals
        assert_eq!(next_trend(&p(120_000_000), &Price::new(119, 2)), TrendLabel::Bear);
        assert_eq!(next_trend(&p(120_000_000), &Price::new(120, 2)), TrendLabel::Bull);
    }
}
