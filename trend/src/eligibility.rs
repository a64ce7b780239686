//! Decides whether enough time has passed to re-evaluate the trend.
//
//  This module is deliberately pure: no async, no IO.

/// Result of an eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    CooldownNotElapsed { elapsed_ms: u64, remaining_ms: u64 },
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

/// `Eligible` iff `now_ms - last_evaluation_ms >= interval_ms`.
///
/// A clock that reads earlier than the last evaluation counts as zero
/// elapsed time, never as eligible.
pub fn check_eligibility(last_evaluation_ms: u64, interval_ms: u64, now_ms: u64) -> Eligibility {
    let elapsed_ms = now_ms.saturating_sub(last_evaluation_ms);
    if elapsed_ms < interval_ms {
        return Eligibility::CooldownNotElapsed {
            elapsed_ms,
            remaining_ms: interval_ms - elapsed_ms,
        };
    }

    Eligibility::Eligible
}
