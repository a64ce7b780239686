//! Shared types used by the trend engine.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use common::time::duration_ms;
use oracle::Price;
use serde::{Deserialize, Serialize};

/// Collection-wide direction of the tracked price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrendLabel {
    #[default]
    Bull,
    Bear,
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrendLabel::Bull => "Bull",
            TrendLabel::Bear => "Bear",
        };
        f.write_str(s)
    }
}

impl FromStr for TrendLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bull" | "bull" => Ok(TrendLabel::Bull),
            "Bear" | "bear" => Ok(TrendLabel::Bear),
            other => Err(format!("Invalid TrendLabel value: {other}")),
        }
    }
}

/// How a token's rendered trend relates to the collection-wide trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropagationMode {
    /// Every token reflects the latest evaluation.
    #[default]
    Live,
    /// Every token keeps the trend that was active when it was minted.
    SnapshotAtMint,
}

impl FromStr for PropagationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live" | "Live" => Ok(PropagationMode::Live),
            "snapshot" | "SnapshotAtMint" => Ok(PropagationMode::SnapshotAtMint),
            other => Err(format!("Invalid PropagationMode value: {other}")),
        }
    }
}

/// Construction-time configuration. Immutable for the engine's lifetime.
#[derive(Debug, Clone)]
pub struct TrendConfig {
    /// Minimum time between two evaluations.
    pub interval: Duration,

    pub mode: PropagationMode,
}

impl TrendConfig {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            mode: PropagationMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: PropagationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Interval in milliseconds. Intervals too long for a `u64` saturate,
    /// so they never shrink into a short one.
    pub fn interval_ms(&self) -> u64 {
        duration_ms(self.interval)
    }
}

/// The single shared record the engine reads and writes.
///
/// `version` counts committed evaluations; it is 0 right after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationState {
    pub last_recorded_price: Price,
    pub last_evaluation_ms: u64,
    pub current_trend: TrendLabel,
    pub version: u64,
}

/// What a committed evaluation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationOutcome {
    pub changed: bool,
    pub old_trend: TrendLabel,
    pub new_trend: TrendLabel,
    pub price: Price,
    pub evaluated_at_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_label_round_trips_through_display() {
        for label in [TrendLabel::Bull, TrendLabel::Bear] {
            assert_eq!(label.to_string().parse::<TrendLabel>(), Ok(label));
        }
        assert!("sideways".parse::<TrendLabel>().is_err());
    }

    #[test]
    fn propagation_mode_parses_config_spellings() {
        assert_eq!("live".parse(), Ok(PropagationMode::Live));
        assert_eq!("snapshot".parse(), Ok(PropagationMode::SnapshotAtMint));
        assert!("sometimes".parse::<PropagationMode>().is_err());
    }

    #[test]
    fn initial_trend_is_bull() {
        assert_eq!(TrendLabel::default(), TrendLabel::Bull);
    }

    #[test]
    fn oversized_interval_saturates() {
        let cfg = TrendConfig::new(Duration::from_secs(18_446_744_073_709_552));
        assert_eq!(cfg.interval_ms(), u64::MAX);

        assert_eq!(TrendConfig::new(Duration::from_secs(60)).interval_ms(), 60_000);
    }
}
