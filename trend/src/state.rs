//! Engine-owned trend state.

use std::collections::HashMap;

use oracle::Price;
use registry::TokenId;

use crate::types::{EvaluationState, PropagationMode, TrendLabel};

/// Holds the singleton [`EvaluationState`] plus the trend each token was
/// minted under.
///
/// `TrendStore` is wrapped in a mutex by `TrendEngine`; it does no locking
/// of its own.
#[derive(Debug)]
pub struct TrendStore {
    evaluation: EvaluationState,
    minted_trend: HashMap<TokenId, TrendLabel>,
}

impl TrendStore {
    pub fn new(initial_price: Price, now_ms: u64) -> Self {
        Self {
            evaluation: EvaluationState {
                last_recorded_price: initial_price,
                last_evaluation_ms: now_ms,
                current_trend: TrendLabel::default(),
                version: 0,
            },
            minted_trend: HashMap::new(),
        }
    }

    pub fn evaluation(&self) -> &EvaluationState {
        &self.evaluation
    }

    /// Apply one evaluation result. Returns the trend that was replaced.
    ///
    /// The timestamp never moves backwards even if `now_ms` does.
    pub fn commit(&mut self, price: Price, trend: TrendLabel, now_ms: u64) -> TrendLabel {
        let old = self.evaluation.current_trend;

        self.evaluation.current_trend = trend;
        self.evaluation.last_recorded_price = price;
        self.evaluation.last_evaluation_ms = self.evaluation.last_evaluation_ms.max(now_ms);
        self.evaluation.version += 1;

        old
    }

    /// Brand a freshly minted token with the trend active right now.
    pub fn record_mint(&mut self, token_id: TokenId) {
        self.minted_trend
            .insert(token_id, self.evaluation.current_trend);
    }

    pub fn minted_trend(&self, token_id: TokenId) -> Option<TrendLabel> {
        self.minted_trend.get(&token_id).copied()
    }

    /// Trend a token should render with under `mode`.
    ///
    /// Existence is the registry's concern. In snapshot mode a token that
    /// was never recorded here (minted on the registry directly) takes the
    /// current trend on its first read and keeps it from then on.
    pub fn trend_for(&mut self, token_id: TokenId, mode: PropagationMode) -> TrendLabel {
        let current = self.evaluation.current_trend;
        match mode {
            PropagationMode::Live => current,
            PropagationMode::SnapshotAtMint => {
                *self.minted_trend.entry(token_id).or_insert(current)
            }
        }
    }
}
