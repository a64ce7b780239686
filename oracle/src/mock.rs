//! In-memory aggregator used for local runs and tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::source::{PriceError, PriceSource, RoundSource};
use crate::types::{Price, RoundData};

/// Deterministic fake of an on-chain V3 aggregator.
///
/// Every `update_answer` opens a new round. `set_unavailable(true)` makes all
/// reads fail until switched back.
pub struct MockAggregator {
    decimals: u8,
    round: Mutex<RoundData>,
    unavailable: AtomicBool,
}

impl MockAggregator {
    pub fn new(decimals: u8, initial_answer: i128) -> Self {
        Self::with_updated_at(decimals, initial_answer, common::time::now_ms())
    }

    pub fn with_updated_at(decimals: u8, initial_answer: i128, updated_at_ms: u64) -> Self {
        Self {
            decimals,
            round: Mutex::new(RoundData {
                round_id: 1,
                price: Price::new(initial_answer, decimals),
                updated_at_ms,
            }),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Publish a new answer stamped with the current wall-clock time.
    pub async fn update_answer(&self, answer: i128) {
        self.update_round_data(answer, common::time::now_ms()).await;
    }

    /// Publish a new answer with an explicit update timestamp.
    pub async fn update_round_data(&self, answer: i128, updated_at_ms: u64) {
        let mut round = self.round.lock().await;
        round.round_id += 1;
        round.price = Price::new(answer, self.decimals);
        round.updated_at_ms = updated_at_ms;
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl RoundSource for MockAggregator {
    async fn latest_round(&self) -> Result<RoundData, PriceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PriceError::Unavailable("mock aggregator switched off".into()));
        }
        Ok(*self.round.lock().await)
    }
}

#[async_trait]
impl PriceSource for MockAggregator {
    async fn latest_price(&self) -> Result<Price, PriceError> {
        self.latest_round().await.map(|r| r.price)
    }
}
