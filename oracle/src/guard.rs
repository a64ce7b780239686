use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::time::{Clock, duration_ms};

use crate::source::{PriceError, PriceSource, RoundSource};
use crate::types::{Price, RoundData};

/// Rejects rounds older than `max_age`.
///
/// Turns a feed that silently stops updating into an explicit
/// [`PriceError::Stale`] so callers never act on an outdated price.
pub struct StalenessGuard<S> {
    inner: S,
    max_age_ms: u64,
    clock: Arc<dyn Clock>,
}

impl<S: RoundSource> StalenessGuard<S> {
    pub fn new(inner: S, max_age: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            max_age_ms: duration_ms(max_age),
            clock,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: RoundSource> RoundSource for StalenessGuard<S> {
    async fn latest_round(&self) -> Result<RoundData, PriceError> {
        let round = self.inner.latest_round().await?;

        // Rounds stamped in the future count as fresh.
        let age_ms = self.clock.now_ms().saturating_sub(round.updated_at_ms);
        if age_ms > self.max_age_ms {
            tracing::warn!(
                round_id = round.round_id,
                age_ms,
                max_age_ms = self.max_age_ms,
                "rejecting stale price round"
            );
            return Err(PriceError::Stale {
                age_ms,
                max_age_ms: self.max_age_ms,
            });
        }

        Ok(round)
    }
}

#[async_trait]
impl<S: RoundSource> PriceSource for StalenessGuard<S> {
    async fn latest_price(&self) -> Result<Price, PriceError> {
        self.latest_round().await.map(|r| r.price)
    }
}
