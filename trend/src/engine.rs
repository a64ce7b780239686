//! The trend automation engine.
//!
//! Each evaluation:
//!   1. Re-checks the interval under the state lock.
//!   2. Reads the latest price from the injected `PriceSource`.
//!   3. Uses `policy` to derive the new trend.
//!   4. Commits price, trend and timestamp to the `TrendStore` in one step.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use common::time::Clock;
use oracle::{Price, PriceSource};
use registry::{Address, OwnershipRegistry, TokenId};
use tokio::sync::Mutex;

use super::eligibility::{Eligibility, check_eligibility};
use super::error::TrendError;
use super::policy::next_trend;
use super::provider::TrendProvider;
use super::state::TrendStore;
use super::types::{EvaluationOutcome, EvaluationState, TrendConfig, TrendLabel};

pub struct TrendEngine {
    cfg: TrendConfig,
    price_source: Arc<dyn PriceSource>,
    registry: Arc<dyn OwnershipRegistry>,
    clock: Arc<dyn Clock>,
    store: Mutex<TrendStore>,
    /// Mirror of `EvaluationState::last_evaluation_ms` so the probe never
    /// waits on the store lock. Written only after a commit.
    last_evaluation_ms: AtomicU64,
}

impl TrendEngine {
    /// Build an engine, seeding the recorded price from the feed.
    ///
    /// The construction time counts as the first evaluation, so the probe
    /// stays false for one full interval. Fails with `PriceUnavailable` if
    /// the feed cannot be read.
    pub async fn new(
        cfg: TrendConfig,
        price_source: Arc<dyn PriceSource>,
        registry: Arc<dyn OwnershipRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TrendError> {
        let initial_price = price_source.latest_price().await?;
        let now_ms = clock.now_ms();

        tracing::info!(
            interval_ms = cfg.interval_ms(),
            mode = ?cfg.mode,
            initial_price = %initial_price,
            "trend engine initialized"
        );

        Ok(Self {
            store: Mutex::new(TrendStore::new(initial_price, now_ms)),
            last_evaluation_ms: AtomicU64::new(now_ms),
            cfg,
            price_source,
            registry,
            clock,
        })
    }

    pub fn interval(&self) -> Duration {
        self.cfg.interval
    }

    /// Side-effect free: has the interval elapsed since the last evaluation?
    pub fn probe_eligibility(&self) -> bool {
        let last = self.last_evaluation_ms.load(Ordering::Acquire);
        let out = check_eligibility(last, self.cfg.interval_ms(), self.clock.now_ms());

        tracing::debug!(?out, "eligibility probed");
        out.is_eligible()
    }

    /// Keeper-convention probe. The payload is ignored and the returned
    /// perform data is always empty.
    pub fn check_upkeep(&self, _check_data: &[u8]) -> (bool, Vec<u8>) {
        (self.probe_eligibility(), Vec::new())
    }

    /// Re-evaluate the trend against the latest price.
    ///
    /// The interval is checked again under the lock, so an early or
    /// duplicate call fails `NotEligible` instead of mutating. On any error
    /// the stored state is left exactly as it was.
    pub async fn evaluate(&self) -> Result<EvaluationOutcome, TrendError> {
        let mut store = self.store.lock().await;
        let now_ms = self.clock.now_ms();

        let last = store.evaluation().last_evaluation_ms;
        if let Eligibility::CooldownNotElapsed { elapsed_ms, .. } =
            check_eligibility(last, self.cfg.interval_ms(), now_ms)
        {
            tracing::debug!(elapsed_ms, "evaluation attempted before interval elapsed");
            return Err(TrendError::NotEligible {
                elapsed_ms,
                interval_ms: self.cfg.interval_ms(),
            });
        }

        // The read happens under the lock: a concurrent caller must not
        // commit a price older than ours.
        let price = match self.price_source.latest_price().await {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "price read failed; state left untouched");
                return Err(e.into());
            }
        };

        let previous = store.evaluation().last_recorded_price;
        let new_trend = next_trend(&previous, &price);
        let old_trend = store.commit(price, new_trend, now_ms);

        let evaluated_at_ms = store.evaluation().last_evaluation_ms;
        self.last_evaluation_ms
            .store(evaluated_at_ms, Ordering::Release);

        let outcome = EvaluationOutcome {
            changed: old_trend != new_trend,
            old_trend,
            new_trend,
            price,
            evaluated_at_ms,
        };

        tracing::info!(
            version = store.evaluation().version,
            previous_price = %previous,
            price = %price,
            %old_trend,
            %new_trend,
            changed = outcome.changed,
            "trend evaluated"
        );

        Ok(outcome)
    }

    /// Keeper-convention alias of [`evaluate`](Self::evaluate).
    pub async fn perform_upkeep(
        &self,
        _perform_data: &[u8],
    ) -> Result<EvaluationOutcome, TrendError> {
        self.evaluate().await
    }

    /// Issue a new token to `owner`. Only the registry's operator may mint.
    ///
    /// Holding the store lock across the registry call keeps a concurrent
    /// evaluation from landing between id assignment and the mint snapshot.
    pub async fn mint(&self, caller: &Address, owner: &Address) -> Result<TokenId, TrendError> {
        let mut store = self.store.lock().await;

        let token_id = self.registry.mint(caller, owner).await?;
        store.record_mint(token_id);

        tracing::info!(
            token_id,
            %owner,
            trend = %store.evaluation().current_trend,
            "token minted"
        );

        Ok(token_id)
    }

    /// Latest price straight from the feed (not the recorded one).
    pub async fn current_price(&self) -> Result<Price, TrendError> {
        Ok(self.price_source.latest_price().await?)
    }

    pub async fn current_trend(&self) -> TrendLabel {
        self.store.lock().await.evaluation().current_trend
    }

    /// Snapshot of the evaluation record.
    pub async fn state(&self) -> EvaluationState {
        self.store.lock().await.evaluation().clone()
    }
}

#[async_trait]
impl TrendProvider for TrendEngine {
    async fn trend_of(&self, token_id: TokenId) -> Result<TrendLabel, TrendError> {
        // existence check first: unknown ids never render
        self.registry.owner_of(token_id).await?;

        let mut store = self.store.lock().await;
        Ok(store.trend_for(token_id, self.cfg.mode))
    }
}
