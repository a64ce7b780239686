//! The automation loop.
//!
//! Every poll the keeper:
//!   1. Probes eligibility (cheap, lock-free).
//!   2. If eligible, asks the engine to evaluate.
//!   3. Logs the outcome; retryable errors wait for the next tick.

use std::sync::Arc;
use std::time::Duration;

use common::logger::{TraceId, root_span};
use common::time::duration_ms;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::Instrument;
use trend::{EvaluationOutcome, TrendEngine, TrendError};

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickReport {
    /// Interval not elapsed; nothing attempted.
    Idle,
    Evaluated(EvaluationOutcome),
    /// Evaluation attempted and rejected; state unchanged.
    Failed(TrendError),
}

pub struct Keeper {
    engine: Arc<TrendEngine>,
    poll: Duration,
}

impl Keeper {
    pub fn new(engine: Arc<TrendEngine>, poll: Duration) -> Self {
        Self { engine, poll }
    }

    pub async fn tick(&self) -> TickReport {
        let trace_id = TraceId::default();

        async {
            if !self.engine.probe_eligibility() {
                return TickReport::Idle;
            }

            match self.engine.evaluate().await {
                Ok(outcome) => {
                    if outcome.changed {
                        tracing::info!(
                            old = %outcome.old_trend,
                            new = %outcome.new_trend,
                            "collection trend flipped"
                        );
                    }
                    TickReport::Evaluated(outcome)
                }
                Err(e @ TrendError::NotEligible { .. }) => {
                    // someone else evaluated between probe and call
                    tracing::debug!(error = %e, "lost evaluation race");
                    TickReport::Failed(e)
                }
                Err(e) => {
                    tracing::warn!(error = %e, retryable = e.is_retryable(), "evaluation failed");
                    TickReport::Failed(e)
                }
            }
        }
        .instrument(root_span("keeper_tick", &trace_id))
        .await
    }

    /// Tick on a fixed cadence until `shutdown` flips to `true` or its
    /// sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.poll);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(poll_ms = duration_ms(self.poll), "keeper started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("keeper stopped");
    }
}
