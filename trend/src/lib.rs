//! Trend automation engine.
//!
//! An external keeper polls [`TrendEngine::probe_eligibility`]; once the
//! configured interval has elapsed it calls [`TrendEngine::evaluate`], which
//! compares the latest oracle price with the previously recorded one and
//! flips the collection-wide [`TrendLabel`].

pub mod eligibility;
pub mod engine;
pub mod error;
pub mod policy;
pub mod provider;
pub mod state;
pub mod types;

pub use engine::TrendEngine;
pub use error::TrendError;
pub use provider::TrendProvider;
pub use types::{EvaluationOutcome, EvaluationState, PropagationMode, TrendConfig, TrendLabel};
