use async_trait::async_trait;
use registry::TokenId;

use crate::error::TrendError;
use crate::types::TrendLabel;

/// Capability to answer "which trend should this token show right now?".
///
/// Renderers depend on this instead of reading engine state, so the engine
/// decides how trend propagates to tokens.
#[async_trait]
pub trait TrendProvider: Send + Sync {
    async fn trend_of(&self, token_id: TokenId) -> Result<TrendLabel, TrendError>;
}
