use std::sync::Arc;

use registry::TokenId;
use trend::{TrendError, TrendProvider};

use crate::renderer::MetadataRenderer;

/// Resolves a token's URI by asking a [`TrendProvider`] for its trend and
/// handing the result to a renderer.
pub struct TokenUriResolver {
    trends: Arc<dyn TrendProvider>,
    renderer: Arc<dyn MetadataRenderer>,
}

impl TokenUriResolver {
    pub fn new(trends: Arc<dyn TrendProvider>, renderer: Arc<dyn MetadataRenderer>) -> Self {
        Self { trends, renderer }
    }

    pub async fn token_uri(&self, token_id: TokenId) -> Result<String, TrendError> {
        let trend = self.trends.trend_of(token_id).await?;
        tracing::trace!(token_id, %trend, "rendering token uri");
        Ok(self.renderer.render(token_id, trend))
    }
}
