//! Token metadata rendering.
//!
//! Renderers are pure: the same `(TokenId, TrendLabel)` always yields the same
//! document, and no engine state is consulted.

use registry::TokenId;
use serde_json::json;
use trend::TrendLabel;

pub trait MetadataRenderer: Send + Sync {
    fn render(&self, token_id: TokenId, trend: TrendLabel) -> String;
}

/// Image URI per trend label.
#[derive(Debug, Clone)]
pub struct TrendArtwork {
    pub bull_image: String,
    pub bear_image: String,
}

impl TrendArtwork {
    pub fn image_for(&self, trend: TrendLabel) -> &str {
        match trend {
            TrendLabel::Bull => &self.bull_image,
            TrendLabel::Bear => &self.bear_image,
        }
    }
}

impl Default for TrendArtwork {
    fn default() -> Self {
        Self {
            bull_image: "ipfs://bulls-and-bears/bull.svg".into(),
            bear_image: "ipfs://bulls-and-bears/bear.svg".into(),
        }
    }
}

/// Renders an inline JSON metadata document as a `data:` URI.
#[derive(Debug, Clone)]
pub struct JsonMetadataRenderer {
    collection_name: String,
    description: String,
    artwork: TrendArtwork,
}

impl JsonMetadataRenderer {
    pub fn new(collection_name: impl Into<String>, artwork: TrendArtwork) -> Self {
        Self {
            collection_name: collection_name.into(),
            description: "A token that turns bull or bear with the market.".into(),
            artwork,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn document(&self, token_id: TokenId, trend: TrendLabel) -> serde_json::Value {
        json!({
            "name": format!("{} #{}", self.collection_name, token_id),
            "description": self.description,
            "image": self.artwork.image_for(trend),
            "attributes": [
                { "trait_type": "Trend", "value": trend.to_string() }
            ]
        })
    }
}

impl Default for JsonMetadataRenderer {
    fn default() -> Self {
        Self::new("Bulls & Bears", TrendArtwork::default())
    }
}

impl MetadataRenderer for JsonMetadataRenderer {
    fn render(&self, token_id: TokenId, trend: TrendLabel) -> String {
        format!(
            "data:application/json;utf8,{}",
            self.document(token_id, trend)
        )
    }
}
