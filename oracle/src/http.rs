//! HTTP-backed price feed.
//!
//! Expects the endpoint to answer `GET <url>` with
//!
//! ```json
//! { "round_id": 42, "answer": 6512345000000, "decimals": 8, "updated_at": 1700000000 }
//! ```
//!
//! where `updated_at` is unix seconds. `round_id` may be omitted.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::source::{PriceError, PriceSource, RoundSource};
use crate::types::{Price, RoundData};

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    round_id: u64,
    answer: i128,
    decimals: u8,
    updated_at: u64,
}

pub struct HttpPriceFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpPriceFeed {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PriceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PriceError::Unavailable(format!("http client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RoundSource for HttpPriceFeed {
    async fn latest_round(&self) -> Result<RoundData, PriceError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PriceError::Unavailable(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PriceError::Unavailable(format!("feed returned {status}")));
        }

        let body: FeedResponse = resp
            .json()
            .await
            .map_err(|e| PriceError::Unavailable(format!("malformed feed response: {e}")))?;

        tracing::debug!(
            url = %self.url,
            round_id = body.round_id,
            answer = %body.answer,
            decimals = body.decimals,
            "price round fetched"
        );

        Ok(RoundData {
            round_id: body.round_id,
            price: Price::new(body.answer, body.decimals),
            updated_at_ms: body.updated_at.saturating_mul(1_000),
        })
    }
}

#[async_trait]
impl PriceSource for HttpPriceFeed {
    async fn latest_price(&self) -> Result<Price, PriceError> {
        self.latest_round().await.map(|r| r.price)
    }
}
