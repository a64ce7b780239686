use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Price, RoundData};

/// Why a feed could not produce a usable price.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("price feed unavailable: {0}")]
    Unavailable(String),

    #[error("price feed stale: last update {age_ms}ms ago (max {max_age_ms}ms)")]
    Stale { age_ms: u64, max_age_ms: u64 },
}

/// Read-only provider of the latest observed price.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn latest_price(&self) -> Result<Price, PriceError>;
}

/// A feed that can also tell when its latest price was published.
#[async_trait]
pub trait RoundSource: Send + Sync {
    async fn latest_round(&self) -> Result<RoundData, PriceError>;
}

#[async_trait]
impl<T: PriceSource + ?Sized> PriceSource for Arc<T> {
    async fn latest_price(&self) -> Result<Price, PriceError> {
        (**self).latest_price().await
    }
}

#[async_trait]
impl<T: RoundSource + ?Sized> RoundSource for Arc<T> {
    async fn latest_round(&self) -> Result<RoundData, PriceError> {
        (**self).latest_round().await
    }
}
