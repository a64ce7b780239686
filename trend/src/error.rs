use oracle::PriceError;
use registry::{Address, RegistryError};
use thiserror::Error;

/// Errors surfaced by the trend engine. None of them leave partial state behind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrendError {
    #[error("evaluation not eligible yet: {elapsed_ms}ms elapsed of {interval_ms}ms interval")]
    NotEligible { elapsed_ms: u64, interval_ms: u64 },

    #[error("price unavailable: {0}")]
    PriceUnavailable(#[from] PriceError),

    #[error("{caller} is not allowed to mint")]
    Unauthorized { caller: Address },

    #[error("registry error: {0}")]
    Registry(RegistryError),
}

impl TrendError {
    /// `true` when the same call may succeed later without any privilege change.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TrendError::NotEligible { .. } | TrendError::PriceUnavailable(_)
        )
    }
}

impl From<RegistryError> for TrendError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::Unauthorized { caller } => TrendError::Unauthorized { caller },
            other => TrendError::Registry(other),
        }
    }
}
