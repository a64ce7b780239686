//! Price feeds consumed by the trend engine.
//!
//! The engine only needs [`PriceSource`]: one method, one failure mode.
//! Everything else in this crate is a concrete feed or a wrapper around one.

pub mod guard;
pub mod http;
pub mod mock;
pub mod source;
pub mod types;

pub use guard::StalenessGuard;
pub use http::HttpPriceFeed;
pub use mock::MockAggregator;
pub use source::{PriceError, PriceSource, RoundSource};
pub use types::{Price, RoundData};
