pub mod renderer;
pub mod resolver;

pub use renderer::{JsonMetadataRenderer, MetadataRenderer, TrendArtwork};
pub use resolver::TokenUriResolver;
