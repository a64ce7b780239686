pub mod error;
pub mod model;
pub mod store;

pub use error::RegistryError;
pub use model::{Address, Token, TokenId};
pub use store::OwnershipRegistry;
pub use store::memory_store::InMemoryRegistry;
