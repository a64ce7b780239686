pub mod memory_store;

use async_trait::async_trait;

use crate::error::RegistryError;
use crate::model::{Address, Token, TokenId};

/// Unique-ownable-item bookkeeping.
///
/// Ids are assigned sequentially from 0 and never reused. Per-owner
/// enumeration is ordered by the time the owner acquired each token.
#[async_trait]
pub trait OwnershipRegistry: Send + Sync {
    /// The only identity allowed to mint.
    fn operator(&self) -> &Address;

    async fn mint(&self, caller: &Address, to: &Address) -> Result<TokenId, RegistryError>;

    async fn transfer(
        &self,
        caller: &Address,
        to: &Address,
        token_id: TokenId,
    ) -> Result<(), RegistryError>;

    async fn token(&self, token_id: TokenId) -> Option<Token>;

    async fn owner_of(&self, token_id: TokenId) -> Result<Address, RegistryError> {
        self.token(token_id)
            .await
            .map(|t| t.owner)
            .ok_or(RegistryError::TokenNotFound(token_id))
    }

    async fn tokens_of(&self, owner: &Address) -> Vec<TokenId>;

    async fn total_issued(&self) -> u64;

    async fn balance_of(&self, owner: &Address) -> u64 {
        self.tokens_of(owner).await.len() as u64
    }

    async fn token_of_owner_by_index(
        &self,
        owner: &Address,
        index: usize,
    ) -> Result<TokenId, RegistryError> {
        let owned = self.tokens_of(owner).await;
        owned
            .get(index)
            .copied()
            .ok_or_else(|| RegistryError::IndexOutOfBounds {
                owner: owner.clone(),
                index,
                balance: owned.len(),
            })
    }
}
