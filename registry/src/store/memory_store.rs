use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use common::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use super::OwnershipRegistry;
use crate::error::RegistryError;
use crate::model::{Address, Token, TokenId};

#[derive(Debug, Default)]
struct RegistryState {
    tokens: BTreeMap<TokenId, Token>,
    by_owner: HashMap<Address, Vec<TokenId>>,
    next_id: TokenId,
}

/// Registry kept entirely in memory.
///
/// A single lock covers the token table and the owner index so the two can
/// never disagree.
pub struct InMemoryRegistry {
    operator: Address,
    state: Mutex<RegistryState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRegistry {
    pub fn new(operator: Address) -> Self {
        Self::with_clock(operator, Arc::new(SystemClock))
    }

    pub fn with_clock(operator: Address, clock: Arc<dyn Clock>) -> Self {
        Self {
            operator,
            state: Mutex::new(RegistryState::default()),
            clock,
        }
    }
}

#[async_trait]
impl OwnershipRegistry for InMemoryRegistry {
    fn operator(&self) -> &Address {
        &self.operator
    }

    async fn mint(&self, caller: &Address, to: &Address) -> Result<TokenId, RegistryError> {
        if caller != &self.operator {
            tracing::warn!(%caller, "mint rejected: caller is not the operator");
            return Err(RegistryError::Unauthorized {
                caller: caller.clone(),
            });
        }

        let mut state = self.state.lock().await;
        let id = state.next_id;
        state.next_id += 1;

        state.tokens.insert(
            id,
            Token {
                id,
                owner: to.clone(),
                minted_at_ms: self.clock.now_ms(),
            },
        );
        state.by_owner.entry(to.clone()).or_default().push(id);

        tracing::debug!(token_id = id, owner = %to, "token minted");
        Ok(id)
    }

    async fn transfer(
        &self,
        caller: &Address,
        to: &Address,
        token_id: TokenId,
    ) -> Result<(), RegistryError> {
        let mut state = self.state.lock().await;

        let token = state
            .tokens
            .get_mut(&token_id)
            .ok_or(RegistryError::TokenNotFound(token_id))?;

        if &token.owner != caller {
            return Err(RegistryError::NotOwner {
                token_id,
                caller: caller.clone(),
            });
        }

        let from = std::mem::replace(&mut token.owner, to.clone());

        if let Some(list) = state.by_owner.get_mut(&from) {
            list.retain(|id| *id != token_id);
            if list.is_empty() {
                state.by_owner.remove(&from);
            }
        }
        state.by_owner.entry(to.clone()).or_default().push(token_id);

        tracing::debug!(token_id, %from, %to, "token transferred");
        Ok(())
    }

    async fn token(&self, token_id: TokenId) -> Option<Token> {
        self.state.lock().await.tokens.get(&token_id).cloned()
    }

    async fn tokens_of(&self, owner: &Address) -> Vec<TokenId> {
        self.state
            .lock()
            .await
            .by_owner
            .get(owner)
            .cloned()
            .unwrap_or_default()
    }

    async fn total_issued(&self) -> u64 {
        self.state.lock().await.next_id
    }
}
