use thiserror::Error;

use crate::model::{Address, TokenId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{caller} is not allowed to mint")]
    Unauthorized { caller: Address },

    #[error("token {0} does not exist")]
    TokenNotFound(TokenId),

    #[error("token {token_id} is not owned by {caller}")]
    NotOwner { token_id: TokenId, caller: Address },

    #[error("{owner} holds {balance} token(s), index {index} is out of bounds")]
    IndexOutOfBounds {
        owner: Address,
        index: usize,
        balance: usize,
    },
}
