//! Ledger error types.

use crate::auth::AccountId;
use crate::db::StoreError;
use crate::money::{Cents, format_cents};
use thiserror::Error;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Game is not one of the supported set
    #[error("Unknown game: '{0}'")]
    InvalidGame(String),

    /// Amount is missing, non-numeric, zero, or negative
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Bet exceeds the current wallet balance
    #[error(
        "Insufficient funds: balance {}, bet {}",
        format_cents(*available_cents),
        format_cents(*required_cents)
    )]
    InsufficientFunds {
        available_cents: Cents,
        required_cents: Cents,
    },

    /// Account does not exist
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),

    /// Storage error
    #[error("Storage error: {0}")]
    Store(StoreError),
}

impl LedgerError {
    /// Client-safe message for flash display. Storage failures are reduced to
    /// a generic message so no internals leak to the user.
    pub fn client_message(&self) -> String {
        match self {
            LedgerError::Store(_) => "Something went wrong, please try again".to_string(),
            LedgerError::AccountNotFound(_) => "Account not found".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InsufficientBalance {
                available_cents,
                required_cents,
            } => LedgerError::InsufficientFunds {
                available_cents,
                required_cents,
            },
            StoreError::AccountNotFound(id) => LedgerError::AccountNotFound(id),
            other => LedgerError::Store(other),
        }
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
