//! Authentication error types.

use crate::db::StoreError;
use thiserror::Error;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Name already registered
    #[error("That name is already taken")]
    DuplicateName,

    /// Name format rejected
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Password missing or empty
    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    /// Login name/password pair did not match
    #[error("Incorrect name or password")]
    InvalidCredentials,

    /// No valid session for the presented token
    #[error("Not signed in")]
    Unauthenticated,

    /// Password hashing failed
    #[error("Password hashing failed")]
    HashingFailed,

    /// Storage error
    #[error("Storage error: {0}")]
    Store(StoreError),
}

impl AuthError {
    /// Client-safe message for flash display. Storage and hashing failures
    /// are reduced to a generic message so no internals leak to the user.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Store(_) | AuthError::HashingFailed => {
                "Something went wrong, please try again".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateName(_) => AuthError::DuplicateName,
            other => AuthError::Store(other),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
