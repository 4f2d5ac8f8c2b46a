//! Authentication module: accounts and opaque session tokens.
//!
//! Signup creates an account with the opening wallet balance and an empty
//! history; login verifies the argon2id password hash before opening a
//! session. Sessions are random UUID tokens stored server-side with a TTL;
//! the HTTP layer carries the token in a cookie and resolves it per request.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{AuthError, AuthResult};
pub use manager::AuthManager;
pub use models::{Account, AccountId, Session};
