//! Authentication manager implementation.

use super::{
    errors::{AuthError, AuthResult},
    models::{Account, AccountId, Session},
};
use crate::db::{AccountStore, SessionStore};
use crate::money::Cents;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Opening wallet balance for new accounts: 250.00.
pub const DEFAULT_OPENING_BALANCE_CENTS: Cents = 25_000;

/// Default session lifetime in hours.
const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Authentication manager
#[derive(Clone)]
pub struct AuthManager {
    accounts: Arc<dyn AccountStore>,
    sessions: Arc<dyn SessionStore>,
    pepper: String,
    session_ttl: Duration,
    opening_balance_cents: Cents,
}

impl AuthManager {
    /// Create a new authentication manager with default opening balance and
    /// session lifetime.
    ///
    /// # Arguments
    ///
    /// * `accounts` - Account store
    /// * `sessions` - Session store
    /// * `pepper` - Server-side pepper mixed into every password hash
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        sessions: Arc<dyn SessionStore>,
        pepper: String,
    ) -> Self {
        Self {
            accounts,
            sessions,
            pepper,
            session_ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
            opening_balance_cents: DEFAULT_OPENING_BALANCE_CENTS,
        }
    }

    /// Override the session lifetime.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Override the opening wallet balance.
    pub fn with_opening_balance(mut self, cents: Cents) -> Self {
        self.opening_balance_cents = cents;
        self
    }

    /// Register a new account and open a session for it.
    ///
    /// The wallet opens at the configured balance with an empty history.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidName` - name missing or malformed
    /// * `AuthError::InvalidPassword` - password missing
    /// * `AuthError::DuplicateName` - name already registered
    pub async fn signup(&self, name: &str, password: &str) -> AuthResult<(Account, Session)> {
        let name = name.trim();
        validate_name(name)?;
        validate_password(password)?;

        // The store enforces uniqueness; a duplicate leaves the existing
        // account untouched.
        let password_hash = self.hash_password(password)?;
        let account = self
            .accounts
            .create_account(name, &password_hash, self.opening_balance_cents)
            .await?;

        tracing::info!(account_id = account.id, name = %account.name, "account created");

        let session = self.open_session(account.id).await?;
        Ok((account, session))
    }

    /// Verify credentials and open a session.
    ///
    /// The password is always checked against the stored hash; mere existence
    /// of the account is not enough.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidCredentials` - unknown name or wrong password
    pub async fn login(&self, name: &str, password: &str) -> AuthResult<(Account, Session)> {
        let account = self
            .accounts
            .find_by_name(name.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        self.verify_password(password, &account.password_hash)?;

        let session = self.open_session(account.id).await?;
        tracing::info!(account_id = account.id, "login");
        Ok((account, session))
    }

    /// Resolve a session token to its account.
    ///
    /// Expired sessions are deleted on sight. Any failure collapses to
    /// `Unauthenticated`; callers redirect to the login page.
    pub async fn resolve(&self, token: &str) -> AuthResult<Account> {
        let session = self
            .sessions
            .find_session(token)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        if session.is_expired(Utc::now()) {
            self.sessions.delete_session(token).await?;
            return Err(AuthError::Unauthenticated);
        }

        self.accounts
            .find_by_id(session.account_id)
            .await?
            .ok_or(AuthError::Unauthenticated)
    }

    /// Destroy the session behind a token. Unknown tokens are a no-op.
    pub async fn logout(&self, token: &str) -> AuthResult<()> {
        self.sessions.delete_session(token).await?;
        Ok(())
    }

    /// Create a session with a fresh random token.
    async fn open_session(&self, account_id: AccountId) -> AuthResult<Session> {
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + self.session_ttl;
        let session = self
            .sessions
            .create_session(account_id, &token, expires_at)
            .await?;
        Ok(session)
    }

    /// Hash password with Argon2id + pepper
    fn hash_password(&self, password: &str) -> AuthResult<String> {
        let peppered = format!("{}{}", password, self.pepper);
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        Ok(argon2
            .hash_password(peppered.as_bytes(), &salt)
            .map_err(|_| AuthError::HashingFailed)?
            .to_string())
    }

    /// Verify password against hash
    fn verify_password(&self, password: &str, hash: &str) -> AuthResult<()> {
        let peppered = format!("{}{}", password, self.pepper);
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
        let argon2 = Argon2::default();

        argon2
            .verify_password(peppered.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)
    }
}

/// Validate name format: 3-20 characters, alphanumeric or underscore.
fn validate_name(name: &str) -> AuthResult<()> {
    if name.is_empty() {
        return Err(AuthError::InvalidName("name is required".to_string()));
    }

    let len = name.chars().count();
    if !(3..=20).contains(&len) {
        return Err(AuthError::InvalidName(
            "name must be 3-20 characters".to_string(),
        ));
    }

    if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(AuthError::InvalidName(
            "name can only contain letters, numbers, and underscores".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a password was supplied at all.
fn validate_password(password: &str) -> AuthResult<()> {
    if password.is_empty() {
        return Err(AuthError::InvalidPassword(
            "password is required".to_string(),
        ));
    }
    Ok(())
}
