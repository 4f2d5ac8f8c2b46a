//! Authentication data models.

use crate::money::Cents;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account ID type
pub type AccountId = i64;

/// A registered user with their wallet balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    /// Unique login handle.
    pub name: String,
    /// Argon2id hash; never serialized out.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Current wallet balance in cents.
    pub balance_cents: Cents,
    pub created_at: DateTime<Utc>,
}

/// Server-side session record behind an opaque cookie token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub account_id: AccountId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has passed its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
