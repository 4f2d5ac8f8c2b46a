//! Store trait definitions and PostgreSQL implementations.
//!
//! The traits keep the managers testable without a database; the Postgres
//! implementations apply every wallet mutation as one transaction so the
//! balance change and the history append land together or not at all.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use thiserror::Error;

use crate::auth::{Account, AccountId, Session};
use crate::ledger::{LedgerEntry, NewLedgerEntry};
use crate::money::Cents;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Account name already registered
    #[error("Name already registered: {0}")]
    DuplicateName(String),

    /// Account does not exist
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),

    /// A debit would drive the balance negative
    #[error("Insufficient balance: available {available_cents}, required {required_cents}")]
    InsufficientBalance {
        available_cents: Cents,
        required_cents: Cents,
    },

    /// A stored row could not be decoded into a domain value
    #[error("Corrupt row: {0}")]
    Decode(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for accounts and their ledger history.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Create an account with the opening balance and empty history.
    /// Fails with `StoreError::DuplicateName` if the name is taken.
    async fn create_account(
        &self,
        name: &str,
        password_hash: &str,
        opening_cents: Cents,
    ) -> StoreResult<Account>;

    /// Find account by login name
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Account>>;

    /// Find account by ID
    async fn find_by_id(&self, id: AccountId) -> StoreResult<Option<Account>>;

    /// Atomically apply the entry's balance delta and append it to history.
    /// A debit that would drive the balance negative fails with
    /// `StoreError::InsufficientBalance` and writes nothing. Returns the new
    /// balance.
    async fn record_entry(&self, id: AccountId, entry: &NewLedgerEntry) -> StoreResult<Cents>;

    /// Ledger history for an account, newest first.
    async fn history(&self, id: AccountId) -> StoreResult<Vec<LedgerEntry>>;
}

/// Persistence contract for sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a new session token
    async fn create_session(
        &self,
        account_id: AccountId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<Session>;

    /// Look up a session by token
    async fn find_session(&self, token: &str) -> StoreResult<Option<Session>>;

    /// Delete a session; unknown tokens are a no-op
    async fn delete_session(&self, token: &str) -> StoreResult<()>;
}

/// PostgreSQL implementation of [`AccountStore`]
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn account_from_row(row: &PgRow) -> Account {
    Account {
        id: row.get("id"),
        name: row.get("name"),
        password_hash: row.get("password_hash"),
        balance_cents: row.get("balance_cents"),
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
    }
}

fn entry_from_row(row: &PgRow) -> StoreResult<LedgerEntry> {
    let game: String = row.get("game");
    let kind: String = row.get("kind");
    Ok(LedgerEntry {
        id: row.get("id"),
        account_id: row.get("account_id"),
        game: game
            .parse()
            .map_err(|g| StoreError::Decode(format!("unknown game '{g}'")))?,
        kind: kind
            .parse()
            .map_err(|k| StoreError::Decode(format!("unknown kind '{k}'")))?,
        amount_cents: row.get("amount_cents"),
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
    })
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create_account(
        &self,
        name: &str,
        password_hash: &str,
        opening_cents: Cents,
    ) -> StoreResult<Account> {
        let existing = sqlx::query("SELECT id FROM accounts WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(StoreError::DuplicateName(name.to_string()));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO accounts (name, password_hash, balance_cents)
            VALUES ($1, $2, $3)
            RETURNING id, name, password_hash, balance_cents, created_at
            "#,
        )
        .bind(name)
        .bind(password_hash)
        .bind(opening_cents)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Unique constraint backstop for the select-then-insert race.
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                StoreError::DuplicateName(name.to_string())
            } else {
                StoreError::Database(e)
            }
        })?;

        Ok(account_from_row(&row))
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, name, password_hash, balance_cents, created_at
             FROM accounts WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(account_from_row))
    }

    async fn find_by_id(&self, id: AccountId) -> StoreResult<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, name, password_hash, balance_cents, created_at
             FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(account_from_row))
    }

    async fn record_entry(&self, id: AccountId, entry: &NewLedgerEntry) -> StoreResult<Cents> {
        let delta = entry.delta_cents();
        let mut tx = self.pool.begin().await?;

        // Conditional update: check and mutate in one atomic statement so a
        // concurrent debit cannot slip the balance below zero.
        let updated = sqlx::query(
            "UPDATE accounts
             SET balance_cents = balance_cents + $1
             WHERE id = $2 AND balance_cents + $1 >= 0
             RETURNING balance_cents",
        )
        .bind(delta)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let new_balance: Cents = match updated {
            Some(row) => row.get("balance_cents"),
            None => {
                // Either the account is missing or the debit was too large.
                let check = sqlx::query("SELECT balance_cents FROM accounts WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?;

                return match check {
                    Some(row) => Err(StoreError::InsufficientBalance {
                        available_cents: row.get("balance_cents"),
                        required_cents: entry.amount_cents,
                    }),
                    None => Err(StoreError::AccountNotFound(id)),
                };
            }
        };

        sqlx::query(
            r#"
            INSERT INTO ledger_entries (account_id, game, kind, amount_cents, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(entry.game.to_string())
        .bind(entry.kind.to_string())
        .bind(entry.amount_cents)
        .bind(entry.created_at.naive_utc())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(new_balance)
    }

    async fn history(&self, id: AccountId) -> StoreResult<Vec<LedgerEntry>> {
        let rows = sqlx::query(
            "SELECT id, account_id, game, kind, amount_cents, created_at
             FROM ledger_entries
             WHERE account_id = $1
             ORDER BY id DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(entry_from_row).collect()
    }
}

/// PostgreSQL implementation of [`SessionStore`]
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create_session(
        &self,
        account_id: AccountId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<Session> {
        let row = sqlx::query(
            r#"
            INSERT INTO sessions (token, account_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING token, account_id, created_at, expires_at
            "#,
        )
        .bind(token)
        .bind(account_id)
        .bind(expires_at.naive_utc())
        .fetch_one(&self.pool)
        .await?;

        Ok(Session {
            token: row.get("token"),
            account_id: row.get("account_id"),
            created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
            expires_at: row.get::<chrono::NaiveDateTime, _>("expires_at").and_utc(),
        })
    }

    async fn find_session(&self, token: &str) -> StoreResult<Option<Session>> {
        let row = sqlx::query(
            "SELECT token, account_id, created_at, expires_at
             FROM sessions WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Session {
            token: r.get("token"),
            account_id: r.get("account_id"),
            created_at: r.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
            expires_at: r.get::<chrono::NaiveDateTime, _>("expires_at").and_utc(),
        }))
    }

    async fn delete_session(&self, token: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
