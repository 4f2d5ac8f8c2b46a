//! In-memory store for tests and local development.
//!
//! Implements both [`AccountStore`] and [`SessionStore`] over a mutex-guarded
//! map, with the same atomicity contract as the PostgreSQL stores: the
//! balance delta and the history append happen under one lock acquisition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use super::store::{AccountStore, SessionStore, StoreError, StoreResult};
use crate::auth::{Account, AccountId, Session};
use crate::ledger::{LedgerEntry, NewLedgerEntry};
use crate::money::Cents;

#[derive(Default)]
struct Inner {
    accounts: HashMap<AccountId, Account>,
    entries: HashMap<AccountId, Vec<LedgerEntry>>,
    sessions: HashMap<String, Session>,
    next_account_id: AccountId,
    next_entry_id: i64,
}

/// In-memory account and session store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_account_id: 1,
                next_entry_id: 1,
                ..Inner::default()
            }),
        }
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_account(
        &self,
        name: &str,
        password_hash: &str,
        opening_cents: Cents,
    ) -> StoreResult<Account> {
        let mut inner = self.inner.lock().expect("store lock poisoned");

        if inner.accounts.values().any(|a| a.name == name) {
            return Err(StoreError::DuplicateName(name.to_string()));
        }

        let id = inner.next_account_id;
        inner.next_account_id += 1;

        let account = Account {
            id,
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            balance_cents: opening_cents,
            created_at: Utc::now(),
        };
        inner.accounts.insert(id, account.clone());
        inner.entries.insert(id, Vec::new());
        Ok(account)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Account>> {
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(inner.accounts.values().find(|a| a.name == name).cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> StoreResult<Option<Account>> {
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(inner.accounts.get(&id).cloned())
    }

    async fn record_entry(&self, id: AccountId, entry: &NewLedgerEntry) -> StoreResult<Cents> {
        let mut inner = self.inner.lock().expect("store lock poisoned");

        let entry_id = inner.next_entry_id;
        let account = inner
            .accounts
            .get_mut(&id)
            .ok_or(StoreError::AccountNotFound(id))?;

        let new_balance = account.balance_cents + entry.delta_cents();
        if new_balance < 0 {
            return Err(StoreError::InsufficientBalance {
                available_cents: account.balance_cents,
                required_cents: entry.amount_cents,
            });
        }
        account.balance_cents = new_balance;

        inner.next_entry_id += 1;
        inner.entries.entry(id).or_default().push(LedgerEntry {
            id: entry_id,
            account_id: id,
            game: entry.game,
            kind: entry.kind,
            amount_cents: entry.amount_cents,
            created_at: entry.created_at,
        });

        Ok(new_balance)
    }

    async fn history(&self, id: AccountId) -> StoreResult<Vec<LedgerEntry>> {
        let inner = self.inner.lock().expect("store lock poisoned");
        let mut entries = inner.entries.get(&id).cloned().unwrap_or_default();
        entries.reverse();
        Ok(entries)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create_session(
        &self,
        account_id: AccountId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<Session> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        let session = Session {
            token: token.to_string(),
            account_id,
            created_at: Utc::now(),
            expires_at,
        };
        inner.sessions.insert(token.to_string(), session.clone());
        Ok(session)
    }

    async fn find_session(&self, token: &str) -> StoreResult<Option<Session>> {
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(inner.sessions.get(token).cloned())
    }

    async fn delete_session(&self, token: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        inner.sessions.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{EntryKind, Game};

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let a = store.create_account("a_one", "h", 100).await.unwrap();
        let b = store.create_account("b_two", "h", 100).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected() {
        let store = MemoryStore::new();
        store.create_account("alice", "h", 100).await.unwrap();
        let err = store.create_account("alice", "h", 100).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(_)));
    }

    #[tokio::test]
    async fn record_entry_is_all_or_nothing() {
        let store = MemoryStore::new();
        let account = store.create_account("alice", "h", 100).await.unwrap();

        let over = NewLedgerEntry::new(Game::Poker, EntryKind::Bet, 200);
        let err = store.record_entry(account.id, &over).await.unwrap_err();
        assert!(matches!(err, StoreError::InsufficientBalance { .. }));

        // Nothing was written.
        let account = store.find_by_id(account.id).await.unwrap().unwrap();
        assert_eq!(account.balance_cents, 100);
        assert!(store.history(account.id).await.unwrap().is_empty());
    }
}
