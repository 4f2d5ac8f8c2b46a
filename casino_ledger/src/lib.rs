//! # Casino Ledger
//!
//! Core library for a session-authenticated play-money casino tracker.
//! Registered users carry a wallet across four games (poker, blackjack,
//! roulette, ride-the-bus); every bet and win is recorded in an append-only
//! history from which the dashboard statistics are derived.
//!
//! ## Modules
//!
//! - [`auth`]: account signup/login and opaque session tokens
//! - [`ledger`]: bet/win validation and atomic wallet mutation
//! - [`stats`]: pure per-game and grand-total aggregation over history
//! - [`db`]: PostgreSQL pool, store traits, and an in-memory store
//! - [`money`]: cent-precision amount parsing and formatting
//!
//! ## Example
//!
//! ```no_run
//! use casino_ledger::auth::AuthManager;
//! use casino_ledger::db::MemoryStore;
//! use casino_ledger::ledger::LedgerManager;
//! use casino_ledger::stats::compute_totals;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     let auth = AuthManager::new(store.clone(), store.clone(), "pepper".into());
//!     let ledger = LedgerManager::new(store);
//!
//!     let (account, _session) = auth.signup("alice", "hunter2!").await?;
//!     let balance = ledger.apply_bet(account.id, "poker", "50").await?;
//!     assert_eq!(balance, 20_000);
//!
//!     let history = ledger.history(account.id).await?;
//!     let totals = compute_totals(&history);
//!     assert_eq!(totals.total_spent_cents, 5_000);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod db;
pub mod ledger;
pub mod money;
pub mod stats;

pub use auth::{Account, AccountId, AuthError, AuthManager, Session};
pub use db::{AccountStore, Database, DatabaseConfig, MemoryStore, SessionStore, StoreError};
pub use ledger::{EntryKind, Game, LedgerEntry, LedgerError, LedgerManager};
pub use stats::{GameTotals, TotalsReport, compute_totals};
