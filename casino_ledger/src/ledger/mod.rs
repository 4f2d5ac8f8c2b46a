//! Ledger module: validated bet/win transactions against the wallet.
//!
//! This module implements:
//! - Closed `Game` and `EntryKind` enumerations, parsed at the boundary
//! - Atomic debit/credit with append-only history recording
//! - Cent-exact balance arithmetic (no floating-point drift)
//!
//! ## Example
//!
//! ```no_run
//! use casino_ledger::db::MemoryStore;
//! use casino_ledger::ledger::LedgerManager;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ledger = LedgerManager::new(Arc::new(MemoryStore::new()));
//!     let balance = ledger.apply_bet(1, "blackjack", "25.50").await?;
//!     println!("balance after bet: {balance}");
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{LedgerError, LedgerResult};
pub use manager::LedgerManager;
pub use models::{EntryKind, Game, LedgerEntry, NewLedgerEntry};
