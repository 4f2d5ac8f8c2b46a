//! Ledger manager: validate and apply bet/win transactions.

use super::{
    errors::{LedgerError, LedgerResult},
    models::{EntryKind, Game, LedgerEntry, NewLedgerEntry},
};
use crate::auth::AccountId;
use crate::db::AccountStore;
use crate::money::{Cents, parse_amount};
use std::sync::Arc;

/// Ledger manager
///
/// Each operation is a single logical unit: parse inputs, load the account,
/// validate, then hand the store one atomic balance-delta-plus-append write.
/// A failed validation never reaches the store.
#[derive(Clone)]
pub struct LedgerManager {
    store: Arc<dyn AccountStore>,
}

impl LedgerManager {
    /// Create a new ledger manager backed by the given account store.
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Apply a bet: debit the wallet and append a `bet` entry.
    ///
    /// # Errors
    ///
    /// * `LedgerError::InvalidGame` - game is not in the supported set
    /// * `LedgerError::InvalidAmount` - amount missing, non-numeric, zero, or negative
    /// * `LedgerError::InsufficientFunds` - amount exceeds the current balance
    /// * `LedgerError::AccountNotFound` - no such account
    pub async fn apply_bet(
        &self,
        account_id: AccountId,
        game: &str,
        amount: &str,
    ) -> LedgerResult<Cents> {
        let entry = parse_entry(game, amount, EntryKind::Bet)?;

        let account = self
            .store
            .find_by_id(account_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        if entry.amount_cents > account.balance_cents {
            return Err(LedgerError::InsufficientFunds {
                available_cents: account.balance_cents,
                required_cents: entry.amount_cents,
            });
        }

        // The store re-checks the balance inside its own transaction, so a
        // concurrent debit between the load above and this write still cannot
        // drive the wallet negative.
        let balance = self.store.record_entry(account_id, &entry).await?;
        tracing::debug!(account_id, game = %entry.game, amount_cents = entry.amount_cents, balance, "bet applied");
        Ok(balance)
    }

    /// Apply a win: credit the wallet and append a `win` entry.
    ///
    /// Same validation as [`apply_bet`](Self::apply_bet) except there is no
    /// upper bound against the balance.
    pub async fn apply_win(
        &self,
        account_id: AccountId,
        game: &str,
        amount: &str,
    ) -> LedgerResult<Cents> {
        let entry = parse_entry(game, amount, EntryKind::Win)?;

        // Existence check so an unknown account fails with the right error
        // and nothing is written.
        self.store
            .find_by_id(account_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        let balance = self.store.record_entry(account_id, &entry).await?;
        tracing::debug!(account_id, game = %entry.game, amount_cents = entry.amount_cents, balance, "win applied");
        Ok(balance)
    }

    /// Full history for an account, newest first (presentation order).
    pub async fn history(&self, account_id: AccountId) -> LedgerResult<Vec<LedgerEntry>> {
        Ok(self.store.history(account_id).await?)
    }
}

/// Parse raw request fields into a validated entry dated now.
fn parse_entry(game: &str, amount: &str, kind: EntryKind) -> LedgerResult<NewLedgerEntry> {
    let game: Game = game.parse().map_err(LedgerError::InvalidGame)?;
    let amount_cents = parse_amount(amount).map_err(LedgerError::InvalidAmount)?;
    Ok(NewLedgerEntry::new(game, kind, amount_cents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    async fn setup() -> (LedgerManager, AccountId) {
        let store = Arc::new(MemoryStore::new());
        let account = store
            .create_account("player", "hash", 25_000)
            .await
            .expect("account should be created");
        (LedgerManager::new(store), account.id)
    }

    #[tokio::test]
    async fn bet_debits_and_appends() {
        let (ledger, id) = setup().await;

        let balance = ledger.apply_bet(id, "poker", "50").await.unwrap();
        assert_eq!(balance, 20_000);

        let history = ledger.history(id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].game, Game::Poker);
        assert_eq!(history[0].kind, EntryKind::Bet);
        assert_eq!(history[0].amount_cents, 5_000);
    }

    #[tokio::test]
    async fn win_credits_without_upper_bound() {
        let (ledger, id) = setup().await;

        let balance = ledger.apply_win(id, "roulette", "1000").await.unwrap();
        assert_eq!(balance, 125_000);
        assert_eq!(ledger.history(id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bet_over_balance_is_rejected_without_side_effects() {
        let (ledger, id) = setup().await;

        let err = ledger.apply_bet(id, "poker", "250.01").await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientFunds {
                available_cents: 25_000,
                required_cents: 25_001,
            }
        ));
        assert!(ledger.history(id).await.unwrap().is_empty());

        // Balance untouched: a full-balance bet still succeeds.
        assert_eq!(ledger.apply_bet(id, "poker", "250").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_game_is_rejected_before_mutation() {
        let (ledger, id) = setup().await;

        for op in ["bet", "win"] {
            let result = match op {
                "bet" => ledger.apply_bet(id, "craps", "10").await,
                _ => ledger.apply_win(id, "craps", "10").await,
            };
            assert!(matches!(result, Err(LedgerError::InvalidGame(_))));
        }
        assert!(ledger.history(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bad_amounts_are_rejected_before_mutation() {
        let (ledger, id) = setup().await;

        for amount in ["", "  ", "abc", "0", "-5", "-0.01"] {
            let result = ledger.apply_bet(id, "blackjack", amount).await;
            assert!(
                matches!(result, Err(LedgerError::InvalidAmount(_))),
                "amount {amount:?} should be invalid"
            );
        }
        assert!(ledger.history(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_account_is_reported() {
        let store = Arc::new(MemoryStore::new());
        let ledger = LedgerManager::new(store);

        let bet = ledger.apply_bet(404, "poker", "10").await;
        assert!(matches!(bet, Err(LedgerError::AccountNotFound(404))));
        let win = ledger.apply_win(404, "poker", "10").await;
        assert!(matches!(win, Err(LedgerError::AccountNotFound(404))));
    }

    #[tokio::test]
    async fn repeated_cent_amounts_never_drift() {
        let (ledger, id) = setup().await;

        // 250.00 - 3 * 33.33 = 150.01 exactly.
        for _ in 0..3 {
            ledger.apply_bet(id, "ride-the-bus", "33.33").await.unwrap();
        }
        let history = ledger.history(id).await.unwrap();
        assert_eq!(history.len(), 3);

        let balance = ledger.apply_win(id, "ride-the-bus", "0.01").await.unwrap();
        assert_eq!(balance, 15_002);
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let (ledger, id) = setup().await;

        ledger.apply_bet(id, "poker", "1").await.unwrap();
        ledger.apply_bet(id, "blackjack", "2").await.unwrap();
        ledger.apply_win(id, "roulette", "3").await.unwrap();

        let history = ledger.history(id).await.unwrap();
        let games: Vec<Game> = history.iter().map(|e| e.game).collect();
        assert_eq!(games, [Game::Roulette, Game::Blackjack, Game::Poker]);
    }
}
