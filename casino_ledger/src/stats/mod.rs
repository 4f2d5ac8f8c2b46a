//! Statistics aggregator: per-game and grand totals derived from history.
//!
//! [`compute_totals`] is a pure function over the ledger entries. It never
//! mutates its input and its output depends only on the multiset of entries,
//! not their order. Every supported game gets a row, zero-filled when the
//! history has no matching entries.

use crate::ledger::{EntryKind, Game, LedgerEntry};
use crate::money::Cents;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated figures for one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GameTotals {
    /// Sum of bet amounts.
    pub spent_cents: Cents,
    /// Sum of win amounts.
    pub won_cents: Cents,
    /// `won - spent`; negative when the house is ahead.
    pub net_cents: Cents,
}

/// Dashboard view data: one row per supported game plus grand totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsReport {
    pub per_game: BTreeMap<Game, GameTotals>,
    pub total_spent_cents: Cents,
    pub total_won_cents: Cents,
}

impl TotalsReport {
    /// Totals for a single game. Present for every game in [`Game::ALL`].
    pub fn game(&self, game: Game) -> GameTotals {
        self.per_game.get(&game).copied().unwrap_or_default()
    }
}

/// Fold the history into per-game spent/won/net plus grand totals.
pub fn compute_totals(history: &[LedgerEntry]) -> TotalsReport {
    let mut per_game: BTreeMap<Game, GameTotals> =
        Game::ALL.iter().map(|g| (*g, GameTotals::default())).collect();

    for entry in history {
        // Every game is pre-seeded above; entry.game is a closed enum.
        let totals = per_game.entry(entry.game).or_default();
        match entry.kind {
            EntryKind::Bet => totals.spent_cents += entry.amount_cents,
            EntryKind::Win => totals.won_cents += entry.amount_cents,
        }
    }

    let mut total_spent_cents = 0;
    let mut total_won_cents = 0;
    for totals in per_game.values_mut() {
        totals.net_cents = totals.won_cents - totals.spent_cents;
        total_spent_cents += totals.spent_cents;
        total_won_cents += totals.won_cents;
    }

    TotalsReport {
        per_game,
        total_spent_cents,
        total_won_cents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(game: Game, kind: EntryKind, amount_cents: Cents) -> LedgerEntry {
        LedgerEntry {
            id: 0,
            account_id: 1,
            game,
            kind,
            amount_cents,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_history_is_zero_filled() {
        let report = compute_totals(&[]);

        assert_eq!(report.per_game.len(), Game::ALL.len());
        for game in Game::ALL {
            assert_eq!(report.game(game), GameTotals::default());
        }
        assert_eq!(report.total_spent_cents, 0);
        assert_eq!(report.total_won_cents, 0);
    }

    #[test]
    fn totals_split_by_game_and_kind() {
        let history = vec![
            entry(Game::Poker, EntryKind::Bet, 5_000),
            entry(Game::Poker, EntryKind::Win, 2_000),
            entry(Game::Blackjack, EntryKind::Bet, 1_000),
            entry(Game::Blackjack, EntryKind::Bet, 500),
            entry(Game::Roulette, EntryKind::Win, 750),
        ];

        let report = compute_totals(&history);

        assert_eq!(
            report.game(Game::Poker),
            GameTotals {
                spent_cents: 5_000,
                won_cents: 2_000,
                net_cents: -3_000,
            }
        );
        assert_eq!(report.game(Game::Blackjack).spent_cents, 1_500);
        assert_eq!(report.game(Game::Blackjack).net_cents, -1_500);
        assert_eq!(report.game(Game::Roulette).net_cents, 750);
        assert_eq!(report.game(Game::RideTheBus), GameTotals::default());
        assert_eq!(report.total_spent_cents, 6_500);
        assert_eq!(report.total_won_cents, 2_750);
    }

    #[test]
    fn totals_are_order_independent() {
        let mut history = vec![
            entry(Game::Poker, EntryKind::Bet, 5_000),
            entry(Game::Roulette, EntryKind::Win, 123),
            entry(Game::Poker, EntryKind::Win, 2_000),
            entry(Game::RideTheBus, EntryKind::Bet, 42),
        ];

        let forward = compute_totals(&history);
        history.reverse();
        let reversed = compute_totals(&history);

        assert_eq!(forward, reversed);
    }

    #[test]
    fn input_is_not_mutated() {
        let history = vec![entry(Game::Poker, EntryKind::Bet, 5_000)];
        let before = history.clone();
        let _ = compute_totals(&history);
        assert_eq!(history, before);
    }
}
