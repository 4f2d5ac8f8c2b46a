//! Ledger data models.

use crate::auth::AccountId;
use crate::money::Cents;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Ledger entry ID type
pub type EntryId = i64;

/// Supported games. The set is closed; anything else is rejected before any
/// wallet mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Game {
    Poker,
    Blackjack,
    Roulette,
    RideTheBus,
}

impl Game {
    /// Every supported game, in dashboard display order.
    pub const ALL: [Game; 4] = [
        Game::Poker,
        Game::Blackjack,
        Game::Roulette,
        Game::RideTheBus,
    ];
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Game::Poker => write!(f, "poker"),
            Game::Blackjack => write!(f, "blackjack"),
            Game::Roulette => write!(f, "roulette"),
            Game::RideTheBus => write!(f, "ride-the-bus"),
        }
    }
}

impl FromStr for Game {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "poker" => Ok(Game::Poker),
            "blackjack" => Ok(Game::Blackjack),
            "roulette" => Ok(Game::Roulette),
            "ride-the-bus" => Ok(Game::RideTheBus),
            other => Err(other.to_string()),
        }
    }
}

/// Whether an entry debits (bet) or credits (win) the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Bet,
    Win,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Bet => write!(f, "bet"),
            EntryKind::Win => write!(f, "win"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bet" => Ok(EntryKind::Bet),
            "win" => Ok(EntryKind::Win),
            other => Err(other.to_string()),
        }
    }
}

/// A recorded wallet event. History is append-only; entries are never
/// updated or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub account_id: AccountId,
    pub game: Game,
    pub kind: EntryKind,
    pub amount_cents: Cents,
    pub created_at: DateTime<Utc>,
}

/// A validated entry awaiting persistence. The store assigns the ID.
#[derive(Debug, Clone)]
pub struct NewLedgerEntry {
    pub game: Game,
    pub kind: EntryKind,
    pub amount_cents: Cents,
    pub created_at: DateTime<Utc>,
}

impl NewLedgerEntry {
    /// Build an entry dated now.
    pub fn new(game: Game, kind: EntryKind, amount_cents: Cents) -> Self {
        Self {
            game,
            kind,
            amount_cents,
            created_at: Utc::now(),
        }
    }

    /// Signed wallet delta this entry represents.
    pub fn delta_cents(&self) -> Cents {
        match self.kind {
            EntryKind::Bet => -self.amount_cents,
            EntryKind::Win => self.amount_cents,
        }
    }
}
