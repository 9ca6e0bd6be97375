//! Leaderboard rules over an injected storage collaborator.
//!
//! The core decides *what* qualifies and how the list is ordered; where the
//! list lives is the host's problem. A `ScoreStore` hands the full entry
//! list in and out; the in-memory implementation backs tests and headless
//! hosts.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_LEADERBOARD_ENTRIES;

/// A single recorded score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player name or initials, trimmed to 15 characters.
    pub name: String,
    pub score: u64,
    /// Display date, stamped by the host.
    pub date: String,
}

/// Storage collaborator for the leaderboard.
pub trait ScoreStore {
    /// Load all stored entries, in any order.
    fn load(&self) -> Vec<ScoreEntry>;
    /// Persist the given entries, replacing what was stored.
    fn save(&mut self, entries: &[ScoreEntry]);
}

/// Trivial in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<ScoreEntry>,
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Vec<ScoreEntry> {
        self.entries.clone()
    }

    fn save(&mut self, entries: &[ScoreEntry]) {
        self.entries = entries.to_vec();
    }
}

/// Leaderboard logic over a storage collaborator.
pub struct Leaderboard<S: ScoreStore> {
    store: S,
}

impl<S: ScoreStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All stored entries, best first.
    pub fn entries(&self) -> Vec<ScoreEntry> {
        let mut entries = self.store.load();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries
    }

    /// Whether `score` would earn a slot: always while the board has room,
    /// otherwise only by beating the current lowest entry.
    pub fn is_high_score(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        let entries = self.entries();
        if entries.len() < MAX_LEADERBOARD_ENTRIES {
            return true;
        }
        entries.last().is_some_and(|lowest| score > lowest.score)
    }

    /// Record a score, keeping the board sorted and capped. Empty names and
    /// zero scores are ignored.
    pub fn add_score(&mut self, name: &str, score: u64, date: &str) {
        let name = name.trim();
        if name.is_empty() || score == 0 {
            log::warn!("ignoring invalid leaderboard entry: {name:?} / {score}");
            return;
        }

        let mut entries = self.entries();
        entries.push(ScoreEntry {
            name: name.chars().take(15).collect(),
            score,
            date: date.to_string(),
        });
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_LEADERBOARD_ENTRIES);
        self.store.save(&entries);
    }
}
