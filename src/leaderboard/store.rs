//! Leaderboard storage backends.

use super::types::{record_score, LeaderboardEntry};
use crate::core::constants::LEADERBOARD_FILE;
use crate::utils::persistence::{data_path, load_json_or_default, save_json};
use std::io;
use std::path::{Path, PathBuf};

/// Where finished runs are kept between sessions.
pub trait LeaderboardStore {
    /// Current board, richest first. Missing or unreadable data is empty.
    fn load(&self) -> Vec<LeaderboardEntry>;

    fn save(&mut self, entries: &[LeaderboardEntry]) -> io::Result<()>;

    /// Loads, records `entry`, saves, and returns the new board.
    fn record(&mut self, entry: LeaderboardEntry) -> io::Result<Vec<LeaderboardEntry>> {
        let mut board = self.load();
        record_score(&mut board, entry);
        self.save(&board)?;
        Ok(board)
    }
}

/// Pretty-printed JSON file, by default ~/.loot-tower/leaderboard.json.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> io::Result<Self> {
        Ok(Self::new(data_path(LEADERBOARD_FILE)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeaderboardStore for JsonFileStore {
    fn load(&self) -> Vec<LeaderboardEntry> {
        load_json_or_default(&self.path)
    }

    fn save(&mut self, entries: &[LeaderboardEntry]) -> io::Result<()> {
        save_json(&self.path, &entries)
    }
}

/// Keeps the board in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<LeaderboardEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<LeaderboardEntry>) -> Self {
        Self { entries }
    }
}

impl LeaderboardStore for MemoryStore {
    fn load(&self) -> Vec<LeaderboardEntry> {
        self.entries.clone()
    }

    fn save(&mut self, entries: &[LeaderboardEntry]) -> io::Result<()> {
        self.entries = entries.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Role;
    use std::fs;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn new_test_store() -> JsonFileStore {
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "loot-tower-test-{}-{}",
            std::process::id(),
            test_id
        ));
        JsonFileStore::new(dir.join(LEADERBOARD_FILE))
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = new_test_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_record_persists_across_instances() {
        let mut store = new_test_store();
        store
            .record(LeaderboardEntry::new("Ada", 40, Role::Mage))
            .unwrap();
        store
            .record(LeaderboardEntry::new("Bo", 90, Role::Paladin))
            .unwrap();

        let reopened = JsonFileStore::new(store.path());
        let board = reopened.load();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].name, "Bo");
        assert_eq!(board[1].role, Role::Mage);

        fs::remove_file(store.path()).ok();
    }

    #[test]
    fn test_memory_store_keeps_top_ten() {
        let mut store = MemoryStore::new();
        for gold in 0..15 {
            store
                .record(LeaderboardEntry::new("run", gold, Role::Warrior))
                .unwrap();
        }
        let board = store.load();
        assert_eq!(board.len(), 10);
        assert_eq!(board[0].gold, 14);
        assert_eq!(board[9].gold, 5);
    }
}
