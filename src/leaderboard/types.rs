use crate::character::Role;
use crate::core::constants::LEADERBOARD_SIZE;
use serde::{Deserialize, Serialize};

/// One finished run on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub gold: u32,
    pub role: Role,
    /// Unix timestamp of when the run ended.
    #[serde(default)]
    pub recorded_at: i64,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, gold: u32, role: Role) -> Self {
        Self {
            name: name.into(),
            gold,
            role,
            recorded_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Appends `entry`, re-sorts richest first and keeps the top ten.
/// Ties keep their insertion order.
pub fn record_score(board: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry) {
    board.push(entry);
    board.sort_by(|a, b| b.gold.cmp(&a.gold));
    board.truncate(LEADERBOARD_SIZE);
}
