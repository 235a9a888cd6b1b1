//! Bounded narrative log shown to the player.

use crate::core::constants::GAME_LOG_CAPACITY;
use std::collections::VecDeque;

/// Tone of a log line, used by renderers for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Neutral,
    Loot,
    Trap,
    Stranger,
    Good,
    Bad,
    Item,
    Merchant,
    Gear,
    Boss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
}

/// Newest-last log that forgets its oldest lines past capacity.
#[derive(Debug, Clone)]
pub struct GameLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl GameLog {
    pub fn new() -> Self {
        Self::with_capacity(GAME_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, kind: LogKind, message: impl Into<String>) {
        let message = message.into();
        tracing::trace!(?kind, %message, "log");
        self.entries.push_back(LogEntry { kind, message });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = LogEntry>) {
        for line in lines {
            self.push(line.kind, line.message);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }
}

impl Default for GameLog {
    fn default() -> Self {
        Self::new()
    }
}
