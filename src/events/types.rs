use crate::core::log::{LogEntry, LogKind};

/// Player's pick at a shrine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShrineChoice {
    Hp,
    Power,
    Neither,
}

impl ShrineChoice {
    /// `"hp"` and `"power"` are blessings; anything else walks away.
    pub fn parse(input: Option<&str>) -> ShrineChoice {
        match input {
            Some("hp") => ShrineChoice::Hp,
            Some("power") => ShrineChoice::Power,
            _ => ShrineChoice::Neither,
        }
    }
}

/// Headline shown for the room the player just entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomStatus {
    pub title: &'static str,
    pub text: &'static str,
}

/// Result of resolving a non-combat door.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    pub status: RoomStatus,
    pub log: Vec<LogEntry>,
    /// The event killed the player.
    pub run_ended: bool,
}

impl EventOutcome {
    pub(crate) fn new(title: &'static str, text: &'static str) -> Self {
        Self {
            status: RoomStatus { title, text },
            log: Vec::new(),
            run_ended: false,
        }
    }

    pub(crate) fn say(&mut self, kind: LogKind, message: impl Into<String>) {
        self.log.push(LogEntry {
            kind,
            message: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shrine_choice_parsing() {
        assert_eq!(ShrineChoice::parse(Some("hp")), ShrineChoice::Hp);
        assert_eq!(ShrineChoice::parse(Some("power")), ShrineChoice::Power);
        assert_eq!(ShrineChoice::parse(Some("HP")), ShrineChoice::Neither);
        assert_eq!(ShrineChoice::parse(Some("gold")), ShrineChoice::Neither);
        assert_eq!(ShrineChoice::parse(None), ShrineChoice::Neither);
    }
}
