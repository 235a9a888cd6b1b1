//! Terminal front end: a ratatui screen plus keyboard-driven decisions.

mod input;
mod screen;

use crossterm::event::{KeyCode, KeyEvent};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{digit_choice, is_interrupt, read_key, TerminalDecisions};
use loot_tower::core::rng::RandomSource;
use loot_tower::leaderboard::LeaderboardStore;
use loot_tower::session::Session;
use ratatui::{backend::CrosstermBackend, Terminal};
use screen::{Screen, TerminalRenderer};
use std::io::{self, stdout};

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    OpenDoor(usize),
    Attack,
    Defend,
    UseItem,
    Shop,
    LeaveShop,
    NextFloor,
    Restart,
    Quit,
}

pub fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if is_interrupt(key) {
        return Some(Command::Quit);
    }
    if let Some(door) = digit_choice(key.code, 3) {
        return Some(Command::OpenDoor(door));
    }
    match key.code {
        KeyCode::Char('a') => Some(Command::Attack),
        KeyCode::Char('d') => Some(Command::Defend),
        KeyCode::Char('u') => Some(Command::UseItem),
        KeyCode::Char('m') => Some(Command::Shop),
        KeyCode::Char('l') => Some(Command::LeaveShop),
        KeyCode::Char('n') => Some(Command::NextFloor),
        KeyCode::Char('r') => Some(Command::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Takes over the terminal and plays until the player quits.
pub async fn play<R: RandomSource>(
    rng: R,
    leaderboard: impl LeaderboardStore + 'static,
) -> io::Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let result = match Terminal::new(CrosstermBackend::new(stdout())) {
        Ok(terminal) => {
            let screen = Screen::shared(terminal);
            let mut session = Session::new(
                rng,
                TerminalDecisions::new(screen.clone()),
                TerminalRenderer::new(screen),
                leaderboard,
            );
            run_loop(&mut session).await
        }
        Err(err) => Err(err),
    };

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result
}

async fn run_loop<R: RandomSource>(session: &mut Session<R, TerminalDecisions>) -> io::Result<()> {
    session.start_run().await;
    loop {
        let key = read_key().await?;
        let Some(command) = command_for_key(&key) else {
            continue;
        };
        tracing::debug!(?command, "command");

        // Refusals are already narrated into the game log.
        match command {
            Command::Quit => return Ok(()),
            Command::OpenDoor(door) => {
                session.choose_door(door).await.ok();
            }
            Command::Attack => {
                session.attack().await.ok();
            }
            Command::Defend => {
                session.defend().await.ok();
            }
            Command::UseItem => {
                session.use_item_prompt().await.ok();
            }
            Command::Shop => {
                session.browse_merchant().await.ok();
            }
            Command::LeaveShop => {
                session.leave_merchant().ok();
            }
            Command::NextFloor => {
                session.next_floor().ok();
            }
            Command::Restart => {
                session.restart().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_door_keys() {
        assert_eq!(
            command_for_key(&key(KeyCode::Char('1'))),
            Some(Command::OpenDoor(0))
        );
        assert_eq!(
            command_for_key(&key(KeyCode::Char('3'))),
            Some(Command::OpenDoor(2))
        );
        assert_eq!(command_for_key(&key(KeyCode::Char('4'))), None);
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(command_for_key(&key(KeyCode::Char('a'))), Some(Command::Attack));
        assert_eq!(command_for_key(&key(KeyCode::Char('n'))), Some(Command::NextFloor));
        assert_eq!(command_for_key(&key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(
            command_for_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(command_for_key(&key(KeyCode::Char('z'))), None);
    }
}
