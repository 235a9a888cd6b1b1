//! Keyboard input and the terminal decision provider.

use super::screen::{Prompt, SharedScreen};
use async_trait::async_trait;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use loot_tower::character::Role;
use loot_tower::events::{shrine_hp_boost, shrine_power_boost};
use loot_tower::items::{MerchantKind, MerchantOffer};
use loot_tower::session::DecisionProvider;
use std::io;

/// Longest name accepted for the leaderboard.
const MAX_NAME_LEN: usize = 20;

/// Waits for the next key press without blocking the runtime thread.
pub async fn read_key() -> io::Result<KeyEvent> {
    loop {
        let event = tokio::task::spawn_blocking(event::read)
            .await
            .map_err(io::Error::other)??;
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}

pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// `'1'..='count'` as a zero-based index.
pub fn digit_choice(code: KeyCode, count: usize) -> Option<usize> {
    let KeyCode::Char(c) = code else {
        return None;
    };
    let digit = c.to_digit(10)? as usize;
    (1..=count).contains(&digit).then(|| digit - 1)
}

/// Answers the session's questions with modal prompts.
pub struct TerminalDecisions {
    screen: SharedScreen,
}

impl TerminalDecisions {
    pub fn new(screen: SharedScreen) -> Self {
        Self { screen }
    }

    fn show(&self, prompt: Option<Prompt>) {
        let mut screen = self.screen.borrow_mut();
        screen.set_prompt(prompt);
        if let Err(err) = screen.draw() {
            tracing::warn!(%err, "failed to draw prompt");
        }
    }

    /// Shows `prompt` and feeds keys to `answer` until it settles. `Esc`
    /// cancels.
    async fn ask<T>(
        &mut self,
        prompt: Prompt,
        mut answer: impl FnMut(KeyCode) -> Option<T>,
    ) -> Option<T> {
        self.show(Some(prompt));
        let result = loop {
            match read_key().await {
                Ok(key) if key.code == KeyCode::Esc || is_interrupt(&key) => break None,
                Ok(key) => {
                    if let Some(value) = answer(key.code) {
                        break Some(value);
                    }
                }
                Err(err) => {
                    tracing::warn!(%err, "failed to read key");
                    break None;
                }
            }
        };
        self.show(None);
        result
    }
}

#[async_trait(?Send)]
impl DecisionProvider for TerminalDecisions {
    async fn choose_role(&mut self) -> Option<String> {
        let roles = Role::all();
        let lines = roles
            .iter()
            .enumerate()
            .map(|(i, role)| {
                let stats = role.stats();
                format!(
                    "{}. {} ({} HP, {} power, {} gold)",
                    i + 1,
                    role,
                    stats.hp,
                    stats.power,
                    stats.gold
                )
            })
            .collect();
        let prompt = Prompt {
            title: "Choose your role".to_string(),
            lines,
            input: None,
        };
        self.ask(prompt, |code| {
            digit_choice(code, roles.len()).map(|i| roles[i].name().to_string())
        })
        .await
    }

    async fn shrine_choice(&mut self, floor: u32) -> Option<String> {
        let prompt = Prompt {
            title: "Ancient Shrine".to_string(),
            lines: vec![
                format!("h. +{} max HP", shrine_hp_boost(floor)),
                format!("p. +{} power", shrine_power_boost(floor)),
                "n. Walk away".to_string(),
            ],
            input: None,
        };
        self.ask(prompt, |code| match code {
            KeyCode::Char('h') => Some("hp".to_string()),
            KeyCode::Char('p') => Some("power".to_string()),
            KeyCode::Char('n') => Some(String::new()),
            _ => None,
        })
        .await
    }

    async fn confirm_cursed(&mut self) -> Option<bool> {
        let prompt = Prompt {
            title: "Cursed Door".to_string(),
            lines: vec![
                "Step inside? The curse will burn you.".to_string(),
                "y. Risk it   n. Back away".to_string(),
            ],
            input: None,
        };
        self.ask(prompt, |code| match code {
            KeyCode::Char('y') => Some(true),
            KeyCode::Char('n') => Some(false),
            _ => None,
        })
        .await
    }

    async fn item_slot(&mut self) -> Option<String> {
        let prompt = Prompt {
            title: "Use item".to_string(),
            lines: vec!["Which slot? (1-3)".to_string()],
            input: None,
        };
        self.ask(prompt, |code| {
            digit_choice(code, 3).map(|slot| slot.to_string())
        })
        .await
    }

    async fn merchant_choice(
        &mut self,
        kind: MerchantKind,
        offers: &[MerchantOffer],
        gold: u32,
    ) -> Option<usize> {
        let title = match kind {
            MerchantKind::Standard => "Merchant",
            MerchantKind::Special => "Rare Merchant",
        };
        let mut lines: Vec<String> = offers
            .iter()
            .enumerate()
            .map(|(i, offer)| format!("{}. {} - {} gold", i + 1, offer.name(), offer.cost))
            .collect();
        lines.push(format!("You have {} gold. Esc to leave.", gold));
        let prompt = Prompt {
            title: title.to_string(),
            lines,
            input: None,
        };
        let count = offers.len();
        self.ask(prompt, |code| match code {
            KeyCode::Char('l') => Some(None),
            code => digit_choice(code, count).map(Some),
        })
        .await
        .flatten()
    }

    async fn player_name(&mut self, gold: u32) -> Option<String> {
        self.show(Some(Prompt {
            title: "You died".to_string(),
            lines: vec![
                format!("You escaped with {} gold.", gold),
                "Name for the leaderboard (Enter to save, Esc to skip):".to_string(),
            ],
            input: Some(String::new()),
        }));

        let result = loop {
            let key = match read_key().await {
                Ok(key) => key,
                Err(err) => {
                    tracing::warn!(%err, "failed to read key");
                    break None;
                }
            };
            if key.code == KeyCode::Esc || is_interrupt(&key) {
                break None;
            }

            let mut screen = self.screen.borrow_mut();
            let Some(input) = screen.prompt_mut().and_then(|p| p.input.as_mut()) else {
                break None;
            };
            match key.code {
                KeyCode::Enter => break Some(input.clone()),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) if input.chars().count() < MAX_NAME_LEN => input.push(c),
                _ => {}
            }
            if let Err(err) = screen.draw() {
                tracing::warn!(%err, "failed to draw prompt");
            }
        };
        self.show(None);
        result
    }
}
