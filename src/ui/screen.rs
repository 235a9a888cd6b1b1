//! Full-screen drawing of the current session state.

use loot_tower::combat::CombatState;
use loot_tower::core::log::{LogEntry, LogKind};
use loot_tower::core::run_state::RunState;
use loot_tower::events::RoomStatus;
use loot_tower::items::{merchant_stock, ItemEffect, MerchantKind};
use loot_tower::session::{Renderer, SessionView};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::cell::RefCell;
use std::io::{self, Stdout};
use std::rc::Rc;

/// Log lines kept on screen.
const LOG_LINES: usize = 10;

/// Owned copy of the last frame the session produced.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub run: Option<RunState>,
    pub combat: Option<CombatState>,
    pub merchant: Option<MerchantKind>,
    pub status: Option<RoomStatus>,
    pub log: Vec<LogEntry>,
}

impl Snapshot {
    pub fn capture(view: &SessionView<'_>) -> Self {
        let mut log: Vec<LogEntry> = view.log.entries().rev().take(LOG_LINES).cloned().collect();
        log.reverse();
        Self {
            run: view.run.cloned(),
            combat: view.combat.cloned(),
            merchant: view.merchant,
            status: Some(view.status),
            log,
        }
    }
}

/// Modal question drawn over the game.
#[derive(Debug, Clone, Default)]
pub struct Prompt {
    pub title: String,
    pub lines: Vec<String>,
    /// Text typed so far, for free-text questions.
    pub input: Option<String>,
}

pub type SharedScreen = Rc<RefCell<Screen>>;

/// Terminal plus whatever is currently on it.
pub struct Screen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    snapshot: Snapshot,
    prompt: Option<Prompt>,
}

impl Screen {
    pub fn shared(terminal: Terminal<CrosstermBackend<Stdout>>) -> SharedScreen {
        Rc::new(RefCell::new(Self {
            terminal,
            snapshot: Snapshot::default(),
            prompt: None,
        }))
    }

    pub fn set_prompt(&mut self, prompt: Option<Prompt>) {
        self.prompt = prompt;
    }

    pub fn prompt_mut(&mut self) -> Option<&mut Prompt> {
        self.prompt.as_mut()
    }

    pub fn draw(&mut self) -> io::Result<()> {
        let snapshot = &self.snapshot;
        let prompt = self.prompt.as_ref();
        self.terminal
            .draw(|frame| draw_game(frame, snapshot, prompt))?;
        Ok(())
    }
}

/// Renderer that redraws the shared screen on every session change.
pub struct TerminalRenderer {
    screen: SharedScreen,
}

impl TerminalRenderer {
    pub fn new(screen: SharedScreen) -> Self {
        Self { screen }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, view: &SessionView<'_>) {
        let mut screen = self.screen.borrow_mut();
        screen.snapshot = Snapshot::capture(view);
        if let Err(err) = screen.draw() {
            tracing::warn!(%err, "failed to draw frame");
        }
    }
}

fn draw_game(frame: &mut Frame, snapshot: &Snapshot, prompt: Option<&Prompt>) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                     // Header
            Constraint::Min(10),                       // Stats + room
            Constraint::Length(LOG_LINES as u16 + 2), // Log
            Constraint::Length(3),                     // Controls
        ])
        .split(area);

    draw_header(frame, chunks[0], snapshot);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(30)])
        .split(chunks[1]);
    draw_stats(frame, body[0], snapshot.run.as_ref());
    draw_room(frame, body[1], snapshot);

    draw_log(frame, chunks[2], &snapshot.log);

    let controls = Paragraph::new(controls_hint(snapshot))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(controls, chunks[3]);

    if let Some(prompt) = prompt {
        draw_prompt(frame, area, prompt);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let mut spans = vec![Span::styled(
        "LOOT TOWER",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(run) = &snapshot.run {
        spans.push(Span::raw(" | "));
        let floor_style = if run.is_boss_floor() {
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(format!("Floor {}", run.floor), floor_style));
        spans.push(Span::raw(" | "));
        spans.push(Span::raw(run.role.name()));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_stats(frame: &mut Frame, area: Rect, run: Option<&RunState>) {
    let block = Block::default().borders(Borders::ALL).title(" Climber ");
    let Some(run) = run else {
        frame.render_widget(Paragraph::new("No run yet.").block(block), area);
        return;
    };

    let hp_color = if run.hp() * 3 <= run.max_hp() {
        Color::Red
    } else {
        Color::Green
    };
    let mut lines = vec![
        Line::from(vec![
            Span::raw("HP     "),
            Span::styled(
                format!("{}/{}", run.hp(), run.max_hp()),
                Style::default().fg(hp_color),
            ),
        ]),
        Line::from(format!("Power  {}", run.power)),
        Line::from(vec![
            Span::raw("Gold   "),
            Span::styled(run.gold.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(format!(
            "Weapon {}",
            run.weapon.map_or("none", |weapon| weapon.name)
        )),
        Line::from(format!(
            "Armor  {}",
            run.armor.map_or("none", |armor| armor.name)
        )),
        Line::from(""),
        Line::from(Span::styled("Items", Style::default().add_modifier(Modifier::BOLD))),
    ];
    for (slot, item) in run.inventory.slots().iter().enumerate() {
        let text = match item {
            Some(item) => format!("{}. {} ({})", slot + 1, item.name, describe_effect(item.effect)),
            None => format!("{}. -", slot + 1),
        };
        lines.push(Line::from(text));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_room(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let status = snapshot.status.unwrap_or(RoomStatus {
        title: "Loot Tower",
        text: "",
    });
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", status.title));

    let mut lines = vec![Line::from(status.text), Line::from("")];

    if let Some(combat) = &snapshot.combat {
        let foe = if combat.is_boss { "Boss" } else { "Monster" };
        lines.push(Line::from(Span::styled(
            format!(
                "{}: {} HP, power {}",
                foe, combat.monster_hp, combat.monster_power
            ),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!(
            "You: {} HP, power {}",
            combat.player_hp, combat.player_power
        )));
        if combat.buff_turns_remaining > 0 {
            lines.push(Line::from(format!(
                "Buff +{} ({} turns)",
                combat.buff_bonus, combat.buff_turns_remaining
            )));
        }
        if combat.shielded() {
            lines.push(Line::from("Shielded"));
        }
        lines.push(Line::from(""));
    }

    if let Some(kind) = snapshot.merchant {
        let gold = snapshot.run.as_ref().map_or(0, |run| run.gold);
        for (index, offer) in merchant_stock(kind).iter().enumerate() {
            let style = if offer.cost <= gold {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(Span::styled(
                format!("{}. {} - {} gold", index + 1, offer.name(), offer.cost),
                style,
            )));
        }
    } else if let Some(run) = &snapshot.run {
        if run.dead {
            lines.push(Line::from(Span::styled(
                "Your run is over.",
                Style::default().fg(Color::Red),
            )));
        } else if !run.chosen_this_floor && snapshot.combat.is_none() {
            lines.push(Line::from("[1] ?     [2] ?     [3] ?"));
        }
    }

    let room = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(room, area);
}

fn draw_log(frame: &mut Frame, area: Rect, log: &[LogEntry]) {
    let lines: Vec<Line> = log
        .iter()
        .map(|entry| {
            Line::from(Span::styled(
                entry.message.clone(),
                Style::default().fg(log_color(entry.kind)),
            ))
        })
        .collect();
    let log = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Log "));
    frame.render_widget(log, area);
}

fn draw_prompt(frame: &mut Frame, area: Rect, prompt: &Prompt) {
    let extra = if prompt.input.is_some() { 2 } else { 0 };
    let width = 56.min(area.width);
    let height = (prompt.lines.len() as u16 + 2 + extra).min(area.height);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup);

    let mut lines: Vec<Line> = prompt.lines.iter().map(|l| Line::from(l.as_str())).collect();
    if let Some(input) = &prompt.input {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("> {}_", input),
            Style::default().fg(Color::Cyan),
        )));
    }

    let block = Block::default()
        .title(format!(" {} ", prompt.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn describe_effect(effect: ItemEffect) -> String {
    match effect {
        ItemEffect::Heal(amount) => format!("heal {}", amount),
        ItemEffect::Damage(amount) => format!("{} dmg", amount),
        ItemEffect::Buff { power, turns } => format!("+{} power, {} turns", power, turns),
        ItemEffect::Shield { turns } => format!("shield, {} turns", turns),
    }
}

pub fn log_color(kind: LogKind) -> Color {
    match kind {
        LogKind::Neutral => Color::White,
        LogKind::Loot => Color::Yellow,
        LogKind::Trap | LogKind::Bad => Color::Red,
        LogKind::Stranger | LogKind::Good => Color::Green,
        LogKind::Item => Color::Cyan,
        LogKind::Merchant => Color::LightYellow,
        LogKind::Gear => Color::LightBlue,
        LogKind::Boss => Color::Magenta,
    }
}

/// Key help for whatever the player can do right now.
pub fn controls_hint(snapshot: &Snapshot) -> &'static str {
    let Some(run) = &snapshot.run else {
        return "[r] Start  [q] Quit";
    };
    if run.dead {
        return "[r] New run  [q] Quit";
    }
    match (snapshot.combat.is_some(), snapshot.merchant.is_some()) {
        (true, true) => "[a] Attack  [d] Defend  [u] Use item  [m] Shop  [q] Quit",
        (true, false) => "[a] Attack  [d] Defend  [u] Use item  [q] Quit",
        (false, true) => "[m] Shop  [l] Leave  [u] Use item  [q] Quit",
        (false, false) if !run.chosen_this_floor => "[1-3] Open a door  [u] Use item  [q] Quit",
        (false, false) => "[n] Next floor  [u] Use item  [r] Restart  [q] Quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loot_tower::character::Role;

    #[test]
    fn test_controls_follow_run_state() {
        let mut snapshot = Snapshot::default();
        assert_eq!(controls_hint(&snapshot), "[r] Start  [q] Quit");

        snapshot.run = Some(RunState::new(Role::Mage));
        assert!(controls_hint(&snapshot).starts_with("[1-3]"));

        snapshot.merchant = Some(MerchantKind::Standard);
        assert!(controls_hint(&snapshot).contains("[l] Leave"));

        snapshot.merchant = None;
        if let Some(run) = snapshot.run.as_mut() {
            run.chosen_this_floor = true;
        }
        assert!(controls_hint(&snapshot).starts_with("[n] Next floor"));

        if let Some(run) = snapshot.run.as_mut() {
            run.mark_dead();
        }
        assert_eq!(controls_hint(&snapshot), "[r] New run  [q] Quit");
    }

    #[test]
    fn test_describe_effect() {
        assert_eq!(describe_effect(ItemEffect::Heal(20)), "heal 20");
        assert_eq!(
            describe_effect(ItemEffect::Buff { power: 5, turns: 3 }),
            "+5 power, 3 turns"
        );
    }

    #[test]
    fn test_danger_is_red() {
        assert_eq!(log_color(LogKind::Trap), Color::Red);
        assert_eq!(log_color(LogKind::Bad), Color::Red);
        assert_eq!(log_color(LogKind::Boss), Color::Magenta);
    }
}
