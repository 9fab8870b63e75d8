use super::hub::draw_health_gauge;
use super::{controls_paragraph, health_color, title_paragraph};
use chronicles::character::Character;
use chronicles::combat::{Battle, CombatEvent, Enemy};
use chronicles::errors::{CombatError, GameError};
use chronicles::game::RewardSummary;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    Fighting,
    Finished,
    Dead,
}

/// Answer to the death prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathChoice {
    Revive,
    Quit,
}

impl DeathChoice {
    pub fn from_key(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'r' => Some(DeathChoice::Revive),
            'q' => Some(DeathChoice::Quit),
            _ => None,
        }
    }
}

pub struct CombatScreen {
    pub battle: Battle,
    pub phase: CombatPhase,
    lines: Vec<(String, Color)>,
}

impl CombatScreen {
    pub fn new(battle: Battle) -> Self {
        let opening = format!("A wild {} appears!", battle.enemy().name);
        Self {
            battle,
            phase: CombatPhase::Fighting,
            lines: vec![(opening, Color::Yellow)],
        }
    }

    pub fn record(&mut self, events: &[CombatEvent]) {
        let enemy_name = self.battle.enemy().name.clone();
        for event in events {
            self.lines.push(describe_event(event, &enemy_name));
        }
    }

    /// Takes the result of claiming the finished battle and moves to the
    /// matching phase.
    pub fn conclude(&mut self, result: Result<Option<RewardSummary>, GameError>) {
        match result {
            Ok(Some(summary)) => {
                if summary.levels_gained > 0 {
                    self.lines.push((
                        format!("Level up! (+{} level)", summary.levels_gained),
                        Color::Cyan,
                    ));
                }
                self.phase = CombatPhase::Finished;
            }
            Ok(None) => self.phase = CombatPhase::Finished,
            Err(GameError::Combat(CombatError::CharacterDied(_))) => {
                self.phase = CombatPhase::Dead;
            }
            Err(e) => {
                self.lines.push((format!("Error: {}", e), Color::Red));
                self.phase = CombatPhase::Finished;
            }
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, character: &Character) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(3), // Player HP
                Constraint::Length(3), // Enemy HP
                Constraint::Min(5),    // Battle log
                Constraint::Length(2), // Controls
            ])
            .split(area);

        let title = format!(
            "Battle vs {} - Turn {}",
            self.battle.enemy().name,
            self.battle.turn()
        );
        f.render_widget(title_paragraph(&title), chunks[0]);

        draw_health_gauge(f, chunks[1], character, &character.name);
        draw_enemy_hp(f, chunks[2], self.battle.enemy());
        self.draw_log(f, chunks[3]);

        match self.phase {
            CombatPhase::Fighting => {
                let controls = format!(
                    "[A] Attack    [S] {}    [F] Flee",
                    character.class.ability_name()
                );
                f.render_widget(controls_paragraph(&controls), chunks[4]);
            }
            CombatPhase::Finished => {
                f.render_widget(controls_paragraph("[Enter] Return to town"), chunks[4]);
            }
            CombatPhase::Dead => {
                let prompt = Paragraph::new(vec![
                    Line::from(Span::styled(
                        "You have fallen!",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from("[R] Revive at half health    [Q] Quit to character select"),
                ])
                .alignment(Alignment::Center);
                f.render_widget(prompt, chunks[4]);
            }
        }
    }

    fn draw_log(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Battle Log");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let skip = self.lines.len().saturating_sub(inner.height as usize);
        let lines: Vec<Line> = self
            .lines
            .iter()
            .skip(skip)
            .map(|(text, color)| Line::from(Span::styled(text.as_str(), Style::default().fg(*color))))
            .collect();
        f.render_widget(Paragraph::new(lines), inner);
    }
}

fn draw_enemy_hp(f: &mut Frame, area: Rect, enemy: &Enemy) {
    let ratio = enemy.health_ratio();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(enemy.name.as_str()))
        .gauge_style(Style::default().fg(health_color(ratio)).add_modifier(Modifier::BOLD))
        .label(format!("HP: {}/{}", enemy.health, enemy.max_health))
        .ratio(ratio);
    f.render_widget(gauge, area);
}

/// Battle log line for one event.
pub fn describe_event(event: &CombatEvent, enemy_name: &str) -> (String, Color) {
    match event {
        CombatEvent::PlayerAttack { damage } => (
            format!("You hit the {} for {} damage.", enemy_name, damage),
            Color::White,
        ),
        CombatEvent::AbilityDamage { ability, damage } => (
            format!("{} strikes the {} for {} damage!", ability, enemy_name, damage),
            Color::Cyan,
        ),
        CombatEvent::AbilityHeal { ability, healed } => (
            format!("{} restores {} health.", ability, healed),
            Color::Green,
        ),
        CombatEvent::AbilityMissed { ability } => {
            (format!("{} fails to land.", ability), Color::Gray)
        }
        CombatEvent::EscapeFailed => ("You fail to escape!".to_string(), Color::Yellow),
        CombatEvent::Escaped => ("You escape safely.".to_string(), Color::Yellow),
        CombatEvent::EnemyAttack { damage } => (
            format!("The {} hits you for {} damage.", enemy_name, damage),
            Color::Red,
        ),
        CombatEvent::EnemyDefeated { rewards } => (
            format!(
                "The {} is defeated! +{} XP, +{} gold",
                enemy_name, rewards.xp, rewards.gold
            ),
            Color::Green,
        ),
        CombatEvent::PlayerDied => ("You collapse...".to_string(), Color::Red),
    }
}
