use super::{controls_paragraph, health_color, step_index, title_paragraph, MessageLog};
use chronicles::character::Character;
use chronicles::game::GameSession;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Entries of the town hub menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubAction {
    Quests,
    Explore,
    Inventory,
    Shop,
    SaveAndQuit,
}

impl HubAction {
    pub const ALL: [HubAction; 5] = [
        HubAction::Quests,
        HubAction::Explore,
        HubAction::Inventory,
        HubAction::Shop,
        HubAction::SaveAndQuit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HubAction::Quests => "[Q] Quest Log",
            HubAction::Explore => "[E] Explore (Find Battles)",
            HubAction::Inventory => "[I] Inventory",
            HubAction::Shop => "[S] Shop",
            HubAction::SaveAndQuit => "[Esc] Save and Quit",
        }
    }

    pub fn from_key(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(HubAction::Quests),
            'e' => Some(HubAction::Explore),
            'i' => Some(HubAction::Inventory),
            's' => Some(HubAction::Shop),
            _ => None,
        }
    }
}

pub struct HubScreen {
    pub selected_index: usize,
}

impl HubScreen {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn move_selection(&mut self, forward: bool) {
        self.selected_index = step_index(self.selected_index, HubAction::ALL.len(), forward);
    }

    pub fn selected_action(&self) -> HubAction {
        HubAction::ALL[self.selected_index.min(HubAction::ALL.len() - 1)]
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, session: &GameSession, log: &MessageLog) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2),  // Title
                Constraint::Length(14), // Stats + menu
                Constraint::Min(4),     // Log
                Constraint::Length(1),  // Controls
            ])
            .split(area);

        let character = &session.character;
        let title = format!(
            "{} the {} - Level {}",
            character.name, character.class, character.level
        );
        f.render_widget(title_paragraph(&title), chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        draw_character_panel(f, columns[0], session);
        self.draw_menu(f, columns[1]);

        log.draw(f, chunks[2]);

        f.render_widget(
            controls_paragraph("[Up/Down] Select    [Enter] Choose    [Esc] Save and Quit"),
            chunks[3],
        );
    }

    fn draw_menu(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Town");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let lines: Vec<Line> = HubAction::ALL
            .iter()
            .enumerate()
            .map(|(i, action)| {
                if i == self.selected_index {
                    Line::from(Span::styled(
                        format!("> {}", action.label()),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!("  {}", action.label()))
                }
            })
            .collect();

        f.render_widget(Paragraph::new(lines), inner);
    }
}

/// Health gauge plus the character sheet. Also used by the inventory.
pub fn draw_character_panel(f: &mut Frame, area: Rect, session: &GameSession) {
    let character = &session.character;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    draw_health_gauge(f, chunks[0], character, "Health");

    let weapon = equipped_name(session, character.equipped_weapon.as_deref());
    let armor = equipped_name(session, character.equipped_armor.as_deref());

    let lines = vec![
        Line::from(vec![
            Span::styled("XP: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("{}/{}", character.experience, character.xp_to_next_level()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("    "),
            Span::styled("Gold: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(character.gold.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(format!(
            "STR: {}    MAG: {}",
            character.strength, character.magic
        )),
        Line::from(format!("Ability: {}", character.class.ability_name())),
        Line::from(""),
        Line::from(format!("Weapon: {}", weapon)),
        Line::from(format!("Armor:  {}", armor)),
        Line::from(""),
        Line::from(format!(
            "Quests: {} active, {} done ({:.0}%)",
            character.active_quests.len(),
            character.completed_quests.len(),
            session.completion_percentage()
        )),
    ];

    let sheet = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Character"));
    f.render_widget(sheet, chunks[1]);
}

pub fn draw_health_gauge(f: &mut Frame, area: Rect, character: &Character, title: &str) {
    let ratio = character.health_ratio();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .gauge_style(Style::default().fg(health_color(ratio)).add_modifier(Modifier::BOLD))
        .label(format!("HP: {}/{}", character.health, character.max_health))
        .ratio(ratio);
    f.render_widget(gauge, area);
}

fn equipped_name(session: &GameSession, item_id: Option<&str>) -> String {
    match item_id {
        Some(id) => session
            .data()
            .items
            .get(id)
            .map(|item| item.name.clone())
            .unwrap_or_else(|| id.to_string()),
        None => "(none)".to_string(),
    }
}
