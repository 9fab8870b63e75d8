use super::hub::draw_character_panel;
use super::{controls_paragraph, step_index, title_paragraph, MessageLog};
use chronicles::constants::MAX_INVENTORY_SIZE;
use chronicles::game::GameSession;
use chronicles::items;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct InventoryScreen {
    pub selected_index: usize,
}

impl InventoryScreen {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn move_selection(&mut self, session: &GameSession, forward: bool) {
        self.selected_index =
            step_index(self.selected_index, session.character.inventory.len(), forward);
    }

    pub fn clamp_selection(&mut self, session: &GameSession) {
        let len = session.character.inventory.len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    pub fn selected_item_id(&self, session: &GameSession) -> Option<String> {
        session.character.inventory.get(self.selected_index).cloned()
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, session: &GameSession, log: &MessageLog) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Min(10),   // Items + sheet
                Constraint::Length(5), // Log
                Constraint::Length(2), // Controls
            ])
            .split(area);

        f.render_widget(title_paragraph("Inventory"), chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(4)])
            .split(columns[0]);

        self.draw_items(f, left[0], session);
        self.draw_selected(f, left[1], session);
        draw_character_panel(f, columns[1], session);

        log.draw(f, chunks[2]);

        f.render_widget(
            controls_paragraph(
                "[U] Use    [E] Equip    [W] Unequip Weapon    [R] Unequip Armor\n[X] Drop    [Esc] Back",
            ),
            chunks[3],
        );
    }

    fn draw_items(&self, f: &mut Frame, area: Rect, session: &GameSession) {
        let character = &session.character;
        let block = Block::default().borders(Borders::ALL).title(format!(
            "Items ({}/{})",
            character.inventory.len(),
            MAX_INVENTORY_SIZE
        ));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if character.inventory.is_empty() {
            f.render_widget(
                Paragraph::new("Your pack is empty.").style(Style::default().fg(Color::Gray)),
                inner,
            );
            return;
        }

        let lines: Vec<Line> = character
            .inventory
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let text = match session.data().items.get(id) {
                    Some(item) => format!("{} [{}]", item.name, item.item_type),
                    None => format!("{} [unknown]", id),
                };
                if i == self.selected_index {
                    Line::from(Span::styled(
                        format!("> {}", text),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!("  {}", text))
                }
            })
            .collect();

        f.render_widget(Paragraph::new(lines), inner);
    }

    fn draw_selected(&self, f: &mut Frame, area: Rect, session: &GameSession) {
        let block = Block::default().borders(Borders::ALL);
        let text = self
            .selected_item_id(session)
            .and_then(|id| session.data().items.get(&id).cloned())
            .map(|item| {
                format!(
                    "{} ({}) x{}",
                    item.description,
                    item.effect,
                    items::count_item(&session.character, &item.id)
                )
            })
            .unwrap_or_default();
        f.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }
}
