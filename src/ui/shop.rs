use super::{controls_paragraph, step_index, title_paragraph, MessageLog};
use chronicles::game::GameSession;
use chronicles::items::{self, ItemDefinition};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopMode {
    Buy,
    Sell,
}

pub struct ShopScreen {
    pub mode: ShopMode,
    pub selected_index: usize,
}

impl ShopScreen {
    pub fn new() -> Self {
        Self {
            mode: ShopMode::Buy,
            selected_index: 0,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            ShopMode::Buy => ShopMode::Sell,
            ShopMode::Sell => ShopMode::Buy,
        };
        self.selected_index = 0;
    }

    /// Buy mode lists the catalog; sell mode lists the pack, one row per copy.
    pub fn rows<'a>(&self, session: &'a GameSession) -> Vec<&'a ItemDefinition> {
        match self.mode {
            ShopMode::Buy => session.data().items.iter().collect(),
            ShopMode::Sell => session
                .character
                .inventory
                .iter()
                .filter_map(|id| session.data().items.get(id))
                .collect(),
        }
    }

    pub fn move_selection(&mut self, session: &GameSession, forward: bool) {
        let len = self.rows(session).len();
        self.selected_index = step_index(self.selected_index, len, forward);
    }

    pub fn clamp_selection(&mut self, session: &GameSession) {
        let len = self.rows(session).len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    pub fn selected_item_id(&self, session: &GameSession) -> Option<String> {
        self.rows(session)
            .get(self.selected_index)
            .map(|item| item.id.clone())
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, session: &GameSession, log: &MessageLog) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(3), // Mode tabs
                Constraint::Min(6),    // Items
                Constraint::Length(5), // Log
                Constraint::Length(1), // Controls
            ])
            .split(area);

        f.render_widget(title_paragraph("Shop"), chunks[0]);

        let selected_tab = match self.mode {
            ShopMode::Buy => 0,
            ShopMode::Sell => 1,
        };
        let tabs = Tabs::new(vec!["Buy", "Sell"])
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Gold: {}    Space: {}",
                session.character.gold,
                items::space_remaining(&session.character)
            )))
            .select(selected_tab)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, chunks[1]);

        self.draw_rows(f, chunks[2], session);
        log.draw(f, chunks[3]);

        let controls = match self.mode {
            ShopMode::Buy => "[Tab] Sell    [Enter] Buy    [Esc] Back",
            ShopMode::Sell => "[Tab] Buy    [Enter] Sell    [Esc] Back",
        };
        f.render_widget(controls_paragraph(controls), chunks[4]);
    }

    fn draw_rows(&self, f: &mut Frame, area: Rect, session: &GameSession) {
        let block = Block::default().borders(Borders::ALL).title("Items");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = self.rows(session);
        if rows.is_empty() {
            f.render_widget(
                Paragraph::new("Nothing to sell.").style(Style::default().fg(Color::Gray)),
                inner,
            );
            return;
        }

        let gold = session.character.gold;
        let lines: Vec<Line> = rows
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let price = match self.mode {
                    ShopMode::Buy => item.cost,
                    ShopMode::Sell => items::sell_price(item),
                };
                let text = format!(
                    "{:<24} {:>5}g  {:<10} {}",
                    item.name, price, item.item_type, item.effect
                );
                let style = if i == self.selected_index {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else if self.mode == ShopMode::Buy && price > gold {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                let marker = if i == self.selected_index { "> " } else { "  " };
                Line::from(Span::styled(format!("{}{}", marker, text), style))
            })
            .collect();

        f.render_widget(Paragraph::new(lines), inner);
    }
}
