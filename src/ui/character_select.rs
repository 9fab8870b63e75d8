use super::{controls_paragraph, title_paragraph};
use chronicles::character::CharacterInfo;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct CharacterSelectScreen {
    pub selected_index: usize,
    pub error: Option<String>,
}

impl CharacterSelectScreen {
    pub fn new() -> Self {
        Self {
            selected_index: 0,
            error: None,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, characters: &[CharacterInfo]) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Main content
                Constraint::Length(1), // Error line
                Constraint::Length(2), // Controls
            ])
            .split(area);

        f.render_widget(title_paragraph("Quest Chronicles - Select Your Hero"), chunks[0]);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        self.draw_character_list(f, main_chunks[0], characters);
        self.draw_character_details(f, main_chunks[1], characters);

        if let Some(error) = &self.error {
            let error_line = Paragraph::new(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            ))
            .alignment(Alignment::Center);
            f.render_widget(error_line, chunks[2]);
        }

        f.render_widget(
            controls_paragraph("[Enter] Play    [N] New    [D] Delete    [Esc] Quit"),
            chunks[3],
        );
    }

    fn draw_character_list(&self, f: &mut Frame, area: Rect, characters: &[CharacterInfo]) {
        let block = Block::default().borders(Borders::ALL).title("Characters");
        let inner_area = block.inner(area);
        f.render_widget(block, area);

        if characters.is_empty() {
            let empty_message = Paragraph::new("No characters yet.\nPress [N] to create one.")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(empty_message, inner_area);
            return;
        }

        let mut lines = Vec::new();
        for (i, character) in characters.iter().enumerate() {
            let is_selected = i == self.selected_index;
            let marker = if is_selected { "> " } else { "  " };

            let (text, color) = if character.is_corrupted {
                (format!("{}{} (CORRUPTED)", marker, character.filename), Color::Red)
            } else {
                let class = character.class.map(|c| c.name()).unwrap_or("?");
                (
                    format!("{}{} (Lv {} {})", marker, character.name, character.level, class),
                    Color::White,
                )
            };

            let style = if is_selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };
            lines.push(Line::from(Span::styled(text, style)));
        }

        f.render_widget(Paragraph::new(lines), inner_area);
    }

    fn draw_character_details(&self, f: &mut Frame, area: Rect, characters: &[CharacterInfo]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Character Details");
        let inner_area = block.inner(area);
        f.render_widget(block, area);

        let character = match characters.get(self.selected_index) {
            Some(c) => c,
            None => return,
        };

        if character.is_corrupted {
            let corrupted_message = Paragraph::new(vec![
                Line::from(Span::styled(
                    "CORRUPTED SAVE FILE",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("This save file could not be read."),
                Line::from("You can delete it with [D]."),
            ])
            .alignment(Alignment::Center);
            f.render_widget(corrupted_message, inner_area);
            return;
        }

        let mut lines = vec![
            Line::from(Span::styled(
                character.name.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Level: {}", character.level)),
        ];

        if let Some(class) = character.class {
            lines.push(Line::from(format!("Class: {}", class)));
            lines.push(Line::from(format!("Ability: {}", class.ability_name())));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                class.description(),
                Style::default().fg(Color::Gray),
            )));
        }

        f.render_widget(Paragraph::new(lines), inner_area);
    }
}
