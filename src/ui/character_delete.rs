use super::controls_paragraph;
use chronicles::character::CharacterInfo;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Deletion asks the player to type the character's name back.
pub struct CharacterDeleteScreen {
    pub confirmation_input: String,
}

impl CharacterDeleteScreen {
    pub fn new() -> Self {
        Self {
            confirmation_input: String::new(),
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, character: &CharacterInfo) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Character details
                Constraint::Length(5), // Warning box
                Constraint::Length(1), // Spacer
                Constraint::Length(4), // Input label + field
                Constraint::Length(3), // Controls
            ])
            .split(area);

        let title = Paragraph::new("Delete Character")
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        self.draw_character_details(f, chunks[1], character);

        let warning_lines = vec![
            Line::from(Span::styled(
                "⚠ WARNING ⚠",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("This removes the save file permanently."),
        ];
        let warning_widget = Paragraph::new(warning_lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            );
        f.render_widget(warning_widget, chunks[2]);

        let label = Paragraph::new(format!(
            "Type the character name '{}' to confirm deletion:",
            character.name
        ))
        .alignment(Alignment::Center);
        f.render_widget(label, chunks[4]);

        let input_area = Rect {
            x: chunks[4].x + (chunks[4].width.saturating_sub(40)) / 2,
            y: chunks[4].y + 1,
            width: 40.min(chunks[4].width),
            height: 3,
        };
        let input_widget = Paragraph::new(format!("{}_", self.confirmation_input))
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(input_widget, input_area);

        f.render_widget(
            controls_paragraph("[Enter] Confirm Delete    [Esc] Cancel"),
            chunks[5],
        );
    }

    fn draw_character_details(&self, f: &mut Frame, area: Rect, character: &CharacterInfo) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Character to Delete");
        let inner_area = block.inner(area);
        f.render_widget(block, area);

        let summary = if character.is_corrupted {
            format!("{} (CORRUPTED)", character.filename)
        } else {
            let class = character.class.map(|c| c.name()).unwrap_or("?");
            format!("Level {} {}", character.level, class)
        };

        let lines = vec![
            Line::from(Span::styled(
                character.name.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(summary),
        ];
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            inner_area,
        );
    }

    pub fn handle_char_input(&mut self, c: char) {
        self.confirmation_input.push(c);
    }

    pub fn handle_backspace(&mut self) {
        self.confirmation_input.pop();
    }

    /// Exact match, case included.
    pub fn is_confirmed(&self, character_name: &str) -> bool {
        self.confirmation_input == character_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_requires_exact_name() {
        let mut screen = CharacterDeleteScreen::new();
        for c in "aria".chars() {
            screen.handle_char_input(c);
        }
        assert!(!screen.is_confirmed("Aria"));

        screen.confirmation_input.clear();
        for c in "Aria".chars() {
            screen.handle_char_input(c);
        }
        assert!(screen.is_confirmed("Aria"));
        screen.handle_backspace();
        assert!(!screen.is_confirmed("Aria"));
    }
}
