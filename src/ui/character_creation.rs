use super::{controls_paragraph, step_index, title_paragraph};
use chronicles::character::{validate_name, CharacterClass};
use chronicles::constants::MAX_NAME_LENGTH;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct CharacterCreationScreen {
    pub name_input: String,
    pub class_index: usize,
    pub validation_error: Option<String>,
}

impl CharacterCreationScreen {
    pub fn new() -> Self {
        Self {
            name_input: String::new(),
            class_index: 0,
            validation_error: None,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(4), // Name label + field
                Constraint::Length(3), // Rules
                Constraint::Length(2), // Validation
                Constraint::Min(6),    // Class list
                Constraint::Length(3), // Controls
            ])
            .split(area);

        f.render_widget(title_paragraph("Create Your Hero"), chunks[0]);

        f.render_widget(Paragraph::new("Character Name:"), chunks[1]);
        let input_area = Rect {
            x: chunks[1].x,
            y: chunks[1].y + 1,
            width: chunks[1].width,
            height: 3,
        };
        let input_widget = Paragraph::new(format!("{}_", self.name_input))
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(input_widget, input_area);

        let rules = vec![
            Line::from(format!("• 1-{} characters", MAX_NAME_LENGTH)),
            Line::from("• Letters, numbers, spaces, hyphens, underscores"),
            Line::from("• Must be unique"),
        ];
        f.render_widget(
            Paragraph::new(rules).style(Style::default().fg(Color::Gray)),
            chunks[2],
        );

        let validation_text = if let Some(error) = &self.validation_error {
            Line::from(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(Color::Red),
            ))
        } else if !self.name_input.trim().is_empty() {
            Line::from(Span::styled(
                "✓ Name is valid",
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from("")
        };
        f.render_widget(Paragraph::new(validation_text), chunks[3]);

        self.draw_class_list(f, chunks[4]);

        f.render_widget(
            controls_paragraph("[Enter] Create    [Up/Down] Class    [Esc] Cancel"),
            chunks[5],
        );
    }

    fn draw_class_list(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Class");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let lines: Vec<Line> = CharacterClass::all()
            .iter()
            .enumerate()
            .map(|(i, class)| {
                let stats = class.base_stats();
                let text = format!(
                    "{:<8} HP {:>3}  STR {:>2}  MAG {:>2}  {}",
                    class.name(),
                    stats.health,
                    stats.strength,
                    stats.magic,
                    class.description()
                );
                if i == self.class_index {
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

    pub fn handle_char_input(&mut self, c: char) {
        self.name_input.push(c);
        self.validate();
    }

    pub fn handle_backspace(&mut self) {
        if self.name_input.pop().is_some() {
            self.validate();
        }
    }

    pub fn select_next_class(&mut self) {
        self.class_index = step_index(self.class_index, CharacterClass::all().len(), true);
    }

    pub fn select_previous_class(&mut self) {
        self.class_index = step_index(self.class_index, CharacterClass::all().len(), false);
    }

    pub fn validate(&mut self) {
        self.validation_error = validate_name(&self.name_input).err();
    }

    pub fn is_valid(&self) -> bool {
        self.validation_error.is_none() && !self.name_input.trim().is_empty()
    }

    pub fn get_name(&self) -> String {
        self.name_input.trim().to_string()
    }

    pub fn selected_class(&self) -> CharacterClass {
        CharacterClass::all()[self.class_index.min(CharacterClass::all().len() - 1)]
    }
}
