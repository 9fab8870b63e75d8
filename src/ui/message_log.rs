use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::VecDeque;

const MAX_MESSAGES: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

impl MessageKind {
    fn color(&self) -> Color {
        match self {
            MessageKind::Info => Color::White,
            MessageKind::Success => Color::Green,
            MessageKind::Error => Color::Red,
        }
    }
}

/// Rolling log of what happened, shown on the hub and the menus behind it.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: VecDeque<(String, MessageKind)>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.entries.push_back((text.into(), kind));
        while self.entries.len() > MAX_MESSAGES {
            self.entries.pop_front();
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(MessageKind::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(MessageKind::Success, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(MessageKind::Error, text);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Newest entries at the bottom, as many as fit.
    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Log");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let visible = inner.height as usize;
        let skip = self.entries.len().saturating_sub(visible);
        let lines: Vec<Line> = self
            .entries
            .iter()
            .skip(skip)
            .map(|(text, kind)| {
                Line::from(Span::styled(text.as_str(), Style::default().fg(kind.color())))
            })
            .collect();

        f.render_widget(Paragraph::new(lines), inner);
    }
}
