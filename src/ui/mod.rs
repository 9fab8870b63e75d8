pub mod character_creation;
pub mod character_delete;
pub mod character_select;
pub mod combat_scene;
pub mod hub;
pub mod inventory;
pub mod message_log;
pub mod quest_log;
pub mod shop;

pub use character_creation::CharacterCreationScreen;
pub use character_delete::CharacterDeleteScreen;
pub use character_select::CharacterSelectScreen;
pub use combat_scene::{CombatScreen, DeathChoice};
pub use hub::{HubAction, HubScreen};
pub use inventory::InventoryScreen;
pub use message_log::MessageLog;
pub use quest_log::QuestLogScreen;
pub use shop::{ShopMode, ShopScreen};

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
};

/// Centered cyan screen title.
pub fn title_paragraph(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
}

/// Gray key hint line at the bottom of a screen.
pub fn controls_paragraph(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray))
}

/// Green above two thirds, yellow above one third, red below.
pub fn health_color(ratio: f64) -> Color {
    if ratio > 0.66 {
        Color::Green
    } else if ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Moves a list cursor one step, staying inside `len`.
pub fn step_index(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1).min(len - 1)
    } else {
        index.saturating_sub(1)
    }
}
