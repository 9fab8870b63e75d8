use super::{controls_paragraph, step_index, title_paragraph, MessageLog};
use chronicles::game::GameSession;
use chronicles::quests::{self, Prerequisite, QuestDefinition};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestTab {
    Available,
    Active,
    Completed,
}

impl QuestTab {
    const ALL: [QuestTab; 3] = [QuestTab::Available, QuestTab::Active, QuestTab::Completed];

    fn title(&self) -> &'static str {
        match self {
            QuestTab::Available => "Available",
            QuestTab::Active => "Active",
            QuestTab::Completed => "Completed",
        }
    }

    fn index(&self) -> usize {
        match self {
            QuestTab::Available => 0,
            QuestTab::Active => 1,
            QuestTab::Completed => 2,
        }
    }

    fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

pub struct QuestLogScreen {
    pub tab: QuestTab,
    pub selected_index: usize,
}

impl QuestLogScreen {
    pub fn new() -> Self {
        Self {
            tab: QuestTab::Available,
            selected_index: 0,
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
        self.selected_index = 0;
    }

    pub fn move_selection(&mut self, session: &GameSession, forward: bool) {
        let len = self.quests(session).len();
        self.selected_index = step_index(self.selected_index, len, forward);
    }

    /// Keeps the cursor on a real row after the list shrank.
    pub fn clamp_selection(&mut self, session: &GameSession) {
        let len = self.quests(session).len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    pub fn quests<'a>(&self, session: &'a GameSession) -> Vec<&'a QuestDefinition> {
        match self.tab {
            QuestTab::Available => session.available_quests(),
            QuestTab::Active => session.active_quests(),
            QuestTab::Completed => session.completed_quests(),
        }
    }

    pub fn selected_quest_id(&self, session: &GameSession) -> Option<String> {
        self.quests(session)
            .get(self.selected_index)
            .map(|quest| quest.id.clone())
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, session: &GameSession, log: &MessageLog) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(3), // Tabs
                Constraint::Min(8),    // List + details
                Constraint::Length(5), // Log
                Constraint::Length(1), // Controls
            ])
            .split(area);

        f.render_widget(title_paragraph("Quest Log"), chunks[0]);

        let earned = quests::total_rewards_earned(&session.character, &session.data().quests);
        let tabs = Tabs::new(QuestTab::ALL.iter().map(|t| t.title()).collect::<Vec<_>>())
            .block(Block::default().borders(Borders::ALL).title(format!(
                "{:.0}% complete, {} XP and {} gold earned",
                session.completion_percentage(),
                earned.xp,
                earned.gold
            )))
            .select(self.tab.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, chunks[1]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[2]);

        let quests = self.quests(session);
        self.draw_list(f, columns[0], &quests);
        draw_details(f, columns[1], session, quests.get(self.selected_index).copied());

        log.draw(f, chunks[3]);

        let controls = match self.tab {
            QuestTab::Available => "[Tab] Next List    [Enter] Accept    [Esc] Back",
            QuestTab::Active => "[Tab] Next List    [Enter] Complete    [X] Abandon    [Esc] Back",
            QuestTab::Completed => "[Tab] Next List    [Esc] Back",
        };
        f.render_widget(controls_paragraph(controls), chunks[4]);
    }

    fn draw_list(&self, f: &mut Frame, area: Rect, quests: &[&QuestDefinition]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.tab.title());
        let inner = block.inner(area);
        f.render_widget(block, area);

        if quests.is_empty() {
            let empty = Paragraph::new("Nothing here yet.").style(Style::default().fg(Color::Gray));
            f.render_widget(empty, inner);
            return;
        }

        let lines: Vec<Line> = quests
            .iter()
            .enumerate()
            .map(|(i, quest)| {
                let text = format!("{} (Lv {})", quest.title, quest.required_level);
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
}

fn draw_details(f: &mut Frame, area: Rect, session: &GameSession, quest: Option<&QuestDefinition>) {
    let block = Block::default().borders(Borders::ALL).title("Details");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let quest = match quest {
        Some(q) => q,
        None => return,
    };

    let mut lines = vec![
        Line::from(Span::styled(
            quest.title.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(quest.description.as_str()),
        Line::from(""),
        Line::from(format!("Required level: {}", quest.required_level)),
        Line::from(format!(
            "Rewards: {} XP, {} gold",
            quest.reward_xp, quest.reward_gold
        )),
    ];

    if let Prerequisite::Quest(_) = quest.prerequisite {
        if let Ok(chain) = quests::prerequisite_chain(&session.data().quests, &quest.id) {
            lines.push(Line::from(format!("Chain: {}", chain.join(" -> "))));
        }
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
