mod ui;

use chronicles::build_info;
use chronicles::character::{Character, CharacterInfo, CharacterManager};
use chronicles::combat::{BattleOutcome, PlayerAction};
use chronicles::config::GameConfig;
use chronicles::game::{GameData, GameSession, RewardSummary};
use chronicles::items::EquipSlot;
use chronicles::quests::AcceptOutcome;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::ThreadRng;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::fs;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use ui::combat_scene::CombatPhase;
use ui::quest_log::QuestTab;
use ui::*;

#[derive(Parser)]
#[command(name = "chronicles")]
#[command(about = "Quest Chronicles - a turn-based terminal RPG")]
#[command(disable_version_flag = true)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding quests.txt and items.txt
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory holding character saves
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print version information
    #[arg(short = 'V', long)]
    version: bool,
}

enum Screen {
    CharacterSelect,
    CharacterCreation,
    CharacterDelete,
    Hub,
    QuestLog,
    Combat,
    Inventory,
    Shop,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", build_info::version_line());
        return Ok(());
    }

    let mut config = match GameConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    config.apply_overrides(cli.data_dir, cli.save_dir);

    init_logging(&config, cli.verbose);
    log::info!("{}", build_info::version_line());

    let data = match GameData::load(&config.data_dir()) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Could not load game data: {}", e);
            std::process::exit(1);
        }
    };
    let manager = CharacterManager::new(config.save_dir())?;

    let mut app = App::new(manager, Rc::new(data));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);
    app.shutdown();

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Sends log records to a file, since the terminal belongs to the UI.
/// Level comes from config, raised by `-v`, and `RUST_LOG` wins over both.
fn init_logging(config: &GameConfig, verbosity: u8) {
    let mut builder = env_logger::Builder::new();

    let level = match verbosity {
        0 => config.level_filter(),
        1 => config.level_filter().max(log::LevelFilter::Debug),
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);
    builder.parse_env("RUST_LOG");

    let path = config.log_file();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match fs::OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            // Writing to stderr would tear the UI apart.
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
            record.level(),
            record.args()
        )
    });

    let _ = builder.try_init();
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> io::Result<()> {
    while app.running {
        terminal.draw(|f| app.draw(f))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if key_event.modifiers.contains(KeyModifiers::CONTROL)
                    && key_event.code == KeyCode::Char('c')
                {
                    app.running = false;
                    continue;
                }
                app.handle_key(key_event.code);
            }
        }
    }
    Ok(())
}

struct App {
    running: bool,
    screen: Screen,
    manager: CharacterManager,
    data: Rc<GameData>,
    characters: Vec<CharacterInfo>,
    select_screen: CharacterSelectScreen,
    creation_screen: CharacterCreationScreen,
    delete_screen: CharacterDeleteScreen,
    session: Option<GameSession>,
    hub_screen: HubScreen,
    quest_screen: QuestLogScreen,
    inventory_screen: InventoryScreen,
    shop_screen: ShopScreen,
    combat: Option<CombatScreen>,
    log: MessageLog,
    rng: ThreadRng,
}

impl App {
    fn new(manager: CharacterManager, data: Rc<GameData>) -> Self {
        let mut app = Self {
            running: true,
            screen: Screen::CharacterSelect,
            manager,
            data,
            characters: Vec::new(),
            select_screen: CharacterSelectScreen::new(),
            creation_screen: CharacterCreationScreen::new(),
            delete_screen: CharacterDeleteScreen::new(),
            session: None,
            hub_screen: HubScreen::new(),
            quest_screen: QuestLogScreen::new(),
            inventory_screen: InventoryScreen::new(),
            shop_screen: ShopScreen::new(),
            combat: None,
            log: MessageLog::new(),
            rng: rand::thread_rng(),
        };
        app.refresh_characters();
        if app.characters.is_empty() {
            app.screen = Screen::CharacterCreation;
        }
        app
    }

    fn refresh_characters(&mut self) {
        match self.manager.list_characters() {
            Ok(characters) => self.characters = characters,
            Err(e) => self.select_screen.error = Some(format!("Could not list saves: {}", e)),
        }
        if self.select_screen.selected_index >= self.characters.len() {
            self.select_screen.selected_index = self.characters.len().saturating_sub(1);
        }
    }

    /// Saves the character being played. Failures land in the log.
    fn auto_save(&mut self) {
        if let Some(session) = &self.session {
            if let Err(e) = self.manager.save_character(&session.character) {
                log::error!("auto-save failed: {}", e);
                self.log.error(format!("Save failed: {}", e));
            }
        }
    }

    fn shutdown(&mut self) {
        self.auto_save();
    }

    fn start_session(&mut self, mut character: Character) {
        self.log.clear();
        if character.revive() {
            self.log.info(format!(
                "{} was carried back to town and wakes with {} health.",
                character.name, character.health
            ));
        }
        self.log
            .success(format!("Welcome, {} the {}!", character.name, character.class));
        self.session = Some(GameSession::new(character, Rc::clone(&self.data)));
        self.hub_screen = HubScreen::new();
        self.screen = Screen::Hub;
    }

    fn leave_session(&mut self) {
        self.auto_save();
        self.session = None;
        self.combat = None;
        self.select_screen = CharacterSelectScreen::new();
        self.refresh_characters();
        self.screen = Screen::CharacterSelect;
    }

    fn back_to_hub(&mut self) {
        self.auto_save();
        self.screen = Screen::Hub;
    }

    fn draw(&self, f: &mut Frame) {
        let area = f.size();
        match self.screen {
            Screen::CharacterSelect => self.select_screen.draw(f, area, &self.characters),
            Screen::CharacterCreation => self.creation_screen.draw(f, area),
            Screen::CharacterDelete => {
                if let Some(info) = self.characters.get(self.select_screen.selected_index) {
                    self.delete_screen.draw(f, area, info);
                }
            }
            Screen::Hub => {
                if let Some(session) = &self.session {
                    self.hub_screen.draw(f, area, session, &self.log);
                }
            }
            Screen::QuestLog => {
                if let Some(session) = &self.session {
                    self.quest_screen.draw(f, area, session, &self.log);
                }
            }
            Screen::Combat => {
                if let (Some(session), Some(combat)) = (&self.session, &self.combat) {
                    combat.draw(f, area, &session.character);
                }
            }
            Screen::Inventory => {
                if let Some(session) = &self.session {
                    self.inventory_screen.draw(f, area, session, &self.log);
                }
            }
            Screen::Shop => {
                if let Some(session) = &self.session {
                    self.shop_screen.draw(f, area, session, &self.log);
                }
            }
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match self.screen {
            Screen::CharacterSelect => self.handle_select_key(code),
            Screen::CharacterCreation => self.handle_creation_key(code),
            Screen::CharacterDelete => self.handle_delete_key(code),
            Screen::Hub => self.handle_hub_key(code),
            Screen::QuestLog => self.handle_quest_key(code),
            Screen::Combat => self.handle_combat_key(code),
            Screen::Inventory => self.handle_inventory_key(code),
            Screen::Shop => self.handle_shop_key(code),
        }
    }

    fn handle_select_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => {
                self.select_screen.selected_index = self.select_screen.selected_index.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.select_screen.selected_index + 1 < self.characters.len() {
                    self.select_screen.selected_index += 1;
                }
            }
            KeyCode::Enter => {
                let selected = match self.characters.get(self.select_screen.selected_index) {
                    Some(info) => info.clone(),
                    None => return,
                };
                if selected.is_corrupted {
                    self.select_screen.error =
                        Some(format!("{} is corrupted and cannot be played", selected.filename));
                    return;
                }
                match self.manager.load_character(&selected.name) {
                    Ok(character) => {
                        self.select_screen.error = None;
                        self.start_session(character);
                    }
                    Err(e) => self.select_screen.error = Some(e.to_string()),
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.creation_screen = CharacterCreationScreen::new();
                self.screen = Screen::CharacterCreation;
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                if self.characters.get(self.select_screen.selected_index).is_some() {
                    self.delete_screen = CharacterDeleteScreen::new();
                    self.screen = Screen::CharacterDelete;
                }
            }
            KeyCode::Esc => self.running = false,
            _ => {}
        }
    }

    fn handle_creation_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.creation_screen.handle_char_input(c),
            KeyCode::Backspace => self.creation_screen.handle_backspace(),
            KeyCode::Up => self.creation_screen.select_previous_class(),
            KeyCode::Down => self.creation_screen.select_next_class(),
            KeyCode::Enter => {
                if !self.creation_screen.is_valid() {
                    return;
                }
                let name = self.creation_screen.get_name();
                if self.manager.exists(&name) {
                    self.creation_screen.validation_error =
                        Some("A character with that name already exists".to_string());
                    return;
                }
                let created = Character::new(&name, self.creation_screen.selected_class())
                    .map_err(|e| e.to_string())
                    .and_then(|character| {
                        self.manager
                            .save_character(&character)
                            .map(|_| character)
                            .map_err(|e| format!("Save failed: {}", e))
                    });
                match created {
                    Ok(character) => {
                        self.creation_screen = CharacterCreationScreen::new();
                        self.start_session(character);
                    }
                    Err(e) => self.creation_screen.validation_error = Some(e),
                }
            }
            KeyCode::Esc => {
                self.refresh_characters();
                if self.characters.is_empty() {
                    self.running = false;
                } else {
                    self.creation_screen = CharacterCreationScreen::new();
                    self.screen = Screen::CharacterSelect;
                }
            }
            _ => {}
        }
    }

    fn handle_delete_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.delete_screen.handle_char_input(c),
            KeyCode::Backspace => self.delete_screen.handle_backspace(),
            KeyCode::Enter => {
                let name = match self.characters.get(self.select_screen.selected_index) {
                    Some(info) => info.name.clone(),
                    None => return,
                };
                if !self.delete_screen.is_confirmed(&name) {
                    return;
                }
                self.select_screen.error = self
                    .manager
                    .delete_character(&name)
                    .err()
                    .map(|e| format!("Delete failed: {}", e));
                self.refresh_characters();
                self.screen = if self.characters.is_empty() {
                    Screen::CharacterCreation
                } else {
                    Screen::CharacterSelect
                };
            }
            KeyCode::Esc => self.screen = Screen::CharacterSelect,
            _ => {}
        }
    }

    fn handle_hub_key(&mut self, code: KeyCode) {
        let action = match code {
            KeyCode::Up => {
                self.hub_screen.move_selection(false);
                return;
            }
            KeyCode::Down => {
                self.hub_screen.move_selection(true);
                return;
            }
            KeyCode::Enter => self.hub_screen.selected_action(),
            KeyCode::Esc => HubAction::SaveAndQuit,
            KeyCode::Char(c) => match HubAction::from_key(c) {
                Some(action) => action,
                None => return,
            },
            _ => return,
        };

        match action {
            HubAction::Quests => {
                self.quest_screen = QuestLogScreen::new();
                self.screen = Screen::QuestLog;
            }
            HubAction::Explore => self.explore(),
            HubAction::Inventory => {
                self.inventory_screen = InventoryScreen::new();
                self.screen = Screen::Inventory;
            }
            HubAction::Shop => {
                self.shop_screen = ShopScreen::new();
                self.screen = Screen::Shop;
            }
            HubAction::SaveAndQuit => self.leave_session(),
        }
    }

    fn explore(&mut self) {
        let session = match &self.session {
            Some(session) => session,
            None => return,
        };
        match session.explore() {
            Ok(battle) => {
                self.log
                    .info(format!("You venture out and meet a {}.", battle.enemy().name));
                self.combat = Some(CombatScreen::new(battle));
                self.screen = Screen::Combat;
            }
            Err(e) => self.log.error(e.to_string()),
        }
    }

    fn handle_quest_key(&mut self, code: KeyCode) {
        let session = match self.session.as_mut() {
            Some(session) => session,
            None => return,
        };

        match code {
            KeyCode::Tab => self.quest_screen.next_tab(),
            KeyCode::Up => self.quest_screen.move_selection(session, false),
            KeyCode::Down => self.quest_screen.move_selection(session, true),
            KeyCode::Enter => {
                let quest_id = match self.quest_screen.selected_quest_id(session) {
                    Some(id) => id,
                    None => return,
                };
                let title = quest_title(session, &quest_id);
                match self.quest_screen.tab {
                    QuestTab::Available => match session.accept_quest(&quest_id) {
                        Ok(AcceptOutcome::Accepted) => {
                            self.log.success(format!("Quest accepted: {}", title))
                        }
                        Ok(AcceptOutcome::AlreadyActive) => {
                            self.log.info(format!("{} is already in progress", title))
                        }
                        Err(e) => self.log.error(e.to_string()),
                    },
                    QuestTab::Active => match session.complete_quest(&quest_id) {
                        Ok(summary) => {
                            self.log.success(format!(
                                "Quest complete: {}! +{} XP, +{} gold",
                                title, summary.rewards.xp, summary.rewards.gold
                            ));
                            log_level_ups(&mut self.log, session, &summary);
                        }
                        Err(e) => self.log.error(e.to_string()),
                    },
                    QuestTab::Completed => {}
                }
                self.quest_screen.clamp_selection(session);
            }
            KeyCode::Char('x') | KeyCode::Char('X') => {
                if self.quest_screen.tab != QuestTab::Active {
                    return;
                }
                if let Some(quest_id) = self.quest_screen.selected_quest_id(session) {
                    let title = quest_title(session, &quest_id);
                    match session.abandon_quest(&quest_id) {
                        Ok(()) => self.log.info(format!("Quest abandoned: {}", title)),
                        Err(e) => self.log.error(e.to_string()),
                    }
                    self.quest_screen.clamp_selection(session);
                }
            }
            KeyCode::Esc => self.back_to_hub(),
            _ => {}
        }
    }

    fn handle_combat_key(&mut self, code: KeyCode) {
        let (session, combat) = match (self.session.as_mut(), self.combat.as_mut()) {
            (Some(session), Some(combat)) => (session, combat),
            _ => return,
        };

        let phase = combat.phase;
        match phase {
            CombatPhase::Fighting => {
                let action = match code {
                    KeyCode::Char('a') | KeyCode::Char('A') => PlayerAction::Attack,
                    KeyCode::Char('s') | KeyCode::Char('S') => PlayerAction::SpecialAbility,
                    KeyCode::Char('f') | KeyCode::Char('F') => PlayerAction::Flee,
                    _ => return,
                };
                match session.fight_round(&mut combat.battle, action, &mut self.rng) {
                    Ok(events) => combat.record(&events),
                    Err(e) => self.log.error(e.to_string()),
                }
                if !combat.battle.is_active() {
                    let result = session.finish_battle(&combat.battle);
                    if let Ok(Some(summary)) = &result {
                        log_level_ups(&mut self.log, session, summary);
                    }
                    combat.conclude(result);
                }
            }
            CombatPhase::Finished => {
                if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                    match combat.battle.outcome() {
                        Some(BattleOutcome::Victory(rewards)) => self.log.success(format!(
                            "You defeated the {}. +{} XP, +{} gold",
                            combat.battle.enemy().name,
                            rewards.xp,
                            rewards.gold
                        )),
                        Some(BattleOutcome::Escaped) => self.log.info("You fled back to town."),
                        _ => {}
                    }
                    self.combat = None;
                    self.back_to_hub();
                }
            }
            CombatPhase::Dead => {
                let choice = match code {
                    KeyCode::Char(c) => DeathChoice::from_key(c),
                    _ => None,
                };
                match choice {
                    Some(DeathChoice::Revive) => {
                        session.revive();
                        self.log.info(format!(
                            "{} is revived with {} health.",
                            session.character.name, session.character.health
                        ));
                        self.combat = None;
                        self.back_to_hub();
                    }
                    Some(DeathChoice::Quit) => self.leave_session(),
                    None => {}
                }
            }
        }
    }

    fn handle_inventory_key(&mut self, code: KeyCode) {
        let session = match self.session.as_mut() {
            Some(session) => session,
            None => return,
        };

        match code {
            KeyCode::Up => self.inventory_screen.move_selection(session, false),
            KeyCode::Down => self.inventory_screen.move_selection(session, true),
            KeyCode::Char('w') | KeyCode::Char('W') => unequip(&mut self.log, session, EquipSlot::Weapon),
            KeyCode::Char('r') | KeyCode::Char('R') => unequip(&mut self.log, session, EquipSlot::Armor),
            KeyCode::Char(c) => {
                let item_id = match self.inventory_screen.selected_item_id(session) {
                    Some(id) => id,
                    None => return,
                };
                let name = item_name(session, &item_id);
                match c.to_ascii_lowercase() {
                    'u' => match session.use_item(&item_id) {
                        Ok(()) => self.log.success(format!("Used {}", name)),
                        Err(e) => self.log.error(e.to_string()),
                    },
                    'e' => match session.equip(&item_id) {
                        Ok(Some(previous)) => self.log.success(format!(
                            "Equipped {} (put away {})",
                            name,
                            item_name(session, &previous)
                        )),
                        Ok(None) => self.log.success(format!("Equipped {}", name)),
                        Err(e) => self.log.error(e.to_string()),
                    },
                    'x' => match session.drop_item(&item_id) {
                        Ok(()) => self.log.info(format!("Dropped {}", name)),
                        Err(e) => self.log.error(e.to_string()),
                    },
                    _ => return,
                }
            }
            KeyCode::Esc => {
                self.back_to_hub();
                return;
            }
            _ => return,
        }

        if let Some(session) = &self.session {
            self.inventory_screen.clamp_selection(session);
        }
    }

    fn handle_shop_key(&mut self, code: KeyCode) {
        let session = match self.session.as_mut() {
            Some(session) => session,
            None => return,
        };

        match code {
            KeyCode::Tab => self.shop_screen.toggle_mode(),
            KeyCode::Up => self.shop_screen.move_selection(session, false),
            KeyCode::Down => self.shop_screen.move_selection(session, true),
            KeyCode::Enter => {
                let item_id = match self.shop_screen.selected_item_id(session) {
                    Some(id) => id,
                    None => return,
                };
                let name = item_name(session, &item_id);
                match self.shop_screen.mode {
                    ShopMode::Buy => match session.buy(&item_id) {
                        Ok(()) => self.log.success(format!("Bought {}", name)),
                        Err(e) => self.log.error(e.to_string()),
                    },
                    ShopMode::Sell => match session.sell(&item_id) {
                        Ok(price) => self.log.success(format!("Sold {} for {} gold", name, price)),
                        Err(e) => self.log.error(e.to_string()),
                    },
                }
                self.shop_screen.clamp_selection(session);
            }
            KeyCode::Esc => self.back_to_hub(),
            _ => {}
        }
    }
}

fn unequip(log: &mut MessageLog, session: &mut GameSession, slot: EquipSlot) {
    match session.unequip(slot) {
        Ok(Some(item_id)) => log.info(format!("Unequipped {}", item_name(session, &item_id))),
        Ok(None) => log.info(format!("No {} equipped", slot.item_type())),
        Err(e) => log.error(e.to_string()),
    }
}

fn log_level_ups(log: &mut MessageLog, session: &GameSession, summary: &RewardSummary) {
    if summary.levels_gained > 0 {
        log.success(format!(
            "{} reached level {}!",
            session.character.name, session.character.level
        ));
    }
}

fn item_name(session: &GameSession, item_id: &str) -> String {
    session
        .data()
        .items
        .get(item_id)
        .map(|item| item.name.clone())
        .unwrap_or_else(|| item_id.to_string())
}

fn quest_title(session: &GameSession, quest_id: &str) -> String {
    session
        .data()
        .quests
        .get(quest_id)
        .map(|quest| quest.title.clone())
        .unwrap_or_else(|| quest_id.to_string())
}
