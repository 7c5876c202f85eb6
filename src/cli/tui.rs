use std::collections::BTreeSet;
use std::io::{self, Stdout, stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::Frame;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::cli::icons::icon_glyph;
use crate::game::{
    Catalog, CategoryDraft, Player, RoundSettings, SUGGESTED_ICONS, Screen, Session,
};
use crate::haptics::{HapticDriver, NoopHaptics};
use crate::storage::{KvStore, SettingsRepo};
use crate::types::{Haptic, PlayerId, SessionAction};

pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Roster editor scratch state. Rows without an id are new players; ids are
/// assigned at save time so renames keep identity.
struct PlayersEditor {
    rows: Vec<(Option<PlayerId>, String)>,
    cursor: usize,
    input: Option<String>,
    error: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CustomFocus {
    Name,
    NewWord,
    Icons,
}

/// Custom-category editor scratch state, covering both create and edit.
struct CustomEditor {
    id: Option<String>,
    name: String,
    words: Vec<String>,
    new_word: String,
    icon_idx: usize,
    focus: CustomFocus,
    error: Option<String>,
}

enum Mode {
    Start,
    HowTo,
    Game,
    EditPlayers(PlayersEditor),
    EditImposters { count: u32 },
    EditCategories { selected: BTreeSet<String>, cursor: usize },
    ManageCustom { cursor: usize, confirm_delete: Option<String> },
    EditCustom(Box<CustomEditor>),
}

pub struct TuiApp<S: KvStore> {
    session: Session,
    repo: SettingsRepo<S>,
    haptics: Box<dyn HapticDriver>,
    mode: Mode,
    roster_cursor: usize,
    status: Option<String>,
    should_quit: bool,
}

impl<S: KvStore> TuiApp<S> {
    pub fn new(session: Session, repo: SettingsRepo<S>) -> Self {
        Self {
            session,
            repo,
            haptics: Box::new(NoopHaptics),
            mode: Mode::Start,
            roster_cursor: 0,
            status: None,
            should_quit: false,
        }
    }

    pub fn with_haptics(mut self, haptics: Box<dyn HapticDriver>) -> Self {
        self.haptics = haptics;
        self
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let stdout = stdout();
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?; // clear cargo/run output before first draw

        let result = loop {
            if self.should_quit {
                break Ok(());
            }

            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        };

        // Always cleanup terminal state
        let _ = terminal.clear();
        let _ = disable_raw_mode();
        let _ = execute!(terminal.backend_mut(), crossterm::cursor::Show);
        let _ = terminal.show_cursor();

        result
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;
        let mode = std::mem::replace(&mut self.mode, Mode::Game);
        self.mode = match mode {
            Mode::Start => self.handle_start_key(key),
            // Any key leaves the rules overlay.
            Mode::HowTo => Mode::Start,
            Mode::Game => self.handle_game_key(key),
            Mode::EditPlayers(editor) => self.handle_players_key(key, editor),
            Mode::EditImposters { count } => self.handle_imposters_key(key, count),
            Mode::EditCategories { selected, cursor } => {
                self.handle_categories_key(key, selected, cursor)
            }
            Mode::ManageCustom { cursor, confirm_delete } => {
                self.handle_manage_key(key, cursor, confirm_delete)
            }
            Mode::EditCustom(editor) => self.handle_custom_key(key, editor),
        };
    }

    fn handle_start_key(&mut self, key: KeyEvent) -> Mode {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                Mode::Start
            }
            KeyCode::Char('h') => Mode::HowTo,
            KeyCode::Enter | KeyCode::Char('g') => Mode::Game,
            _ => Mode::Start,
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> Mode {
        match self.session.screen() {
            Screen::Setup => self.handle_setup_key(key),
            Screen::RosterList => self.handle_roster_key(key),
            Screen::PlayerCard { .. } => self.handle_card_key(key),
            Screen::GroupReveal => self.handle_group_reveal_key(key),
        }
    }

    fn handle_setup_key(&mut self, key: KeyEvent) -> Mode {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                Mode::Game
            }
            KeyCode::Char('p') => {
                let rows = self
                    .session
                    .settings
                    .players
                    .iter()
                    .map(|p| (Some(p.id), p.name.clone()))
                    .collect();
                Mode::EditPlayers(PlayersEditor { rows, cursor: 0, input: None, error: None })
            }
            KeyCode::Char('i') => {
                Mode::EditImposters { count: self.session.settings.imposter_count }
            }
            KeyCode::Char('c') => Mode::EditCategories {
                selected: self.session.settings.selected_category_names.clone(),
                cursor: 0,
            },
            KeyCode::Char('m') => Mode::ManageCustom { cursor: 0, confirm_delete: None },
            KeyCode::Char('s') | KeyCode::Enter => {
                match self.session.step(SessionAction::StartGame) {
                    Ok(()) => {
                        self.haptics.trigger(Haptic::Success);
                        self.roster_cursor = 0;
                    }
                    Err(err) => {
                        self.haptics.trigger(Haptic::Warning);
                        self.status = Some(err.to_string());
                    }
                }
                Mode::Game
            }
            _ => Mode::Game,
        }
    }

    fn handle_roster_key(&mut self, key: KeyEvent) -> Mode {
        let player_count = self.session.round().map_or(0, |r| r.players.len());
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.roster_cursor = self.roster_cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.roster_cursor + 1 < player_count {
                    self.roster_cursor += 1;
                }
            }
            KeyCode::Enter => {
                let selected = self
                    .session
                    .round()
                    .and_then(|r| r.players.get(self.roster_cursor))
                    .map(|p| p.id);
                if let Some(id) = selected {
                    if self.session.is_seen(id) {
                        self.status = Some("That card has already been seen.".to_string());
                        self.haptics.trigger(Haptic::Warning);
                    } else {
                        let _ = self.session.step(SessionAction::SelectPlayer(id));
                        self.haptics.trigger(Haptic::Selection);
                    }
                }
            }
            KeyCode::Char('r') => {
                let _ = self.session.step(SessionAction::RevealImposters);
                self.haptics.trigger(Haptic::Heavy);
            }
            KeyCode::Char('e') | KeyCode::Esc => {
                let _ = self.session.step(SessionAction::EditSettings);
            }
            _ => {}
        }
        Mode::Game
    }

    fn handle_card_key(&mut self, key: KeyEvent) -> Mode {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                let _ = self.session.step(SessionAction::FlipCard);
                self.haptics.trigger(Haptic::Medium);
            }
            KeyCode::Char('b') | KeyCode::Esc | KeyCode::Backspace => {
                // Leaving the card always marks the player as seen.
                let _ = self.session.step(SessionAction::Acknowledge);
                self.haptics.trigger(Haptic::Light);
            }
            _ => {}
        }
        Mode::Game
    }

    fn handle_group_reveal_key(&mut self, key: KeyEvent) -> Mode {
        match key.code {
            KeyCode::Char('b') | KeyCode::Backspace => {
                let _ = self.session.step(SessionAction::Back);
            }
            KeyCode::Char('n') => {
                let _ = self.session.step(SessionAction::Restart);
                self.haptics.trigger(Haptic::Success);
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
        Mode::Game
    }

    fn handle_players_key(&mut self, key: KeyEvent, mut editor: PlayersEditor) -> Mode {
        // Renaming mode captures all character input first.
        if let Some(buffer) = editor.input.as_mut() {
            match key.code {
                KeyCode::Char(c) => buffer.push(c),
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Enter => {
                    let committed = editor.input.take().unwrap_or_default();
                    if let Some(row) = editor.rows.get_mut(editor.cursor) {
                        row.1 = committed;
                    }
                }
                KeyCode::Esc => {
                    editor.input = None;
                }
                _ => {}
            }
            return Mode::EditPlayers(editor);
        }

        let move_row = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Up if move_row => {
                if editor.cursor > 0 {
                    editor.rows.swap(editor.cursor, editor.cursor - 1);
                    editor.cursor -= 1;
                }
            }
            KeyCode::Down if move_row => {
                if editor.cursor + 1 < editor.rows.len() {
                    editor.rows.swap(editor.cursor, editor.cursor + 1);
                    editor.cursor += 1;
                }
            }
            KeyCode::Up => editor.cursor = editor.cursor.saturating_sub(1),
            KeyCode::Down => {
                if editor.cursor + 1 < editor.rows.len() {
                    editor.cursor += 1;
                }
            }
            KeyCode::Enter => {
                let current = editor.rows.get(editor.cursor).map(|r| r.1.clone());
                editor.input = current;
            }
            KeyCode::Char('a') => {
                editor.rows.push((None, String::new()));
                editor.cursor = editor.rows.len() - 1;
                editor.input = Some(String::new());
            }
            KeyCode::Char('d') => {
                if editor.rows.len() > 1 {
                    editor.rows.remove(editor.cursor);
                    editor.cursor = editor.cursor.min(editor.rows.len() - 1);
                }
            }
            KeyCode::Char('s') => {
                let mut next_id = self.session.settings.next_player_id();
                let players: Vec<Player> = editor
                    .rows
                    .iter()
                    .map(|(id, name)| {
                        let id = id.unwrap_or_else(|| {
                            let fresh = next_id;
                            next_id += 1;
                            fresh
                        });
                        Player::new(id, name.clone())
                    })
                    .collect();
                match self.session.settings.apply_roster(players) {
                    Ok(()) => {
                        self.repo.save_settings(&self.session.settings);
                        self.haptics.trigger(Haptic::Success);
                        return Mode::Game;
                    }
                    Err(err) => {
                        editor.error = Some(err.to_string());
                        self.haptics.trigger(Haptic::Error);
                    }
                }
            }
            KeyCode::Esc => return Mode::Game,
            _ => {}
        }
        Mode::EditPlayers(editor)
    }

    fn handle_imposters_key(&mut self, key: KeyEvent, count: u32) -> Mode {
        let max = self.session.settings.max_imposters();
        match key.code {
            KeyCode::Left | KeyCode::Down => {
                Mode::EditImposters { count: count.saturating_sub(1).max(1) }
            }
            KeyCode::Right | KeyCode::Up => Mode::EditImposters { count: (count + 1).min(max) },
            KeyCode::Enter | KeyCode::Char('s') => {
                self.session.settings.set_imposter_count(count);
                self.repo.save_settings(&self.session.settings);
                self.haptics.trigger(Haptic::Success);
                Mode::Game
            }
            KeyCode::Esc => Mode::Game,
            _ => Mode::EditImposters { count },
        }
    }

    fn handle_categories_key(
        &mut self,
        key: KeyEvent,
        mut selected: BTreeSet<String>,
        mut cursor: usize,
    ) -> Mode {
        let names = sorted_category_names(&self.session.catalog);
        match key.code {
            KeyCode::Up => cursor = cursor.saturating_sub(1),
            KeyCode::Down => {
                if cursor + 1 < names.len() {
                    cursor += 1;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(name) = names.get(cursor) {
                    if !selected.remove(name) {
                        selected.insert(name.clone());
                    }
                    self.haptics.trigger(Haptic::Selection);
                }
            }
            KeyCode::Char('a') => {
                selected = names.iter().cloned().collect();
            }
            KeyCode::Enter | KeyCode::Char('s') => {
                // An empty selection falls back to every category.
                self.session
                    .settings
                    .set_selected_categories(selected, &self.session.catalog);
                self.repo.save_settings(&self.session.settings);
                self.haptics.trigger(Haptic::Success);
                return Mode::Game;
            }
            KeyCode::Esc => return Mode::Game,
            _ => {}
        }
        Mode::EditCategories { selected, cursor }
    }

    fn handle_manage_key(
        &mut self,
        key: KeyEvent,
        mut cursor: usize,
        confirm_delete: Option<String>,
    ) -> Mode {
        let customs = self.session.catalog.custom_categories();
        let count = customs.len();

        if let Some(pending) = confirm_delete {
            return match key.code {
                KeyCode::Char('d') | KeyCode::Enter => {
                    if self.session.remove_custom_category(&pending) {
                        self.repo
                            .save_custom_categories(self.session.catalog.custom_categories());
                        self.repo.save_settings(&self.session.settings);
                        self.haptics.trigger(Haptic::Heavy);
                    }
                    let remaining = self.session.catalog.custom_categories().len();
                    Mode::ManageCustom {
                        cursor: cursor.min(remaining.saturating_sub(1)),
                        confirm_delete: None,
                    }
                }
                _ => Mode::ManageCustom { cursor, confirm_delete: None },
            };
        }

        match key.code {
            KeyCode::Up => cursor = cursor.saturating_sub(1),
            KeyCode::Down => {
                if cursor + 1 < count {
                    cursor += 1;
                }
            }
            KeyCode::Char('a') => {
                return Mode::EditCustom(Box::new(CustomEditor {
                    id: None,
                    name: String::new(),
                    words: Vec::new(),
                    new_word: String::new(),
                    icon_idx: 0,
                    focus: CustomFocus::Name,
                    error: None,
                }));
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(category) = customs.get(cursor) {
                    let icon_idx = category
                        .icon
                        .as_deref()
                        .and_then(|icon| SUGGESTED_ICONS.iter().position(|i| *i == icon))
                        .unwrap_or(0);
                    return Mode::EditCustom(Box::new(CustomEditor {
                        id: Some(category.id.clone()),
                        name: category.name.clone(),
                        words: category.words.clone(),
                        new_word: String::new(),
                        icon_idx,
                        focus: CustomFocus::Name,
                        error: None,
                    }));
                }
            }
            KeyCode::Char('d') => {
                if let Some(category) = customs.get(cursor) {
                    return Mode::ManageCustom {
                        cursor,
                        confirm_delete: Some(category.id.clone()),
                    };
                }
            }
            KeyCode::Esc => return Mode::Game,
            _ => {}
        }
        Mode::ManageCustom { cursor, confirm_delete: None }
    }

    fn handle_custom_key(&mut self, key: KeyEvent, mut editor: Box<CustomEditor>) -> Mode {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            let draft = CategoryDraft {
                name: editor.name.clone(),
                icon: Some(SUGGESTED_ICONS[editor.icon_idx].to_string()),
                words: editor.words.clone(),
            };
            let result = match &editor.id {
                Some(id) => self.session.update_custom_category(id, &draft),
                None => self.session.add_custom_category(&draft).map(|_| ()),
            };
            return match result {
                Ok(()) => {
                    self.repo
                        .save_custom_categories(self.session.catalog.custom_categories());
                    self.repo.save_settings(&self.session.settings);
                    self.haptics.trigger(Haptic::Success);
                    Mode::ManageCustom { cursor: 0, confirm_delete: None }
                }
                Err(err) => {
                    editor.error = Some(err.to_string());
                    self.haptics.trigger(Haptic::Error);
                    Mode::EditCustom(editor)
                }
            };
        }

        match key.code {
            KeyCode::Esc => return Mode::ManageCustom { cursor: 0, confirm_delete: None },
            KeyCode::Tab => {
                editor.focus = match editor.focus {
                    CustomFocus::Name => CustomFocus::NewWord,
                    CustomFocus::NewWord => CustomFocus::Icons,
                    CustomFocus::Icons => CustomFocus::Name,
                };
            }
            KeyCode::Char(c) if editor.focus == CustomFocus::Name => editor.name.push(c),
            KeyCode::Backspace if editor.focus == CustomFocus::Name => {
                editor.name.pop();
            }
            KeyCode::Char(c) if editor.focus == CustomFocus::NewWord => editor.new_word.push(c),
            KeyCode::Backspace if editor.focus == CustomFocus::NewWord => {
                // An empty input removes the most recent word instead.
                if editor.new_word.pop().is_none() {
                    editor.words.pop();
                }
            }
            KeyCode::Enter if editor.focus == CustomFocus::NewWord => {
                let word = editor.new_word.trim().to_string();
                if !word.is_empty() && !editor.words.contains(&word) {
                    editor.words.push(word);
                    editor.error = None;
                }
                editor.new_word.clear();
            }
            KeyCode::Left if editor.focus == CustomFocus::Icons => {
                editor.icon_idx =
                    (editor.icon_idx + SUGGESTED_ICONS.len() - 1) % SUGGESTED_ICONS.len();
            }
            KeyCode::Right if editor.focus == CustomFocus::Icons => {
                editor.icon_idx = (editor.icon_idx + 1) % SUGGESTED_ICONS.len();
            }
            _ => {}
        }
        Mode::EditCustom(editor)
    }

    fn render(&mut self, f: &mut Frame<'_>) {
        let area = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),   // Main content
                Constraint::Length(3), // Help/status bar
            ])
            .split(area);

        match &self.mode {
            Mode::Start => self.render_start(f, chunks[0]),
            Mode::HowTo => self.render_howto(f, chunks[0]),
            Mode::Game => self.render_game(f, chunks[0]),
            Mode::EditPlayers(editor) => render_players_editor(f, chunks[0], editor),
            Mode::EditImposters { count } => {
                render_imposters_editor(f, chunks[0], *count, &self.session.settings)
            }
            Mode::EditCategories { selected, cursor } => {
                render_categories_editor(f, chunks[0], &self.session.catalog, selected, *cursor)
            }
            Mode::ManageCustom { cursor, confirm_delete } => render_custom_manager(
                f,
                chunks[0],
                &self.session.catalog,
                *cursor,
                confirm_delete.as_deref(),
            ),
            Mode::EditCustom(editor) => render_custom_editor(f, chunks[0], editor),
        }

        self.render_status_bar(f, chunks[1]);
    }

    fn render_start(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "I M P O S T E R",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Word Game", Style::default().fg(Color::Cyan))),
            Line::from(""),
            Line::from("A party game of hidden ideas and cunning clues"),
            Line::from(""),
            Line::from(vec![
                Span::styled("[Enter]", Style::default().fg(Color::Green)),
                Span::raw(" Get Started    "),
                Span::styled("[h]", Style::default().fg(Color::Green)),
                Span::raw(" How to Play    "),
                Span::styled("[q]", Style::default().fg(Color::Green)),
                Span::raw(" Quit"),
            ]),
        ];
        let card = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(card, centered(area, 60, 11));
    }

    fn render_howto(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from("Everyone but the imposters gets the same secret word."),
            Line::from("Pass the device around; each player privately flips their card."),
            Line::from("Imposters see \"Imposter\" instead of the word."),
            Line::from("Then take turns describing the word without giving it away,"),
            Line::from("vote on who the imposter is, and reveal."),
            Line::from(""),
            Line::from("Press any key to go back."),
        ];
        let card = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("How to Play"))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        f.render_widget(card, centered(area, 70, 9));
    }

    fn render_game(&self, f: &mut Frame<'_>, area: Rect) {
        match self.session.screen() {
            Screen::Setup => self.render_setup(f, area),
            Screen::RosterList => self.render_roster(f, area),
            Screen::PlayerCard { .. } => self.render_card(f, area),
            Screen::GroupReveal => self.render_group_reveal(f, area),
        }
    }

    fn render_setup(&self, f: &mut Frame<'_>, area: Rect) {
        let settings = &self.session.settings;
        let all = self.session.catalog.names().len();
        let selected = settings.selected_category_names.len();
        let category_summary = if selected == all {
            "All".to_string()
        } else {
            format!("{selected} of {all}")
        };

        let row = |label: &str, value: String, hint: &str| {
            Line::from(vec![
                Span::styled(format!("{label:<12}"), Style::default().fg(Color::Cyan)),
                Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!("   {hint}"), Style::default().fg(Color::DarkGray)),
            ])
        };

        let lines = vec![
            Line::from(Span::styled(
                "Game Settings",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            row("Players", settings.players.len().to_string(), "[p] edit"),
            row("Imposters", settings.imposter_count.to_string(), "[i] edit"),
            row("Categories", category_summary, "[c] edit  [m] manage custom"),
            Line::from(""),
            Line::from(vec![
                Span::styled("[s]", Style::default().fg(Color::Green)),
                Span::raw(" Start Game"),
            ]),
        ];
        let card = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Left);
        f.render_widget(card, centered(area, 60, 11));
    }

    fn render_roster(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(round) = self.session.round() else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(4)])
            .split(area);

        let header = Paragraph::new(Line::from(vec![
            Span::raw("Category: "),
            Span::styled(
                round.category.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "   Tap your name to see your card.",
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, chunks[0]);

        let items: Vec<ListItem<'_>> = round
            .players
            .iter()
            .enumerate()
            .map(|(idx, player)| {
                let seen = self.session.is_seen(player.id);
                let mut style = if idx == self.roster_cursor {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                if seen {
                    style = style.fg(Color::DarkGray);
                }
                let marker = if seen { " ✓ Seen" } else { "" };
                ListItem::new(format!("{}{}", player.name, marker)).style(style)
            })
            .collect();

        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Players"));
        let mut state = ListState::default();
        state.select(Some(self.roster_cursor));
        f.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn render_card(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(player) = self.session.active_player() else {
            return;
        };
        let category = self
            .session
            .round()
            .map(|r| r.category.clone())
            .unwrap_or_default();

        let lines = match self.session.card_word() {
            None => vec![
                Line::from(Span::styled(
                    player.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒"),
                Line::from(""),
                Line::from(Span::styled(
                    "Press Enter to flip your card",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
            Some(word) => vec![
                Line::from(Span::styled(
                    player.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    word.to_string(),
                    Style::default()
                        .fg(if word == "Imposter" { Color::Red } else { Color::Green })
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Category: {category}"),
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        };

        let card = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(card, centered(area, 50, 9));
    }

    fn render_group_reveal(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(view) = self.session.group_reveal() else {
            return;
        };

        let mut lines = vec![Line::from(Span::styled(
            if view.imposter_names.len() > 1 { "THE IMPOSTERS" } else { "THE IMPOSTER" },
            Style::default().fg(Color::DarkGray),
        ))];
        for name in &view.imposter_names {
            lines.push(Line::from(Span::styled(
                format!("✗ {name}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "THE SECRET WORD",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            view.secret_word.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("Category: {}", view.category)));

        let card = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(card, centered(area, 50, (view.imposter_names.len() + 8) as u16));
    }

    fn render_status_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let (text, style) = match &self.status {
            Some(message) => (message.clone(), Style::default().fg(Color::Red)),
            None => (self.help_text().to_string(), Style::default().fg(Color::White)),
        };
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL))
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }

    fn help_text(&self) -> &'static str {
        match &self.mode {
            Mode::Start => "Enter: start | h: how to play | q: quit",
            Mode::HowTo => "Any key: back",
            Mode::Game => match self.session.screen() {
                Screen::Setup => "p/i/c/m: edit settings | s: start game | q: quit",
                Screen::RosterList => {
                    "↑/↓: choose | Enter: view card | r: reveal imposter | e: edit settings"
                }
                Screen::PlayerCard { .. } => "Enter: flip | b/Esc: back to players",
                Screen::GroupReveal => "b: back to players | n: start new game | q: quit",
            },
            Mode::EditPlayers(editor) if editor.input.is_some() => {
                "Type name | Enter: done | Esc: cancel"
            }
            Mode::EditPlayers(_) => {
                "↑/↓: choose | Enter: rename | a: add | d: delete | Ctrl+↑/↓: move | s: save | Esc: cancel"
            }
            Mode::EditImposters { .. } => "←/→: adjust | Enter: save | Esc: cancel",
            Mode::EditCategories { .. } => {
                "↑/↓: choose | Space: toggle | a: select all | Enter: save | Esc: cancel"
            }
            Mode::ManageCustom { confirm_delete: Some(_), .. } => {
                "d/Enter: confirm delete | any other key: keep"
            }
            Mode::ManageCustom { .. } => {
                "↑/↓: choose | a: add list | Enter: edit | d: delete | Esc: back"
            }
            Mode::EditCustom(_) => {
                "Tab: next field | Enter: add word | ←/→: icon | Ctrl+s: save | Esc: cancel"
            }
        }
    }
}

fn sorted_category_names(catalog: &Catalog) -> Vec<String> {
    let mut names = catalog.names();
    names.sort();
    names
}

/// Fixed-size rect centered in `area`, clamped to fit.
fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = (area.width * percent_x / 100).min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

fn render_players_editor(f: &mut Frame<'_>, area: Rect, editor: &PlayersEditor) {
    let items: Vec<ListItem<'_>> = editor
        .rows
        .iter()
        .enumerate()
        .map(|(idx, (_, name))| {
            let is_cursor = idx == editor.cursor;
            let text = match (&editor.input, is_cursor) {
                (Some(buffer), true) => format!("{buffer}▏"),
                _ if name.is_empty() => "(unnamed)".to_string(),
                _ => name.clone(),
            };
            let style = if is_cursor {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(2)])
        .split(centered(area, 60, area.height));

    let list =
        List::new(items).block(Block::default().borders(Borders::ALL).title("Edit Players"));
    f.render_widget(list, chunks[0]);

    if let Some(error) = &editor.error {
        let message = Paragraph::new(error.clone()).style(Style::default().fg(Color::Red));
        f.render_widget(message, chunks[1]);
    }
}

fn render_imposters_editor(f: &mut Frame<'_>, area: Rect, count: u32, settings: &RoundSettings) {
    let max = settings.max_imposters();
    let filled = "■".repeat(count as usize);
    let empty = "□".repeat(max.saturating_sub(count) as usize);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Imposters: {count}"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{filled}{empty}")),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Choose between 1 and {max} (based on {} players)",
                settings.players.len()
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let card = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Edit Imposter Count"))
        .alignment(Alignment::Center);
    f.render_widget(card, centered(area, 60, 8));
}

fn render_categories_editor(
    f: &mut Frame<'_>,
    area: Rect,
    catalog: &Catalog,
    selected: &BTreeSet<String>,
    cursor: usize,
) {
    let categories = catalog.all();
    let names = sorted_category_names(catalog);
    let total = names.len();

    let items: Vec<ListItem<'_>> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let is_selected = selected.contains(name);
            let glyph = categories
                .iter()
                .find(|c| &c.name == name)
                .and_then(|c| c.icon.as_deref())
                .and_then(icon_glyph)
                .unwrap_or(" ");
            let check = if is_selected { "[x]" } else { "[ ]" };
            let mut style = if idx == cursor {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            if is_selected && idx != cursor {
                style = style.fg(Color::Green);
            }
            ListItem::new(format!("{check} {glyph} {name}")).style(style)
        })
        .collect();

    let summary = if selected.len() == total {
        "All categories selected".to_string()
    } else {
        format!("{} of {} selected", selected.len(), total)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(4)])
        .split(centered(area, 60, area.height));

    f.render_widget(
        Paragraph::new(summary).style(Style::default().fg(Color::DarkGray)),
        chunks[0],
    );
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Select Categories"));
    f.render_widget(list, chunks[1]);
}

fn render_custom_manager(
    f: &mut Frame<'_>,
    area: Rect,
    catalog: &Catalog,
    cursor: usize,
    confirm_delete: Option<&str>,
) {
    let customs = catalog.custom_categories();
    let items: Vec<ListItem<'_>> = if customs.is_empty() {
        vec![ListItem::new("No custom lists yet. Press 'a' to create one.")
            .style(Style::default().fg(Color::DarkGray))]
    } else {
        customs
            .iter()
            .enumerate()
            .map(|(idx, category)| {
                let glyph = category
                    .icon
                    .as_deref()
                    .and_then(icon_glyph)
                    .unwrap_or("✦");
                let pending = confirm_delete == Some(category.id.as_str());
                let text = if pending {
                    format!("{glyph} {} (press d again to delete)", category.name)
                } else {
                    format!("{glyph} {} ({} words)", category.name, category.words.len())
                };
                let style = if pending {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else if idx == cursor {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(text).style(style)
            })
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Custom Word Lists"));
    f.render_widget(list, centered(area, 60, area.height));
}

fn render_custom_editor(f: &mut Frame<'_>, area: Rect, editor: &CustomEditor) {
    let focus_style = |focused: bool| {
        if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };

    let icon_name = SUGGESTED_ICONS[editor.icon_idx];
    let icon = icon_glyph(icon_name).unwrap_or("✦");
    let words = if editor.words.is_empty() {
        "Add at least 3 words to save".to_string()
    } else {
        editor.words.join(", ")
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Name: ", focus_style(editor.focus == CustomFocus::Name)),
            Span::raw(if editor.name.is_empty() && editor.focus != CustomFocus::Name {
                "e.g., Movie Characters, Video Games...".to_string()
            } else {
                format!("{}▏", editor.name)
            }),
        ]),
        Line::from(vec![
            Span::styled("Icon: ", focus_style(editor.focus == CustomFocus::Icons)),
            Span::raw(format!("{icon} {icon_name}")),
        ]),
        Line::from(vec![
            Span::styled(
                "New word: ",
                focus_style(editor.focus == CustomFocus::NewWord),
            ),
            Span::raw(format!("{}▏", editor.new_word)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("Words ({}): ", editor.words.len()),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(words),
        ]),
    ];
    if let Some(error) = &editor.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let title = if editor.id.is_some() { "Edit Word List" } else { "Create Word List" };
    let card = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(card, centered(area, 70, 12));
}
