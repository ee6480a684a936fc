use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::ListState;
use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use tui_textarea::{CursorMove, Input, TextArea};

use crate::groups::{Category, Group};
use crate::search::{SearchCoordinator, SearchEvent, SearchRequest, SearchState};
use crate::tui::theme::Theme;

const CTRL_C_WINDOW: Duration = Duration::from_secs(3);
const INPUT_PLACEHOLDER: &str = "Type a topic and press Enter";

/// Single-line search box seeded with `text`, cursor at the end.
pub fn search_textarea(text: &str) -> TextArea<'static> {
    let mut textarea = TextArea::from([text.to_string()]);
    textarea.set_placeholder_text(INPUT_PLACEHOLDER);
    textarea.move_cursor(CursorMove::End);
    textarea
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Categories,
    Results,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Categories,
            Focus::Categories => Focus::Results,
            Focus::Results => Focus::Input,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

pub struct TuiApp {
    pub title: String,
    pub model: String,
    pub textarea: TextArea<'static>,
    pub focus: Focus,
    pub category_cursor: usize,
    pub list_state: ListState,
    pub theme: Theme,
    pub notice: Option<String>,
    pub spinner_state: usize,
    pub credentials_missing: bool,
    pub(crate) dirty: bool,
    pub(crate) coordinator: SearchCoordinator,
    pub(crate) inbox_rx: Receiver<SearchEvent>,
    pub(crate) inbox_tx: Sender<SearchEvent>,
    last_ctrl_c_at: Option<Instant>,
}

impl TuiApp {
    pub fn new(
        title: impl Into<String>,
        model: impl Into<String>,
        coordinator: SearchCoordinator,
        theme: Theme,
    ) -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        let textarea = search_textarea(&coordinator.state().query);
        let category_cursor = coordinator
            .state()
            .category
            .map(Category::index)
            .unwrap_or(0);
        Self {
            title: title.into(),
            model: model.into(),
            textarea,
            focus: Focus::Input,
            category_cursor,
            list_state: ListState::default(),
            theme,
            notice: None,
            spinner_state: 0,
            credentials_missing: false,
            dirty: true,
            coordinator,
            inbox_rx: rx,
            inbox_tx: tx,
            last_ctrl_c_at: None,
        }
    }

    pub fn with_credentials_missing(mut self, missing: bool) -> Self {
        self.credentials_missing = missing;
        if missing {
            self.notice = Some("No API key configured; set GEMINI_API_KEY".to_string());
        }
        self
    }

    /// Current query text. The box is single-line; stray line breaks join
    /// with a space.
    pub fn input_text(&self) -> String {
        self.textarea.lines().join(" ")
    }

    pub fn set_input(&mut self, text: &str) {
        self.textarea = search_textarea(text);
    }

    pub fn sender(&self) -> Sender<SearchEvent> {
        self.inbox_tx.clone()
    }

    pub fn search(&self) -> &SearchState {
        self.coordinator.state()
    }

    fn start(&mut self, req: SearchRequest) {
        debug!(seq = req.seq, trigger = ?req.trigger, "tui search started");
        self.spinner_state = 0;
        self.coordinator.spawn(req, self.sender());
        self.dirty = true;
    }

    pub fn mount(&mut self) {
        if let Some(req) = self.coordinator.mount() {
            self.start(req);
        }
    }

    pub fn submit(&mut self) {
        self.coordinator.set_query(self.input_text().trim());
        let req = self.coordinator.submit();
        self.start(req);
    }

    pub fn select_category(&mut self, category: Option<Category>) {
        if let Some(c) = category {
            self.category_cursor = c.index();
        }
        match self.coordinator.select_category(category) {
            Some(req) => self.start(req),
            None => self.dirty = true,
        }
    }

    /// Select the chip under the cursor; selecting the active chip clears it.
    pub fn toggle_category_at_cursor(&mut self) {
        let chip = Category::ALL[self.category_cursor % Category::ALL.len()];
        if self.search().category == Some(chip) {
            self.select_category(None);
        } else {
            self.select_category(Some(chip));
        }
    }

    /// Apply finished searches. Returns true if anything changed.
    pub fn drain_inbox(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.inbox_rx.try_recv() {
            if self.coordinator.apply(event) {
                let selected = if self.search().groups.is_empty() {
                    None
                } else {
                    Some(0)
                };
                self.list_state.select(selected);
                changed = true;
            }
        }
        if changed {
            self.dirty = true;
        }
        changed
    }

    pub fn selected_group(&self) -> Option<&Group> {
        self.list_state
            .selected()
            .and_then(|i| self.search().groups.get(i))
    }

    fn invite_of_selected(&self) -> Option<String> {
        self.selected_group()
            .map(|g| g.invite_link.trim().to_string())
            .filter(|l| !l.is_empty())
    }

    pub fn open_selected(&mut self) {
        let Some(link) = self.invite_of_selected() else {
            self.notice = Some("Selected group has no invite link".to_string());
            return;
        };
        self.notice = match crate::utils::open_url(&link) {
            Ok(()) => Some(format!("Opened {link}")),
            Err(e) => {
                warn!(error = %e, "open invite link failed");
                Some(format!("Could not open link: {e}"))
            }
        };
    }

    pub fn copy_selected(&mut self) {
        let Some(link) = self.invite_of_selected() else {
            self.notice = Some("Selected group has no invite link".to_string());
            return;
        };
        self.notice = match crate::utils::copy_to_clipboard(&link) {
            Ok(()) => Some(format!("Copied {link}")),
            Err(e) => {
                warn!(error = %e, "copy invite link failed");
                Some(format!("Could not copy link: {e}"))
            }
        };
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.search().groups.len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let cur = self.list_state.selected().unwrap_or(0) as isize;
        let next = (cur + delta).clamp(0, len as isize - 1) as usize;
        self.list_state.select(Some(next));
    }

    fn move_category_cursor(&mut self, delta: isize) {
        let n = Category::ALL.len() as isize;
        self.category_cursor = (self.category_cursor as isize + delta).rem_euclid(n) as usize;
    }

    /// Slash commands typed into the search box. Returns None when the
    /// line is not a command and should be searched for.
    fn handle_command(&mut self, line: &str) -> Option<KeyOutcome> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let (cmd, arg) = match rest.split_once(char::is_whitespace) {
            Some((c, a)) => (c, a.trim()),
            None => (rest, ""),
        };
        match cmd {
            "quit" | "exit" => return Some(KeyOutcome::Quit),
            "theme" => match Theme::from_name(arg) {
                Some(theme) => {
                    info!(theme = %theme.name, "theme switched");
                    self.notice = Some(format!("Theme: {}", theme.name));
                    self.theme = theme;
                }
                None => self.notice = Some("Usage: /theme dark|light".to_string()),
            },
            "help" => {
                self.notice = Some(
                    "Enter search · Tab focus · ←/→ chips · ↑/↓ results · o open · y copy · /theme dark|light · /quit"
                        .to_string(),
                )
            }
            _ => return None,
        }
        self.set_input("");
        Some(KeyOutcome::Continue)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind == KeyEventKind::Release {
            return KeyOutcome::Continue;
        }
        self.dirty = true;

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            let now = Instant::now();
            if let Some(prev) = self.last_ctrl_c_at
                && now.duration_since(prev) <= CTRL_C_WINDOW
            {
                return KeyOutcome::Quit;
            }
            self.last_ctrl_c_at = Some(now);
            self.notice = Some("Press Ctrl+C again to exit".to_string());
            return KeyOutcome::Continue;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return KeyOutcome::Continue;
            }
            KeyCode::Esc => {
                self.focus = Focus::Input;
                self.notice = None;
                return KeyOutcome::Continue;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => match key.code {
                KeyCode::Enter => {
                    let line = self.input_text();
                    if let Some(outcome) = self.handle_command(&line) {
                        return outcome;
                    }
                    self.notice = None;
                    self.submit();
                }
                // cursor movement, editing and wide characters are the
                // textarea's business
                _ => {
                    self.textarea.input(Input::from(key));
                }
            },
            Focus::Categories => match key.code {
                KeyCode::Left => self.move_category_cursor(-1),
                KeyCode::Right => self.move_category_cursor(1),
                KeyCode::Enter | KeyCode::Char(' ') => self.toggle_category_at_cursor(),
                _ => {}
            },
            Focus::Results => match key.code {
                KeyCode::Up => self.move_selection(-1),
                KeyCode::Down => self.move_selection(1),
                KeyCode::Enter | KeyCode::Char('o') => self.open_selected(),
                KeyCode::Char('y') => self.copy_selected(),
                _ => {}
            },
        }
        KeyOutcome::Continue
    }
}
