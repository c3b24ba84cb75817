use std::time::Instant;

use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info, warn};

use deskbuddy::{
    browser,
    calculator::Calculator,
    calendar::{CalendarStore, YearMonth},
    config::Config,
    launcher::{Launcher, Tile},
    runtime::Metronome,
    theme::Theme,
    timer::{random_quote, CountdownTimer, TickOutcome},
    todo::{FileTodoStore, TodoList, TodoStore},
};

pub const COMPLETION_MESSAGE: &str = "Time is up! Great job!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Launcher,
    Widget(Tile),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Cursor and note-editing state for the calendar screen
#[derive(Debug, Clone)]
pub struct CalendarView {
    pub selected_day: u32,
    pub draft: Option<String>,
}

/// Input line and list cursor for the to-do screen
#[derive(Debug, Clone, Default)]
pub struct TodoView {
    pub input: String,
    pub selected: usize,
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BrowserView {
    pub input: String,
    pub status: Option<String>,
}

impl Default for BrowserView {
    fn default() -> Self {
        Self {
            input: "https://".to_string(),
            status: None,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    pub theme: Theme,
    pub launcher: Launcher,
    pub calculator: Calculator,
    pub timer: CountdownTimer,
    pub metronome: Metronome,
    pub quote: &'static str,
    pub notice: Option<&'static str>,
    pub calendar: CalendarStore,
    pub calendar_view: CalendarView,
    pub today: NaiveDate,
    pub browser_view: BrowserView,
    pub todo: TodoList,
    pub todo_view: TodoView,
    todo_store: Option<FileTodoStore>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let app = Self::with_today(config, Local::now().date_naive())
            .with_todo_store(FileTodoStore::new());
        if let Some(store) = &app.todo_store {
            info!(
                "event=todo_load path={} count={}",
                store.path().display(),
                app.todo.len()
            );
        }
        app
    }

    /// Persists every change to the task list through `store`
    pub fn with_todo_store(mut self, store: FileTodoStore) -> Self {
        self.todo = store.load();
        self.todo_store = Some(store);
        self
    }

    pub fn with_today(config: &Config, today: NaiveDate) -> Self {
        Self {
            screen: Screen::Launcher,
            theme: Theme::from_dark_mode(config.dark_mode),
            launcher: Launcher::default(),
            calculator: Calculator::new(),
            timer: CountdownTimer::new(config.session_secs),
            metronome: Metronome::per_second(),
            quote: random_quote(&mut rand::thread_rng()),
            notice: None,
            calendar: CalendarStore::new(YearMonth::of(today)),
            calendar_view: CalendarView {
                selected_day: chrono::Datelike::day(&today),
                draft: None,
            },
            today,
            browser_view: BrowserView::default(),
            todo: TodoList::new(),
            todo_view: TodoView::default(),
            todo_store: None,
        }
    }

    pub fn open(&mut self, tile: Tile) {
        info!("event=open_widget widget={tile}");
        self.launcher.select(tile);
        self.screen = Screen::Widget(tile);
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.calendar
            .visible_month()
            .day(self.calendar_view.selected_day)
    }

    /// Advances the countdown by however many seconds elapsed. Returns true
    /// when something visible changed.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for _ in 0..self.metronome.poll(now) {
            changed = true;
            match self.timer.tick() {
                TickOutcome::Completed { .. } => {
                    self.metronome.disarm();
                    self.notice = Some(COMPLETION_MESSAGE);
                    self.quote = random_quote(&mut rand::thread_rng());
                    break;
                }
                TickOutcome::Progress { .. } => {}
                TickOutcome::Ignored => {
                    self.metronome.disarm();
                    break;
                }
            }
        }
        changed
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }
        if key.code == KeyCode::Tab {
            self.theme = self.theme.toggled();
            debug!("event=theme_toggle dark={}", self.theme.dark);
            return Flow::Continue;
        }

        match self.screen {
            Screen::Launcher => return self.on_launcher_key(key),
            Screen::Widget(Tile::Todo) => self.on_todo_key(key),
            Screen::Widget(Tile::Calculator) => self.on_calculator_key(key),
            Screen::Widget(Tile::Timer) => self.on_timer_key(key, now),
            Screen::Widget(Tile::Calendar) => self.on_calendar_key(key),
            Screen::Widget(Tile::Browser) => self.on_browser_key(key),
        }
        Flow::Continue
    }

    fn back_to_launcher(&mut self) {
        self.screen = Screen::Launcher;
    }

    fn on_launcher_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Left | KeyCode::Char('h') => self.launcher.left(),
            KeyCode::Right | KeyCode::Char('l') => self.launcher.right(),
            KeyCode::Up | KeyCode::Char('k') => self.launcher.up(),
            KeyCode::Down | KeyCode::Char('j') => self.launcher.down(),
            KeyCode::Enter | KeyCode::Char(' ') => self.open(self.launcher.selected()),
            KeyCode::Char(c) => {
                if let Some(tile) = c
                    .to_digit(10)
                    .and_then(|d| Tile::ALL.get((d as usize).wrapping_sub(1)))
                {
                    self.open(*tile);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn on_todo_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.back_to_launcher(),
            KeyCode::Up => {
                self.todo_view.selected = self.todo_view.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.todo_view.selected + 1 < self.todo.len() {
                    self.todo_view.selected += 1;
                }
            }
            KeyCode::Backspace => {
                self.todo_view.input.pop();
            }
            KeyCode::Char(c) => self.todo_view.input.push(c),
            KeyCode::Enter => {
                if self.todo.add(&self.todo_view.input) {
                    self.todo_view.input.clear();
                    self.todo_view.selected = self.todo.len() - 1;
                    self.save_todo();
                }
            }
            KeyCode::Delete => {
                if self.todo.remove(self.todo_view.selected).is_some() {
                    let last = self.todo.len().saturating_sub(1);
                    self.todo_view.selected = self.todo_view.selected.min(last);
                    self.save_todo();
                }
            }
            _ => {}
        }
    }

    fn save_todo(&mut self) {
        let Some(store) = &self.todo_store else {
            return;
        };
        self.todo_view.status = match store.save(&self.todo) {
            Ok(()) => None,
            Err(err) => {
                warn!(
                    "event=todo_save status=error path={} err={err}",
                    store.path().display()
                );
                Some(format!("Could not save tasks: {err}"))
            }
        };
    }

    fn on_calculator_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.back_to_launcher(),
            KeyCode::Enter => self.calculator.input("="),
            KeyCode::Backspace => self.calculator.input("←"),
            KeyCode::Delete => self.calculator.input("C"),
            KeyCode::Char('n') | KeyCode::Char('_') => self.calculator.input("+/-"),
            KeyCode::Char(c) => self.calculator.input(c.encode_utf8(&mut [0; 4])),
            _ => {}
        }
    }

    fn on_timer_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc => self.back_to_launcher(),
            KeyCode::Char('s') => self.start_timer(now),
            KeyCode::Char('p') => self.pause_timer(),
            KeyCode::Char(' ') => {
                if self.timer.is_running() {
                    self.pause_timer();
                } else {
                    self.start_timer(now);
                }
            }
            KeyCode::Char('r') => {
                self.timer.reset();
                self.metronome.disarm();
                self.notice = None;
            }
            _ => {}
        }
    }

    fn start_timer(&mut self, now: Instant) {
        if self.timer.start() {
            self.notice = None;
            self.metronome.arm(now);
        }
    }

    fn pause_timer(&mut self) {
        self.timer.pause();
        self.metronome.disarm();
    }

    fn on_calendar_key(&mut self, key: KeyEvent) {
        if self.calendar_view.draft.is_some() {
            self.on_note_key(key);
            return;
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_selection(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-7),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(7),
            KeyCode::Esc => self.back_to_launcher(),
            KeyCode::PageUp | KeyCode::Char('<') | KeyCode::Char(',') => self.change_month(-1),
            KeyCode::PageDown | KeyCode::Char('>') | KeyCode::Char('.') => self.change_month(1),
            KeyCode::Char('t') => {
                let delta = month_distance(self.calendar.visible_month(), YearMonth::of(self.today));
                self.calendar.navigate(delta);
                self.calendar_view.selected_day = chrono::Datelike::day(&self.today);
            }
            KeyCode::Enter => {
                let existing = self
                    .selected_date()
                    .and_then(|d| self.calendar.get_event(d))
                    .unwrap_or_default()
                    .to_string();
                self.calendar_view.draft = Some(existing);
            }
            KeyCode::Delete | KeyCode::Char('d') => {
                if let Some(date) = self.selected_date() {
                    self.calendar.set_event(date, "");
                }
            }
            _ => {}
        }
    }

    fn on_note_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.calendar_view.draft = None,
            KeyCode::Enter => {
                let note = self.calendar_view.draft.take().unwrap_or_default();
                if let Some(date) = self.selected_date() {
                    self.calendar.set_event(date, &note);
                }
            }
            KeyCode::Backspace => {
                if let Some(draft) = self.calendar_view.draft.as_mut() {
                    draft.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(draft) = self.calendar_view.draft.as_mut() {
                    draft.push(c);
                }
            }
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: i64) {
        let days = self.calendar.days_in_visible_month() as i64;
        let day = self.calendar_view.selected_day as i64 + delta;
        self.calendar_view.selected_day = day.clamp(1, days) as u32;
    }

    fn change_month(&mut self, delta: i64) {
        self.calendar.navigate(delta);
        let days = self.calendar.days_in_visible_month();
        self.calendar_view.selected_day = self.calendar_view.selected_day.min(days);
    }

    fn on_browser_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.back_to_launcher();
            return;
        }
        let view = &mut self.browser_view;
        match key.code {
            KeyCode::Backspace => {
                view.input.pop();
            }
            KeyCode::Char(c) => view.input.push(c),
            KeyCode::Enter => {
                view.status = Some(match browser::open(&view.input) {
                    Ok(url) => format!("Opened {url}"),
                    Err(err) => {
                        warn!("event=browser_open status=error err={err}");
                        err.to_string()
                    }
                });
            }
            _ => {}
        }
    }
}

fn month_distance(from: YearMonth, to: YearMonth) -> i64 {
    (to.year() as i64 - from.year() as i64) * 12 + (to.month() as i64 - from.month() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        App::with_today(
            &Config {
                session_secs: 3,
                ..Config::default()
            },
            today,
        )
    }

    fn type_str(app: &mut App, s: &str, now: Instant) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c)), now);
        }
    }

    #[test]
    fn launcher_opens_selected_tile() {
        let mut app = app();
        let now = Instant::now();
        app.handle_key(key(KeyCode::Right), now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.screen, Screen::Widget(Tile::Timer));
        app.handle_key(key(KeyCode::Esc), now);
        assert_eq!(app.screen, Screen::Launcher);
        assert_eq!(app.handle_key(key(KeyCode::Esc), now), Flow::Quit);
    }

    #[test]
    fn number_keys_jump_to_tiles() {
        let mut app = app();
        type_str(&mut app, "3", Instant::now());
        assert_eq!(app.screen, Screen::Widget(Tile::Calendar));
    }

    #[test]
    fn calculator_keys_reach_engine() {
        let mut app = app();
        let now = Instant::now();
        app.open(Tile::Calculator);
        type_str(&mut app, "12*3", now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.calculator.display(), "36");
        app.handle_key(key(KeyCode::Char('n')), now);
        assert_eq!(app.calculator.display(), "-36");
        app.handle_key(key(KeyCode::Delete), now);
        assert_eq!(app.calculator.display(), "0");
    }

    #[test]
    fn timer_counts_wall_clock_seconds() {
        let mut app = app();
        let start = Instant::now();
        app.open(Tile::Timer);
        app.handle_key(key(KeyCode::Char('s')), start);
        assert!(app.timer.is_running());

        assert!(!app.on_tick(start + Duration::from_millis(400)));
        assert!(app.on_tick(start + Duration::from_millis(1100)));
        assert_eq!(app.timer.remaining_secs(), 2);

        assert!(app.on_tick(start + Duration::from_millis(3050)));
        assert_eq!(app.timer.sessions_completed(), 1);
        assert_eq!(app.timer.remaining_secs(), 3);
        assert!(!app.timer.is_running());
        assert_eq!(app.notice, Some(COMPLETION_MESSAGE));
        assert!(!app.metronome.is_armed());
    }

    #[test]
    fn reset_clears_completion_notice() {
        let mut app = app();
        let start = Instant::now();
        app.open(Tile::Timer);
        app.handle_key(key(KeyCode::Char('s')), start);
        app.on_tick(start + Duration::from_secs(3));
        assert_eq!(app.notice, Some(COMPLETION_MESSAGE));

        app.handle_key(key(KeyCode::Char('r')), start + Duration::from_secs(4));
        assert_eq!(app.notice, None);
        assert_eq!(app.timer.remaining_secs(), 3);
    }

    #[test]
    fn tick_after_key_burst_catches_up() {
        let mut app = app();
        let start = Instant::now();
        app.open(Tile::Timer);
        app.handle_key(key(KeyCode::Char('s')), start);
        for ms in [100, 300, 500, 900] {
            app.handle_key(key(KeyCode::Char('x')), start + Duration::from_millis(ms));
            assert!(!app.on_tick(start + Duration::from_millis(ms)));
        }
        assert!(app.on_tick(start + Duration::from_millis(2100)));
        assert_eq!(app.timer.remaining_secs(), 1);
    }

    #[test]
    fn paused_timer_ignores_elapsed_time() {
        let mut app = app();
        let start = Instant::now();
        app.open(Tile::Timer);
        app.handle_key(key(KeyCode::Char(' ')), start);
        app.on_tick(start + Duration::from_millis(1000));
        app.handle_key(key(KeyCode::Char(' ')), start);
        assert!(!app.on_tick(start + Duration::from_secs(10)));
        assert_eq!(app.timer.remaining_secs(), 2);
    }

    #[test]
    fn calendar_edit_commits_and_clears_notes() {
        let mut app = app();
        let now = Instant::now();
        app.open(Tile::Calendar);
        app.handle_key(key(KeyCode::Enter), now);
        type_str(&mut app, "pay rent", now);
        app.handle_key(key(KeyCode::Enter), now);

        let date = app.selected_date().unwrap();
        assert_eq!(app.calendar.get_event(date), Some("pay rent"));

        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.calendar_view.draft.as_deref(), Some("pay rent"));
        for _ in 0.."pay rent".len() {
            app.handle_key(key(KeyCode::Backspace), now);
        }
        app.handle_key(key(KeyCode::Enter), now);
        assert!(!app.calendar.has_event(date));
    }

    #[test]
    fn note_text_is_stored_as_typed() {
        let mut app = app();
        let now = Instant::now();
        app.open(Tile::Calendar);
        app.handle_key(key(KeyCode::Enter), now);
        type_str(&mut app, "  call bank ", now);
        app.handle_key(key(KeyCode::Enter), now);
        let date = app.selected_date().unwrap();
        assert_eq!(app.calendar.get_event(date), Some("  call bank "));

        app.handle_key(key(KeyCode::Char('h')), now);
        app.handle_key(key(KeyCode::Enter), now);
        type_str(&mut app, "  ", now);
        app.handle_key(key(KeyCode::Enter), now);
        let blank = app.selected_date().unwrap();
        assert_ne!(blank, date);
        assert_eq!(app.calendar.get_event(blank), Some("  "));
    }

    #[test]
    fn month_change_clamps_selected_day() {
        let mut app = app();
        let now = Instant::now();
        app.open(Tile::Calendar);
        assert_eq!(app.calendar_view.selected_day, 31);
        app.handle_key(key(KeyCode::PageDown), now);
        assert_eq!(app.calendar.visible_month(), YearMonth::new(2024, 2));
        assert_eq!(app.calendar_view.selected_day, 29);

        app.handle_key(key(KeyCode::Char('t')), now);
        assert_eq!(app.calendar.visible_month(), YearMonth::new(2024, 1));
        assert_eq!(app.calendar_view.selected_day, 31);
    }

    #[test]
    fn tab_toggles_theme_everywhere() {
        let mut app = app();
        let now = Instant::now();
        assert!(app.theme.dark);
        app.handle_key(key(KeyCode::Tab), now);
        assert!(!app.theme.dark);
        app.open(Tile::Browser);
        app.handle_key(key(KeyCode::Tab), now);
        assert!(app.theme.dark);
        assert_eq!(app.browser_view.input, "https://");
    }

    #[test]
    fn browser_rejects_blank_url() {
        let mut app = app();
        let now = Instant::now();
        app.open(Tile::Browser);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.browser_view.status.as_deref(), Some("Invalid URL!"));
    }

    #[test]
    fn todo_keys_add_and_remove_tasks() {
        let mut app = app();
        let now = Instant::now();
        type_str(&mut app, "1", now);
        assert_eq!(app.screen, Screen::Widget(Tile::Todo));

        type_str(&mut app, "water plants", now);
        app.handle_key(key(KeyCode::Enter), now);
        type_str(&mut app, "   ", now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.todo.items(), ["• water plants"]);
        assert_eq!(app.todo_view.input, "   ");

        app.todo_view.input.clear();
        type_str(&mut app, "file taxes", now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.todo_view.selected, 1);
        app.handle_key(key(KeyCode::Up), now);
        app.handle_key(key(KeyCode::Delete), now);
        assert_eq!(app.todo.items(), ["• file taxes"]);
        assert_eq!(app.todo_view.selected, 0);
        app.handle_key(key(KeyCode::Delete), now);
        assert!(app.todo.is_empty());
        app.handle_key(key(KeyCode::Delete), now);
        assert!(app.todo.is_empty());
    }

    #[test]
    fn todo_changes_rewrite_the_tasks_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        std::fs::write(&path, "• existing\n").unwrap();

        let mut app = app().with_todo_store(FileTodoStore::with_path(&path));
        assert_eq!(app.todo.items(), ["• existing"]);
        let now = Instant::now();
        app.open(Tile::Todo);
        type_str(&mut app, "new task", now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "• existing\n• new task\n"
        );

        app.handle_key(key(KeyCode::Up), now);
        app.handle_key(key(KeyCode::Delete), now);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "• new task\n");
        assert_eq!(app.todo_view.status, None);
    }
}
