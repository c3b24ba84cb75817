mod app;
mod ui;

use crate::app::{App, Flow};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use deskbuddy::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    launcher::Tile,
    logging::{default_log_level, init_logging},
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
};
use log::{info, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::{Duration, Instant},
};

/// desktop buddy: calculator, focus timer, calendar notes and a browser launcher
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// length of a focus session in seconds
    #[clap(short = 's', long)]
    session_secs: Option<u32>,

    /// start in light mode
    #[clap(long)]
    light: bool,

    /// open a widget directly instead of the launcher
    #[clap(short = 'o', long, value_enum)]
    open: Option<WidgetArg>,

    /// log level written to the log file (trace, debug, info, warn, error, off)
    #[clap(long)]
    log_level: Option<String>,

    /// persist the given options as the new defaults
    #[clap(long)]
    save: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum WidgetArg {
    Todo,
    Calculator,
    Timer,
    Calendar,
    Browser,
}

impl From<WidgetArg> for Tile {
    fn from(w: WidgetArg) -> Self {
        match w {
            WidgetArg::Todo => Tile::Todo,
            WidgetArg::Calculator => Tile::Calculator,
            WidgetArg::Timer => Tile::Timer,
            WidgetArg::Calendar => Tile::Calendar,
            WidgetArg::Browser => Tile::Browser,
        }
    }
}

impl Cli {
    /// Layers command-line overrides on top of the stored configuration
    fn apply(&self, mut config: Config) -> Config {
        if let Some(secs) = self.session_secs {
            config.session_secs = secs;
        }
        if self.light {
            config.dark_mode = false;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Some(dir) = AppDirs::log_dir() {
        if let Err(err) = init_logging(level, &dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save {
        match store.save(&config) {
            Ok(()) => info!("event=config_save status=ok path={}", store.path().display()),
            Err(err) => warn!("event=config_save status=error err={err}"),
        }
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    if let Some(widget) = cli.open {
        app.open(widget.into());
    }
    let result = start_tui(
        &mut terminal,
        &mut app,
        Duration::from_millis(config.tick_rate_ms.max(10)),
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(
        "event=app_exit sessions_completed={}",
        app.timer.sessions_completed()
    );
    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(tick_rate));
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick => {
                if app.on_tick(Instant::now()) {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            AppEvent::Key(key) => {
                if app.handle_key(key, Instant::now()) == Flow::Quit {
                    break;
                }
                // a burst of keys can starve the tick source
                app.on_tick(Instant::now());
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
