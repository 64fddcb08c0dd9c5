pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use klok::{
    app::App,
    app_dirs::AppDirs,
    clock::{Clock, SystemClock},
    config::{Config, ConfigStore, FileConfigStore},
    counter::{format_hms, format_tenths},
    gate::ResetGate,
    history::SessionDb,
    logging::{init_logging, LoggingConfig},
    runtime::{CrosstermEventSource, EventSource, Runner, IDLE_INTERVAL},
    stopwatch::SessionSink,
    theme::Theme,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    path::PathBuf,
};

/// single-screen terminal stopwatch
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A single-screen stopwatch: space starts and stops, r resets. Every reset saves the finished session to your history."
)]
pub struct Cli {
    /// color scheme (defaults to the saved setting, auto switches by time of day)
    #[clap(short = 't', long, value_enum)]
    theme: Option<Theme>,

    /// hide the start/stop and reset hints for this run
    #[clap(long)]
    no_hints: bool,

    /// forget that hints were already shown and that a reset was confirmed before
    #[clap(long)]
    forget_hints: bool,

    /// delete every recorded session and exit
    #[clap(long)]
    forget_history: bool,

    /// print the most recent sessions and exit
    #[clap(long, value_name = "N", num_args = 0..=1, default_missing_value = "10")]
    history: Option<usize>,

    /// export all sessions as CSV and exit
    #[clap(long, value_name = "PATH")]
    export: Option<PathBuf>,
}

impl Cli {
    /// Saved settings with this run's overrides applied
    fn run_config(&self, saved: &Config) -> Config {
        Config {
            theme: self.theme.unwrap_or(saved.theme),
            hints: saved.hints && !self.no_hints,
            gate: saved.gate,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: None,
        path: AppDirs::log_path(),
    });

    let config_store = FileConfigStore::new();
    let mut saved = config_store.load();

    if cli.forget_hints {
        saved.gate = ResetGate::default();
        config_store.save(&saved)?;
        log::info!("hints reset in {}", config_store.path().display());
    }

    if cli.forget_history {
        let removed = SessionDb::new()?.clear_all_sessions()?;
        println!("removed {} sessions", removed);
        return Ok(());
    }

    if let Some(limit) = cli.history {
        let db = SessionDb::new()?;
        print_history(&db, limit, &mut io::stdout().lock())?;
        return Ok(());
    }

    if let Some(path) = &cli.export {
        let db = SessionDb::new()?;
        let count = db.export_csv(path)?;
        println!("exported {} sessions to {}", count, path.display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let sessions = match SessionDb::new() {
        Ok(db) => Some(db),
        Err(e) => {
            log::warn!("session history unavailable: {}", e);
            None
        }
    };
    let mut app = App::new(SystemClock, sessions, &cli.run_config(&saved));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new(), IDLE_INTERVAL);
    let result = run_app(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = config_store.save(&app.config_to_save(&saved)) {
        log::warn!("failed to save settings: {}", e);
    }

    result
}

fn run_app<B: Backend, C: Clock, P: SessionSink, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App<C, P>,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui::draw(app, f))?;
        if app.should_quit {
            return Ok(());
        }
        let event = runner.step(app.wake_in());
        app.handle(event);
    }
}

fn print_history<W: Write>(db: &SessionDb, limit: usize, out: &mut W) -> klok::Result<()> {
    let sessions = db.recent_sessions(limit)?;
    if sessions.is_empty() {
        writeln!(out, "no sessions yet")?;
        return Ok(());
    }

    for record in &sessions {
        writeln!(
            out,
            "{}  {}{}",
            record.started_at.format("%Y-%m-%d %H:%M"),
            format_hms(record.duration),
            format_tenths(record.duration)
        )?;
    }

    let total = db.total_duration()?;
    writeln!(
        out,
        "{} sessions, {} in total",
        db.session_count()?,
        format_hms(total)
    )?;
    Ok(())
}
