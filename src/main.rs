mod app;
mod domain;
mod error;
mod input;
mod notifications;
mod persistence;
mod report;
mod store;
mod ticker;
mod ui;

use anyhow::{anyhow, bail, Context, Result};
use app::AppState;
use chrono::Local;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{aggregate, ChartOptions, Granularity, Metric, Session, ViewMode};
use persistence::{
    ensure_pacer_dir, get_pacer_dir, init_local_pacer, load_settings, log_file, settings_file,
    FileStorage, Settings,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use store::SessionStore;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "PACER_LOG";

#[derive(Parser)]
#[command(name = "pacer")]
#[command(about = "A terminal timer for batches of repeatable tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .pacer directory in the current directory
    Init,
    /// List sessions with their progress
    List,
    /// Export a session's tasks as CSV
    Export {
        /// Session name. Defaults to the last loaded session.
        #[arg(short, long)]
        session: Option<String>,
        /// Output directory. Defaults to the current directory.
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print a session's chart as text
    Chart {
        /// Session name. Defaults to the last loaded session.
        #[arg(short, long)]
        session: Option<String>,
        /// per-task or aggregate
        #[arg(long)]
        view: Option<String>,
        /// hourly, daily or weekly
        #[arg(short, long)]
        granularity: Option<String>,
        /// count, total or average
        #[arg(short, long)]
        metric: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            init_stderr_logging();
            let pacer_dir = init_local_pacer()?;
            println!("Initialized pacer directory: {}", pacer_dir.display());
            println!();
            println!("Pacer will now use this local directory for session storage.");
            println!("Run 'pacer' to start timing tasks.");
            Ok(())
        }
        Some(Commands::List) => {
            init_stderr_logging();
            let store = open_store(&get_pacer_dir()?);
            print!(
                "{}",
                report::render_session_list(store.sessions(), store.current_name(), Local::now())
            );
            Ok(())
        }
        Some(Commands::Export { session, output }) => {
            init_stderr_logging();
            let store = open_store(&get_pacer_dir()?);
            let session = pick_session(&store, session.as_deref())?;

            let dir = match output {
                Some(path) => PathBuf::from(path),
                None => std::env::current_dir().context("Failed to read current directory")?,
            };
            let path = report::write_csv(session, &dir)?;
            println!("Exported {} tasks to {}", session.tasks.len(), path.display());
            Ok(())
        }
        Some(Commands::Chart {
            session,
            view,
            granularity,
            metric,
        }) => {
            init_stderr_logging();
            let dir = get_pacer_dir()?;
            let store = open_store(&dir);
            let session = pick_session(&store, session.as_deref())?;
            let options = chart_options(
                load_settings_or_default(&dir).chart,
                view.as_deref(),
                granularity.as_deref(),
                metric.as_deref(),
            )?;

            let now = Local::now();
            print!("{}", report::render_session_summary(session, now));
            println!();
            print!("{}", report::render_chart(&aggregate(&session.tasks, &options), &options));
            Ok(())
        }
        None => {
            // Run the normal TUI application
            run_tui()
        }
    }
}

/// Log to stderr, warnings and above unless PACER_LOG says otherwise
fn init_stderr_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();
}

/// Log to pacer.log in the data directory; the TUI owns the terminal
fn init_file_logging(dir: &Path) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file(dir))
        .context("Failed to open log file")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

fn open_store(dir: &Path) -> SessionStore {
    SessionStore::open(Box::new(FileStorage::new(dir)))
}

fn load_settings_or_default(dir: &Path) -> Settings {
    load_settings(settings_file(dir)).unwrap_or_else(|e| {
        warn!(error = %e, "using default settings");
        Settings::default()
    })
}

/// The named session, or the last loaded one when no name is given
fn pick_session<'a>(store: &'a SessionStore, name: Option<&str>) -> Result<&'a Session> {
    match name {
        Some(name) => store
            .get(name)
            .ok_or_else(|| anyhow!("No session named \"{}\"", name)),
        None => match store::resolve(store.sessions(), None, store.current_name()) {
            Some(resolved) => store
                .get(&resolved)
                .ok_or_else(|| anyhow!("No session named \"{}\"", resolved)),
            None => bail!("No session yet. Run 'pacer' and press Ctrl+N to create one."),
        },
    }
}

/// Settings defaults overridden by command-line values
fn chart_options(
    defaults: ChartOptions,
    view: Option<&str>,
    granularity: Option<&str>,
    metric: Option<&str>,
) -> Result<ChartOptions> {
    let mut options = defaults;
    if let Some(tag) = view {
        options.view = ViewMode::from_tag(tag)
            .ok_or_else(|| anyhow!("Unknown view '{}'. Use per-task or aggregate.", tag))?;
    }
    if let Some(tag) = granularity {
        options.granularity = Granularity::from_tag(tag)
            .ok_or_else(|| anyhow!("Unknown granularity '{}'. Use hourly, daily or weekly.", tag))?;
        // Picking a bucket size implies the aggregate view
        if view.is_none() {
            options.view = ViewMode::Aggregate;
        }
    }
    if let Some(tag) = metric {
        options.metric = Metric::from_tag(tag)
            .ok_or_else(|| anyhow!("Unknown metric '{}'. Use count, total or average.", tag))?;
        if view.is_none() {
            options.view = ViewMode::Aggregate;
        }
    }
    Ok(options)
}

fn run_tui() -> Result<()> {
    // Ensure pacer directory exists
    let pacer_dir = ensure_pacer_dir()?;
    init_file_logging(&pacer_dir)?;

    // Show which directory we're using
    eprintln!("Using pacer directory: {}", pacer_dir.display());
    info!(dir = %pacer_dir.display(), "starting");

    let settings = load_settings_or_default(&pacer_dir);
    let store = open_store(&pacer_dir);
    let export_dir = std::env::current_dir().unwrap_or_else(|_| pacer_dir.clone());

    // Create app state
    let mut app = AppState::new(store, settings, Some(settings_file(&pacer_dir)), export_dir);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    info!("exiting");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Block until a key arrives or the next sample is due
        let timeout = app.ticker.timeout(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        // Sample the running timer
        app.tick(Local::now());
    }
}
