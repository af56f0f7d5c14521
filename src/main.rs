use std::{fs::File, io::stdout, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{Config, LevelFilter, WriteLogger};

use pageturn::event_source::KeyboardEventSource;
use pageturn::navigation::{AdvancePolicy, DisplayMode};
use pageturn::panic_handler;
use pageturn::paths;
use pageturn::preferences::Preferences;
use pageturn::{App, run_app_with_event_source};

/// Terminal text viewer that lays a file out as pages, one or two at a time
#[derive(Parser, Debug)]
#[command(name = "pageturn")]
#[command(version)]
struct Args {
    /// Text file to open (reopens the most recent file if omitted)
    file: Option<PathBuf>,

    /// Start with a single page instead of two side by side
    #[arg(long)]
    single: bool,

    /// Advance two pages at a time (1-2, 3-4, ...)
    #[arg(long)]
    spread: bool,

    /// Start with word wrap disabled
    #[arg(long)]
    no_wrap: bool,

    /// Show line numbers
    #[arg(long)]
    line_numbers: bool,

    /// Preferences file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file to write instead of the default location
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn init_logging(args: &Args) -> Result<()> {
    let path = match &args.log_file {
        Some(path) => path.clone(),
        None => paths::resolve_log_path()?,
    };
    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    info!("Starting pageturn");

    if let Some(path) = &args.file {
        if !path.exists() {
            error!("File not found: {}", path.display());
            eprintln!("Error: file not found: {}", path.display());
            std::process::exit(1);
        }
    }

    let config_path = args.config.clone().or_else(paths::resolve_config_path);
    let preferences = Preferences::load_or_ephemeral(config_path.as_deref());

    let mut options = App::terminal_viewer_options();
    options.mode = if args.single {
        DisplayMode::Single
    } else {
        DisplayMode::Dual
    };
    options.advance_policy = if args.spread {
        AdvancePolicy::Spread
    } else {
        preferences.advance_policy()
    };
    options.word_wrap = !args.no_wrap && preferences.word_wrap();
    options.line_numbers = args.line_numbers;

    let mut app = App::new(options, preferences);
    match &args.file {
        Some(path) => {
            if let Err(e) = app.open_file(path) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        None => {
            app.load_most_recent();
        }
    }

    panic_handler::initialize_panic_handler();

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app_with_event_source(&mut terminal, &mut app, &mut KeyboardEventSource);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("Application error: {err:?}");
        eprintln!("{err:?}");
    }

    info!("Shutting down pageturn");
    res
}
