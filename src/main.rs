use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use slowka::{
    app::App,
    app_dirs::AppDirs,
    catalog::{self, Unit},
    config::{Config, ConfigStore, FileConfigStore},
    difficulty,
    modes::GameMode,
    progress::{FileProgressStore, ProgressTracker},
    runtime::{AppEvent, TerminalEventSource, EventSource, FixedTicker, Runner, Ticker},
    ui,
};
use std::{
    error::Error,
    fs::{self, File},
    io::{self, stdin, Write},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// vocabulary flashcards in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Practice English vocabulary for Polish speakers, unit by unit, with flip cards and fill-in-the-blanks exercises. Finished units are remembered between runs."
)]
pub struct Cli {
    /// directory of units laid out as <unit>/words.json (defaults to the bundled units)
    #[clap(short = 'd', long)]
    words_dir: Option<PathBuf>,

    /// difficulty levels file for fill in the blanks
    #[clap(long = "difficulties")]
    difficulties_path: Option<PathBuf>,

    /// practice mode to use for every unit instead of asking
    #[clap(short = 'm', long, value_enum)]
    mode: Option<GameMode>,

    /// seed for word order and blank placement
    #[clap(long)]
    seed: Option<u64>,

    /// log verbosity written to the log file (off, error, warn, info, debug, trace)
    #[clap(long)]
    log_level: Option<LevelFilter>,

    /// print the units and their completion state, then exit
    #[clap(short = 'l', long)]
    list: bool,

    /// forget all completed units
    #[clap(long)]
    reset_progress: bool,

    /// write the resolved settings to the config file, then exit
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    fn is_interactive(&self) -> bool {
        !(self.list || self.reset_progress || self.save_config)
    }
}

/// Command line flags merged over the config file.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    words_dir: Option<PathBuf>,
    difficulties_path: Option<PathBuf>,
    mode: Option<GameMode>,
    seed: Option<u64>,
    log_level: LevelFilter,
}

impl Settings {
    fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            words_dir: cli.words_dir.clone().or_else(|| config.words_dir.clone()),
            difficulties_path: cli
                .difficulties_path
                .clone()
                .or_else(|| config.difficulties_path.clone()),
            mode: cli
                .mode
                .or_else(|| config.default_mode.as_deref().and_then(GameMode::from_id)),
            seed: cli.seed,
            log_level: cli
                .log_level
                .or_else(|| config.log_level.parse().ok())
                .unwrap_or(LevelFilter::Info),
        }
    }

    fn to_config(&self) -> Config {
        Config {
            words_dir: self.words_dir.clone(),
            difficulties_path: self.difficulties_path.clone(),
            default_mode: self.mode.map(|m| m.id()),
            log_level: self.log_level.to_string().to_lowercase(),
        }
    }
}

fn init_logging(level: LevelFilter) {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&path) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

fn print_units<W: Write>(out: &mut W, units: &[Unit], progress: &ProgressTracker) -> io::Result<()> {
    for unit in units {
        let check = if progress.is_completed(&unit.id) { "✓" } else { " " };
        writeln!(
            out,
            "{check} {:<8} {} ({} words)",
            unit.id,
            unit.title,
            unit.words.len()
        )?;
        if unit.groups.len() > 1 {
            for group in &unit.groups {
                writeln!(out, "             {} ({})", group.name, group.words.len())?;
            }
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if cli.is_interactive() && !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config_store = FileConfigStore::new();
    let config = config_store.load();
    let settings = Settings::resolve(&cli, &config);
    init_logging(settings.log_level);
    log::info!("slowka {} starting: {settings:?}", env!("CARGO_PKG_VERSION"));

    if config.default_mode.is_some() && cli.mode.is_none() && settings.mode.is_none() {
        log::warn!("unknown default_mode in config: {:?}", config.default_mode);
    }

    if cli.save_config {
        config_store.save(&settings.to_config())?;
        println!("saved settings to {}", config_store.path().display());
        return Ok(());
    }

    let units = catalog::load(settings.words_dir.as_deref())?;
    let levels = difficulty::load(settings.difficulties_path.as_deref())?;
    let progress_store = FileProgressStore::new();
    log::debug!("progress file {}", progress_store.path().display());
    let mut progress = ProgressTracker::new(Box::new(progress_store));

    if cli.reset_progress {
        progress.reset();
        println!("progress cleared");
    }
    if cli.list {
        print_units(&mut io::stdout().lock(), &units, &progress)?;
    }
    if !cli.is_interactive() {
        return Ok(());
    }

    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut app = App::new(units, levels, progress, rng, settings.mode);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        TerminalEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("terminal loop failed: {e}");
    }
    log::info!("bye");
    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick => {}
            AppEvent::Resize(w, h) => {
                log::debug!("terminal resized to {w}x{h}");
                terminal.draw(|f| ui::draw(app, f))?;
            }
            AppEvent::Key(key) => {
                if app.on_key(key) {
                    break;
                }
                terminal.draw(|f| ui::draw(app, f))?;
            }
        }
    }

    Ok(())
}
