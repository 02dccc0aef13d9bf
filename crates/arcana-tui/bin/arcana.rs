//! Arcana spell engine
//!
//! Main entry point: create or load a character, then cast, study and use
//! powers in a terminal.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use arcana_core::io::{InputProvider, wait_key};
use arcana_core::magic::StandardCatalog;
use arcana_core::player::CharacterSpec;
use arcana_core::player::birth::{parse_class, parse_race, parse_realm};
use arcana_core::world::Options;
use arcana_core::{ActionResult, GameState};
use arcana_rng::GameRng;
use arcana_save::{default_save_path, delete_save, resume_game, save_exists, save_game};
use arcana_tui::{App, CliError, TerminalGuard, TuiTerminal, command_for};

/// Spells, prayers and racial powers in a terminal
#[derive(Parser, Debug)]
#[command(name = "arcana")]
#[command(author, version, about = "Arcana - cast, study and channel powers", long_about = None)]
struct Args {
    /// Character name
    #[arg(short = 'u', long = "name")]
    name: Option<String>,

    /// Class (e.g. Mage, Priest, High-Mage)
    #[arg(short = 'p', long = "class")]
    class: Option<String>,

    /// Race (e.g. Human, Elf, Half-Troll)
    #[arg(short = 'r', long = "race")]
    race: Option<String>,

    /// First realm
    #[arg(long = "realm1")]
    realm1: Option<String>,

    /// Second realm
    #[arg(long = "realm2")]
    realm2: Option<String>,

    /// Starting level
    #[arg(short = 'l', long = "level", default_value_t = 1)]
    level: i32,

    /// RNG seed for a reproducible game
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Start a new character even if a save exists
    #[arg(short = 'n', long = "new")]
    new_game: bool,

    /// Options file (default: <config dir>/arcana/arcanarc)
    #[arg(long = "options")]
    options: Option<PathBuf>,

    /// Log file (default: <data dir>/arcana/arcana.log)
    #[arg(long = "log")]
    log: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("arcana: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    init_logging(args.log.clone())?;
    let options = load_options(args.options.clone())?;
    let mut state = start_game(&args, &options)?;
    state.options = options;
    tracing::info!(name = %state.actor.name, "starting");

    let guard = TerminalGuard::enter()?;
    let mut term = TuiTerminal::new(Terminal::new(CrosstermBackend::new(io::stdout()))?);
    let result = play(App::new(state), &mut term);
    drop(guard);
    result
}

/// Log to a file so the terminal stays clean. `ARCANA_LOG` overrides the
/// default filter.
fn init_logging(path: Option<PathBuf>) -> Result<(), CliError> {
    let path = match path {
        Some(path) => path,
        None => {
            let mut dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            dir.push("arcana");
            std::fs::create_dir_all(&dir)?;
            dir.join("arcana.log")
        }
    };
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_env("ARCANA_LOG").unwrap_or_else(|_| EnvFilter::new("arcana=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_options(path: Option<PathBuf>) -> Result<Options, CliError> {
    let path = path.or_else(|| dirs::config_dir().map(|d| d.join("arcana").join("arcanarc")));
    match path {
        Some(path) if path.exists() => {
            tracing::info!(path = %path.display(), "loading options");
            Ok(Options::load_from_file(&path)?)
        }
        _ => Ok(Options::default()),
    }
}

/// Load the named character's save, or create a new one from arguments
/// falling back to the options file. An unreadable save stops the game;
/// only `--new` starts over on top of it.
fn start_game(args: &Args, options: &Options) -> Result<GameState, CliError> {
    let name = args
        .name
        .clone()
        .or_else(|| options.name.clone())
        .unwrap_or_else(|| "Adventurer".to_string());

    let save_path = default_save_path(&name)?;
    if !args.new_game {
        match resume_game(&save_path) {
            Ok(Some(state)) => return Ok(state),
            Ok(None) => {}
            Err(source) => {
                return Err(CliError::UnreadableSave {
                    path: save_path,
                    source,
                });
            }
        }
    }

    let defaults = CharacterSpec::default();
    let spec = CharacterSpec {
        name,
        class: match &args.class {
            Some(s) => parse_class(s)?,
            None => options.class.unwrap_or(defaults.class),
        },
        race: match &args.race {
            Some(s) => parse_race(s)?,
            None => options.race.unwrap_or(defaults.race),
        },
        realm1: match &args.realm1 {
            Some(s) => Some(parse_realm(s)?),
            None => options.realm1,
        },
        realm2: match &args.realm2 {
            Some(s) => Some(parse_realm(s)?),
            None => options.realm2,
        },
        level: args.level,
    };
    let actor = arcana_core::player::create_character(&spec, &StandardCatalog::new())?;
    let rng = args.seed.map(GameRng::new).unwrap_or_else(GameRng::from_entropy);
    let mut state = GameState::new(actor, rng);
    state.message(format!(
        "Welcome, {} the {} {}.",
        state.actor.name, state.actor.race, state.actor.class
    ));
    Ok(state)
}

/// Main loop
fn play(
    mut app: App,
    term: &mut TuiTerminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), CliError> {
    for msg in app.state().messages.clone() {
        arcana_core::io::Renderer::message(term, &msg);
    }

    loop {
        term.set_status(app.status_lines());
        let key = term.next_key();
        let Some(command) = command_for(key) else {
            continue;
        };
        let result = app.execute(command, term);
        term.set_status(app.status_lines());

        let save_path = default_save_path(&app.state().actor.name)?;
        if let ActionResult::Died(_) = result {
            // Permadeath
            if save_exists(&save_path) {
                delete_save(&save_path)?;
            }
            wait_key(term);
            return Ok(());
        }
        if app.should_quit() {
            if app.save_requested() {
                save_game(app.state(), &save_path)?;
            }
            return Ok(());
        }
    }
}
