mod config;
mod logging;
mod replay;
mod rows;
mod tui;

use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::{Generator, Shell, generate};
use config::{CONFIG_KEYS, Config, ConfigError};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use rows::models::{Record, default_seed};
use rows::parser::{parse_intent_script, parse_seed_file};
use rows::reducer::Reducer;
use rows::state::CollectionState;
use std::io;
use tui::{app::App, ui};

#[derive(Parser)]
#[command(name = "rowstack")]
#[command(about = "A table of rows where every removal can be undone")]
struct Cli {
    #[arg(long, global = true, help = "Seed rows file (overrides the configured seed_file)", value_hint = ValueHint::FilePath)]
    seed: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Configuration management")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    #[command(about = "Apply a TOML script of intents to the seed rows and print the result")]
    Replay {
        #[arg(help = "Intent script path", value_hint = ValueHint::FilePath)]
        script: String,
    },
    #[command(about = "Generate shell completion scripts")]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    #[command(about = "Set a configuration value")]
    Set {
        #[arg(help = "Configuration key (seed_file or remove_policy)")]
        key: String,
        #[arg(help = "Configuration value")]
        value: String,
    },
    #[command(about = "Get a configuration value")]
    Get {
        #[arg(help = "Configuration key")]
        key: String,
    },
    #[command(about = "List all configuration values")]
    List,
}

fn main() {
    let cli = Cli::parse();

    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    let result = match cli.command {
        Some(Commands::Config { action }) => {
            handle_config_command(action).map_err(anyhow::Error::from)
        }
        Some(Commands::Replay { script }) => run_replay(cli.seed.as_deref(), &script),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
            Ok(())
        }
        None => run_main_app(cli.seed.as_deref()),
    };

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn handle_config_command(action: ConfigAction) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("Configuration saved successfully.");
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::List => {
            let config = Config::load()?;
            for key in CONFIG_KEYS {
                println!("{} = {}", key, config.get(key)?);
            }
        }
    }
    Ok(())
}

fn load_session(seed_override: Option<&str>) -> Result<(CollectionState, Reducer)> {
    let config = Config::load().context("Configuration error")?;

    let records: Vec<Record> = match seed_override.or(config.seed_file.as_deref()) {
        Some(path) => parse_seed_file(path)?,
        None => default_seed(),
    };
    tracing::info!(
        rows = records.len(),
        policy = %config.remove_policy,
        "session loaded"
    );

    let state = CollectionState::new(records)?;
    Ok((state, Reducer::new(config.remove_policy)))
}

fn run_replay(seed_override: Option<&str>, script: &str) -> Result<()> {
    let (state, reducer) = load_session(seed_override)?;
    let intents = parse_intent_script(script)?;

    let state = replay::replay(state, &reducer, intents)?;
    println!("{}", replay::format_state(&state));
    Ok(())
}

fn run_main_app(seed_override: Option<&str>) -> Result<()> {
    let (state, reducer) = load_session(seed_override)?;
    let mut app = App::new(state, reducer);

    run_tui(&mut app)
}

fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key_event(key)?;
            if app.should_quit {
                break;
            }
        }
    }
    Ok(())
}

fn print_completions<G: Generator>(generator: G, cmd: &mut Command) {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
