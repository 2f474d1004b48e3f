use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use tally::cli::{handle_entry_command, run_menu, EntryCommands, Session};
use tally::config::{Settings, TallyPaths};
use tally::logging::init_tracing;
use tally::tui::run_viewer;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Personal income and expense ledger",
    long_about = "Tally records income and expenses by category in a single JSON \
                  file, with one-shot commands, an interactive menu and a \
                  searchable table viewer."
)]
struct Cli {
    /// Ledger file to use instead of the default location
    #[arg(short, long, global = true, env = "TALLY_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Entry(EntryCommands),

    /// Interactive numbered menu
    Menu,

    /// Launch the table viewer
    #[command(alias = "ui")]
    View,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let Some(command) = cli.command else {
        println!("Tally - personal income and expense ledger");
        println!();
        println!("Run 'tally --help' for usage information.");
        println!("Run 'tally menu' for the interactive menu.");
        return Ok(());
    };

    let paths = TallyPaths::new()?;
    let settings = load_settings(&paths);

    let opened = Session::open(&paths, settings, cli.file)?;
    if let Some(problem) = &opened.problem {
        eprintln!("Warning: {}", problem);
        eprintln!("Starting with an empty ledger.");
    }
    let mut session = opened.session;

    match command {
        Commands::Entry(cmd) => {
            let stdout = io::stdout();
            handle_entry_command(&mut session, cmd, &mut stdout.lock())?;
        }
        Commands::Menu => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_menu(
                &mut session,
                &mut stdin.lock(),
                &mut stdout.lock(),
                run_viewer,
            )?;
        }
        Commands::View => run_viewer(session.ledger(), session.settings())?,
    }

    Ok(())
}

/// Load settings, writing the defaults on first run
///
/// An unreadable settings file is reported and the defaults are used.
fn load_settings(paths: &TallyPaths) -> Settings {
    match Settings::load_or_create(paths) {
        Ok(settings) => {
            if !paths.settings_file().exists() {
                match settings.save(paths) {
                    Ok(()) => debug!(path = %paths.settings_file().display(), "wrote default settings"),
                    Err(e) => debug!(error = %e, "could not write default settings"),
                }
            }
            settings
        }
        Err(e) => {
            eprintln!("Warning: {}", e);
            eprintln!("Using default settings.");
            Settings::default()
        }
    }
}
