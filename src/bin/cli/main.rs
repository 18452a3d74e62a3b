mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cypress_lib::config::DATA_DIR_ENV;

#[derive(Parser)]
#[command(name = "cypress", about = "Import flashcard decks and quiz yourself", version)]
struct Cli {
    /// Directory holding decks and settings
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ThemeChange {
    Dark,
    Light,
    Toggle,
}

#[derive(Subcommand)]
enum Command {
    /// Import a delimited text file (`front;annotation,back` per line) as a new deck
    Import {
        /// File to import; its name becomes the deck name
        file: PathBuf,
    },

    /// List decks
    List,

    /// Delete a deck
    Delete {
        /// Deck id or name (case-insensitive prefix match)
        deck: String,
    },

    /// Quiz yourself on a deck
    Study {
        /// Deck id or name (case-insensitive prefix match)
        deck: String,
    },

    /// Show or change the display mode
    Theme {
        /// New mode; omit to print the current one
        mode: Option<ThemeChange>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.data_dir)?;

    match cli.command {
        Command::Import { file } => {
            commands::import::run(&mut app, &file, &cli.format, use_color)?;
        }
        Command::List => {
            commands::list::run(&app, &cli.format, use_color)?;
        }
        Command::Delete { deck } => {
            commands::delete::run(&mut app, &deck, &cli.format)?;
        }
        Command::Study { deck } => {
            commands::study::run(&app, &deck, use_color)?;
        }
        Command::Theme { mode } => {
            commands::theme::run(&app, mode, &cli.format)?;
        }
    }

    Ok(())
}
