//! CLI frontend for Dungeon Quest: The Dark Tower.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use dq_fiction::GameConfig;
use dq_save::DEFAULT_SAVE_DIR;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dq",
    about = "Dungeon Quest: The Dark Tower, a text adventure",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game, reading commands from stdin
    Play {
        /// Name of your character
        #[arg(short, long, default_value = "Adventurer")]
        name: String,

        /// RNG seed for a reproducible game
        #[arg(short, long)]
        seed: Option<u64>,

        /// Directory holding save files
        #[arg(long, default_value = DEFAULT_SAVE_DIR)]
        save_dir: PathBuf,

        /// Start with the narrator switched off
        #[arg(short, long)]
        quiet_narrator: bool,

        /// Resume a saved game
        #[arg(short, long)]
        load: Option<String>,
    },

    /// Manage saved games
    Saves {
        #[command(subcommand)]
        action: SavesAction,

        /// Directory holding save files
        #[arg(long, default_value = DEFAULT_SAVE_DIR, global = true)]
        save_dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum SavesAction {
    /// List saved games, most recent first
    List,

    /// Show details of a saved game
    Show {
        /// Save name
        name: String,
    },

    /// Delete a saved game
    Delete {
        /// Save name
        name: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            name,
            seed,
            save_dir,
            quiet_narrator,
            load,
        } => {
            let mut config = GameConfig::default()
                .with_player_name(name)
                .with_save_dir(save_dir)
                .with_narrator(!quiet_narrator);
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            commands::play::run(&config, load.as_deref())
        }
        Commands::Saves { action, save_dir } => match action {
            SavesAction::List => commands::saves::list(&save_dir),
            SavesAction::Show { name } => commands::saves::show(&save_dir, &name),
            SavesAction::Delete { name } => commands::saves::delete(&save_dir, &name),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
