//! Terminal front end for the Corny Groń mountain adventure.

mod commands;

use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "corny",
    about = "Corny Groń: climb the mountain, outlive its creatures, become the Harnaś",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a run in the terminal
    Play {
        /// Name of your character
        #[arg(short, long, default_value = "Wędrowiec")]
        name: String,

        /// RNG seed for a repeatable run (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Delay before each action resolves, in milliseconds
        #[arg(long, default_value = "650")]
        pacing_ms: u64,

        /// Number of journal entries to keep
        #[arg(long, default_value = "50")]
        log_limit: usize,
    },

    /// Print the game catalogs as tables
    Catalog {
        /// Which catalog: weapons, enemies, scrolls, advancements, locations (default: all)
        kind: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            name,
            seed,
            pacing_ms,
            log_limit,
        } => commands::play::run(&name, seed, pacing_ms, log_limit),
        Commands::Catalog { kind } => commands::catalog::run(kind.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
