//! CLI frontend for the gacha reward engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gacha",
    about = "Run, replay, and tune gacha reward batches",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the engine's tuning comes from.
#[derive(Args)]
struct TuningArgs {
    /// Built-in tuning preset: standard, legacy
    #[arg(short, long, default_value = "standard")]
    preset: String,

    /// JSON file overriding preset fields
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one batch for a player and show the rewards
    Draw {
        /// Number of draws in the batch
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,

        /// Starting pity
        #[arg(long, default_value = "0")]
        pity: u32,

        /// Starting up-rate (0.0 - 1.0)
        #[arg(long, default_value = "0.5")]
        up_rate: f64,

        /// Tokens held before the batch (default: exactly enough)
        #[arg(short, long)]
        tokens: Option<u64>,

        /// RNG seed for a reproducible batch
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Simulate many draws and report rates
    Simulate {
        /// Total number of draws
        #[arg(short = 'n', long, default_value = "10000")]
        draws: u32,

        /// Draws per batch
        #[arg(short, long, default_value = "10")]
        batch: u32,

        /// RNG seed for a reproducible simulation
        #[arg(short, long, default_value = "42")]
        seed: u64,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Print the effective engine configuration as JSON
    Config {
        #[command(flatten)]
        tuning: TuningArgs,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Draw {
            count,
            pity,
            up_rate,
            tokens,
            seed,
            json,
            tuning,
        } => commands::load_engine(&tuning.preset, tuning.config.as_deref()).and_then(|engine| {
            let request = commands::draw::DrawRequest {
                count,
                pity,
                up_rate,
                tokens,
                seed,
                json,
            };
            commands::draw::run(&engine, &request)
        }),
        Commands::Simulate {
            draws,
            batch,
            seed,
            tuning,
        } => commands::load_engine(&tuning.preset, tuning.config.as_deref())
            .and_then(|engine| commands::simulate::run(&engine, draws, batch, seed)),
        Commands::Config { tuning } => {
            commands::load_engine(&tuning.preset, tuning.config.as_deref())
                .and_then(|engine| commands::config::run(&engine))
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
