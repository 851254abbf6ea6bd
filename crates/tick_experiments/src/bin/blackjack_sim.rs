//! Command-line entry point: play one table session or sweep seeds.

use std::path::PathBuf;
use std::process::exit;

use clap::{Args, Parser, Subcommand};
use tick_blackjack::TableParams;
use tick_experiments::{
    export_to_csv, export_to_json, load_table_params, run_seed_sweep, run_single, summarize,
    TableOverrides,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Blackjack table simulator
///
/// Plays seeded blackjack sessions on a deterministic discrete-event loop.
#[derive(Parser)]
#[command(name = "blackjack_sim")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log level for the simulator crates. `RUST_LOG` takes precedence when set.
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one session and print its report as JSON
    Run {
        #[command(flatten)]
        table: TableArgs,
        /// Also write the report to this JSON file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Play the same table once per seed in parallel
    Sweep {
        #[command(flatten)]
        table: TableArgs,
        /// Number of seeds to run
        #[arg(long, default_value_t = 100)]
        runs: u64,
        /// First seed; seeds are consecutive from here
        #[arg(long, default_value_t = 0)]
        first_seed: u64,
        /// Worker threads. Defaults to one per core.
        #[arg(long)]
        threads: Option<usize>,
        /// Write one row per seat per run to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write every report to this JSON file
        #[arg(long)]
        json: Option<PathBuf>,
        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },
}

#[derive(Args)]
struct TableArgs {
    /// JSON file with table parameters; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Decks per shoe
    #[arg(long, env = "N_DECKS")]
    decks: Option<usize>,

    /// Number of seated players; configured seats keep their strategies
    #[arg(long)]
    players: Option<usize>,

    /// Rounds to play
    #[arg(long)]
    rounds: Option<u32>,

    /// Random seed for reproducible results. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,
}

impl TableArgs {
    fn params(&self) -> Result<TableParams, Box<dyn std::error::Error>> {
        let base = match &self.config {
            Some(path) => load_table_params(path)?,
            None => TableParams::default(),
        };
        let overrides = TableOverrides {
            decks: self.decks,
            players: self.players,
            rounds: self.rounds,
            seed: self.seed,
        };
        Ok(overrides.apply(base))
    }
}

fn init_tracing(log_level: &str) {
    let fallback = ["tick_core", "tick_blackjack", "tick_experiments", "blackjack_sim"]
        .iter()
        .fold("warn".to_string(), |filter, target| {
            format!("{filter},{target}={log_level}")
        });
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Run { table, output } => {
            let params = table.params()?;
            info!(?params, "running table session");
            let report = run_single(&params)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if let Some(path) = output {
                export_to_json(std::slice::from_ref(&report), &path)?;
                info!(path = %path.display(), "wrote report");
            }
        }
        Commands::Sweep {
            table,
            runs,
            first_seed,
            threads,
            csv,
            json,
            no_progress,
        } => {
            let params = table.params()?;
            let seeds: Vec<u64> = (first_seed..first_seed.saturating_add(runs)).collect();
            let reports = run_seed_sweep(&params, &seeds, threads, !no_progress)?;
            println!("{}", serde_json::to_string_pretty(&summarize(&reports))?);
            if let Some(path) = csv {
                export_to_csv(&reports, &path)?;
                info!(path = %path.display(), "wrote csv");
            }
            if let Some(path) = json {
                export_to_json(&reports, &path)?;
                info!(path = %path.display(), "wrote json");
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(err) = run(cli.command) {
        error!(%err, "blackjack_sim failed");
        eprintln!("error: {err}");
        exit(1);
    }
}
