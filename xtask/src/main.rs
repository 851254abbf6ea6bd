use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the tick workspace",
    long_about = "A unified CLI for running table sessions, seed sweeps, benchmarks,\n\
                  and CI checks in the tick workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single table session and print the report
    Run {
        /// Rounds to play
        #[arg(long, default_value_t = 50)]
        rounds: u32,
        /// Seed for the shoe
        #[arg(long, default_value_t = 123)]
        seed: u64,
    },
    /// Run a seed sweep experiment
    Sweep {
        /// Number of seeds to run
        #[arg(long, default_value_t = 100)]
        runs: u64,
        /// Output CSV path
        #[arg(long, default_value = "sweep.csv")]
        output: String,
    },
    /// Run Criterion benchmarks
    Bench {
        /// Crate whose benchmarks to run
        #[arg(value_enum, default_value_t = BenchTarget::Core)]
        target: BenchTarget,
    },
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Run load tests (ignored tests in tick_core)
    LoadTest,
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and run examples
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum BenchTarget {
    Core,
    Blackjack,
}

impl BenchTarget {
    fn package(self) -> &'static str {
        match self {
            Self::Core => "tick_core",
            Self::Blackjack => "tick_blackjack",
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn git(args: &[&str]) -> ExitStatus {
    eprintln!("+ git {}", args.join(" "));
    Command::new("git")
        .args(args)
        .status()
        .expect("failed to execute git")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_git(args: &[&str]) {
    let status = git(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn bench(package: &str, extra: &[&str]) {
    let mut args = vec!["bench", "--package", package, "--bench", "performance"];
    if !extra.is_empty() {
        args.push("--");
        args.extend_from_slice(extra);
    }
    run_cargo(&args);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    for package in ["tick_core", "tick_blackjack", "tick_experiments"] {
        step(&format!("Test {package}"));
        run_cargo(&["test", "-p", package]);
    }
}

fn ci_examples() {
    step("Run echo_run");
    run_cargo(&["run", "-p", "tick_core", "--example", "echo_run"]);

    step("Run table_run (50 rounds, 3 seats)");
    run_cargo(&[
        "run",
        "-p",
        "tick_blackjack",
        "--example",
        "table_run",
        "--release",
    ]);

    step("Run blackjack_sim sweep (20 seeds)");
    run_cargo(&[
        "run",
        "-p",
        "tick_experiments",
        "--bin",
        "blackjack_sim",
        "--release",
        "--",
        "sweep",
        "--runs",
        "20",
        "--no-progress",
    ]);
}

fn ci_bench() {
    step("Run tick_core benchmarks");
    bench("tick_core", &[]);

    step("Run tick_blackjack benchmarks");
    bench("tick_blackjack", &[]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { rounds, seed } => {
            let rounds = rounds.to_string();
            let seed = seed.to_string();
            run_cargo(&[
                "run",
                "-p",
                "tick_experiments",
                "--bin",
                "blackjack_sim",
                "--release",
                "--",
                "run",
                "--players",
                "3",
                "--rounds",
                &rounds,
                "--seed",
                &seed,
            ]);
        }
        Commands::Sweep { runs, output } => {
            let runs = runs.to_string();
            run_cargo(&[
                "run",
                "-p",
                "tick_experiments",
                "--bin",
                "blackjack_sim",
                "--release",
                "--",
                "sweep",
                "--runs",
                &runs,
                "--csv",
                &output,
            ]);
        }
        Commands::Bench { target } => {
            bench(target.package(), &[]);
        }
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                std::fs::remove_dir_all(baseline_dir).expect("failed to remove target/criterion");
            }

            step("Stashing current changes");
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);

            step("Running benchmark to create baseline");
            bench("tick_core", &["--save-baseline", "main"]);

            step("Reapplying changes");
            run_git(&["stash", "pop"]);

            step("Running benchmark comparing against baseline");
            bench("tick_core", &["--baseline", "main"]);

            eprintln!("\nDone! Check the output above to see performance comparison.");
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::LoadTest => {
            run_cargo(&[
                "test",
                "-p",
                "tick_core",
                "--test",
                "load_tests",
                "--",
                "--ignored",
            ]);
        }
    }
}
