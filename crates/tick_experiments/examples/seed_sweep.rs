//! Example: sweep seeds for a three-seat table and compare strategies.
//!
//! Run with: cargo run -p tick_experiments --example seed_sweep --release

use tick_blackjack::{PlayerParams, TableParams, ThresholdStrategy};
use tick_experiments::{export_to_csv, run_seed_sweep, summarize};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    const RUNS: u64 = 200;
    const ROUNDS: u32 = 100;

    let base = TableParams::default()
        .with_players(vec![
            PlayerParams::new("stand-12").with_strategy(ThresholdStrategy {
                stand_on: 12,
                split_pairs: false,
            }),
            PlayerParams::new("stand-17"),
            PlayerParams::new("stand-19").with_strategy(ThresholdStrategy {
                stand_on: 19,
                split_pairs: true,
            }),
        ])
        .with_rounds(ROUNDS);

    println!("Running {} sessions of {} rounds...", RUNS, ROUNDS);
    let seeds: Vec<u64> = (0..RUNS).collect();
    let reports = run_seed_sweep(&base, &seeds, None, true)?;

    let summary = summarize(&reports);
    println!("\n=== Sweep summary ===");
    println!("Rounds played: {}", summary.rounds);
    println!("Dealer bust rate: {:.1}%", summary.dealer_bust_rate * 100.0);
    for player in &summary.players {
        println!(
            "  {:<10} hands={:>6}  net/hand={:+.4}  bust rate={:.1}%",
            player.name,
            player.hands,
            player.net_per_hand,
            player.bust_rate * 100.0
        );
    }
    if let Some(best) = summary.best_player() {
        println!("\nBest strategy: {}", best.name);
    }

    export_to_csv(&reports, "seed_sweep.csv")?;
    println!("Wrote seed_sweep.csv");
    Ok(())
}
