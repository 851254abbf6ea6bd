//! Play a few rounds at a three-seat table and print the session report.
//!
//! Run with: cargo run -p tick_blackjack --example table_run

use tick_blackjack::{build_table, PlayerParams, TableParams, ThresholdStrategy};

fn main() {
    const ROUNDS: u32 = 50;

    let params = TableParams::default()
        .with_players(vec![
            PlayerParams::new("cautious").with_strategy(ThresholdStrategy {
                stand_on: 13,
                split_pairs: false,
            }),
            PlayerParams::new("house-mimic"),
            PlayerParams::new("reckless").with_strategy(ThresholdStrategy {
                stand_on: 19,
                split_pairs: true,
            }),
        ])
        .with_rounds(ROUNDS)
        .with_seed(123);

    let mut sim = build_table(params).expect("valid table");
    let report = sim.run().expect("run");

    println!("--- Table run ({} rounds, seed 123) ---", ROUNDS);
    println!("Ticks: {}", report.ticks);
    println!("Events dispatched: {}", report.events_dispatched);
    println!("Cards dealt: {} (shoes used: {})", report.cards_dealt, report.shoes_used);
    println!("Dealer busts: {}", report.dealer_busts);
    println!();
    for player in &report.players {
        println!(
            "  {:<12} hands={:>3}  bj={:>2}  win={:>3}  push={:>2}  lose={:>3}  bust={:>3}  net={:+.1}",
            player.name,
            player.hands,
            player.blackjacks,
            player.wins,
            player.pushes,
            player.losses,
            player.busts,
            player.net_units,
        );
    }
}
