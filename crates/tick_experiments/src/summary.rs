//! Aggregates over a sweep: how each seat fared across every run.

use std::collections::BTreeMap;

use serde::Serialize;
use tick_blackjack::TableReport;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerAggregate {
    pub name: String,
    pub hands: u64,
    pub net_units: f64,
    /// Average units won per hand; negative means the house is ahead.
    pub net_per_hand: f64,
    pub bust_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepSummary {
    pub runs: usize,
    pub rounds: u64,
    pub dealer_bust_rate: f64,
    pub players: Vec<PlayerAggregate>,
}

fn ratio(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole
    } else {
        0.0
    }
}

/// Totals per seat name, seats listed in the order they first appear.
pub fn summarize(reports: &[TableReport]) -> SweepSummary {
    let mut order: Vec<String> = Vec::new();
    let mut totals: BTreeMap<String, (u64, f64, u64)> = BTreeMap::new();
    let mut rounds = 0u64;
    let mut dealer_busts = 0u64;

    for report in reports {
        rounds += u64::from(report.rounds_played);
        dealer_busts += u64::from(report.dealer_busts);
        for player in &report.players {
            let entry = totals.entry(player.name.clone()).or_insert_with(|| {
                order.push(player.name.clone());
                (0, 0.0, 0)
            });
            entry.0 += u64::from(player.hands);
            entry.1 += player.net_units;
            entry.2 += u64::from(player.busts);
        }
    }

    let players = order
        .into_iter()
        .map(|name| {
            let (hands, net_units, busts) = totals.get(&name).copied().unwrap_or_default();
            PlayerAggregate {
                net_per_hand: ratio(net_units, hands as f64),
                bust_rate: ratio(busts as f64, hands as f64),
                name,
                hands,
                net_units,
            }
        })
        .collect();

    SweepSummary {
        runs: reports.len(),
        rounds,
        dealer_bust_rate: ratio(dealer_busts as f64, rounds as f64),
        players,
    }
}

impl SweepSummary {
    /// The seat with the best result per hand.
    pub fn best_player(&self) -> Option<&PlayerAggregate> {
        self.players
            .iter()
            .max_by(|a, b| a.net_per_hand.total_cmp(&b.net_per_hand))
    }
}
