use serde::{Deserialize, Serialize};

/// Per-seat results of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub id: u32,
    pub name: String,
    pub hands: u32,
    pub blackjacks: u32,
    pub wins: u32,
    pub pushes: u32,
    pub losses: u32,
    pub busts: u32,
    pub net_units: f64,
}

/// What a [super::TableSimulation] run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableReport {
    pub seed: Option<u64>,
    pub rounds_played: u32,
    pub ticks: u64,
    pub events_dispatched: u64,
    pub final_timestep: u64,
    pub cards_dealt: u64,
    pub splits: u32,
    pub hits: u32,
    pub dealer_busts: u32,
    pub dealer_blackjacks: u32,
    pub shoes_used: u32,
    pub players: Vec<PlayerReport>,
}

impl TableReport {
    pub fn player(&self, name: &str) -> Option<&PlayerReport> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn total_hands(&self) -> u32 {
        self.players.iter().map(|p| p.hands).sum()
    }
}
