use serde::{Deserialize, Serialize};

use crate::player::ThresholdStrategy;

/// Default fraction of the shoe left when a new one is brought in.
const DEFAULT_CUT_CARD_FRACTION: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerParams {
    pub name: String,
    #[serde(default)]
    pub strategy: ThresholdStrategy,
}

impl PlayerParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strategy: ThresholdStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: ThresholdStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Parameters for one table session. Loads from JSON with missing fields defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableParams {
    /// Decks per shoe.
    pub n_decks: usize,
    /// Seated left to right; the dealer deals to them in this order.
    pub players: Vec<PlayerParams>,
    pub rounds: u32,
    /// Seed for the shoe. `None` draws one from entropy.
    pub seed: Option<u64>,
    /// A new shoe is brought in before a round once this fraction of it or less remains.
    pub cut_card_fraction: f64,
}

impl Default for TableParams {
    fn default() -> Self {
        Self {
            n_decks: 6,
            players: vec![PlayerParams::new("player-1")],
            rounds: 1,
            seed: None,
            cut_card_fraction: DEFAULT_CUT_CARD_FRACTION,
        }
    }
}

impl TableParams {
    pub fn with_decks(mut self, n_decks: usize) -> Self {
        self.n_decks = n_decks;
        self
    }

    /// Replaces the seats with `count` players named `player-1`, `player-2`, ...
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.players = (1..=count)
            .map(|i| PlayerParams::new(format!("player-{i}")))
            .collect();
        self
    }

    pub fn with_player(mut self, player: PlayerParams) -> Self {
        self.players.push(player);
        self
    }

    pub fn with_players(mut self, players: Vec<PlayerParams>) -> Self {
        self.players = players;
        self
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_cut_card_fraction(mut self, fraction: f64) -> Self {
        self.cut_card_fraction = fraction;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_six_deck_shoe() {
        let params = TableParams::default();
        assert_eq!(params.n_decks, 6);
        assert_eq!(params.rounds, 1);
        assert_eq!(params.players.len(), 1);
        assert!(params.seed.is_none());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let params: TableParams = serde_json::from_str(
            r#"{"n_decks": 2, "players": [{"name": "ada", "strategy": {"stand_on": 15}}]}"#,
        )
        .expect("parse");
        assert_eq!(params.n_decks, 2);
        assert_eq!(params.rounds, 1);
        assert_eq!(params.players[0].strategy.stand_on, 15);
        assert!(params.players[0].strategy.split_pairs);
    }

    #[test]
    fn builders_chain() {
        let params = TableParams::default()
            .with_player_count(3)
            .with_rounds(10)
            .with_seed(9)
            .with_decks(1);
        assert_eq!(params.players[2].name, "player-3");
        assert_eq!(params.rounds, 10);
        assert_eq!(params.seed, Some(9));
        assert_eq!(params.n_decks, 1);
    }
}
