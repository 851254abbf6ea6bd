//! Table configuration for the command line: a JSON file plus flag overrides.

use std::fs;
use std::path::Path;

use tick_blackjack::{PlayerParams, TableParams};

/// Loads [TableParams] from a JSON file; missing fields take their defaults.
pub fn load_table_params(
    path: impl AsRef<Path>,
) -> Result<TableParams, Box<dyn std::error::Error>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|error| format!("failed to read config '{}': {error}", path.display()))?;
    let params = serde_json::from_str(&contents)
        .map_err(|error| format!("invalid config '{}': {error}", path.display()))?;
    Ok(params)
}

/// Values given on the command line (or via environment) that win over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableOverrides {
    pub decks: Option<usize>,
    pub players: Option<usize>,
    pub rounds: Option<u32>,
    pub seed: Option<u64>,
}

impl TableOverrides {
    pub fn apply(&self, mut params: TableParams) -> TableParams {
        if let Some(decks) = self.decks {
            params = params.with_decks(decks);
        }
        if let Some(players) = self.players {
            params = resize_seats(params, players);
        }
        if let Some(rounds) = self.rounds {
            params = params.with_rounds(rounds);
        }
        if let Some(seed) = self.seed {
            params = params.with_seed(seed);
        }
        params
    }
}

/// Keeps the first `count` configured seats and their strategies, filling any
/// extra seats with default players.
fn resize_seats(params: TableParams, count: usize) -> TableParams {
    let mut seats = params.players.clone();
    seats.truncate(count);
    for i in seats.len() + 1..=count {
        seats.push(PlayerParams::new(format!("player-{i}")));
    }
    params.with_players(seats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tick_blackjack::ThresholdStrategy;

    #[test]
    fn loads_partial_json_config() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{"n_decks": 2, "rounds": 7, "seed": 3}}"#).expect("write");

        let params = load_table_params(file.path()).expect("load");
        assert_eq!(params.n_decks, 2);
        assert_eq!(params.rounds, 7);
        assert_eq!(params.seed, Some(3));
        assert_eq!(params.players.len(), 1);
    }

    #[test]
    fn reports_missing_and_malformed_files() {
        let missing = load_table_params("/nonexistent/table.json").expect_err("missing");
        assert!(missing.to_string().starts_with("failed to read config"));

        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "{{not json").expect("write");
        let malformed = load_table_params(file.path()).expect_err("malformed");
        assert!(malformed.to_string().starts_with("invalid config"));
    }

    #[test]
    fn player_override_keeps_configured_strategies() {
        let cautious = ThresholdStrategy {
            stand_on: 12,
            split_pairs: false,
        };
        let base = TableParams::default().with_players(vec![
            PlayerParams::new("alice").with_strategy(cautious),
            PlayerParams::new("bob"),
        ]);

        let grown = TableOverrides {
            players: Some(3),
            ..Default::default()
        }
        .apply(base.clone());
        let names: Vec<_> = grown.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "player-3"]);
        assert_eq!(grown.players[0].strategy, cautious);

        let shrunk = TableOverrides {
            players: Some(1),
            ..Default::default()
        }
        .apply(base);
        assert_eq!(shrunk.players.len(), 1);
        assert_eq!(shrunk.players[0].strategy, cautious);
    }

    #[test]
    fn overrides_win_over_file_values() {
        let overrides = TableOverrides {
            decks: Some(1),
            players: Some(4),
            rounds: None,
            seed: Some(10),
        };
        let params = overrides.apply(TableParams::default().with_rounds(3).with_decks(8));
        assert_eq!(params.n_decks, 1);
        assert_eq!(params.players.len(), 4);
        assert_eq!(params.rounds, 3);
        assert_eq!(params.seed, Some(10));
    }
}
