use rand::rngs::StdRng;
use rand::SeedableRng;
use tick_blackjack::{
    Card, DealerProcess, Deck, Face, PlayerId, PlayerProcess, Seat, SharedTable, Suit, Table,
    ThresholdStrategy,
};

/// A shoe that deals `faces` in the given order.
pub fn stacked(faces: &[Face]) -> Deck {
    let cards = faces
        .iter()
        .rev()
        .enumerate()
        .map(|(i, face)| Card::new(Suit::ALL[i % 4], *face))
        .collect();
    Deck::from_cards(cards, StdRng::seed_from_u64(0))
}

/// One-deck table with players 1..=players and the given shoe. No cut card.
pub fn stacked_table(players: u32, faces: &[Face]) -> SharedTable {
    Table::new(
        1,
        StdRng::seed_from_u64(99),
        PlayerId(0),
        (1..=players).map(PlayerId).collect(),
    )
    .with_shoe(stacked(faces))
    .into_shared()
}

pub fn player(id: u32, table: &SharedTable) -> PlayerProcess {
    PlayerProcess::new(
        Seat::new(
            PlayerId(id),
            format!("player-{id}"),
            Box::new(ThresholdStrategy::default()),
        ),
        table.clone(),
    )
}

pub fn dealer(table: &SharedTable, rounds: u32) -> DealerProcess {
    DealerProcess::new(table.clone(), rounds)
}
