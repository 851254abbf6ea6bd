//! Seats and the decision strategies behind them.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::card::Card;
use crate::hand::Hand;
use crate::BLACKJACK;

/// Seat identifier. Ids are handed out in seating order starting with the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat-{}", self.0)
    }
}

/// Decides hits and splits from a hand and the cards visible on the table.
pub trait Strategy: fmt::Debug {
    fn hit(&self, hand: &Hand, visible_cards: &[Card], dealer_cards: &[Card]) -> bool;

    /// Only consulted for two-card pairs.
    fn split(&self, _hand: &Hand, _visible_cards: &[Card], _dealer_cards: &[Card]) -> bool {
        false
    }
}

/// House rules: stand on any total from 17 to 21, counting an ace as 11 when
/// that lands in range. Never splits.
#[derive(Debug, Clone, Copy, Default)]
pub struct DealerRules;

impl Strategy for DealerRules {
    fn hit(&self, hand: &Hand, _visible_cards: &[Card], _dealer_cards: &[Card]) -> bool {
        let values = hand.values();
        if values.iter().any(|v| (17..=BLACKJACK).contains(v)) {
            return false;
        }
        if values.iter().all(|v| *v > BLACKJACK) {
            return false;
        }
        true
    }
}

/// Hits below `stand_on`, optionally splitting every pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdStrategy {
    pub stand_on: u16,
    pub split_pairs: bool,
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        Self {
            stand_on: 17,
            split_pairs: true,
        }
    }
}

impl Strategy for ThresholdStrategy {
    fn hit(&self, hand: &Hand, _visible_cards: &[Card], _dealer_cards: &[Card]) -> bool {
        hand.best_value().is_some_and(|v| v < self.stand_on)
    }

    fn split(&self, hand: &Hand, _visible_cards: &[Card], _dealer_cards: &[Card]) -> bool {
        self.split_pairs && hand.is_pair()
    }
}

/// A participant at the table: identity, hands for the current round, and
/// the strategy that plays them.
#[derive(Debug)]
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
    hands: Vec<Hand>,
    strategy: Box<dyn Strategy>,
}

impl Seat {
    pub fn new(id: PlayerId, name: impl Into<String>, strategy: Box<dyn Strategy>) -> Self {
        Self {
            id,
            name: name.into(),
            hands: vec![Hand::new()],
            strategy,
        }
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn hand(&self, idx: usize) -> Option<&Hand> {
        self.hands.get(idx)
    }

    pub fn has_split(&self) -> bool {
        self.hands.len() > 1
    }

    /// Adds `card` to hand `idx`, opening a new hand when `idx` is one past the last.
    pub fn add_card(&mut self, idx: usize, card: Card) {
        if idx >= self.hands.len() {
            self.hands.resize_with(idx + 1, Hand::new);
        }
        self.hands[idx].add_card(card);
    }

    /// Clears the hands for a new round.
    pub fn reset(&mut self) {
        self.hands = vec![Hand::new()];
    }

    /// Splits the single starting hand if it is a pair and the strategy agrees.
    pub fn split(&mut self, visible_cards: &[Card], dealer_cards: &[Card]) -> bool {
        let [hand] = self.hands.as_slice() else {
            return false;
        };
        if !hand.is_pair() || !self.strategy.split(hand, visible_cards, dealer_cards) {
            return false;
        }
        let Some((left, right)) = hand.split() else {
            return false;
        };
        debug!(player = %self.id, ?left, ?right, "splitting hand");
        self.hands = vec![left, right];
        true
    }

    /// Whether to take another card on hand `idx`. Bust or missing hands never hit.
    pub fn wants_hit(&self, idx: usize, visible_cards: &[Card], dealer_cards: &[Card]) -> bool {
        match self.hands.get(idx) {
            Some(hand) if !hand.is_bust() => self.strategy.hit(hand, visible_cards, dealer_cards),
            _ => false,
        }
    }
}
