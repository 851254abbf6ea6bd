//! A hand of cards and its possible totals.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::BLACKJACK;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Every distinct total the hand can count as, ascending.
    ///
    /// Each ace doubles the alternatives; an empty hand totals 0.
    pub fn values(&self) -> Vec<u16> {
        let mut totals = BTreeSet::from([0u16]);
        for card in &self.cards {
            totals = totals
                .iter()
                .flat_map(|total| card.face.values().iter().map(move |v| total + u16::from(*v)))
                .collect();
        }
        totals.into_iter().collect()
    }

    /// Largest total that is not bust.
    pub fn best_value(&self) -> Option<u16> {
        self.values().into_iter().filter(|v| *v <= BLACKJACK).max()
    }

    /// Smallest total, counting every ace as 1.
    pub fn min_value(&self) -> u16 {
        self.cards
            .iter()
            .map(|card| u16::from(card.face.base_value()))
            .sum()
    }

    /// Best total, or the smallest one when every total is bust.
    pub fn total(&self) -> u16 {
        self.best_value().unwrap_or_else(|| self.min_value())
    }

    pub fn is_bust(&self) -> bool {
        self.min_value() > BLACKJACK
    }

    /// Two cards totalling 21.
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.best_value() == Some(BLACKJACK)
    }

    /// Two cards of equal value.
    pub fn is_pair(&self) -> bool {
        match self.cards.as_slice() {
            [first, second] => first.face.base_value() == second.face.base_value(),
            _ => false,
        }
    }

    /// Splits a pair into two one-card hands. Returns `None` for anything else.
    pub fn split(&self) -> Option<(Hand, Hand)> {
        if !self.is_pair() {
            return None;
        }
        Some((
            Hand::from_cards(vec![self.cards[0]]),
            Hand::from_cards(vec![self.cards[1]]),
        ))
    }
}
