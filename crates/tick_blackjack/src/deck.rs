//! The shoe: one or more shuffled 52-card decks.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::card::{Card, Face, Suit};

pub const CARDS_PER_DECK: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("deck is empty")]
    Empty,
}

/// Cards are drawn from the back of `cards`.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    drawn: Vec<Card>,
    rng: StdRng,
}

impl Deck {
    /// Builds `n_decks` full decks and shuffles them with `rng`.
    pub fn new(n_decks: usize, rng: StdRng) -> Self {
        let mut cards = Vec::with_capacity(CARDS_PER_DECK * n_decks);
        for suit in Suit::ALL {
            for face in Face::ALL {
                for _ in 0..n_decks {
                    cards.push(Card::new(suit, face));
                }
            }
        }
        let mut deck = Self::from_cards(cards, rng);
        deck.shuffle();
        deck
    }

    /// A deck holding `cards` in the given order; the last card is drawn first.
    pub fn from_cards(cards: Vec<Card>, rng: StdRng) -> Self {
        Self {
            cards,
            drawn: Vec::new(),
            rng,
        }
    }

    pub fn draw(&mut self) -> Result<Card, DeckError> {
        let card = self.cards.pop().ok_or(DeckError::Empty)?;
        self.drawn.push(card);
        Ok(card)
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Shuffles, then moves the cards before `idx` to the bottom. A random cut
    /// point is chosen when `idx` is `None`.
    pub fn cut(&mut self, idx: Option<usize>) {
        self.shuffle();
        let len = self.cards.len();
        let idx = idx.unwrap_or_else(|| self.rng.gen_range(0..=len)).min(len);
        debug!(idx, len, "cutting cards");
        self.cards.rotate_left(idx);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards drawn so far, oldest first.
    pub fn drawn(&self) -> &[Card] {
        &self.drawn
    }

    /// Remaining cards; the last one is drawn next.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
