//! State shared by everyone at the table: the shoe, seating order and the
//! cards in view.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::card::Card;
use crate::deck::{Deck, DeckError, CARDS_PER_DECK};
use crate::player::PlayerId;

/// Processes hold the table through a shared handle; the loop is single-threaded.
pub type SharedTable = Rc<RefCell<Table>>;

/// One card of the opening deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealtCard {
    pub player_id: PlayerId,
    pub card: Card,
    pub face_up: bool,
}

#[derive(Debug)]
pub struct Table {
    shoe: Deck,
    rng: StdRng,
    n_decks: usize,
    /// Fraction of the shoe left at which a new shoe is brought in between rounds.
    cut_card_fraction: f64,
    dealer_id: PlayerId,
    player_ids: Vec<PlayerId>,
    cursor: usize,
    visible_cards: Vec<Card>,
    dealer_visible_cards: Vec<Card>,
    hand_counts: BTreeMap<PlayerId, usize>,
    round: u32,
    shoes_used: u32,
}

impl Table {
    /// Seats `player_ids` left to right and draws a fresh shoe of `n_decks` from `rng`.
    pub fn new(
        n_decks: usize,
        rng: StdRng,
        dealer_id: PlayerId,
        player_ids: Vec<PlayerId>,
    ) -> Self {
        let mut table = Self {
            shoe: Deck::from_cards(Vec::new(), StdRng::seed_from_u64(0)),
            rng,
            n_decks,
            cut_card_fraction: 0.0,
            dealer_id,
            hand_counts: player_ids.iter().map(|id| (*id, 1)).collect(),
            player_ids,
            cursor: 0,
            visible_cards: Vec::new(),
            dealer_visible_cards: Vec::new(),
            round: 0,
            shoes_used: 0,
        };
        table.new_shoe();
        table
    }

    pub fn with_cut_card(mut self, fraction: f64) -> Self {
        self.cut_card_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Swaps in a prepared shoe, e.g. a stacked one. It is used as-is until exhausted.
    pub fn with_shoe(mut self, shoe: Deck) -> Self {
        self.shoe = shoe;
        self
    }

    /// Replaces the shoe with a freshly shuffled and cut one. Card memory resets with it.
    pub fn new_shoe(&mut self) {
        let mut shoe = Deck::new(self.n_decks, StdRng::seed_from_u64(self.rng.gen()));
        shoe.cut(None);
        self.shoe = shoe;
        self.visible_cards.clear();
        self.shoes_used += 1;
        info!(shoe = self.shoes_used, cards = self.shoe.len(), "new shoe");
    }

    /// Resets per-round state. A new shoe is brought in when the current one
    /// has fallen below the cut card; returns whether that happened.
    pub fn start_round(&mut self, round: u32) -> bool {
        self.round = round;
        self.cursor = 0;
        self.dealer_visible_cards.clear();
        for count in self.hand_counts.values_mut() {
            *count = 1;
        }
        let threshold = (self.shoe_size() as f64 * self.cut_card_fraction) as usize;
        let reshuffle = self.shoe.len() <= threshold;
        if reshuffle {
            self.new_shoe();
        }
        debug!(round, remaining = self.shoe.len(), reshuffle, "round started");
        reshuffle
    }

    /// Draws the next card, bringing in a new shoe if the current one is exhausted.
    pub fn draw(&mut self, visible: bool, dealer: bool) -> Result<Card, DeckError> {
        if self.shoe.is_empty() {
            self.new_shoe();
        }
        let card = self.shoe.draw()?;
        if visible {
            self.visible_cards.push(card);
            if dealer {
                self.dealer_visible_cards.push(card);
            }
        }
        Ok(card)
    }

    /// The opening deal: one card to each player left to right, the dealer's
    /// up-card, a second card to each player, then the dealer's hole card face down.
    pub fn deal(&mut self) -> Result<Vec<DealtCard>, DeckError> {
        self.dealer_visible_cards.clear();
        let mut dealt = Vec::with_capacity(2 * (self.player_ids.len() + 1));
        for pass in 0..2 {
            for idx in 0..self.player_ids.len() {
                let player_id = self.player_ids[idx];
                dealt.push(DealtCard {
                    player_id,
                    card: self.draw(true, false)?,
                    face_up: true,
                });
            }
            let face_up = pass == 0;
            dealt.push(DealtCard {
                player_id: self.dealer_id,
                card: self.draw(face_up, true)?,
                face_up,
            });
        }
        Ok(dealt)
    }

    /// Turns the dealer's hole card face up.
    pub fn dealer_reveal(&mut self, card: Card) {
        self.visible_cards.push(card);
        self.dealer_visible_cards.push(card);
    }

    /// The seat whose turn it is, or `None` once every player has played.
    pub fn current_player(&self) -> Option<PlayerId> {
        self.player_ids.get(self.cursor).copied()
    }

    /// Moves the turn to the next seat and returns it.
    pub fn advance_player(&mut self) -> Option<PlayerId> {
        if self.cursor < self.player_ids.len() {
            self.cursor += 1;
        }
        self.current_player()
    }

    pub fn set_hand_count(&mut self, player_id: PlayerId, hands: usize) {
        self.hand_counts.insert(player_id, hands);
    }

    pub fn hand_count(&self, player_id: PlayerId) -> usize {
        self.hand_counts.get(&player_id).copied().unwrap_or(0)
    }

    /// Player hands in play this round.
    pub fn total_hands(&self) -> usize {
        self.hand_counts.values().sum()
    }

    pub fn visible_cards(&self) -> &[Card] {
        &self.visible_cards
    }

    pub fn dealer_visible_cards(&self) -> &[Card] {
        &self.dealer_visible_cards
    }

    pub fn dealer_id(&self) -> PlayerId {
        self.dealer_id
    }

    pub fn player_ids(&self) -> &[PlayerId] {
        &self.player_ids
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn shoes_used(&self) -> u32 {
        self.shoes_used
    }

    pub fn shoe(&self) -> &Deck {
        &self.shoe
    }

    /// Cards in a full shoe.
    pub fn shoe_size(&self) -> usize {
        self.n_decks * CARDS_PER_DECK
    }

    pub fn into_shared(self) -> SharedTable {
        Rc::new(RefCell::new(self))
    }
}
