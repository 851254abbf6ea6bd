//! Playing cards.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    Ace,
    Deuce,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Face {
    pub const ALL: [Face; 13] = [
        Face::Ace,
        Face::Deuce,
        Face::Three,
        Face::Four,
        Face::Five,
        Face::Six,
        Face::Seven,
        Face::Eight,
        Face::Nine,
        Face::Ten,
        Face::Jack,
        Face::Queen,
        Face::King,
    ];

    /// Every value the face may count as. Aces count 1 or 11, court cards 10.
    pub fn values(self) -> &'static [u8] {
        match self {
            Face::Ace => &[1, 11],
            Face::Deuce => &[2],
            Face::Three => &[3],
            Face::Four => &[4],
            Face::Five => &[5],
            Face::Six => &[6],
            Face::Seven => &[7],
            Face::Eight => &[8],
            Face::Nine => &[9],
            Face::Ten | Face::Jack | Face::Queen | Face::King => &[10],
        }
    }

    /// Lowest value; used to decide whether two cards form a pair.
    pub fn base_value(self) -> u8 {
        self.values()[0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub face: Face,
}

impl Card {
    pub fn new(suit: Suit, face: Face) -> Self {
        Self { suit, face }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} of {:?}", self.face, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aces_count_one_or_eleven() {
        assert_eq!(Face::Ace.values(), &[1, 11]);
        assert_eq!(Face::Ace.base_value(), 1);
    }

    #[test]
    fn court_cards_count_ten() {
        for face in [Face::Ten, Face::Jack, Face::Queen, Face::King] {
            assert_eq!(face.values(), &[10]);
        }
        assert_eq!(Face::Seven.values(), &[7]);
    }

    #[test]
    fn display_names_face_and_suit() {
        assert_eq!(Card::new(Suit::Hearts, Face::Queen).to_string(), "Queen of Hearts");
    }
}
