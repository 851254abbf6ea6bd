//! Events exchanged between the dealer and the players.

use serde::Serialize;
use tick_core::LoopStarted;

use crate::card::Card;
use crate::player::PlayerId;

/// How a settled hand finished against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Outcome {
    /// Natural 21 against a dealer without one.
    Blackjack,
    Win,
    Push,
    Lose,
    /// The hand went over 21; loses regardless of the dealer.
    Bust,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlackjackEvent {
    LoopStarted,
    /// A round begins; the dealer deals.
    NewPlay { round: u32 },
    CardIssued {
        player_id: PlayerId,
        hand: usize,
        card: Card,
        face_up: bool,
    },
    /// Asks the seat whether to split its opening hand. Starts the seat's turn.
    SplitDecisionRequested { player_id: PlayerId },
    SplitDecided { player_id: PlayerId, split: bool },
    HitDecisionRequested { player_id: PlayerId, hand: usize },
    Hit { player_id: PlayerId, hand: usize },
    Stand { player_id: PlayerId, hand: usize },
    /// Every hand of the seat has stood.
    EndTurn { player_id: PlayerId },
    /// Every seat has played; the dealer reveals and plays its hand.
    DealerTurn,
    DealerStood { total: u16, blackjack: bool },
    HandSettled {
        player_id: PlayerId,
        hand: usize,
        outcome: Outcome,
    },
    RoundFinished { round: u32 },
}

impl From<LoopStarted> for BlackjackEvent {
    fn from(_: LoopStarted) -> Self {
        BlackjackEvent::LoopStarted
    }
}

impl BlackjackEvent {
    /// The seat the event is addressed to or about, if any.
    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            BlackjackEvent::CardIssued { player_id, .. }
            | BlackjackEvent::SplitDecisionRequested { player_id }
            | BlackjackEvent::SplitDecided { player_id, .. }
            | BlackjackEvent::HitDecisionRequested { player_id, .. }
            | BlackjackEvent::Hit { player_id, .. }
            | BlackjackEvent::Stand { player_id, .. }
            | BlackjackEvent::EndTurn { player_id }
            | BlackjackEvent::HandSettled { player_id, .. } => Some(*player_id),
            _ => None,
        }
    }

    /// Short variant name for logs and exports.
    pub fn kind(&self) -> &'static str {
        match self {
            BlackjackEvent::LoopStarted => "LoopStarted",
            BlackjackEvent::NewPlay { .. } => "NewPlay",
            BlackjackEvent::CardIssued { .. } => "CardIssued",
            BlackjackEvent::SplitDecisionRequested { .. } => "SplitDecisionRequested",
            BlackjackEvent::SplitDecided { .. } => "SplitDecided",
            BlackjackEvent::HitDecisionRequested { .. } => "HitDecisionRequested",
            BlackjackEvent::Hit { .. } => "Hit",
            BlackjackEvent::Stand { .. } => "Stand",
            BlackjackEvent::EndTurn { .. } => "EndTurn",
            BlackjackEvent::DealerTurn => "DealerTurn",
            BlackjackEvent::DealerStood { .. } => "DealerStood",
            BlackjackEvent::HandSettled { .. } => "HandSettled",
            BlackjackEvent::RoundFinished { .. } => "RoundFinished",
        }
    }
}
