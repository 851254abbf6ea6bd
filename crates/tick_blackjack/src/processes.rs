//! The dealer and player processes.
//!
//! The dealer moderates: it deals, answers hits and splits with cards, walks
//! the seats in order, plays its own hand and closes the round. Each player
//! owns one seat and only reacts to events addressed to it, plus the dealer's
//! final total. Every reaction schedules its follow-ups one timestep later.

use tick_core::{Process, Timestep};
use tracing::{debug, error, info};

use crate::card::Card;
use crate::deck::DeckError;
use crate::events::{BlackjackEvent, Outcome};
use crate::hand::Hand;
use crate::player::{DealerRules, PlayerId, Seat};
use crate::table::SharedTable;
use crate::BLACKJACK;

type FollowUps = Vec<(BlackjackEvent, Timestep)>;

pub struct DealerProcess {
    seat: Seat,
    table: SharedTable,
    rounds: u32,
    hole_card: Option<Card>,
    settled: usize,
    failure: Option<DeckError>,
}

impl DealerProcess {
    /// A dealer that plays `rounds` rounds before going quiet.
    pub fn new(table: SharedTable, rounds: u32) -> Self {
        let id = table.borrow().dealer_id();
        Self {
            seat: Seat::new(id, "dealer", Box::new(DealerRules)),
            table,
            rounds,
            hole_card: None,
            settled: 0,
            failure: None,
        }
    }

    pub fn seat(&self) -> &Seat {
        &self.seat
    }

    /// The draw error that stopped the game, if any.
    pub fn failure(&self) -> Option<DeckError> {
        self.failure
    }

    fn id(&self) -> PlayerId {
        self.seat.id
    }

    fn draw(&mut self, visible: bool, dealer: bool) -> Option<Card> {
        match self.table.borrow_mut().draw(visible, dealer) {
            Ok(card) => Some(card),
            Err(err) => {
                error!(%err, "dealer could not draw");
                self.failure = Some(err);
                None
            }
        }
    }

    fn issue(&mut self, player_id: PlayerId, hand: usize) -> Option<BlackjackEvent> {
        let dealer = player_id == self.id();
        let card = self.draw(true, dealer)?;
        Some(BlackjackEvent::CardIssued {
            player_id,
            hand,
            card,
            face_up: true,
        })
    }

    fn new_play(&mut self, round: u32, next: Timestep) -> FollowUps {
        self.seat.reset();
        self.hole_card = None;
        self.settled = 0;

        let deal = {
            let mut table = self.table.borrow_mut();
            table.start_round(round);
            table.deal()
        };
        let dealt = match deal {
            Ok(dealt) => dealt,
            Err(err) => {
                error!(%err, round, "dealer could not deal");
                self.failure = Some(err);
                return Vec::new();
            }
        };

        info!(round, cards = dealt.len(), "dealing");
        let mut events: FollowUps = dealt
            .into_iter()
            .map(|dealt| {
                (
                    BlackjackEvent::CardIssued {
                        player_id: dealt.player_id,
                        hand: 0,
                        card: dealt.card,
                        face_up: dealt.face_up,
                    },
                    next,
                )
            })
            .collect();
        let first = self.table.borrow().current_player();
        events.push((Self::turn_for(first), next));
        events
    }

    /// Starts the turn of `player`, or the dealer's own once every seat has played.
    fn turn_for(player: Option<PlayerId>) -> BlackjackEvent {
        match player {
            Some(player_id) => BlackjackEvent::SplitDecisionRequested { player_id },
            None => BlackjackEvent::DealerTurn,
        }
    }

    fn split_decided(&mut self, player_id: PlayerId, split: bool, next: Timestep) -> FollowUps {
        let mut events = Vec::new();
        if split {
            self.table.borrow_mut().set_hand_count(player_id, 2);
            for hand in 0..2 {
                let Some(card) = self.issue(player_id, hand) else {
                    return Vec::new();
                };
                events.push((card, next));
            }
        }
        events.push((BlackjackEvent::HitDecisionRequested { player_id, hand: 0 }, next));
        events
    }

    fn dealer_turn(&mut self, next: Timestep) -> FollowUps {
        if let Some(card) = self.hole_card.take() {
            debug!(%card, "revealing hole card");
            self.table.borrow_mut().dealer_reveal(card);
        }

        let hit = {
            let table = self.table.borrow();
            self.seat
                .wants_hit(0, table.visible_cards(), table.dealer_visible_cards())
        };
        if hit {
            let id = self.id();
            let Some(card) = self.issue(id, 0) else {
                return Vec::new();
            };
            return vec![(card, next), (BlackjackEvent::DealerTurn, next)];
        }

        let hand = self.dealer_hand();
        let total = hand.total();
        debug!(total, bust = total > BLACKJACK, "dealer stands");
        vec![(
            BlackjackEvent::DealerStood {
                total,
                blackjack: hand.is_blackjack(),
            },
            next,
        )]
    }

    fn dealer_hand(&self) -> Hand {
        self.seat.hand(0).cloned().unwrap_or_default()
    }
}

impl Process<BlackjackEvent> for DealerProcess {
    fn react(&mut self, event: &BlackjackEvent, now: Timestep) -> FollowUps {
        if self.failure.is_some() {
            return Vec::new();
        }
        let next = now + 1;
        match event {
            BlackjackEvent::LoopStarted if self.rounds > 0 => {
                vec![(BlackjackEvent::NewPlay { round: 1 }, next)]
            }
            BlackjackEvent::NewPlay { round } => self.new_play(*round, next),
            BlackjackEvent::CardIssued {
                player_id,
                card,
                face_up,
                ..
            } if *player_id == self.id() => {
                self.seat.add_card(0, *card);
                if !face_up {
                    self.hole_card = Some(*card);
                }
                Vec::new()
            }
            BlackjackEvent::SplitDecided { player_id, split } => {
                self.split_decided(*player_id, *split, next)
            }
            BlackjackEvent::Hit { player_id, hand } => match self.issue(*player_id, *hand) {
                Some(card) => vec![
                    (card, next),
                    (
                        BlackjackEvent::HitDecisionRequested {
                            player_id: *player_id,
                            hand: *hand,
                        },
                        next,
                    ),
                ],
                None => Vec::new(),
            },
            BlackjackEvent::Stand { player_id, hand } => {
                let hands = self.table.borrow().hand_count(*player_id);
                let follow_up = if hand + 1 < hands {
                    BlackjackEvent::HitDecisionRequested {
                        player_id: *player_id,
                        hand: hand + 1,
                    }
                } else {
                    BlackjackEvent::EndTurn {
                        player_id: *player_id,
                    }
                };
                vec![(follow_up, next)]
            }
            BlackjackEvent::EndTurn { player_id } => {
                let mut table = self.table.borrow_mut();
                if table.current_player() != Some(*player_id) {
                    return Vec::new();
                }
                let following = table.advance_player();
                vec![(Self::turn_for(following), next)]
            }
            BlackjackEvent::DealerTurn => self.dealer_turn(next),
            BlackjackEvent::HandSettled { .. } => {
                self.settled += 1;
                let table = self.table.borrow();
                if self.settled < table.total_hands() {
                    return Vec::new();
                }
                vec![(
                    BlackjackEvent::RoundFinished {
                        round: table.round(),
                    },
                    next,
                )]
            }
            BlackjackEvent::RoundFinished { round } if *round < self.rounds => {
                vec![(BlackjackEvent::NewPlay { round: round + 1 }, next)]
            }
            _ => Vec::new(),
        }
    }

    fn name(&self) -> &str {
        "dealer"
    }
}

/// Result of one player hand against the dealer's final hand.
///
/// `natural` is a two-card 21 on a hand that was never split.
pub fn settle(hand: &Hand, natural: bool, dealer_total: u16, dealer_blackjack: bool) -> Outcome {
    if hand.is_bust() {
        return Outcome::Bust;
    }
    match (natural, dealer_blackjack) {
        (true, true) => return Outcome::Push,
        (true, false) => return Outcome::Blackjack,
        (false, true) => return Outcome::Lose,
        (false, false) => {}
    }
    if dealer_total > BLACKJACK {
        return Outcome::Win;
    }
    let total = hand.total();
    match total.cmp(&dealer_total) {
        std::cmp::Ordering::Greater => Outcome::Win,
        std::cmp::Ordering::Equal => Outcome::Push,
        std::cmp::Ordering::Less => Outcome::Lose,
    }
}

pub struct PlayerProcess {
    seat: Seat,
    table: SharedTable,
}

impl PlayerProcess {
    pub fn new(seat: Seat, table: SharedTable) -> Self {
        Self { seat, table }
    }

    pub fn seat(&self) -> &Seat {
        &self.seat
    }

    pub fn id(&self) -> PlayerId {
        self.seat.id
    }

    fn settle_hands(&self, dealer_total: u16, dealer_blackjack: bool, next: Timestep) -> FollowUps {
        let natural_possible = !self.seat.has_split();
        self.seat
            .hands()
            .iter()
            .enumerate()
            .map(|(idx, hand)| {
                let outcome = settle(
                    hand,
                    natural_possible && hand.is_blackjack(),
                    dealer_total,
                    dealer_blackjack,
                );
                debug!(
                    player = %self.seat.id,
                    hand = idx,
                    total = hand.total(),
                    ?outcome,
                    "hand settled"
                );
                (
                    BlackjackEvent::HandSettled {
                        player_id: self.seat.id,
                        hand: idx,
                        outcome,
                    },
                    next,
                )
            })
            .collect()
    }
}

impl Process<BlackjackEvent> for PlayerProcess {
    fn react(&mut self, event: &BlackjackEvent, now: Timestep) -> FollowUps {
        let next = now + 1;
        let me = self.seat.id;
        match event {
            BlackjackEvent::NewPlay { .. } => {
                self.seat.reset();
                Vec::new()
            }
            BlackjackEvent::CardIssued {
                player_id,
                hand,
                card,
                ..
            } if *player_id == me => {
                self.seat.add_card(*hand, *card);
                Vec::new()
            }
            BlackjackEvent::SplitDecisionRequested { player_id } if *player_id == me => {
                let split = {
                    let table = self.table.borrow();
                    self.seat
                        .split(table.visible_cards(), table.dealer_visible_cards())
                };
                vec![(
                    BlackjackEvent::SplitDecided {
                        player_id: me,
                        split,
                    },
                    next,
                )]
            }
            BlackjackEvent::HitDecisionRequested { player_id, hand } if *player_id == me => {
                let hit = {
                    let table = self.table.borrow();
                    self.seat
                        .wants_hit(*hand, table.visible_cards(), table.dealer_visible_cards())
                };
                debug!(player = %me, hand, hit, "hit decision");
                let follow_up = if hit {
                    BlackjackEvent::Hit {
                        player_id: me,
                        hand: *hand,
                    }
                } else {
                    BlackjackEvent::Stand {
                        player_id: me,
                        hand: *hand,
                    }
                };
                vec![(follow_up, next)]
            }
            BlackjackEvent::DealerStood { total, blackjack } => {
                self.settle_hands(*total, *blackjack, next)
            }
            _ => Vec::new(),
        }
    }

    fn name(&self) -> &str {
        &self.seat.name
    }
}
