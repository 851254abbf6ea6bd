//! Table-wide counters kept in a `bevy_ecs` world.
//!
//! [stats_process] wraps the world in an [EcsProcess] so it listens to the
//! table like any other participant. Each system is gated on the event kind
//! it counts.

use std::collections::BTreeMap;

use bevy_ecs::prelude::{IntoSystemConfigs, Res, ResMut, Resource, Schedule, World};
use serde::Serialize;
use tick_core::{CurrentEvent, EcsProcess};

use crate::events::{BlackjackEvent, Outcome};
use crate::player::PlayerId;
use crate::BLACKJACK;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeTally {
    pub blackjacks: u32,
    pub wins: u32,
    pub pushes: u32,
    pub losses: u32,
    pub busts: u32,
}

impl OutcomeTally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Blackjack => self.blackjacks += 1,
            Outcome::Win => self.wins += 1,
            Outcome::Push => self.pushes += 1,
            Outcome::Lose => self.losses += 1,
            Outcome::Bust => self.busts += 1,
        }
    }

    pub fn hands(&self) -> u32 {
        self.blackjacks + self.wins + self.pushes + self.losses + self.busts
    }

    /// Net result in betting units with one unit staked per hand; naturals pay 3:2.
    pub fn net_units(&self) -> f64 {
        1.5 * f64::from(self.blackjacks) + f64::from(self.wins)
            - f64::from(self.losses)
            - f64::from(self.busts)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Resource, Serialize)]
pub struct TableStats {
    pub rounds: u32,
    pub cards_dealt: u64,
    pub splits: u32,
    pub hits: u32,
    pub dealer_busts: u32,
    pub dealer_blackjacks: u32,
    pub outcomes: BTreeMap<PlayerId, OutcomeTally>,
}

impl TableStats {
    pub fn tally(&self, player_id: PlayerId) -> OutcomeTally {
        self.outcomes.get(&player_id).copied().unwrap_or_default()
    }
}

type Current<'w> = Res<'w, CurrentEvent<BlackjackEvent>>;

fn current_is(event: Option<Current>, predicate: fn(&BlackjackEvent) -> bool) -> bool {
    event.map(|e| predicate(&e.0)).unwrap_or(false)
}

// Condition functions for each counted event kind
fn is_card_issued(event: Option<Current>) -> bool {
    current_is(event, |e| matches!(e, BlackjackEvent::CardIssued { .. }))
}

fn is_split_decided(event: Option<Current>) -> bool {
    current_is(event, |e| matches!(e, BlackjackEvent::SplitDecided { .. }))
}

fn is_hit(event: Option<Current>) -> bool {
    current_is(event, |e| matches!(e, BlackjackEvent::Hit { .. }))
}

fn is_dealer_stood(event: Option<Current>) -> bool {
    current_is(event, |e| matches!(e, BlackjackEvent::DealerStood { .. }))
}

fn is_hand_settled(event: Option<Current>) -> bool {
    current_is(event, |e| matches!(e, BlackjackEvent::HandSettled { .. }))
}

fn is_round_finished(event: Option<Current>) -> bool {
    current_is(event, |e| matches!(e, BlackjackEvent::RoundFinished { .. }))
}

fn count_cards_system(mut stats: ResMut<TableStats>) {
    stats.cards_dealt += 1;
}

fn count_splits_system(event: Current, mut stats: ResMut<TableStats>) {
    if let BlackjackEvent::SplitDecided { split: true, .. } = event.0 {
        stats.splits += 1;
    }
}

fn count_hits_system(mut stats: ResMut<TableStats>) {
    stats.hits += 1;
}

fn dealer_result_system(event: Current, mut stats: ResMut<TableStats>) {
    if let BlackjackEvent::DealerStood { total, blackjack } = event.0 {
        if total > BLACKJACK {
            stats.dealer_busts += 1;
        }
        if blackjack {
            stats.dealer_blackjacks += 1;
        }
    }
}

fn record_outcome_system(event: Current, mut stats: ResMut<TableStats>) {
    if let BlackjackEvent::HandSettled {
        player_id, outcome, ..
    } = event.0
    {
        stats.outcomes.entry(player_id).or_default().record(outcome);
    }
}

fn count_rounds_system(mut stats: ResMut<TableStats>) {
    stats.rounds += 1;
}

pub fn stats_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((
        count_cards_system.run_if(is_card_issued),
        count_splits_system.run_if(is_split_decided),
        count_hits_system.run_if(is_hit),
        dealer_result_system.run_if(is_dealer_stood),
        record_outcome_system.run_if(is_hand_settled),
        count_rounds_system.run_if(is_round_finished),
    ));
    schedule
}

pub fn stats_process() -> EcsProcess<BlackjackEvent> {
    let mut world = World::new();
    world.init_resource::<TableStats>();
    EcsProcess::new(world, stats_schedule()).named("stats")
}

/// Snapshot of the counters held by a process built with [stats_process].
pub fn table_stats(process: &EcsProcess<BlackjackEvent>) -> TableStats {
    process
        .world()
        .get_resource::<TableStats>()
        .cloned()
        .unwrap_or_default()
}
