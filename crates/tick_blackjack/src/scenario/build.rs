use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tick_core::{
    BoxedProcess, EcsProcess, EventLoop, LoopConfig, LoopError, LoopObserver, RunSummary,
    TracingObserver,
};
use tracing::info;

use crate::deck::DeckError;
use crate::events::BlackjackEvent;
use crate::player::{PlayerId, Seat};
use crate::processes::{DealerProcess, PlayerProcess};
use crate::scenario::params::TableParams;
use crate::scenario::report::{PlayerReport, TableReport};
use crate::stats::{stats_process, table_stats};
use crate::table::{SharedTable, Table};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("a table needs at least one deck")]
    NoDecks,
    #[error("a table needs at least one player")]
    NoPlayers,
    #[error("cut card fraction must be within [0, 1), got {0}")]
    InvalidCutCard(f64),
    #[error(transparent)]
    Loop(#[from] LoopError),
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// A wired table ready to run: dealer first, then the players in seat order,
/// then the stats listener.
pub struct TableSimulation {
    params: TableParams,
    table: SharedTable,
    dealer: DealerProcess,
    players: Vec<PlayerProcess>,
    stats: EcsProcess<BlackjackEvent>,
}

pub fn build_table(params: TableParams) -> Result<TableSimulation, ScenarioError> {
    if params.n_decks == 0 {
        return Err(ScenarioError::NoDecks);
    }
    if params.players.is_empty() {
        return Err(ScenarioError::NoPlayers);
    }
    if !(0.0..1.0).contains(&params.cut_card_fraction) {
        return Err(ScenarioError::InvalidCutCard(params.cut_card_fraction));
    }

    let rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let dealer_id = PlayerId(0);
    let player_ids: Vec<PlayerId> = (1..=params.players.len() as u32).map(PlayerId).collect();
    let table = Table::new(params.n_decks, rng, dealer_id, player_ids.clone())
        .with_cut_card(params.cut_card_fraction)
        .into_shared();

    let dealer = DealerProcess::new(table.clone(), params.rounds);
    let players = params
        .players
        .iter()
        .zip(player_ids)
        .map(|(player, id)| {
            let seat = Seat::new(id, player.name.clone(), Box::new(player.strategy));
            PlayerProcess::new(seat, table.clone())
        })
        .collect();

    Ok(TableSimulation {
        params,
        table,
        dealer,
        players,
        stats: stats_process(),
    })
}

impl TableSimulation {
    pub fn params(&self) -> &TableParams {
        &self.params
    }

    pub fn table(&self) -> &SharedTable {
        &self.table
    }

    pub fn dealer(&self) -> &DealerProcess {
        &self.dealer
    }

    pub fn players(&self) -> &[PlayerProcess] {
        &self.players
    }

    /// Plays the configured rounds, logging events through `tracing`.
    pub fn run(&mut self) -> Result<TableReport, ScenarioError> {
        self.run_observed(TracingObserver)
    }

    /// Plays the configured rounds with `observer` attached to the loop.
    ///
    /// Calling it again plays another session at the same table; counters keep
    /// accumulating and the shoe carries over.
    pub fn run_observed<'s, O>(&'s mut self, observer: O) -> Result<TableReport, ScenarioError>
    where
        O: LoopObserver<BlackjackEvent> + 's,
    {
        let summary = {
            let mut processes: Vec<BoxedProcess<'_, BlackjackEvent>> =
                Vec::with_capacity(self.players.len() + 2);
            processes.push(Box::new(&mut self.dealer));
            for player in &mut self.players {
                processes.push(Box::new(player));
            }
            processes.push(Box::new(&mut self.stats));

            let mut event_loop = EventLoop::new(processes, [], LoopConfig::default())?
                .with_observer(observer);
            event_loop.run()?
        };

        if let Some(err) = self.dealer.failure() {
            return Err(err.into());
        }
        let report = self.report(&summary);
        info!(
            rounds = report.rounds_played,
            hands = report.total_hands(),
            ticks = report.ticks,
            "table session finished"
        );
        Ok(report)
    }

    fn report(&self, summary: &RunSummary) -> TableReport {
        let stats = table_stats(&self.stats);
        let players = self
            .players
            .iter()
            .map(|player| {
                let tally = stats.tally(player.id());
                PlayerReport {
                    id: player.id().0,
                    name: player.seat().name.clone(),
                    hands: tally.hands(),
                    blackjacks: tally.blackjacks,
                    wins: tally.wins,
                    pushes: tally.pushes,
                    losses: tally.losses,
                    busts: tally.busts,
                    net_units: tally.net_units(),
                }
            })
            .collect();

        TableReport {
            seed: self.params.seed,
            rounds_played: stats.rounds,
            ticks: summary.ticks,
            events_dispatched: summary.dispatched,
            final_timestep: summary.final_timestep,
            cards_dealt: stats.cards_dealt,
            splits: stats.splits,
            hits: stats.hits,
            dealer_busts: stats.dealer_busts,
            dealer_blackjacks: stats.dealer_blackjacks,
            shoes_used: self.table.borrow().shoes_used(),
            players,
        }
    }
}
