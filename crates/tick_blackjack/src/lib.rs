//! Blackjack table simulated on top of the `tick_core` event loop.
//!
//! A [processes::DealerProcess] moderates each round and one
//! [processes::PlayerProcess] per seat answers its decisions. They share the
//! [table::Table] and talk only through [events::BlackjackEvent]s scheduled one
//! timestep ahead. [stats] keeps table-wide counters in a `bevy_ecs` world.

pub mod card;
pub mod deck;
pub mod events;
pub mod hand;
pub mod player;
pub mod processes;
pub mod scenario;
pub mod stats;
pub mod table;

pub use card::{Card, Face, Suit};
pub use deck::{Deck, DeckError};
pub use events::{BlackjackEvent, Outcome};
pub use hand::Hand;
pub use player::{DealerRules, PlayerId, Seat, Strategy, ThresholdStrategy};
pub use processes::{DealerProcess, PlayerProcess};
pub use scenario::{
    build_table, PlayerParams, PlayerReport, ScenarioError, TableParams, TableReport,
    TableSimulation,
};
pub use stats::{OutcomeTally, TableStats};
pub use table::{SharedTable, Table};

/// Best possible hand total.
pub const BLACKJACK: u16 = 21;
