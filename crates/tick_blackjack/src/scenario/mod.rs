//! Scenario setup: seat the players, wire the processes and run the table.

mod build;
mod params;
mod report;

pub use build::{build_table, ScenarioError, TableSimulation};
pub use params::{PlayerParams, TableParams};
pub use report::{PlayerReport, TableReport};
