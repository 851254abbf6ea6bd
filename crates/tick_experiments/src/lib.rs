//! Parallel seed sweeps over blackjack table sessions.
//!
//! Every simulation is an independent single-threaded event loop; sweeps fan
//! whole sessions out across a `rayon` pool and collect the reports in seed
//! order.
//!
//! ```no_run
//! use tick_blackjack::TableParams;
//! use tick_experiments::{export_to_csv, run_seed_sweep, summarize};
//!
//! let base = TableParams::default().with_player_count(3).with_rounds(100);
//! let seeds: Vec<u64> = (0..32).collect();
//! let reports = run_seed_sweep(&base, &seeds, None, true).unwrap();
//! let summary = summarize(&reports);
//! export_to_csv(&reports, "sweep.csv").unwrap();
//! ```

pub mod config;
pub mod export;
pub mod runner;
pub mod summary;

pub use config::{load_table_params, TableOverrides};
pub use export::{export_to_csv, export_to_json};
pub use runner::{run_seed_sweep, run_single, seed_sweep_params, SweepError};
pub use summary::{summarize, PlayerAggregate, SweepSummary};
