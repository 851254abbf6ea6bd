//! Parallel simulation execution using rayon.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use thiserror::Error;
use tick_blackjack::{build_table, ScenarioError, TableParams, TableReport};
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("failed to create thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("simulation with seed {seed} failed: {source}")]
    Scenario {
        seed: u64,
        #[source]
        source: ScenarioError,
    },
}

/// Builds the table described by `params` and plays it to completion.
pub fn run_single(params: &TableParams) -> Result<TableReport, ScenarioError> {
    let mut sim = build_table(params.clone())?;
    sim.run()
}

/// One copy of `base` per seed.
pub fn seed_sweep_params(base: &TableParams, seeds: &[u64]) -> Vec<TableParams> {
    seeds
        .iter()
        .map(|seed| base.clone().with_seed(*seed))
        .collect()
}

fn progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

/// Runs `base` once per seed in parallel.
///
/// Uses rayon's default pool size when `num_threads` is `None`. Reports come
/// back in the order of `seeds`; the first failing seed fails the sweep.
pub fn run_seed_sweep(
    base: &TableParams,
    seeds: &[u64],
    num_threads: Option<usize>,
    show_progress: bool,
) -> Result<Vec<TableReport>, SweepError> {
    let parameter_sets = seed_sweep_params(base, seeds);
    let pb = (show_progress && !parameter_sets.is_empty())
        .then(|| progress_bar(parameter_sets.len()));

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;
    info!(
        runs = parameter_sets.len(),
        threads = pool.current_num_threads(),
        "starting seed sweep"
    );

    let results: Vec<Result<TableReport, SweepError>> = pool.install(|| {
        parameter_sets
            .par_iter()
            .map(|params| {
                let seed = params.seed.unwrap_or_default();
                let result =
                    run_single(params).map_err(|source| SweepError::Scenario { seed, source });
                debug!(seed, ok = result.is_ok(), "sweep run finished");
                if let Some(progress_bar) = &pb {
                    progress_bar.inc(1);
                }
                result
            })
            .collect()
    });

    if let Some(progress_bar) = &pb {
        progress_bar.finish_with_message("Completed");
    }

    results.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> TableParams {
        TableParams::default().with_player_count(2).with_rounds(5)
    }

    #[test]
    fn single_run_plays_every_round() {
        let report = run_single(&base().with_seed(1)).expect("run");
        assert_eq!(report.rounds_played, 5);
        assert_eq!(report.players.len(), 2);
    }

    #[test]
    fn sweep_keeps_seed_order() {
        let seeds = [5, 1, 9, 3];
        let reports = run_seed_sweep(&base(), &seeds, Some(2), false).expect("sweep");
        let got: Vec<_> = reports.iter().map(|r| r.seed).collect();
        assert_eq!(got, vec![Some(5), Some(1), Some(9), Some(3)]);
    }

    #[test]
    fn sweep_matches_sequential_runs() {
        let seeds = [11, 12];
        let parallel = run_seed_sweep(&base(), &seeds, Some(2), false).expect("sweep");
        let sequential: Vec<_> = seed_sweep_params(&base(), &seeds)
            .iter()
            .map(|params| run_single(params).expect("run"))
            .collect();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn failing_seed_fails_the_sweep() {
        let broken = base().with_decks(0);
        let err = run_seed_sweep(&broken, &[4], Some(1), false).expect_err("no decks");
        assert!(matches!(
            err,
            SweepError::Scenario {
                seed: 4,
                source: ScenarioError::NoDecks
            }
        ));
    }

    #[test]
    fn empty_sweep_is_empty() {
        let reports = run_seed_sweep(&base(), &[], Some(1), true).expect("sweep");
        assert!(reports.is_empty());
    }
}
