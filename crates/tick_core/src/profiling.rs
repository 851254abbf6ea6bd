//! Dispatch rate tracking: an observer that counts what the loop did.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::observe::{Dispatch, LoopObserver};
use crate::Timestep;

/// Loop-level counters, collected as a [LoopObserver].
#[derive(Debug, Default, Clone)]
pub struct DispatchMetrics {
    /// Events accepted into the queue.
    pub events_scheduled: u64,
    /// Queue entries popped and broadcast.
    pub events_dispatched: u64,
    /// Individual process invocations.
    pub deliveries: u64,
    /// Timesteps the loop advanced through.
    pub advances: u64,
    /// Wall-clock time of the first popped event, for rate calculation.
    pub start_time: Option<Instant>,
    /// Popped events per timestep.
    pub events_by_timestep: BTreeMap<Timestep, u64>,
}

/// Serializable snapshot of [DispatchMetrics].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub events_scheduled: u64,
    pub events_dispatched: u64,
    pub deliveries: u64,
    pub advances: u64,
    pub busiest_timestep: Option<Timestep>,
    pub busiest_timestep_events: u64,
    pub events_per_second: f64,
}

impl DispatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Popped events per wall-clock second since the first dispatch.
    pub fn events_per_second(&self) -> f64 {
        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                self.events_dispatched as f64 / elapsed
            } else {
                0.0
            }
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        // Earliest timestep wins ties.
        let busiest = self
            .events_by_timestep
            .iter()
            .fold(None::<(Timestep, u64)>, |best, (&t, &count)| match best {
                Some((_, top)) if top >= count => best,
                _ => Some((t, count)),
            });
        MetricsSummary {
            events_scheduled: self.events_scheduled,
            events_dispatched: self.events_dispatched,
            deliveries: self.deliveries,
            advances: self.advances,
            busiest_timestep: busiest.map(|(t, _)| t),
            busiest_timestep_events: busiest.map(|(_, c)| c).unwrap_or(0),
            events_per_second: self.events_per_second(),
        }
    }

    pub fn log_summary(&self) {
        let summary = self.summary();
        info!(
            scheduled = summary.events_scheduled,
            dispatched = summary.events_dispatched,
            deliveries = summary.deliveries,
            advances = summary.advances,
            busiest_timestep = ?summary.busiest_timestep,
            events_per_second = summary.events_per_second,
            "dispatch summary"
        );
    }
}

impl<E> LoopObserver<E> for DispatchMetrics {
    fn on_scheduled(&mut self, _timestamp: Timestep, _sequence: u64, _event: &E) {
        self.events_scheduled += 1;
    }

    fn on_popped(&mut self, timestep: Timestep, _sequence: u64, _event: &E) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
        self.events_dispatched += 1;
        *self.events_by_timestep.entry(timestep).or_insert(0) += 1;
    }

    fn on_dispatch(&mut self, _dispatch: &Dispatch<'_, E>) {
        self.deliveries += 1;
    }

    fn on_advance(&mut self, _from: Timestep, _to: Timestep) {
        self.advances += 1;
    }
}
