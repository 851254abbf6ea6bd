//! Observability hooks injected into the event loop.
//!
//! Observers see every scheduling decision and every delivery without the
//! loop depending on a process-wide logger. [TracingObserver] forwards the
//! hooks to `tracing`; [DispatchLog] keeps a replayable record of deliveries.

use std::fmt::Debug;

use tracing::{debug, trace};

use crate::Timestep;

/// One delivery of a popped event to one registered process.
#[derive(Debug)]
pub struct Dispatch<'a, E> {
    pub timestep: Timestep,
    pub sequence: u64,
    /// Position of the process in registration order.
    pub process_index: usize,
    pub process_name: &'a str,
    pub event: &'a E,
}

/// Callbacks invoked by the loop. Every hook has an empty default.
pub trait LoopObserver<E> {
    /// An event was accepted into the queue.
    fn on_scheduled(&mut self, _timestamp: Timestep, _sequence: u64, _event: &E) {}

    /// A due event was popped and is about to be broadcast.
    fn on_popped(&mut self, _timestep: Timestep, _sequence: u64, _event: &E) {}

    /// A popped event is about to be handed to one process.
    fn on_dispatch(&mut self, _dispatch: &Dispatch<'_, E>) {}

    /// The due backlog drained and the loop moved to the next queued timestep.
    fn on_advance(&mut self, _from: Timestep, _to: Timestep) {}

    /// The due backlog drained and nothing is left in the queue.
    fn on_halt(&mut self, _at: Timestep) {}
}

pub type BoxedObserver<'o, E> = Box<dyn LoopObserver<E> + 'o>;

impl<E, O> LoopObserver<E> for &mut O
where
    O: LoopObserver<E> + ?Sized,
{
    fn on_scheduled(&mut self, timestamp: Timestep, sequence: u64, event: &E) {
        (**self).on_scheduled(timestamp, sequence, event);
    }

    fn on_popped(&mut self, timestep: Timestep, sequence: u64, event: &E) {
        (**self).on_popped(timestep, sequence, event);
    }

    fn on_dispatch(&mut self, dispatch: &Dispatch<'_, E>) {
        (**self).on_dispatch(dispatch);
    }

    fn on_advance(&mut self, from: Timestep, to: Timestep) {
        (**self).on_advance(from, to);
    }

    fn on_halt(&mut self, at: Timestep) {
        (**self).on_halt(at);
    }
}

/// Logs event payloads through `tracing`.
///
/// The loop itself only logs timesteps and sequence numbers; register this
/// observer to see the events as well.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl<E: Debug> LoopObserver<E> for TracingObserver {
    fn on_scheduled(&mut self, timestamp: Timestep, sequence: u64, event: &E) {
        debug!(t = timestamp, sequence, ?event, "adding event");
    }

    fn on_popped(&mut self, timestep: Timestep, sequence: u64, event: &E) {
        debug!(t = timestep, sequence, ?event, "broadcasting event");
    }

    fn on_dispatch(&mut self, dispatch: &Dispatch<'_, E>) {
        trace!(
            t = dispatch.timestep,
            sequence = dispatch.sequence,
            process = dispatch.process_name,
            index = dispatch.process_index,
            "process acting on event"
        );
    }

    fn on_advance(&mut self, from: Timestep, to: Timestep) {
        trace!(from, to, "advancing timestep");
    }

    fn on_halt(&mut self, at: Timestep) {
        debug!(t = at, "exhausted events");
    }
}

/// A recorded delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRecord<E> {
    pub timestep: Timestep,
    pub sequence: u64,
    pub process_index: usize,
    pub event: E,
}

/// Records every delivery in order. Two runs with the same processes and
/// initial events produce equal logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchLog<E> {
    records: Vec<DispatchRecord<E>>,
}

impl<E> Default for DispatchLog<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<E> DispatchLog<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[DispatchRecord<E>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Deliveries made to the process at `index`.
    pub fn for_process(&self, index: usize) -> impl Iterator<Item = &DispatchRecord<E>> {
        self.records
            .iter()
            .filter(move |record| record.process_index == index)
    }
}

impl<E: Clone> LoopObserver<E> for DispatchLog<E> {
    fn on_dispatch(&mut self, dispatch: &Dispatch<'_, E>) {
        self.records.push(DispatchRecord {
            timestep: dispatch.timestep,
            sequence: dispatch.sequence,
            process_index: dispatch.process_index,
            event: dispatch.event.clone(),
        });
    }
}
