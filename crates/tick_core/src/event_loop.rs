//! The event loop: advances logical time and broadcasts due events.
//!
//! Each [EventLoop::tick] drains every entry due at or before the current
//! timestep, hands each one to every registered process in registration
//! order, and feeds their follow-ups straight back into the queue. Follow-ups
//! scheduled at the current timestep are picked up by the same tick. Once the
//! backlog is empty the loop jumps to the next queued timestamp, or halts.

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::LoopConfig;
use crate::error::{LoopError, LoopResult};
use crate::observe::{BoxedObserver, Dispatch, LoopObserver};
use crate::process::BoxedProcess;
use crate::queue::{EventQueue, QueuedEntry};
use crate::Timestep;

/// Synthetic event scheduled at the initial timestep when
/// [LoopConfig::inject_start_event] is set. Event types opt in with
/// `From<LoopStarted>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LoopStarted;

/// Result of one [EventLoop::tick].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Events remain; the current timestep now points at the next one.
    Pending,
    /// The queue is empty.
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Halted,
}

/// Counters reported by [EventLoop::run] and [EventLoop::run_for].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Completed calls to `tick`.
    pub ticks: u64,
    /// Queue entries popped and broadcast.
    pub dispatched: u64,
    /// Follow-up events returned by processes.
    pub emitted: u64,
    pub final_timestep: Timestep,
    /// Whether the queue was empty when the run returned.
    pub halted: bool,
}

/// Deterministic single-threaded scheduler over an opaque event type `E`.
///
/// Processes and observers may be borrowed (`&mut P`) for `'p`, so callers can
/// inspect them once the loop is dropped.
pub struct EventLoop<'p, E> {
    current_timestep: Timestep,
    queue: EventQueue<E>,
    processes: Vec<BoxedProcess<'p, E>>,
    observers: Vec<BoxedObserver<'p, E>>,
    ticks: u64,
    dispatched: u64,
    emitted: u64,
}

impl<'p, E> EventLoop<'p, E> {
    /// Builds a loop at `config.initial_timestep`, injecting [LoopStarted]
    /// first when configured, then scheduling `initial_events` in order.
    pub fn new<I>(
        processes: Vec<BoxedProcess<'p, E>>,
        initial_events: I,
        config: LoopConfig,
    ) -> LoopResult<Self>
    where
        E: From<LoopStarted>,
        I: IntoIterator<Item = (E, Timestep)>,
    {
        let mut event_loop = Self::from_parts(processes, [], config.initial_timestep)?;
        if config.inject_start_event {
            event_loop.add_event(E::from(LoopStarted), config.initial_timestep)?;
        }
        for (event, timestamp) in initial_events {
            event_loop.add_event(event, timestamp)?;
        }
        Ok(event_loop)
    }

    /// Builds a loop without a start event.
    pub fn from_parts<I>(
        processes: Vec<BoxedProcess<'p, E>>,
        initial_events: I,
        initial_timestep: Timestep,
    ) -> LoopResult<Self>
    where
        I: IntoIterator<Item = (E, Timestep)>,
    {
        let mut event_loop = Self {
            current_timestep: initial_timestep,
            queue: EventQueue::new(),
            processes,
            observers: Vec::new(),
            ticks: 0,
            dispatched: 0,
            emitted: 0,
        };
        for (event, timestamp) in initial_events {
            event_loop.add_event(event, timestamp)?;
        }
        Ok(event_loop)
    }

    /// Registers an observer. Observers only see what happens after they are added.
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: LoopObserver<E> + 'p,
    {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn add_observer<O>(&mut self, observer: O)
    where
        O: LoopObserver<E> + 'p,
    {
        self.observers.push(Box::new(observer));
    }

    /// Schedules `event` at `timestamp` and returns its sequence number.
    ///
    /// Fails with [LoopError::OutOfOrderScheduling] when `timestamp` is before
    /// the current timestep. Scheduling at the current timestep is allowed.
    pub fn add_event(&mut self, event: E, timestamp: Timestep) -> LoopResult<u64> {
        Self::schedule(
            &mut self.queue,
            &mut self.observers,
            self.current_timestep,
            event,
            timestamp,
        )
    }

    fn schedule(
        queue: &mut EventQueue<E>,
        observers: &mut [BoxedObserver<'p, E>],
        current: Timestep,
        event: E,
        timestamp: Timestep,
    ) -> LoopResult<u64> {
        if timestamp < current {
            return Err(LoopError::OutOfOrderScheduling {
                requested: timestamp,
                current,
            });
        }
        let sequence = queue.next_sequence(timestamp);
        for observer in observers.iter_mut() {
            observer.on_scheduled(timestamp, sequence, &event);
        }
        let assigned = queue.push(event, timestamp);
        debug_assert_eq!(assigned, sequence);
        trace!(t = timestamp, sequence, "scheduled event");
        Ok(sequence)
    }

    /// Pops the next entry if it is due at the current timestep.
    fn next_due(&mut self) -> Option<QueuedEntry<E>> {
        if self.queue.peek()?.timestamp <= self.current_timestep {
            self.queue.pop()
        } else {
            None
        }
    }

    /// Drains the backlog due at the current timestep, then advances to the
    /// next queued timestamp.
    ///
    /// Returns the first scheduling error raised by a follow-up; the tick is
    /// abandoned at that point and the loop should be discarded.
    pub fn tick(&mut self) -> LoopResult<TickStatus> {
        let now = self.current_timestep;
        debug!(t = now, pending = self.queue.len(), "ticking");

        while let Some(entry) = self.next_due() {
            let QueuedEntry {
                sequence, event, ..
            } = entry;
            self.dispatched += 1;
            for observer in self.observers.iter_mut() {
                observer.on_popped(now, sequence, &event);
            }

            for (index, process) in self.processes.iter_mut().enumerate() {
                if !self.observers.is_empty() {
                    let dispatch = Dispatch {
                        timestep: now,
                        sequence,
                        process_index: index,
                        process_name: process.name(),
                        event: &event,
                    };
                    for observer in self.observers.iter_mut() {
                        observer.on_dispatch(&dispatch);
                    }
                }

                for (follow_up, at) in process.react(&event, now) {
                    Self::schedule(&mut self.queue, &mut self.observers, now, follow_up, at)?;
                    self.emitted += 1;
                }
            }
        }

        self.ticks += 1;
        match self.queue.next_timestamp() {
            Some(next) => {
                self.current_timestep = next;
                self.queue.forget_sequences_before(next);
                for observer in self.observers.iter_mut() {
                    observer.on_advance(now, next);
                }
                trace!(from = now, to = next, "advanced timestep");
                Ok(TickStatus::Pending)
            }
            None => {
                for observer in self.observers.iter_mut() {
                    observer.on_halt(now);
                }
                debug!(t = now, "exhausted events");
                Ok(TickStatus::Halted)
            }
        }
    }

    /// Ticks until the queue is empty.
    ///
    /// Only returns if the processes eventually stop producing events.
    pub fn run(&mut self) -> LoopResult<RunSummary> {
        while self.tick()? == TickStatus::Pending {}
        Ok(self.summary())
    }

    /// Ticks until the queue is empty or `max_ticks` ticks have run.
    pub fn run_for(&mut self, max_ticks: u64) -> LoopResult<RunSummary> {
        for _ in 0..max_ticks {
            if self.tick()? == TickStatus::Halted {
                break;
            }
        }
        Ok(self.summary())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.ticks,
            dispatched: self.dispatched,
            emitted: self.emitted,
            final_timestep: self.current_timestep,
            halted: self.queue.is_empty(),
        }
    }

    pub fn current_timestep(&self) -> Timestep {
        self.current_timestep
    }

    pub fn state(&self) -> LoopState {
        if self.queue.is_empty() {
            LoopState::Halted
        } else {
            LoopState::Running
        }
    }

    /// Number of queued events.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn peek_next(&self) -> Option<&QueuedEntry<E>> {
        self.queue.peek()
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }
}

impl<E> std::fmt::Debug for EventLoop<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLoop")
            .field("current_timestep", &self.current_timestep)
            .field("pending", &self.queue.len())
            .field("processes", &self.processes.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
