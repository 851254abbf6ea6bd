//! Time-ordered event queue.
//!
//! Pending events live in a [BinaryHeap] with reversed ordering so the heap
//! behaves as a min-heap keyed by `(timestamp, sequence)`. The sequence number
//! is assigned per timestamp at insertion time, so events sharing an instant
//! come back out in the order they were pushed.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::Timestep;

/// A domain event waiting in the queue, tagged with its dispatch key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedEntry<E> {
    /// Logical time at which the event becomes eligible for dispatch.
    pub timestamp: Timestep,
    /// Insertion order among entries sharing `timestamp`, starting at 0.
    pub sequence: u64,
    pub event: E,
}

impl<E> QueuedEntry<E> {
    /// The `(timestamp, sequence)` pair entries are totally ordered by.
    pub fn key(&self) -> (Timestep, u64) {
        (self.timestamp, self.sequence)
    }

    pub fn into_event(self) -> E {
        self.event
    }
}

/// Heap slot. Ordering only looks at the key; the payload is opaque.
#[derive(Debug, Clone)]
struct HeapItem<E>(QueuedEntry<E>);

impl<E> PartialEq for HeapItem<E> {
    fn eq(&self, other: &Self) -> bool {
        self.0.key() == other.0.key()
    }
}

impl<E> Eq for HeapItem<E> {}

impl<E> Ord for HeapItem<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (timestamp, sequence).
        other
            .0
            .timestamp
            .cmp(&self.0.timestamp)
            .then_with(|| other.0.sequence.cmp(&self.0.sequence))
    }
}

impl<E> PartialOrd for HeapItem<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of [QueuedEntry] values ordered by `(timestamp, sequence)`.
///
/// The queue does not validate timestamps; refusing to schedule into the past
/// is the event loop's job.
#[derive(Debug, Clone)]
pub struct EventQueue<E> {
    heap: BinaryHeap<HeapItem<E>>,
    /// Next sequence number to hand out, per timestamp.
    sequences: HashMap<Timestep, u64>,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            sequences: HashMap::new(),
        }
    }

    /// Inserts `event` at `timestamp` and returns the sequence number it was given.
    pub fn push(&mut self, event: E, timestamp: Timestep) -> u64 {
        let counter = self.sequences.entry(timestamp).or_insert(0);
        let sequence = *counter;
        *counter += 1;
        self.heap.push(HeapItem(QueuedEntry {
            timestamp,
            sequence,
            event,
        }));
        sequence
    }

    /// Sequence number the next push at `timestamp` will receive.
    pub fn next_sequence(&self, timestamp: Timestep) -> u64 {
        self.sequences.get(&timestamp).copied().unwrap_or(0)
    }

    /// The entry with the smallest `(timestamp, sequence)`, or `None` when empty.
    pub fn peek(&self) -> Option<&QueuedEntry<E>> {
        self.heap.peek().map(|item| &item.0)
    }

    /// Removes and returns the entry with the smallest `(timestamp, sequence)`.
    pub fn pop(&mut self) -> Option<QueuedEntry<E>> {
        self.heap.pop().map(|item| item.0)
    }

    /// Timestamp of the next entry, if any.
    pub fn next_timestamp(&self) -> Option<Timestep> {
        self.peek().map(|entry| entry.timestamp)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drops the sequence counters of every timestamp strictly before `timestamp`.
    ///
    /// Only safe once nothing will be pushed before `timestamp` again; the event
    /// loop calls this after advancing its current timestep. Queued entries are
    /// left untouched.
    pub fn forget_sequences_before(&mut self, timestamp: Timestep) {
        self.sequences.retain(|&t, _| t >= timestamp);
    }

    /// Number of timestamps with a live sequence counter.
    pub fn tracked_timestamps(&self) -> usize {
        self.sequences.len()
    }

    /// Pops every entry in dispatch order.
    pub fn drain_ordered(&mut self) -> Vec<QueuedEntry<E>> {
        let mut entries = Vec::with_capacity(self.heap.len());
        while let Some(entry) = self.pop() {
            entries.push(entry);
        }
        entries
    }
}

impl<E> Extend<(E, Timestep)> for EventQueue<E> {
    fn extend<I: IntoIterator<Item = (E, Timestep)>>(&mut self, iter: I) {
        for (event, timestamp) in iter {
            self.push(event, timestamp);
        }
    }
}

impl<E> FromIterator<(E, Timestep)> for EventQueue<E> {
    fn from_iter<I: IntoIterator<Item = (E, Timestep)>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}
