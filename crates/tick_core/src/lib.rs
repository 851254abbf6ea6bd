//! Deterministic discrete-event loop.
//!
//! Logical time advances in integer timesteps. Events wait in an
//! [EventQueue] ordered by `(timestamp, sequence)`; the [EventLoop] broadcasts
//! each due event to every registered [Process] in registration order and
//! schedules whatever they return.

pub mod config;
pub mod ecs;
pub mod error;
pub mod event_loop;
pub mod observe;
pub mod process;
pub mod profiling;
pub mod queue;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;

/// Logical time. Unrelated to wall-clock time.
pub type Timestep = u64;

pub use config::LoopConfig;
pub use ecs::{CurrentEvent, CurrentTimestep, EcsProcess, Outbox};
pub use error::{LoopError, LoopResult};
pub use event_loop::{EventLoop, LoopStarted, LoopState, RunSummary, TickStatus};
pub use observe::{Dispatch, DispatchLog, DispatchRecord, LoopObserver, TracingObserver};
pub use process::{process_fn, BoxedProcess, FnProcess, Process};
pub use profiling::{DispatchMetrics, MetricsSummary};
pub use queue::{EventQueue, QueuedEntry};
