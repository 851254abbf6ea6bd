//! Errors raised by the event loop.

use thiserror::Error;

use crate::Timestep;

/// Scheduling failures. Each one signals a logic bug in a process or in the
/// initial event setup; the loop never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoopError {
    /// An event was scheduled strictly before the loop's current timestep.
    #[error("cannot schedule event at t={requested}: current timestep is t={current}")]
    OutOfOrderScheduling {
        requested: Timestep,
        current: Timestep,
    },
}

pub type LoopResult<T> = Result<T, LoopError>;
