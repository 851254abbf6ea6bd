//! Construction-time configuration for [crate::EventLoop].

use serde::{Deserialize, Serialize};

use crate::Timestep;

/// Loop settings. Missing fields fall back to [LoopConfig::default] when
/// deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Timestep the loop starts at; nothing may be scheduled before it.
    pub initial_timestep: Timestep,
    /// Schedule a [crate::LoopStarted] event at `initial_timestep` before any
    /// initial events.
    pub inject_start_event: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            initial_timestep: 0,
            inject_start_event: true,
        }
    }
}

impl LoopConfig {
    pub fn with_initial_timestep(mut self, timestep: Timestep) -> Self {
        self.initial_timestep = timestep;
        self
    }

    pub fn with_start_event(mut self, inject: bool) -> Self {
        self.inject_start_event = inject;
        self
    }
}
