//! Test helpers shared by unit tests, integration tests and benchmarks.

use crate::event_loop::LoopStarted;
use crate::process::Process;
use crate::Timestep;

/// Small event type for exercising the loop.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TestEvent {
    Started,
    Seed,
    Label(&'static str),
    Count(u32),
}

impl From<LoopStarted> for TestEvent {
    fn from(_: LoopStarted) -> Self {
        TestEvent::Started
    }
}

/// Re-emits [TestEvent::Seed] one timestep later until `limit` is reached.
#[derive(Debug, Clone)]
pub struct EchoProcess {
    pub limit: Timestep,
}

impl EchoProcess {
    pub fn new(limit: Timestep) -> Self {
        Self { limit }
    }
}

impl Process<TestEvent> for EchoProcess {
    fn react(&mut self, event: &TestEvent, now: Timestep) -> Vec<(TestEvent, Timestep)> {
        match event {
            TestEvent::Seed if now < self.limit => vec![(TestEvent::Seed, now + 1)],
            _ => Vec::new(),
        }
    }

    fn name(&self) -> &str {
        "echo"
    }
}

/// Remembers every delivery and never emits anything.
#[derive(Debug, Clone)]
pub struct Recorder<E> {
    pub seen: Vec<(E, Timestep)>,
}

impl<E> Default for Recorder<E> {
    fn default() -> Self {
        Self { seen: Vec::new() }
    }
}

impl<E> Recorder<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> impl Iterator<Item = &E> {
        self.seen.iter().map(|(event, _)| event)
    }
}

impl<E: Clone> Process<E> for Recorder<E> {
    fn react(&mut self, event: &E, now: Timestep) -> Vec<(E, Timestep)> {
        self.seen.push((event.clone(), now));
        Vec::new()
    }

    fn name(&self) -> &str {
        "recorder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_stops_at_limit() {
        let mut echo = EchoProcess::new(2);
        assert_eq!(echo.react(&TestEvent::Seed, 1), vec![(TestEvent::Seed, 2)]);
        assert!(echo.react(&TestEvent::Seed, 2).is_empty());
        assert!(echo.react(&TestEvent::Started, 0).is_empty());
    }

    #[test]
    fn recorder_keeps_delivery_order() {
        let mut recorder = Recorder::new();
        recorder.react(&TestEvent::Count(1), 0);
        recorder.react(&TestEvent::Count(2), 4);
        assert_eq!(recorder.seen, vec![(TestEvent::Count(1), 0), (TestEvent::Count(2), 4)]);
    }
}
