#![allow(dead_code)]

use tick_core::test_helpers::TestEvent;
use tick_core::{BoxedProcess, Process, Timestep};

/// Answers `Label(trigger)` with `Label(reply)` at the same timestep.
pub struct SameTickRelay {
    pub trigger: &'static str,
    pub reply: &'static str,
}

impl Process<TestEvent> for SameTickRelay {
    fn react(&mut self, event: &TestEvent, now: Timestep) -> Vec<(TestEvent, Timestep)> {
        match event {
            TestEvent::Label(label) if *label == self.trigger => {
                vec![(TestEvent::Label(self.reply), now)]
            }
            _ => Vec::new(),
        }
    }
}

/// Emits `Count(n + 1)` at `now + delay` for every `Count(n)` below `limit`,
/// and fans each one out `width` times.
pub struct FanOut {
    pub limit: u32,
    pub width: u32,
    pub delay: Timestep,
}

impl Process<TestEvent> for FanOut {
    fn react(&mut self, event: &TestEvent, now: Timestep) -> Vec<(TestEvent, Timestep)> {
        match event {
            TestEvent::Count(n) if *n < self.limit => (0..self.width)
                .map(|_| (TestEvent::Count(n + 1), now + self.delay))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Tags every delivery with its own name so cross-process order is visible.
pub struct Tagger {
    pub tag: &'static str,
    pub log: std::rc::Rc<std::cell::RefCell<Vec<(&'static str, TestEvent)>>>,
}

impl Process<TestEvent> for Tagger {
    fn react(&mut self, event: &TestEvent, _now: Timestep) -> Vec<(TestEvent, Timestep)> {
        self.log.borrow_mut().push((self.tag, event.clone()));
        Vec::new()
    }

    fn name(&self) -> &str {
        self.tag
    }
}

pub fn boxed<'p, P>(process: P) -> BoxedProcess<'p, TestEvent>
where
    P: Process<TestEvent> + 'p,
{
    Box::new(process)
}
