//! The reactive component contract the event loop dispatches to.

use crate::Timestep;

/// A reactive component driven by the event loop.
///
/// Every due event is broadcast to every registered process. A process
/// answers with zero or more `(event, timestamp)` follow-ups; a timestamp
/// earlier than `now` makes the loop fail with
/// [crate::LoopError::OutOfOrderScheduling].
///
/// Processes that read or write shared state (a card table, a board) do so
/// through handles they were built with. The loop treats that as opaque.
pub trait Process<E> {
    fn react(&mut self, event: &E, now: Timestep) -> Vec<(E, Timestep)>;

    /// Label used in logs and dispatch records.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Owned, type-erased process as stored by the loop.
pub type BoxedProcess<'p, E> = Box<dyn Process<E> + 'p>;

impl<E, P> Process<E> for &mut P
where
    P: Process<E> + ?Sized,
{
    fn react(&mut self, event: &E, now: Timestep) -> Vec<(E, Timestep)> {
        (**self).react(event, now)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<E, P> Process<E> for Box<P>
where
    P: Process<E> + ?Sized,
{
    fn react(&mut self, event: &E, now: Timestep) -> Vec<(E, Timestep)> {
        (**self).react(event, now)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A process backed by a closure. Built with [process_fn].
pub struct FnProcess<F> {
    name: String,
    f: F,
}

/// Wraps `f` so it can be registered as a process.
///
/// ```
/// use tick_core::{process_fn, Process};
///
/// let mut doubler = process_fn(|n: &u32, now: u64| {
///     if *n < 8 { vec![(n * 2, now + 1)] } else { Vec::new() }
/// })
/// .named("doubler");
///
/// assert_eq!(Process::<u32>::react(&mut doubler, &3, 0), vec![(6, 1)]);
/// assert_eq!(Process::<u32>::name(&doubler), "doubler");
/// ```
pub fn process_fn<F>(f: F) -> FnProcess<F> {
    FnProcess {
        name: "process_fn".to_string(),
        f,
    }
}

impl<F> FnProcess<F> {
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<E, F> Process<E> for FnProcess<F>
where
    F: FnMut(&E, Timestep) -> Vec<(E, Timestep)>,
{
    fn react(&mut self, event: &E, now: Timestep) -> Vec<(E, Timestep)> {
        (self.f)(event, now)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> std::fmt::Debug for FnProcess<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnProcess").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        seen: usize,
    }

    impl Process<u8> for Counter {
        fn react(&mut self, _event: &u8, _now: Timestep) -> Vec<(u8, Timestep)> {
            self.seen += 1;
            Vec::new()
        }
    }

    #[test]
    fn default_name_is_type_name() {
        let counter = Counter { seen: 0 };
        assert!(Process::<u8>::name(&counter).ends_with("Counter"));
    }

    #[test]
    fn borrowed_process_forwards_to_owner() {
        let mut counter = Counter { seen: 0 };
        {
            let mut boxed: BoxedProcess<'_, u8> = Box::new(&mut counter);
            boxed.react(&1, 0);
            boxed.react(&2, 0);
        }
        assert_eq!(counter.seen, 2);
    }

    #[test]
    fn closure_process_emits_follow_ups() {
        let mut echo = process_fn(|event: &&'static str, now: u64| vec![(*event, now + 2)]);
        assert_eq!(Process::<&str>::react(&mut echo, &"ping", 3), vec![("ping", 5)]);
        assert_eq!(Process::<&str>::name(&echo), "process_fn");
    }
}
