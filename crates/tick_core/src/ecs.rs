//! Runs a `bevy_ecs` schedule as a process.
//!
//! On every delivery the adapter inserts the event as [CurrentEvent] and the
//! loop's timestep as [CurrentTimestep], runs the schedule, then drains the
//! follow-ups systems pushed into [Outbox]. Systems filter on the current
//! event the same way run conditions filter on an event kind.

use std::marker::PhantomData;

use bevy_ecs::prelude::{Resource, Schedule, World};

use crate::process::Process;
use crate::Timestep;

/// The event being delivered.
#[derive(Debug, Clone)]
pub struct CurrentEvent<E>(pub E);

impl<E: Send + Sync + 'static> Resource for CurrentEvent<E> {}

/// The loop's current timestep during a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Resource)]
pub struct CurrentTimestep(pub Timestep);

/// Follow-up events collected from systems during one delivery.
#[derive(Debug)]
pub struct Outbox<E> {
    pending: Vec<(E, Timestep)>,
}

impl<E: Send + Sync + 'static> Resource for Outbox<E> {}

impl<E> Default for Outbox<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<E> Outbox<E> {
    pub fn schedule(&mut self, event: E, at: Timestep) {
        self.pending.push((event, at));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn drain(&mut self) -> Vec<(E, Timestep)> {
        std::mem::take(&mut self.pending)
    }
}

/// A [Process] whose reaction is a `bevy_ecs` schedule run against an owned world.
pub struct EcsProcess<E> {
    name: String,
    world: World,
    schedule: Schedule,
    _event: PhantomData<fn(E)>,
}

impl<E> EcsProcess<E>
where
    E: Clone + Send + Sync + 'static,
{
    pub fn new(mut world: World, schedule: Schedule) -> Self {
        world.insert_resource(Outbox::<E>::default());
        Self {
            name: "ecs".to_string(),
            world,
            schedule,
            _event: PhantomData,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn into_world(self) -> World {
        self.world
    }
}

impl<E> Process<E> for EcsProcess<E>
where
    E: Clone + Send + Sync + 'static,
{
    fn react(&mut self, event: &E, now: Timestep) -> Vec<(E, Timestep)> {
        self.world.insert_resource(CurrentEvent(event.clone()));
        self.world.insert_resource(CurrentTimestep(now));
        self.schedule.run(&mut self.world);
        self.world
            .get_resource_mut::<Outbox<E>>()
            .map(|mut outbox| outbox.drain())
            .unwrap_or_default()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::{Res, ResMut};

    #[derive(Debug, Default, Resource)]
    struct Seen(Vec<(u32, Timestep)>);

    fn record(event: Res<CurrentEvent<u32>>, now: Res<CurrentTimestep>, mut seen: ResMut<Seen>) {
        seen.0.push((event.0, now.0));
    }

    fn countdown(
        event: Res<CurrentEvent<u32>>,
        now: Res<CurrentTimestep>,
        mut outbox: ResMut<Outbox<u32>>,
    ) {
        if event.0 > 0 {
            outbox.schedule(event.0 - 1, now.0 + 1);
        }
    }

    fn process() -> EcsProcess<u32> {
        let mut world = World::new();
        world.init_resource::<Seen>();
        let mut schedule = Schedule::default();
        schedule.add_systems((record, countdown));
        EcsProcess::new(world, schedule).named("countdown")
    }

    #[test]
    fn systems_see_event_and_timestep() {
        let mut ecs = process();
        let follow_ups = ecs.react(&3, 7);

        assert_eq!(follow_ups, vec![(2, 8)]);
        assert_eq!(ecs.world().resource::<Seen>().0, vec![(3, 7)]);
        assert_eq!(ecs.name(), "countdown");
    }

    #[test]
    fn world_can_be_seeded_and_taken_back() {
        let mut ecs = process();
        ecs.world_mut().resource_mut::<Seen>().0.push((9, 0));
        ecs.react(&0, 4);

        let world = ecs.into_world();
        assert_eq!(world.resource::<Seen>().0, vec![(9, 0), (0, 4)]);
    }

    #[test]
    fn outbox_is_drained_between_deliveries() {
        let mut ecs = process();
        assert_eq!(ecs.react(&1, 0), vec![(0, 1)]);
        assert!(ecs.react(&0, 1).is_empty());
        assert!(ecs.world().resource::<Outbox<u32>>().is_empty());
    }
}
