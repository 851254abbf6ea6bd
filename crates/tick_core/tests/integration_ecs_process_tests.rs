mod support;

use bevy_ecs::prelude::{IntoSystemConfigs, Res, ResMut, Resource, Schedule, World};
use support::processes::boxed;
use tick_core::test_helpers::{Recorder, TestEvent};
use tick_core::{CurrentEvent, CurrentTimestep, EcsProcess, EventLoop, Outbox};

#[derive(Debug, Default, Resource)]
struct Tally {
    seeds: u32,
    last_seen_at: Option<u64>,
}

fn tally_seeds(
    event: Res<CurrentEvent<TestEvent>>,
    now: Res<CurrentTimestep>,
    mut tally: ResMut<Tally>,
) {
    if event.0 == TestEvent::Seed {
        tally.seeds += 1;
        tally.last_seen_at = Some(now.0);
    }
}

fn answer_seeds(
    event: Res<CurrentEvent<TestEvent>>,
    now: Res<CurrentTimestep>,
    tally: Res<Tally>,
    mut outbox: ResMut<Outbox<TestEvent>>,
) {
    if event.0 == TestEvent::Seed && tally.seeds < 3 {
        outbox.schedule(TestEvent::Seed, now.0 + 2);
        outbox.schedule(TestEvent::Label("answered"), now.0);
    }
}

fn tally_process() -> EcsProcess<TestEvent> {
    let mut world = World::new();
    world.init_resource::<Tally>();
    let mut schedule = Schedule::default();
    schedule.add_systems((tally_seeds, answer_seeds).chain());
    EcsProcess::new(world, schedule).named("tally")
}

#[test]
fn ecs_process_participates_in_the_loop() {
    let mut ecs = tally_process();
    let mut recorder = Recorder::new();
    {
        let mut event_loop = EventLoop::<TestEvent>::from_parts(
            vec![boxed(&mut ecs), boxed(&mut recorder)],
            [(TestEvent::Seed, 1)],
            1,
        )
        .expect("valid loop");
        let summary = event_loop.run().expect("run");
        assert_eq!(summary.final_timestep, 5);
    }

    let tally = ecs.world().resource::<Tally>();
    assert_eq!(tally.seeds, 3);
    assert_eq!(tally.last_seen_at, Some(5));
    assert_eq!(
        recorder.seen,
        vec![
            (TestEvent::Seed, 1),
            (TestEvent::Label("answered"), 1),
            (TestEvent::Seed, 3),
            (TestEvent::Label("answered"), 3),
            (TestEvent::Seed, 5),
        ]
    );
}
