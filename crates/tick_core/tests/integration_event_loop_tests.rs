mod support;

use std::cell::RefCell;
use std::rc::Rc;

use support::processes::{boxed, FanOut, SameTickRelay, Tagger};
use tick_core::test_helpers::{EchoProcess, Recorder, TestEvent};
use tick_core::{
    process_fn, DispatchLog, EventLoop, LoopConfig, LoopError, LoopState, TickStatus, Timestep,
};

#[test]
fn scheduling_before_current_timestep_fails() {
    let mut event_loop = EventLoop::<TestEvent>::new(
        Vec::new(),
        [],
        LoopConfig::default()
            .with_initial_timestep(5)
            .with_start_event(false),
    )
    .expect("valid loop");

    assert_eq!(
        event_loop.add_event(TestEvent::Seed, 3),
        Err(LoopError::OutOfOrderScheduling {
            requested: 3,
            current: 5
        })
    );
    assert!(event_loop.add_event(TestEvent::Seed, 5).is_ok());
    assert!(event_loop.add_event(TestEvent::Seed, 6).is_ok());
}

#[test]
fn same_tick_follow_ups_are_drained_by_the_same_tick() {
    let mut recorder = Recorder::new();
    {
        let mut event_loop = EventLoop::<TestEvent>::from_parts(
            vec![
                boxed(SameTickRelay {
                    trigger: "ping",
                    reply: "pong",
                }),
                boxed(&mut recorder),
            ],
            [(TestEvent::Label("ping"), 3)],
            3,
        )
        .expect("valid loop");

        assert_eq!(event_loop.tick(), Ok(TickStatus::Halted));
        assert_eq!(event_loop.current_timestep(), 3);
    }

    assert_eq!(
        recorder.seen,
        vec![(TestEvent::Label("ping"), 3), (TestEvent::Label("pong"), 3)]
    );
}

#[test]
fn later_process_reacts_to_earlier_process_output_within_one_tick() {
    // relay(a -> b) registered after relay(b -> c): c still happens this tick.
    let mut recorder = Recorder::new();
    {
        let mut event_loop = EventLoop::<TestEvent>::from_parts(
            vec![
                boxed(SameTickRelay {
                    trigger: "b",
                    reply: "c",
                }),
                boxed(SameTickRelay {
                    trigger: "a",
                    reply: "b",
                }),
                boxed(&mut recorder),
            ],
            [(TestEvent::Label("a"), 0)],
            0,
        )
        .expect("valid loop");
        assert_eq!(event_loop.tick(), Ok(TickStatus::Halted));
    }

    let labels: Vec<_> = recorder.events().cloned().collect();
    assert_eq!(
        labels,
        vec![
            TestEvent::Label("a"),
            TestEvent::Label("b"),
            TestEvent::Label("c")
        ]
    );
}

#[test]
fn lone_event_without_processes_halts_after_one_tick() {
    let mut event_loop =
        EventLoop::<TestEvent>::from_parts(Vec::new(), [(TestEvent::Seed, 0)], 0)
            .expect("valid loop");

    assert_eq!(event_loop.tick(), Ok(TickStatus::Halted));
    assert!(event_loop.is_empty());
    assert_eq!(event_loop.state(), LoopState::Halted);

    let summary = event_loop.run().expect("run on empty loop");
    assert!(summary.halted);
    assert_eq!(summary.dispatched, 1);
}

#[test]
fn every_process_sees_each_event_in_registration_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut event_loop = EventLoop::<TestEvent>::from_parts(
        vec![
            boxed(Tagger {
                tag: "first",
                log: Rc::clone(&log),
            }),
            boxed(Tagger {
                tag: "second",
                log: Rc::clone(&log),
            }),
            boxed(Tagger {
                tag: "third",
                log: Rc::clone(&log),
            }),
        ],
        [(TestEvent::Count(2), 1), (TestEvent::Count(1), 0)],
        0,
    )
    .expect("valid loop");
    event_loop.run().expect("run");

    let log = log.borrow();
    let expected: Vec<_> = [TestEvent::Count(1), TestEvent::Count(2)]
        .into_iter()
        .flat_map(|event| {
            ["first", "second", "third"]
                .into_iter()
                .map(move |tag| (tag, event.clone()))
        })
        .collect();
    assert_eq!(*log, expected);
}

#[test]
fn events_are_dispatched_in_non_decreasing_timestep_order() {
    let mut dispatches = DispatchLog::new();
    let mut event_loop = EventLoop::<TestEvent>::from_parts(
        vec![boxed(FanOut {
            limit: 4,
            width: 2,
            delay: 3,
        })],
        [(TestEvent::Count(0), 0), (TestEvent::Count(2), 2)],
        0,
    )
    .expect("valid loop")
    .with_observer(&mut dispatches);
    event_loop.run().expect("run");
    drop(event_loop);

    let keys: Vec<_> = dispatches
        .records()
        .iter()
        .map(|r| (r.timestep, r.sequence))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(!keys.is_empty());
}

#[test]
fn identical_runs_produce_identical_dispatch_logs() {
    fn run_once() -> DispatchLog<TestEvent> {
        let mut dispatches = DispatchLog::new();
        let mut event_loop = EventLoop::<TestEvent>::new(
            vec![
                boxed(FanOut {
                    limit: 5,
                    width: 3,
                    delay: 1,
                }),
                boxed(SameTickRelay {
                    trigger: "go",
                    reply: "went",
                }),
                boxed(EchoProcess::new(6)),
            ],
            [
                (TestEvent::Count(0), 0),
                (TestEvent::Label("go"), 2),
                (TestEvent::Seed, 1),
            ],
            LoopConfig::default(),
        )
        .expect("valid loop")
        .with_observer(&mut dispatches);
        event_loop.run().expect("run");
        drop(event_loop);
        dispatches
    }

    let first = run_once();
    let second = run_once();
    assert!(first.len() > 100);
    assert_eq!(first, second);
}

#[test]
fn echo_scenario_emits_ten_follow_ups_and_halts_at_ten() {
    let mut echo = EchoProcess::new(10);
    let mut event_loop = EventLoop::<TestEvent>::from_parts(
        vec![boxed(&mut echo)],
        [(TestEvent::Seed, 0)],
        0,
    )
    .expect("valid loop");

    let summary = event_loop.run().expect("run");
    assert_eq!(summary.emitted, 10);
    // The seed plus ten echoes.
    assert_eq!(summary.dispatched, 11);
    assert_eq!(summary.ticks, 11);
    assert_eq!(event_loop.current_timestep(), 10);
    assert_eq!(event_loop.pending(), 0);
}

#[test]
fn process_scheduling_into_the_past_aborts_run() {
    let rewind = process_fn(|event: &TestEvent, now: Timestep| match event {
        TestEvent::Count(n) if *n >= 2 => vec![(TestEvent::Seed, now - 1)],
        TestEvent::Count(n) => vec![(TestEvent::Count(n + 1), now + 1)],
        _ => Vec::new(),
    });
    let mut event_loop =
        EventLoop::<TestEvent>::from_parts(vec![boxed(rewind)], [(TestEvent::Count(0), 0)], 0)
            .expect("valid loop");

    assert_eq!(
        event_loop.run(),
        Err(LoopError::OutOfOrderScheduling {
            requested: 1,
            current: 2
        })
    );
}

#[test]
fn halted_loop_accepts_new_work_at_or_after_current_timestep() {
    let mut recorder = Recorder::new();
    {
        let mut event_loop = EventLoop::<TestEvent>::from_parts(
            vec![boxed(&mut recorder)],
            [(TestEvent::Count(1), 4)],
            0,
        )
        .expect("valid loop");
        event_loop.run().expect("first run");
        assert_eq!(event_loop.state(), LoopState::Halted);

        assert!(event_loop.add_event(TestEvent::Count(2), 2).is_err());
        event_loop
            .add_event(TestEvent::Count(3), 4)
            .expect("same timestep is allowed");
        event_loop
            .add_event(TestEvent::Count(4), 9)
            .expect("future is allowed");
        assert_eq!(event_loop.state(), LoopState::Running);
        event_loop.run().expect("second run");
        assert_eq!(event_loop.current_timestep(), 9);
    }

    assert_eq!(
        recorder.seen,
        vec![
            (TestEvent::Count(1), 4),
            (TestEvent::Count(3), 4),
            (TestEvent::Count(4), 9)
        ]
    );
}

#[test]
fn initial_events_before_initial_timestep_are_rejected() {
    let result = EventLoop::<TestEvent>::new(
        Vec::new(),
        [(TestEvent::Seed, 0)],
        LoopConfig::default().with_initial_timestep(7),
    );
    assert_eq!(
        result.err(),
        Some(LoopError::OutOfOrderScheduling {
            requested: 0,
            current: 7
        })
    );
}

#[test]
fn start_event_reaches_processes_first() {
    let mut recorder = Recorder::new();
    EventLoop::<TestEvent>::new(
        vec![boxed(&mut recorder)],
        [(TestEvent::Seed, 7)],
        LoopConfig::default().with_initial_timestep(7),
    )
    .expect("valid loop")
    .run()
    .expect("run");

    assert_eq!(
        recorder.seen,
        vec![(TestEvent::Started, 7), (TestEvent::Seed, 7)]
    );
}
