//! Performance benchmarks for tick_core using Criterion.rs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tick_core::test_helpers::{EchoProcess, TestEvent};
use tick_core::{process_fn, BoxedProcess, EventLoop, EventQueue, Timestep};

fn bench_queue(c: &mut Criterion) {
    let sizes = vec![("small", 1_000u64), ("medium", 10_000), ("large", 100_000)];

    let mut group = c.benchmark_group("queue_push_pop");
    for (name, size) in sizes {
        group.bench_with_input(BenchmarkId::from_parameter(name), &size, |b, &size| {
            b.iter(|| {
                let mut queue = EventQueue::new();
                // Spread over a handful of timestamps so ties are common.
                for i in 0..size {
                    queue.push(i, (i * 7919) % 64);
                }
                black_box(queue.drain_ordered());
            });
        });
    }
    group.finish();
}

fn bench_loop_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("loop_run");

    group.bench_function("echo_10k", |b| {
        b.iter(|| {
            let mut event_loop = EventLoop::<TestEvent>::from_parts(
                vec![Box::new(EchoProcess::new(10_000))],
                [(TestEvent::Seed, 0)],
                0,
            )
            .expect("valid loop");
            black_box(event_loop.run().expect("run"));
        });
    });

    for width in [2u32, 4, 8] {
        group.bench_with_input(BenchmarkId::new("fan_out", width), &width, |b, &width| {
            b.iter(|| {
                let fan_out = process_fn(move |event: &TestEvent, now: Timestep| match event {
                    TestEvent::Count(n) if *n < 5 => (0..width)
                        .map(|_| (TestEvent::Count(n + 1), now + 1))
                        .collect(),
                    _ => Vec::new(),
                });
                let processes: Vec<BoxedProcess<'_, TestEvent>> =
                    vec![Box::new(fan_out), Box::new(EchoProcess::new(0))];
                let mut event_loop =
                    EventLoop::from_parts(processes, [(TestEvent::Count(0), 0)], 0)
                        .expect("valid loop");
                black_box(event_loop.run().expect("run"));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_queue, bench_loop_run);
criterion_main!(benches);
