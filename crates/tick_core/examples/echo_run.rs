//! Run the echo scenario with tracing enabled and print the run summary.
//!
//! Run with: RUST_LOG=debug cargo run -p tick_core --example echo_run

use tick_core::test_helpers::{EchoProcess, Recorder, TestEvent};
use tick_core::{DispatchMetrics, EventLoop, LoopConfig, TracingObserver};
use tracing_subscriber::EnvFilter;

fn main() {
    const LIMIT: u64 = 10;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut recorder = Recorder::new();
    let mut metrics = DispatchMetrics::new();
    let summary = {
        let mut event_loop = EventLoop::<TestEvent>::new(
            vec![Box::new(EchoProcess::new(LIMIT)), Box::new(&mut recorder)],
            [(TestEvent::Seed, 0)],
            LoopConfig::default(),
        )
        .expect("valid loop")
        .with_observer(TracingObserver)
        .with_observer(&mut metrics);
        event_loop.run().expect("run")
    };

    println!("--- Echo run (limit {}) ---", LIMIT);
    println!("Ticks: {}", summary.ticks);
    println!("Events dispatched: {}", summary.dispatched);
    println!("Follow-ups emitted: {}", summary.emitted);
    println!("Final timestep: {}", summary.final_timestep);
    println!("\nDeliveries seen by the recorder:");
    for (event, at) in &recorder.seen {
        println!("  t={:>3}  {:?}", at, event);
    }
    metrics.log_summary();
    println!("\n{:#?}", metrics.summary());
}
