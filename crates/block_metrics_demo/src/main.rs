//! Block metrics demo
//!
//! Runs an instrumented loop, checks the recorded counts and prints the
//! report to standard output. Set `RUST_LOG=block_metrics=trace` to see
//! every sample as it is recorded.

use anyhow::ensure;
use block_metrics::{global_registry, record_block, Microseconds, Nanoseconds, Reporter};
use std::io::Write;
use std::thread;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn foo() -> Vec<i32> {
    record_block!("foo");
    let mut vals = Vec::new();

    for i in 0..100 {
        record_block!("foo_loop");

        vals.push(i);
        thread::sleep(Duration::from_nanos(10));
    }

    vals
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let vals = foo();
    tracing::info!(values = vals.len(), "instrumented run finished");

    let registry = global_registry();
    if registry.is_empty() {
        tracing::warn!("metric collection is disabled, nothing to report");
        return Ok(());
    }

    ensure!(registry.times_entered("foo") == 1, "foo should be entered once");
    ensure!(
        registry.times_entered("foo_loop") == 100,
        "foo_loop should be entered 100 times"
    );
    ensure!(registry.total::<Microseconds>("foo").count() >= 1);
    ensure!(registry.min::<Nanoseconds>("foo_loop").count() >= 10);
    ensure!(registry.max::<Nanoseconds>("foo_loop").count() >= 10);
    ensure!(registry.average::<Nanoseconds>("foo_loop").count() >= 10);

    // Sleeps dominate, so expect tens of microseconds per entry
    let reporter = Reporter::new(registry);
    let mut stdout = std::io::stdout().lock();
    reporter.write_metric::<Nanoseconds, _>("foo_loop", &mut stdout)?;
    stdout.flush()?;

    reporter.log_all::<Microseconds>();
    let snapshot = registry.snapshot().to_json_compact()?;
    tracing::debug!(%snapshot, "final snapshot");

    Ok(())
}
