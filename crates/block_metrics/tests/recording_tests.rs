//! Integration tests for block recording
//! Covers the macro against the global registry, nested blocks, concurrent
//! recording and the text reports.
//!
//! All tests in this file share the global registry, so every test uses its
//! own metric names.

use block_metrics::{
    global_registry, record_block, Microseconds, Minutes, Nanos, Nanoseconds, Registry, Reporter,
    Seconds,
};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn count_occurrences(text: &str, token: &str) -> usize {
    if token.is_empty() {
        return 0;
    }
    text.matches(token).count()
}

#[cfg(feature = "collect")]
#[test]
fn test_macro_records_each_entry() {
    for _ in 0..100 {
        record_block!("macro_metric");
        thread::sleep(Duration::from_nanos(10));
    }

    let registry = global_registry();
    assert_eq!(registry.times_entered("macro_metric"), 100);
    assert!(registry.max::<Nanoseconds>("macro_metric").count() >= 10);

    assert_eq!(registry.times_entered("i_don't_exist"), 0);
    assert!(registry.max::<Nanoseconds>("i_don't_exist").is_zero());
}

#[cfg(feature = "collect")]
#[test]
fn test_macro_nested_blocks() {
    let foo = || {
        record_block!("foo");
        for _ in 0..150 {
            record_block!("foo_loop");
            thread::sleep(Duration::from_nanos(10));
        }
    };

    foo();

    let registry = global_registry();
    assert_eq!(registry.times_entered("foo"), 1);
    assert_eq!(registry.times_entered("foo_loop"), 150);

    assert!(registry.total::<Microseconds>("foo").count() >= 1);
    assert!(registry.max::<Nanoseconds>("foo_loop").count() >= 10);
    assert!(registry.min::<Nanoseconds>("foo_loop").count() >= 10);
    assert!(registry.average::<Nanoseconds>("foo_loop").count() >= 10);

    // The outer block encloses every inner one
    assert!(registry.total::<Nanoseconds>("foo") >= registry.total::<Nanoseconds>("foo_loop"));

    let (min, max) = registry.min_max::<Nanoseconds>("foo_loop");
    assert_eq!(min, registry.min::<Nanoseconds>("foo_loop"));
    assert_eq!(max, registry.max::<Nanoseconds>("foo_loop"));
}

#[cfg(feature = "collect")]
#[test]
fn test_report_suffixes() {
    let bar = || {
        record_block!("bar");
        for _ in 0..150 {
            record_block!("bar_loop");
            thread::sleep(Duration::from_nanos(10));
        }
    };

    bar();

    let reporter = Reporter::global();
    let nanos = reporter.format::<Nanoseconds>("bar");
    // One suffix each on Total, Average, Min and Max
    assert_eq!(count_occurrences(&nanos, "ns"), 4);

    // Four "s" suffixes plus the one in "metrics:"
    let minutes = reporter.format::<Minutes>("bar");
    assert_eq!(count_occurrences(&minutes, "s"), 5);
    assert_eq!(minutes, reporter.format::<Seconds>("bar"));

    let loop_report = reporter.format::<Nanoseconds>("bar_loop");
    assert!(loop_report.contains("\tEntered: 150\n"));
}

#[test]
fn test_explicit_registry_macro() {
    let registry = Registry::new();
    for _ in 0..5 {
        record_block!(&registry, "injected");
    }

    #[cfg(feature = "collect")]
    assert_eq!(registry.times_entered("injected"), 5);
    #[cfg(not(feature = "collect"))]
    assert!(registry.is_empty());

    assert_eq!(global_registry().times_entered("injected"), 0);
}

#[test]
fn test_wrap_around_keeps_latest_window() {
    let registry = Registry::with_capacity(1000);
    for value in 0..1_250 {
        registry.record("ring", Nanos::from_count(value));
    }

    // Entered counts every sample while the statistics cover 250..1250
    assert_eq!(registry.times_entered("ring"), 1_250);
    assert_eq!(registry.min::<Nanoseconds>("ring").count(), 250);
    assert_eq!(registry.max::<Nanoseconds>("ring").count(), 1_249);
    let expected_total: i64 = (250..1_250).sum();
    assert_eq!(registry.total::<Nanoseconds>("ring").count(), expected_total);
    assert_eq!(registry.average::<Nanoseconds>("ring").count(), expected_total / 1_000);
}

#[test]
fn test_concurrent_records_same_metric() {
    let registry = Arc::new(Registry::with_capacity(10_000));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for value in 1..=500 {
                    registry.record("shared", Nanos::from_count(value));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.times_entered("shared"), 4_000);
    assert_eq!(registry.total::<Nanoseconds>("shared").count(), 8 * (500 * 501 / 2));
    assert_eq!(registry.min::<Nanoseconds>("shared").count(), 1);
    assert_eq!(registry.max::<Nanoseconds>("shared").count(), 500);
}

#[test]
fn test_concurrent_records_distinct_metrics() {
    let registry = Arc::new(Registry::new());
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let name = format!("worker_{worker}");
                for _ in 0..200 {
                    let _timer = registry.timer(name.clone());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.len(), 8);
    for worker in 0..8 {
        assert_eq!(registry.times_entered(&format!("worker_{worker}")), 200);
    }
}

#[test]
fn test_queries_during_recording() {
    let registry = Arc::new(Registry::new());
    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for value in 1..=2_000 {
                registry.record("live", Nanos::from_count(value));
            }
        })
    };

    let reporter_registry = Arc::clone(&registry);
    let reader = thread::spawn(move || {
        let reporter = Reporter::new(&reporter_registry);
        for _ in 0..200 {
            if let Some(stats) = reporter_registry.stats("live") {
                assert!(stats.min <= stats.max);
                assert!(stats.window <= 1_000);
            }
            let text = reporter.format::<Nanoseconds>("live");
            assert!(text.starts_with("live metrics:\n"));
        }
    });

    writer.join().unwrap();
    reader.join().unwrap();
    assert_eq!(registry.times_entered("live"), 2_000);
}
