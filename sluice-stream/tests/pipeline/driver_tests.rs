// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_json::{json, Value};
use sluice_core::producer;
use sluice_stream::{Downstream, Operation, Result, Signal, Stream};
use sluice_test_utils::{ints, TrackedProducer};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Forwards every item twice.
struct Twice;

impl Operation for Twice {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        let item = signal.item().clone();
        next.handle(signal)?;
        signal.set_item(item);
        next.handle(signal)
    }
}

/// Records whether the stream was empty when it ended.
struct EmptyProbe(Arc<AtomicBool>);

impl Operation for EmptyProbe {
    fn handle(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        next.handle(signal)
    }

    fn streaming_finished(&mut self, signal: &mut Signal, next: &mut Downstream<'_>) -> Result<()> {
        self.0.store(signal.is_stream_empty(), Ordering::SeqCst);
        next.finish(signal)
    }
}

#[test]
fn test_nothing_is_pulled_until_consumed() -> anyhow::Result<()> {
    // Arrange
    let (source, tracker) = TrackedProducer::new(producer::from_values([1, 2, 3]));
    let stream = Stream::from_producer(source).map(|v: Value| v)?;

    // Assert
    assert_eq!(tracker.pulled(), 0);

    // Act
    let values = stream.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![1, 2, 3]);
    assert_eq!(tracker.pulled(), 3);
    assert!(tracker.destroyed());

    Ok(())
}

#[test]
fn test_limit_stops_pulling_the_source() -> anyhow::Result<()> {
    // Arrange
    let (source, tracker) = TrackedProducer::new(producer::from_values(0..100));

    // Act
    let values = Stream::from_producer(source).limit(3)?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![0, 1, 2]);
    assert_eq!(tracker.pulled(), 3);
    assert!(tracker.destroyed());

    Ok(())
}

#[test]
fn test_limit_after_sort_keeps_smallest() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([5, 1, 4, 2, 3]).sort()?.limit(2)?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![1, 2]);

    Ok(())
}

#[test]
fn test_limit_never_raises_a_bound() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([5, 1, 4, 2, 3]).best(3)?.limit(5)?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![1, 2, 3]);

    Ok(())
}

#[test]
fn test_limit_after_replay_stops_the_replay() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([1, 2, 3, 4]).reverse()?.limit(2)?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![4, 3]);

    Ok(())
}

#[test]
fn test_replay_flows_through_following_stages() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([2, 3, 1])
        .sort()?
        .map(|v: Value| json!(v.as_i64().unwrap_or_default() * 10))?
        .reverse()?
        .to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![30, 20, 10]);

    Ok(())
}

#[test]
fn test_custom_operation_can_emit_more_items() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([1, 2]).append(Twice)?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![1, 1, 2, 2]);

    Ok(())
}

#[test]
fn test_joined_sources_are_drained_in_order() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([1, 2])
        .join(producer::from_values([3]))?
        .join(producer::from_values([4, 5]))?
        .to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![1, 2, 3, 4, 5]);

    Ok(())
}

#[test]
fn test_signal_reports_an_empty_stream() -> anyhow::Result<()> {
    // Arrange
    let empty = Arc::new(AtomicBool::new(false));
    let filled = Arc::new(AtomicBool::new(true));

    // Act
    Stream::empty().append(EmptyProbe(empty.clone()))?.run()?;
    Stream::of([1]).append(EmptyProbe(filled.clone()))?.run()?;

    // Assert
    assert!(empty.load(Ordering::SeqCst));
    assert!(!filled.load(Ordering::SeqCst));

    Ok(())
}
