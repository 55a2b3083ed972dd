// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_json::{json, Value};
use sluice_stream::{Collector, Stream};
use sluice_test_utils::ints;

#[test]
fn test_feed_copies_items_and_forwards_them() -> anyhow::Result<()> {
    // Arrange
    let target = Stream::empty();
    let received = target.clone().collect()?;

    // Act
    let values = Stream::of([1, 2, 3]).feed(vec![target])?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![1, 2, 3]);
    assert_eq!(ints(&received.to_vec()?), vec![1, 2, 3]);

    Ok(())
}

#[test]
fn test_fed_stream_keeps_its_own_source() -> anyhow::Result<()> {
    // Arrange
    let target = Stream::of([10, 20]);
    let sorted = target.clone().sort()?.collect()?;

    // Act
    Stream::of([15, 5]).feed(vec![target])?.run()?;

    // Assert
    assert_eq!(ints(&sorted.to_vec()?), vec![5, 10, 15, 20]);

    Ok(())
}

#[test]
fn test_feed_into_several_targets() -> anyhow::Result<()> {
    // Arrange
    let first = Stream::empty();
    let second = Stream::empty();
    let a = first.clone().count()?;
    let b = second.clone().last()?;

    // Act
    Stream::of(["x", "y"]).feed(vec![first, second])?.run()?;

    // Assert
    assert_eq!(a.get()?, json!(2));
    assert_eq!(b.get()?, json!("y"));

    Ok(())
}

#[test]
fn test_feedback_loop_through_the_own_source() -> anyhow::Result<()> {
    // Arrange
    let seen = Collector::new();
    let stream = Stream::of([1]);
    let this = stream.clone();

    // Act
    stream
        .limit(5)?
        .collect_in(seen.clone(), false)?
        .map(|v: Value| json!(v.as_i64().unwrap_or_default() * 2))?
        .feed(vec![this])?
        .run()?;

    // Assert
    assert_eq!(ints(&seen.values()), vec![1, 2, 4, 8, 16]);

    Ok(())
}

#[test]
fn test_feeding_a_finished_stream_fails() -> anyhow::Result<()> {
    // Arrange
    let target = Stream::empty();
    target.clone().run()?;

    // Act
    let result = Stream::of([1]).feed(vec![target])?.run();

    // Assert
    assert!(matches!(result, Err(ref e) if e.is_structural()));

    Ok(())
}
