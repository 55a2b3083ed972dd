// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_json::{json, Value};
use sluice_stream::{Collector, Item, Key, SluiceError, Stream};
use sluice_test_utils::ints;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

#[test]
fn test_call_sees_every_item_and_forwards_it() -> anyhow::Result<()> {
    // Arrange
    let total = Arc::new(AtomicI64::new(0));
    let sum = total.clone();

    // Act
    let values = Stream::of([1, 2, 3])
        .call(move |v: &Value, _: &Key| {
            sum.fetch_add(v.as_i64().unwrap_or_default(), Ordering::SeqCst);
        })?
        .to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![1, 2, 3]);
    assert_eq!(total.load(Ordering::SeqCst), 6);

    Ok(())
}

#[test]
fn test_send_to_max_calls_a_bounded_number_of_times() -> anyhow::Result<()> {
    // Arrange
    let seen = Collector::new();

    // Act
    let values = Stream::of([1, 2, 3, 4])
        .send_to_max(2, seen.clone())?
        .to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![1, 2, 3, 4]);
    assert_eq!(ints(&seen.values()), vec![1, 2]);

    Ok(())
}

#[test]
fn test_send_to_max_zero_is_rejected() -> anyhow::Result<()> {
    // Act
    let result = Stream::of([1]).send_to_max(0, Collector::new());

    // Assert
    assert!(matches!(result, Err(SluiceError::InvalidArgument { .. })));

    Ok(())
}

#[test]
fn test_collect_in_renumbers_unless_keys_are_kept() -> anyhow::Result<()> {
    // Arrange
    let renumbered = Collector::new();
    let keyed = Collector::new();
    let source = vec![Item::new("a", 1), Item::new("b", 2)];

    // Act
    Stream::from_items(source.clone())
        .collect_in(renumbered.clone(), false)?
        .collect_in(keyed.clone(), true)?
        .run()?;

    // Assert
    assert_eq!(renumbered.items(), vec![Item::new(0, 1), Item::new(1, 2)]);
    assert_eq!(keyed.items(), source);

    Ok(())
}

#[test]
fn test_for_each_runs_the_consumer() -> anyhow::Result<()> {
    // Arrange
    let seen = Collector::new();

    // Act
    Stream::of([json!("a"), json!("b")]).for_each(seen.clone())?;

    // Assert
    assert_eq!(seen.values(), vec![json!("a"), json!("b")]);

    Ok(())
}
