// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sluice_core::producer;
use sluice_stream::{Key, Stream, Value};
use sluice_test_utils::ints;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_skip_drops_leading_items() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([1, 2, 3, 4]).skip(2)?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![3, 4]);

    Ok(())
}

#[test]
fn test_skip_zero_is_a_no_op() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([1, 2]).skip(0)?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![1, 2]);

    Ok(())
}

#[test]
fn test_skip_past_the_end_yields_nothing() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([1, 2]).skip(5)?.to_vec()?;

    // Assert
    assert!(values.is_empty());

    Ok(())
}

#[test]
fn test_limit_zero_forwards_nothing() -> anyhow::Result<()> {
    // Arrange
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);

    // Act
    let values = Stream::of([1, 2, 3])
        .limit(0)?
        .call(move |_: &Value, _: &Key| {
            seen.fetch_add(1, Ordering::SeqCst);
        })?
        .to_vec()?;

    // Assert
    assert!(values.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    Ok(())
}

#[test]
fn test_limit_zero_after_a_limited_sort() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([3, 1, 2]).best(2)?.limit(0)?.to_vec()?;

    // Assert
    assert!(values.is_empty());

    Ok(())
}

#[test]
fn test_consecutive_limits_keep_the_smaller() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([1, 2, 3, 4, 5]).limit(4)?.limit(2)?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![1, 2]);

    Ok(())
}

#[test]
fn test_limit_in_the_middle_of_the_chain() -> anyhow::Result<()> {
    // Act
    let values = Stream::from_producer(producer::sequential_int(1, 1, None)?)
        .skip(2)?
        .limit(3)?
        .to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![3, 4, 5]);

    Ok(())
}
