// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_json::{json, Value};
use sluice_core::{discriminators, mappers, producer, Collector, Mapper};
use sluice_stream::{Key, SluiceError, Stream};
use sluice_test_utils::{ints, ErrorInjectingProducer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn doubler() -> impl Mapper {
    mappers::fallible(|v: Value, _: &Key| {
        v.as_i64()
            .map(|n| json!(n * 2))
            .ok_or_else(|| SluiceError::stream_error(format!("cannot double {v}")))
    })
}

fn mixed() -> Stream {
    Stream::of([json!(1), json!("a"), json!(2)])
}

#[test]
fn test_handler_returning_true_skips_the_item() -> anyhow::Result<()> {
    // Act
    let values = mixed().map(doubler())?.on_error(|_| true)?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![2, 4]);

    Ok(())
}

#[test]
fn test_handler_returning_false_stops_the_run() -> anyhow::Result<()> {
    // Act
    let values = mixed().map(doubler())?.on_error(|_| false)?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![2]);

    Ok(())
}

#[test]
fn test_stopping_handler_still_flushes_buffers() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([json!(3), json!(1), json!("a"), json!(2)])
        .map(doubler())?
        .sort()?
        .on_error(|_| false)?
        .to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![2, 6]);

    Ok(())
}

#[test]
fn test_without_handler_the_run_fails_without_flushing() -> anyhow::Result<()> {
    // Arrange
    let flushed = Collector::new();

    // Act
    let result = Stream::of([json!(3), json!(1), json!("a")])
        .map(doubler())?
        .sort()?
        .collect_in(flushed.clone(), false)?
        .run();

    // Assert
    assert!(matches!(result, Err(ref e) if e.is_data_error()));
    assert!(flushed.is_empty());

    Ok(())
}

#[test]
fn test_handler_sees_every_data_error() -> anyhow::Result<()> {
    // Arrange
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();

    // Act
    let values = Stream::of([json!("x"), json!(1), json!("y"), json!(2)])
        .map(doubler())?
        .on_error(move |e| {
            assert!(e.is_data_error());
            counter.fetch_add(1, Ordering::SeqCst);
            true
        })?
        .to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![2, 4]);
    assert_eq!(seen.load(Ordering::SeqCst), 2);

    Ok(())
}

#[test]
fn test_contract_violation_bypasses_handler() -> anyhow::Result<()> {
    // Act
    let result = Stream::of([json!({"a": 1})])
        .classify(discriminators::by_field("missing"))?
        .on_error(|_| true)?
        .run();

    // Assert
    assert!(matches!(result, Err(ref e) if e.is_contract_violation()));

    Ok(())
}

#[test]
fn test_source_failure_is_fatal() -> anyhow::Result<()> {
    // Arrange
    let source = ErrorInjectingProducer::new(producer::from_values([1, 2, 3]), 1);

    // Act
    let result = Stream::from_producer(source).on_error(|_| true)?.to_vec();

    // Assert
    assert!(result.is_err());

    Ok(())
}

#[test]
fn test_failure_is_cached_for_later_reads() -> anyhow::Result<()> {
    // Arrange
    let result = mixed().map(doubler())?.collect()?;

    // Act
    let first = result.get();
    let second = result.to_vec();

    // Assert
    assert!(matches!(first, Err(ref e) if e.is_data_error()));
    assert!(matches!(second, Err(ref e) if e.is_data_error()));

    Ok(())
}
