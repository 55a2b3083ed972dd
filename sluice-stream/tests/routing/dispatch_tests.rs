// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sluice_core::discriminators;
use sluice_stream::{Collector, Routes, SluiceError, Stream};
use sluice_test_utils::ints;

#[test]
fn test_dispatch_routes_and_forwards() -> anyhow::Result<()> {
    // Arrange
    let odd = Collector::new();
    let even = Collector::new();
    let routes = Routes::new()
        .route("odd", odd.clone())
        .route("even", even.clone());

    // Act
    let values = Stream::of(1..=5)
        .dispatch(discriminators::even_odd(), routes)?
        .to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![1, 2, 3, 4, 5]);
    assert_eq!(ints(&odd.values()), vec![1, 3, 5]);
    assert_eq!(ints(&even.values()), vec![2, 4]);

    Ok(())
}

#[test]
fn test_dispatch_finishes_stream_destinations() -> anyhow::Result<()> {
    // Arrange
    let evens = Stream::empty();
    let sorted = evens.clone().rsort()?.collect()?;
    let routes = Routes::new()
        .route("even", evens)
        .route("odd", Collector::new());

    // Act
    Stream::of([2, 7, 8, 4, 1, 6])
        .dispatch(discriminators::even_odd(), routes)?
        .run()?;

    // Assert
    assert_eq!(ints(&sorted.to_vec()?), vec![8, 6, 4, 2]);

    Ok(())
}

#[test]
fn test_later_route_replaces_earlier() -> anyhow::Result<()> {
    // Arrange
    let first = Collector::new();
    let second = Collector::new();
    let routes = Routes::new()
        .route("even", first.clone())
        .route("even", second.clone())
        .route("odd", Collector::new());

    // Act
    Stream::of([1, 2])
        .dispatch(discriminators::even_odd(), routes)?
        .run()?;

    // Assert
    assert!(first.is_empty());
    assert_eq!(ints(&second.values()), vec![2]);

    Ok(())
}

#[test]
fn test_missing_route_is_a_contract_violation() -> anyhow::Result<()> {
    // Arrange
    let routes = Routes::new().route("odd", Collector::new());

    // Act
    let result = Stream::of([1, 2])
        .dispatch(discriminators::even_odd(), routes)?
        .on_error(|_| true)?
        .run();

    // Assert
    assert!(matches!(result, Err(SluiceError::ContractViolation { .. })));

    Ok(())
}

#[test]
fn test_routing_back_into_the_stream_is_a_loop() -> anyhow::Result<()> {
    // Arrange
    let stream = Stream::of([1]);
    let routes = Routes::new().route("odd", stream.clone());

    // Act
    let result = stream.dispatch(discriminators::even_odd(), routes);

    // Assert
    assert!(matches!(result, Err(SluiceError::LoopDetected { .. })));

    Ok(())
}

#[test]
fn test_routes_count_distinct_labels() {
    // Act
    let routes = Routes::new()
        .route("a", Collector::new())
        .route("b", Collector::new())
        .route("a", Collector::new());

    // Assert
    assert_eq!(routes.len(), 2);
    assert!(!routes.is_empty());
    assert!(Routes::new().is_empty());
}
