// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_json::json;
use sluice_stream::{Item, SluiceError, Stream};
use sluice_test_utils::ints;

#[test]
fn test_flat_one_level() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([json!([1, [2, 3]]), json!(4)]).flat(1)?.to_vec()?;

    // Assert
    assert_eq!(values, vec![json!(1), json!([2, 3]), json!(4)]);

    Ok(())
}

#[test]
fn test_flat_two_levels() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([json!([1, [2, 3]]), json!(4)]).flat(2)?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![1, 2, 3, 4]);

    Ok(())
}

#[test]
fn test_flat_keys_object_fields_by_name() -> anyhow::Result<()> {
    // Act
    let items = Stream::of([json!({"a": 1, "b": 2})]).flat(1)?.to_items()?;

    // Assert
    assert_eq!(items, vec![Item::new("a", 1), Item::new("b", 2)]);

    Ok(())
}

#[test]
fn test_flat_stops_inside_a_collection() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([json!([1, 2, 3, 4])]).flat(1)?.limit(2)?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![1, 2]);

    Ok(())
}

#[test]
fn test_chunk_batches_values() -> anyhow::Result<()> {
    // Act
    let items = Stream::of([1, 2, 3, 4, 5]).chunk(2, false)?.to_items()?;

    // Assert
    assert_eq!(
        items,
        vec![
            Item::new(0, json!([1, 2])),
            Item::new(1, json!([3, 4])),
            Item::new(2, json!([5])),
        ]
    );

    Ok(())
}

#[test]
fn test_chunk_preserving_keys_builds_objects() -> anyhow::Result<()> {
    // Act
    let values = Stream::of(["x", "y", "z"]).chunk(2, true)?.to_vec()?;

    // Assert
    assert_eq!(values, vec![json!({"0": "x", "1": "y"}), json!({"2": "z"})]);

    Ok(())
}

#[test]
fn test_zero_sizes_are_rejected() -> anyhow::Result<()> {
    // Act
    let flat = Stream::of([1]).flat(0);
    let chunk = Stream::of([1]).chunk(0, false);

    // Assert
    assert!(matches!(flat, Err(SluiceError::InvalidArgument { .. })));
    assert!(matches!(chunk, Err(SluiceError::InvalidArgument { .. })));

    Ok(())
}
