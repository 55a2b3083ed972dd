// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_json::{json, Value};
use sluice_core::{discriminators, mappers};
use sluice_stream::{Item, Key, SluiceError, Stream};
use sluice_test_utils::pairs;

#[test]
fn test_map_replaces_values() -> anyhow::Result<()> {
    // Act
    let values = Stream::of(["a", "b"])
        .map(|v: Value| json!(v.as_str().unwrap_or_default().to_uppercase()))?
        .to_vec()?;

    // Assert
    assert_eq!(values, vec![json!("A"), json!("B")]);

    Ok(())
}

#[test]
fn test_map_by_item_sees_the_key() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([10, 20])
        .map(mappers::by_item(|v: Value, k: &Key| {
            json!(format!("{k}={v}"))
        }))?
        .to_vec()?;

    // Assert
    assert_eq!(values, vec![json!("0=10"), json!("1=20")]);

    Ok(())
}

#[test]
fn test_map_key_computes_keys_from_keys() -> anyhow::Result<()> {
    // Act
    let items = Stream::of(["x", "y"])
        .map_key(|k: Value| json!(k.as_i64().unwrap_or_default() + 100))?
        .to_items()?;

    // Assert
    assert_eq!(items, vec![Item::new(100, "x"), Item::new(101, "y")]);

    Ok(())
}

#[test]
fn test_map_key_rejects_non_scalar_keys() -> anyhow::Result<()> {
    // Act
    let result = Stream::of([1])
        .map_key(|k: Value| json!([k]))?
        .on_error(|_| true)?
        .run();

    // Assert
    assert!(matches!(result, Err(SluiceError::ContractViolation { .. })));

    Ok(())
}

#[test]
fn test_classify_labels_items() -> anyhow::Result<()> {
    // Act
    let items = Stream::of([1, 2, 3])
        .classify(discriminators::even_odd())?
        .to_items()?;

    // Assert
    assert_eq!(
        pairs(&items),
        vec![json!(["odd", 1]), json!(["even", 2]), json!(["odd", 3])]
    );

    Ok(())
}

#[test]
fn test_flip_swaps_keys_and_values() -> anyhow::Result<()> {
    // Act
    let items = Stream::from_items(vec![Item::new("a", 1), Item::new("b", true)])
        .flip()?
        .to_items()?;

    // Assert
    assert_eq!(items, vec![Item::new(1, "a"), Item::new(true, "b")]);

    Ok(())
}

#[test]
fn test_flip_of_a_collection_is_a_contract_violation() -> anyhow::Result<()> {
    // Act
    let result = Stream::of([json!({"a": 1})]).flip()?.run();

    // Assert
    assert!(matches!(result, Err(ref e) if e.is_contract_violation()));

    Ok(())
}

#[test]
fn test_reindex_numbers_items() -> anyhow::Result<()> {
    // Act
    let items = Stream::from_items(vec![Item::new("a", 1), Item::new("b", 2)])
        .reindex(10, -5)?
        .to_items()?;

    // Assert
    assert_eq!(items, vec![Item::new(10, 1), Item::new(5, 2)]);

    Ok(())
}

#[test]
fn test_reindex_with_zero_step_is_rejected() -> anyhow::Result<()> {
    // Act
    let result = Stream::of([1]).reindex(0, 0);

    // Assert
    assert!(matches!(result, Err(SluiceError::InvalidArgument { .. })));

    Ok(())
}
