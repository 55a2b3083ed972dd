// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_json::{json, Value};
use sluice_core::value::compare_values;
use sluice_stream::{Check, Comparator, Item, SluiceError, Stream};
use sluice_test_utils::test_data::{mixed_duplicates, strictly_distinct};
use sluice_test_utils::ints;
use std::cmp::Ordering;

fn unique_in(mode: Check) -> anyhow::Result<Vec<Item>> {
    Ok(Stream::from_items(mixed_duplicates())
        .unique_by(Comparator::Natural, mode)?
        .to_items()?)
}

#[test]
fn test_unique_drops_repeated_values() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([1, 2, 1, 3, 2, 1]).unique()?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![1, 2, 3]);

    Ok(())
}

#[test]
fn test_unique_uses_strict_equality() -> anyhow::Result<()> {
    // Act
    let values = Stream::of(strictly_distinct()).unique()?.to_vec()?;

    // Assert
    assert_eq!(values, strictly_distinct());

    Ok(())
}

#[test]
fn test_unique_by_value() -> anyhow::Result<()> {
    // Act
    let items = unique_in(Check::Value)?;

    // Assert
    assert_eq!(
        items,
        vec![
            Item::new(0, "a"),
            Item::new("b", 3),
            Item::new(2, 2),
            Item::new("a", "b"),
            Item::new("b", true),
        ]
    );

    Ok(())
}

#[test]
fn test_unique_by_key() -> anyhow::Result<()> {
    // Act
    let items = unique_in(Check::Key)?;

    // Assert
    assert_eq!(
        items,
        vec![
            Item::new(0, "a"),
            Item::new("b", 3),
            Item::new(2, 2),
            Item::new(1, "a"),
            Item::new("a", "b"),
            Item::new("c", "a"),
        ]
    );

    Ok(())
}

#[test]
fn test_unique_by_both_drops_on_either() -> anyhow::Result<()> {
    // Act
    let items = unique_in(Check::Both)?;

    // Assert
    assert_eq!(
        items,
        vec![
            Item::new(0, "a"),
            Item::new("b", 3),
            Item::new(2, 2),
            Item::new("a", "b"),
        ]
    );

    Ok(())
}

#[test]
fn test_unique_by_any_drops_only_when_both_were_seen() -> anyhow::Result<()> {
    // Act
    let items = unique_in(Check::Any)?;

    // Assert
    assert_eq!(
        items,
        vec![
            Item::new(0, "a"),
            Item::new("b", 3),
            Item::new(2, 2),
            Item::new(1, "a"),
            Item::new("a", "b"),
            Item::new("b", true),
            Item::new("c", "a"),
        ]
    );

    Ok(())
}

#[test]
fn test_unique_by_binary_comparator() -> anyhow::Result<()> {
    // Arrange
    let ignore_case = Comparator::binary(|a: &Value, b: &Value| {
        let lower = |v: &Value| v.as_str().map(str::to_lowercase);
        match (lower(a), lower(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => compare_values(a, b),
        }
    });

    // Act
    let values = Stream::of(["Apple", "apple", "Pear", "APPLE", "pear", "fig"])
        .unique_by(ignore_case, Check::Value)?
        .to_vec()?;

    // Assert
    assert_eq!(values, vec![json!("Apple"), json!("Pear"), json!("fig")]);

    Ok(())
}

#[test]
fn test_unique_by_pair_comparator() -> anyhow::Result<()> {
    // Arrange
    let same_pair = Comparator::quaternary(|va, vb, ka, kb| {
        if ka == kb && compare_values(va, vb) == Ordering::Equal {
            Ordering::Equal
        } else {
            Ordering::Less
        }
    });
    let items = vec![
        Item::new("x", 1),
        Item::new("x", 2),
        Item::new("x", 1),
        Item::new("y", 1),
    ];

    // Act
    let both = Stream::from_items(items.clone())
        .unique_by(same_pair.clone(), Check::Both)?
        .to_items()?;
    let any = Stream::from_items(items)
        .unique_by(same_pair, Check::Any)?
        .to_items()?;

    // Assert
    let expected = vec![Item::new("x", 1), Item::new("x", 2), Item::new("y", 1)];
    assert_eq!(both, expected);
    assert_eq!(any, expected);

    Ok(())
}

#[test]
fn test_pair_comparator_needs_both_or_any() -> anyhow::Result<()> {
    // Arrange
    let pairs = || Comparator::quaternary(|_, _, _, _| Ordering::Equal);

    // Act
    let by_value = Stream::of([1]).unique_by(pairs(), Check::Value);
    let by_key = Stream::of([1]).unique_by(pairs(), Check::Key);

    // Assert
    assert!(matches!(by_value, Err(SluiceError::InvalidArgument { .. })));
    assert!(matches!(by_key, Err(SluiceError::InvalidArgument { .. })));

    Ok(())
}
