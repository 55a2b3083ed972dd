// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_json::{json, Value};
use sluice_core::{filters, Check};
use sluice_stream::{Item, Stream};
use sluice_test_utils::{ints, pairs};

#[test]
fn test_filter_keeps_accepted_values() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([1, 2, 3, 4, 5, 6])
        .filter(filters::is_even())?
        .to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![2, 4, 6]);

    Ok(())
}

#[test]
fn test_filter_preserves_keys() -> anyhow::Result<()> {
    // Act
    let items = Stream::of([5, 6, 7])
        .filter(|v: &Value| v.as_i64() != Some(6))?
        .to_items()?;

    // Assert
    assert_eq!(items, vec![Item::new(0, 5), Item::new(2, 7)]);

    Ok(())
}

#[test]
fn test_filter_by_mode() -> anyhow::Result<()> {
    // Arrange
    let items = vec![
        Item::new(1, 1),
        Item::new(2, 3),
        Item::new(3, 4),
        Item::new(4, 6),
    ];
    let even = |v: &Value| v.as_i64().is_some_and(|n| n % 2 == 0);

    // Act
    let by_key = Stream::from_items(items.clone())
        .filter_by(even, Check::Key)?
        .to_items()?;
    let both = Stream::from_items(items.clone())
        .filter_by(even, Check::Both)?
        .to_items()?;
    let any = Stream::from_items(items)
        .filter_by(even, Check::Any)?
        .to_items()?;

    // Assert
    assert_eq!(pairs(&by_key), vec![json!([2, 3]), json!([4, 6])]);
    assert_eq!(pairs(&both), vec![json!([4, 6])]);
    assert_eq!(
        pairs(&any),
        vec![json!([2, 3]), json!([3, 4]), json!([4, 6])]
    );

    Ok(())
}

#[test]
fn test_omit_drops_accepted_values() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([json!(1), json!("a"), json!(2), json!(null)])
        .omit(filters::is_int())?
        .to_vec()?;

    // Assert
    assert_eq!(values, vec![json!("a"), json!(null)]);

    Ok(())
}

#[test]
fn test_until_stops_before_the_matching_item() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([1, 2, 10, 3])
        .until(filters::greater_than(5.0))?
        .to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![1, 2]);

    Ok(())
}

#[test]
fn test_while_true_stops_at_the_first_rejection() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([2, 4, 5, 6])
        .while_true(filters::is_even())?
        .to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![2, 4]);

    Ok(())
}

#[test]
fn test_fallible_filter_error_is_handled() -> anyhow::Result<()> {
    // Arrange
    let strict = filters::fallible(|v: &Value| {
        v.as_i64()
            .map(|n| n > 1)
            .ok_or_else(|| sluice_stream::SluiceError::stream_error("not an int"))
    });

    // Act
    let values = Stream::of([json!(1), json!("x"), json!(2)])
        .filter(strict)?
        .on_error(|_| true)?
        .to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![2]);

    Ok(())
}
