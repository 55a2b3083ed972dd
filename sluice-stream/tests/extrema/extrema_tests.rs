// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_json::json;
use sluice_stream::{Check, Comparator, Item, SluiceError, Stream};
use sluice_test_utils::ints;

fn keyed(points: &[(i64, i64)]) -> Vec<Item> {
    points.iter().map(|&(key, value)| Item::new(key, value)).collect()
}

fn extrema_with_limits(values: &[i64]) -> anyhow::Result<Vec<i64>> {
    Ok(ints(&Stream::of(values.to_vec()).extrema(true)?.to_vec()?))
}

#[test]
fn test_extrema_with_limits() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([3, 2, 4, 5, 3]).extrema(true)?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![3, 2, 5, 3]);

    Ok(())
}

#[test]
fn test_extrema_without_limits() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([3, 2, 4, 5, 3]).extrema(false)?.to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![2, 5]);

    Ok(())
}

#[test]
fn test_extrema_preserves_keys() -> anyhow::Result<()> {
    // Act
    let items = Stream::of([3, 2, 4, 5, 3]).extrema(false)?.to_items()?;

    // Assert
    assert_eq!(items, vec![Item::new(1, 2), Item::new(3, 5)]);

    Ok(())
}

#[test]
fn test_only_maxima_and_only_minima() -> anyhow::Result<()> {
    // Act
    let maxima = Stream::of([3, 2, 4, 5, 3]).only_maxima(true)?.to_vec()?;
    let minima = Stream::of([3, 2, 4, 5, 3]).only_minima(true)?.to_vec()?;

    // Assert
    assert_eq!(ints(&maxima), vec![3, 5]);
    assert_eq!(ints(&minima), vec![2, 3]);

    Ok(())
}

#[test]
fn test_flat_tail_emits_nothing() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([4, 4, 3, 3, 3]).extrema(true)?.to_vec()?;

    // Assert
    assert!(values.is_empty());

    Ok(())
}

#[test]
fn test_monotonic_sequence_has_only_its_limits() -> anyhow::Result<()> {
    // Act
    let with_limits = Stream::of(1..=5).extrema(true)?.to_vec()?;
    let without = Stream::of(1..=5).extrema(false)?.to_vec()?;

    // Assert
    assert_eq!(ints(&with_limits), vec![1, 5]);
    assert!(without.is_empty());

    Ok(())
}

#[test]
fn test_single_value_is_its_own_limit() -> anyhow::Result<()> {
    // Act
    let extrema = Stream::of([7]).extrema(true)?.to_items()?;
    let maxima = Stream::of([7]).only_maxima(true)?.to_vec()?;
    let minima = Stream::of([7]).only_minima(true)?.to_vec()?;
    let without = Stream::of([7]).extrema(false)?.to_vec()?;

    // Assert
    assert_eq!(extrema, keyed(&[(0, 7)]));
    assert_eq!(ints(&maxima), vec![7]);
    assert!(minima.is_empty());
    assert!(without.is_empty());

    Ok(())
}

#[test]
fn test_empty_stream_has_no_extrema() -> anyhow::Result<()> {
    // Act
    let values = Stream::empty().extrema(true)?.to_vec()?;

    // Assert
    assert!(values.is_empty());

    Ok(())
}

#[test]
fn test_extrema_with_limits_around_plateaus() -> anyhow::Result<()> {
    // Assert
    assert_eq!(extrema_with_limits(&[3, 4, 5, 3])?, vec![3, 5, 3]);
    assert_eq!(extrema_with_limits(&[1, 2, 2, 2, 3])?, vec![1, 3]);
    assert_eq!(extrema_with_limits(&[5, 4, 3, 3, 2])?, vec![5, 2]);
    assert_eq!(extrema_with_limits(&[3, 3, 3])?, Vec::<i64>::new());
    assert_eq!(extrema_with_limits(&[3, 3, 3, 5])?, vec![5]);
    assert_eq!(extrema_with_limits(&[3, 3, 3, 5, 5])?, Vec::<i64>::new());
    assert_eq!(extrema_with_limits(&[4, 3, 3, 5, 5])?, vec![4]);
    assert_eq!(extrema_with_limits(&[4, 3, 3, 5, 5, 2])?, vec![4, 2]);
    assert_eq!(extrema_with_limits(&[4, 3, 3, 5, 5, 6])?, vec![4, 6]);
    assert_eq!(extrema_with_limits(&[6, 4, 3, 2, 4, 5, 7])?, vec![6, 2, 7]);

    Ok(())
}

#[test]
fn test_extrema_without_limits_skips_monotonic_runs() -> anyhow::Result<()> {
    // Act
    let valley = Stream::of([6, 4, 3, 2, 4, 5, 7]).extrema(false)?.to_vec()?;
    let falling = Stream::of([6, 4, 3, 2, 1]).extrema(false)?.to_vec()?;
    let stepped = Stream::of([3, 2, 2, 1, 1, 0]).extrema(false)?.to_vec()?;

    // Assert
    assert_eq!(ints(&valley), vec![2]);
    assert!(falling.is_empty());
    assert!(stepped.is_empty());

    Ok(())
}

#[test]
fn test_only_maxima_with_limits_keeps_keys() -> anyhow::Result<()> {
    // Arrange
    let input = [
        4, 3, 2, 4, 5, 7, 6, 7, 8, 6, 5, 3, 3, 5, 2, 4, 1, 3, 5, 5, 3, 2, 4, 4, 5, 8, 9,
    ];

    // Act
    let peaks = Stream::of(input).only_maxima(true)?.to_items()?;
    let rising = Stream::of([1, 2, 2, 3, 4, 5, 5, 6])
        .only_maxima(true)?
        .to_items()?;
    let falling = Stream::of([6, 5, 5, 4, 3, 2, 2, 1])
        .only_maxima(true)?
        .to_items()?;

    // Assert
    let expected = keyed(&[(0, 4), (5, 7), (8, 8), (13, 5), (15, 4), (26, 9)]);
    assert_eq!(peaks, expected);
    assert_eq!(rising, keyed(&[(7, 6)]));
    assert_eq!(falling, keyed(&[(0, 6)]));

    Ok(())
}

#[test]
fn test_only_minima_keeps_keys() -> anyhow::Result<()> {
    // Arrange
    let input = [
        2, 3, 4, 3, 2, 4, 5, 7, 6, 7, 8, 6, 5, 3, 3, 5, 2, 4, 1, 3, 5, 5, 3, 2, 4, 4, 5, 8, 9,
    ];

    // Act
    let with_limits = Stream::of(input).only_minima(true)?.to_items()?;
    let without = Stream::of(input).only_minima(false)?.to_items()?;

    // Assert
    let valleys = [(4, 2), (8, 6), (16, 2), (18, 1), (23, 2)];
    assert_eq!(with_limits[0], Item::new(0, 2));
    assert_eq!(with_limits[1..], keyed(&valleys)[..]);
    assert_eq!(without, keyed(&valleys));

    Ok(())
}

#[test]
fn test_extrema_by_field() -> anyhow::Result<()> {
    // Arrange
    let readings = vec![
        json!({"t": 1, "id": "a"}),
        json!({"t": 3, "id": "b"}),
        json!({"t": 2, "id": "c"}),
        json!({"t": 4, "id": "d"}),
    ];

    // Act
    let values = Stream::of(readings)
        .extrema_by(false, Comparator::by_fields(&["t"]), Check::Value)?
        .to_vec()?;

    // Assert
    let ids: Vec<_> = values.iter().map(|reading| reading["id"].clone()).collect();
    assert_eq!(ids, vec![json!("b"), json!("c")]);

    Ok(())
}

#[test]
fn test_extrema_by_key() -> anyhow::Result<()> {
    // Arrange
    let items = vec![Item::new(3, "a"), Item::new(1, "b"), Item::new(2, "c")];

    // Act
    let values = Stream::from_items(items)
        .extrema_by(false, Comparator::Natural, Check::Key)?
        .to_items()?;

    // Assert
    assert_eq!(values, vec![Item::new(1, "b")]);

    Ok(())
}

#[test]
fn test_only_maxima_by_follows_the_comparator() -> anyhow::Result<()> {
    // Act
    let natural = Stream::of([1, 3, 1, 3, 1]).only_maxima(false)?.to_vec()?;
    let reversed = Stream::of([1, 3, 1, 3, 1])
        .only_maxima_by(false, Comparator::reversed(), Check::Value)?
        .to_vec()?;
    let reversed_minima = Stream::of([1, 3, 1, 3, 1])
        .only_minima_by(false, Comparator::reversed(), Check::Value)?
        .to_vec()?;

    // Assert
    assert_eq!(ints(&natural), vec![3, 3]);
    assert_eq!(ints(&reversed), vec![1]);
    assert_eq!(ints(&reversed_minima), vec![3, 3]);

    Ok(())
}

#[test]
fn test_extrema_by_rejects_unorderable_modes() {
    // Act
    let any = Stream::of([1, 2, 1]).extrema_by(
        true,
        Comparator::Natural,
        Check::Any,
    );
    let four_args = Stream::of([1, 2, 1]).only_minima_by(
        true,
        Comparator::quaternary(|a, b, _, _| a.to_string().cmp(&b.to_string())),
        Check::Value,
    );

    // Assert
    assert!(matches!(any, Err(SluiceError::InvalidArgument { .. })));
    assert!(matches!(four_args, Err(SluiceError::InvalidArgument { .. })));
}

#[test]
fn test_extrema_feeds_a_limit() -> anyhow::Result<()> {
    // Act
    let values = Stream::of([1, 3, 1, 3, 1, 3, 1])
        .only_maxima(false)?
        .limit(2)?
        .to_vec()?;

    // Assert
    assert_eq!(ints(&values), vec![3, 3]);

    Ok(())
}
