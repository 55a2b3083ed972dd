// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_json::Value;
use sluice_stream::{SluiceError, Stream};
use sluice_test_utils::{assert_permutation, ints};

fn input() -> Vec<Value> {
    (1..=20).map(Value::from).collect()
}

#[test]
fn test_shuffle_is_a_permutation() -> anyhow::Result<()> {
    // Act
    let values = Stream::of(input()).shuffle()?.to_vec()?;

    // Assert
    assert_permutation(&values, &input());

    Ok(())
}

#[test]
fn test_seeded_shuffle_is_reproducible() -> anyhow::Result<()> {
    // Act
    let first = Stream::of(input()).shuffle_seeded(None, 42)?.to_vec()?;
    let second = Stream::of(input()).shuffle_seeded(None, 42)?.to_vec()?;

    // Assert
    assert_eq!(first, second);
    assert_permutation(&first, &input());

    Ok(())
}

#[test]
fn test_chunks_stay_within_their_window() -> anyhow::Result<()> {
    // Act
    let values = Stream::of(input()).shuffle_seeded(Some(5), 7)?.to_vec()?;

    // Assert
    for (window, chunk) in values.chunks(5).enumerate() {
        let expected: Vec<Value> = input()[window * 5..window * 5 + 5].to_vec();
        assert_permutation(chunk, &expected);
    }
    assert_ne!(values, input());

    Ok(())
}

#[test]
fn test_short_last_chunk_is_emitted_at_the_end() -> anyhow::Result<()> {
    // Act
    let values = ints(&Stream::of(1..=7).shuffle_chunks(3)?.to_vec()?);

    // Assert
    assert_eq!(values.len(), 7);
    assert_eq!(values[6], 7);

    Ok(())
}

#[test]
fn test_chunked_shuffle_honours_a_limit() -> anyhow::Result<()> {
    // Act
    let values = Stream::of(input()).shuffle_chunks(4)?.limit(2)?.to_vec()?;

    // Assert
    assert_eq!(values.len(), 2);
    for value in &values {
        assert!((1..=4).contains(&value.as_i64().unwrap_or_default()));
    }

    Ok(())
}

#[test]
fn test_zero_chunk_is_rejected() -> anyhow::Result<()> {
    // Act
    let chunks = Stream::of([1]).shuffle_chunks(0);
    let seeded = Stream::of([1]).shuffle_seeded(Some(0), 1);

    // Assert
    assert!(matches!(chunks, Err(SluiceError::InvalidArgument { .. })));
    assert!(matches!(seeded, Err(SluiceError::InvalidArgument { .. })));

    Ok(())
}
