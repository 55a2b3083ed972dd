// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_json::Value;
use sluice_core::value::compare_values;
use sluice_core::Item;

/// The integer values, panicking on anything else.
#[must_use]
pub fn ints(values: &[Value]) -> Vec<i64> {
    values
        .iter()
        .map(|v| {
            v.as_i64()
                .unwrap_or_else(|| panic!("expected an integer, got {v}"))
        })
        .collect()
}

/// `(key, value)` pairs as JSON, for comparing items against literals.
#[must_use]
pub fn pairs(items: &[Item]) -> Vec<Value> {
    items.iter().map(Item::to_pair).collect()
}

/// `len` integers in `0..bound`, reproducible from `seed`.
#[must_use]
pub fn random_ints(seed: u64, len: usize, bound: i64) -> Vec<i64> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len).map(|_| rng.i64(0..bound)).collect()
}

/// Assert that `actual` holds exactly the values of `expected`, in any order.
pub fn assert_permutation(actual: &[Value], expected: &[Value]) {
    let mut actual = actual.to_vec();
    let mut expected = expected.to_vec();
    actual.sort_by(compare_values);
    expected.sort_by(compare_values);
    assert_eq!(actual, expected, "not a permutation of the input");
}
