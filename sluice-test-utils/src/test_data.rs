// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::person::Person;
use serde_json::{json, Value};
use sluice_core::Item;

#[must_use]
pub fn person_alice() -> Value {
    Person::new("Alice".to_string(), 25).to_value()
}

#[must_use]
pub fn person_bob() -> Value {
    Person::new("Bob".to_string(), 30).to_value()
}

#[must_use]
pub fn person_charlie() -> Value {
    Person::new("Charlie".to_string(), 35).to_value()
}

#[must_use]
pub fn person_diane() -> Value {
    Person::new("Diane".to_string(), 40).to_value()
}

/// Alice, Bob, Charlie and Diane, shuffled so that no order is accidental.
#[must_use]
pub fn people() -> Vec<Value> {
    vec![person_charlie(), person_alice(), person_diane(), person_bob()]
}

/// Items mixing repeated keys and repeated values, for uniqueness checks.
///
/// keys:   `0, "b", 2, 1, "a", 1, "b", 2, "c"`
/// values: `"a", 3, 2, "a", "b", "b", true, true, "a"`
#[must_use]
pub fn mixed_duplicates() -> Vec<Item> {
    vec![
        Item::new(0, "a"),
        Item::new("b", 3),
        Item::new(2, 2),
        Item::new(1, "a"),
        Item::new("a", "b"),
        Item::new(1, "b"),
        Item::new("b", true),
        Item::new(2, true),
        Item::new("c", "a"),
    ]
}

/// Values of mixed types that are pairwise distinct under strict equality.
#[must_use]
pub fn strictly_distinct() -> Vec<Value> {
    vec![
        json!(1),
        json!(1.0),
        json!("1"),
        json!(true),
        json!(null),
        json!([1]),
        json!({"a": 1}),
    ]
}
