// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Which part of an item a strategy looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Check {
    /// Only the value.
    #[default]
    Value,
    /// Only the key.
    Key,
    /// Value and key: a filter must accept both; uniqueness requires both to be new.
    Both,
    /// Value or key: a filter must accept either; uniqueness rejects only when both were seen.
    Any,
}
