// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output property maps and the priority merge rule.

use alloc::string::String;

use hashbrown::DefaultHashBuilder;
use indexmap::IndexMap;

/// An insertion-ordered map from semantic key to its string value.
///
/// Used for raw per-breakpoint values and for merged effective values.
/// Iteration order is insertion order, which the engine relies on when
/// breaking priority ties between builder outputs.
pub type ValueMap = IndexMap<String, String, DefaultHashBuilder>;

/// An insertion-ordered map from output property name to its prioritized value.
pub type StyleMap = IndexMap<String, StyleValue, DefaultHashBuilder>;

/// A concrete property value together with its merge priority.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StyleValue {
    /// The value written to the style sink.
    pub value: String,
    /// Merge priority. Higher wins when two keys produce the same property.
    pub priority: i32,
}

impl StyleValue {
    /// Creates a new value with the given priority.
    #[must_use]
    pub fn new(value: impl Into<String>, priority: i32) -> Self {
        Self {
            value: value.into(),
            priority,
        }
    }
}

/// Folds one builder's output into a node's candidate map.
///
/// A property already present is replaced only by an entry with a strictly
/// higher priority; on equal priority the earlier entry is retained.
pub fn merge_candidate(candidate: &mut StyleMap, output: StyleMap) {
    for (property, incoming) in output {
        match candidate.get_mut(&property) {
            Some(existing) => {
                if existing.priority < incoming.priority {
                    *existing = incoming;
                }
            }
            None => {
                candidate.insert(property, incoming);
            }
        }
    }
}
