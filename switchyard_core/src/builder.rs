// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The builder contract, its registry, and the engine-owned memo cache.
//!
//! A [`Builder`] expands one semantic key's effective value into concrete,
//! prioritized output properties. Builders declare the extra inputs they
//! need as a list of [`DependencySpec`]s; the engine resolves each spec to a
//! string before calling [`Builder::build`] and records whatever dependency
//! edges the resolution implies. Builders therefore stay pure functions of
//! their arguments and never see the node tree.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use hashbrown::{DefaultHashBuilder, HashMap};
use indexmap::IndexMap;

use crate::style::StyleMap;

const KEY_DELIMITER: char = '.';
const PARENT_KEY: &str = "parent";
const SELF_KEY: &str = "self";
const DIR_KEY: &str = "directionality";

/// One extra input a builder asks for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DependencySpec {
    /// `parent.<key>`: the parent node's value for `key`.
    Parent(String),
    /// `self.<key>`: this node's own value for `key`.
    Own(String),
    /// `directionality`: the current text direction.
    Directionality,
    /// Any other name, looked up in the engine's environment table.
    Environment(String),
}

impl DependencySpec {
    /// Parses the textual form used in builder declarations.
    ///
    /// `"parent.gap"` and `"self.layout"` address node values,
    /// `"directionality"` addresses the text direction, and anything else is
    /// an environment key.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        if spec == DIR_KEY {
            return Self::Directionality;
        }
        match spec.split_once(KEY_DELIMITER) {
            Some((PARENT_KEY, key)) => Self::Parent(key.to_string()),
            Some((SELF_KEY, key)) => Self::Own(key.to_string()),
            _ => Self::Environment(spec.to_string()),
        }
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent(key) => write!(f, "{PARENT_KEY}{KEY_DELIMITER}{key}"),
            Self::Own(key) => write!(f, "{SELF_KEY}{KEY_DELIMITER}{key}"),
            Self::Directionality => f.write_str(DIR_KEY),
            Self::Environment(key) => f.write_str(key),
        }
    }
}

/// Maps one semantic key's value to prioritized output properties.
///
/// # Contract
///
/// Implementations must be pure and total. `build` receives the key's
/// effective value and one resolved string per entry of
/// [`dependencies`](Self::dependencies), in declaration order. Any input,
/// including the empty string substituted for unavailable dependencies, must
/// produce a (possibly empty) map without panicking.
pub trait Builder {
    /// The semantic key this builder handles (also the attribute name).
    fn key(&self) -> &str;

    /// Extra inputs, resolved by the engine before each call.
    fn dependencies(&self) -> &[DependencySpec] {
        &[]
    }

    /// Computes output properties for `input`.
    fn build(&self, input: &str, args: &[String]) -> StyleMap;
}

/// Immutable mapping from semantic key to its [`Builder`].
///
/// Iteration order is registration order.
#[derive(Default)]
pub struct BuilderRegistry {
    builders: IndexMap<String, Box<dyn Builder>, DefaultHashBuilder>,
}

impl fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderRegistry")
            .field("keys", &self.builders.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl BuilderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `builder` and returns the registry, for chained construction.
    #[must_use]
    pub fn with(mut self, builder: impl Builder + 'static) -> Self {
        self.register(builder);
        self
    }

    /// Registers `builder` under its [`key`](Builder::key).
    ///
    /// # Panics
    ///
    /// Panics if a builder is already registered for the same key.
    pub fn register(&mut self, builder: impl Builder + 'static) {
        let key = builder.key().to_string();
        assert!(
            !self.builders.contains_key(&key),
            "builder already registered for key {key:?}"
        );
        self.builders.insert(key, Box::new(builder));
    }

    /// Returns the builder for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&dyn Builder> {
        self.builders.get(key).map(|b| &**b)
    }

    /// Returns whether a builder is registered for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.builders.contains_key(key)
    }

    /// Registered keys in registration order.
    ///
    /// Element discovery layers use this as their attribute filter.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.builders.keys().map(String::as_str)
    }

    /// Number of registered builders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    /// Returns whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    input: String,
    args: Vec<String>,
}

/// Memoized builder outputs, keyed by builder, input and resolved arguments.
///
/// Keying on the resolved arguments keeps the cache correct for builders
/// whose output depends on their dependencies (for example on direction).
#[derive(Debug, Default)]
pub struct BuildCache {
    entries: HashMap<String, HashMap<CacheKey, StyleMap>>,
    hits: u64,
    misses: u64,
}

impl BuildCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached output for `builder`, computing it on a miss.
    pub fn build(&mut self, builder: &dyn Builder, input: &str, args: &[String]) -> StyleMap {
        let per_builder = self.entries.entry_ref(builder.key()).or_default();
        let key = CacheKey {
            input: input.to_string(),
            args: args.to_vec(),
        };
        if let Some(hit) = per_builder.get(&key) {
            self.hits += 1;
            return hit.clone();
        }
        self.misses += 1;
        let output = builder.build(input, args);
        per_builder.insert(key, output.clone());
        output
    }

    /// Drops every cached entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of lookups answered from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that invoked the builder.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
