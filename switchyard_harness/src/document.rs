// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use switchyard_core::node::NodeId;
use switchyard_core::sink::StyleSink;

/// One style sink call recorded by [`MemoryDocument`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Write {
    /// `set_property(node, name, value)`.
    Set {
        /// Target node.
        node: NodeId,
        /// Property name.
        name: String,
        /// Written value.
        value: String,
    },
    /// `remove_property(node, name)`.
    Remove {
        /// Target node.
        node: NodeId,
        /// Property name.
        name: String,
    },
}

/// In-memory style sink: one property table per node, plus a write log.
///
/// Values present before the engine touches a property act as baselines;
/// seed them with [`with_baseline`](Self::with_baseline).
#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    props: BTreeMap<NodeId, BTreeMap<String, String>>,
    log: Vec<Write>,
}

impl MemoryDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Presets `name` on `node` without logging a write.
    #[must_use]
    pub fn with_baseline(mut self, node: NodeId, name: &str, value: &str) -> Self {
        self.props
            .entry(node)
            .or_default()
            .insert(name.to_string(), value.to_string());
        self
    }

    /// The current value of `name` on `node`.
    #[must_use]
    pub fn get(&self, node: NodeId, name: &str) -> Option<&str> {
        self.props
            .get(&node)
            .and_then(|props| props.get(name))
            .map(String::as_str)
    }

    /// Every property currently set on `node`, sorted by name.
    #[must_use]
    pub fn properties(&self, node: NodeId) -> Vec<(&str, &str)> {
        self.props
            .get(&node)
            .into_iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    /// Writes recorded since creation or the last [`clear_log`](Self::clear_log).
    #[must_use]
    pub fn writes(&self) -> &[Write] {
        &self.log
    }

    /// Forgets recorded writes; property values are kept.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

impl StyleSink for MemoryDocument {
    fn property(&self, node: NodeId, name: &str) -> Option<String> {
        self.get(node, name).map(str::to_string)
    }

    fn set_property(&mut self, node: NodeId, name: &str, value: &str) {
        self.props
            .entry(node)
            .or_default()
            .insert(name.to_string(), value.to_string());
        self.log.push(Write::Set {
            node,
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn remove_property(&mut self, node: NodeId, name: &str) {
        if let Some(props) = self.props.get_mut(&node) {
            props.remove(name);
        }
        self.log.push(Write::Remove {
            node,
            name: name.to_string(),
        });
    }
}
