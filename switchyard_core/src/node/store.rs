// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and value management.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::DefaultHashBuilder;
use indexmap::IndexMap;
use understory_dirty::{Channel, CycleHandling, DirtyTracker};

use super::id::{INVALID, NodeId};
use crate::breakpoint::BreakpointIndex;
use crate::dirty;
use crate::style::{StyleMap, ValueMap};

/// Property values captured before the engine first overrode them.
///
/// `None` records that the property was unset, so restoring it removes it.
pub type BaselineMap = IndexMap<String, Option<String>, DefaultHashBuilder>;

/// Struct-of-arrays storage for all nodes.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Removed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
#[derive(Debug)]
pub struct NodeStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,

    // -- Raw values (set by attribute signals), indexed by breakpoint --
    pub(crate) raw: Vec<Vec<ValueMap>>,

    // -- Computed state (written by engine passes) --
    pub(crate) effective: Vec<Option<ValueMap>>,
    pub(crate) applied: Vec<StyleMap>,
    pub(crate) baselines: Vec<BaselineMap>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Creates an empty node store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            raw: Vec::new(),
            effective: Vec::new(),
            applied: Vec::new(),
            baselines: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    // -- Allocation API --

    /// Creates a new node under `parent` and returns its handle.
    ///
    /// The node starts with no raw values, no effective map, and nothing
    /// applied.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is a stale handle.
    pub fn create_node(&mut self, parent: Option<NodeId>) -> NodeId {
        let parent_idx = match parent {
            Some(p) => {
                self.validate(p);
                p.idx
            }
            None => INVALID,
        };

        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot. The generation was bumped on removal.
            let i = idx as usize;
            self.parent[i] = parent_idx;
            self.raw[i].clear();
            self.effective[i] = None;
            self.applied[i].clear();
            self.baselines[i].clear();
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(parent_idx);
            self.raw.push(Vec::new());
            self.effective.push(None);
            self.applied.push(StyleMap::default());
            self.baselines.push(BaselineMap::default());
            self.generation.push(0);
            idx
        };

        if parent_idx != INVALID {
            // Structural edge: a drain visits the parent before this node.
            let _ = self.dirty.add_dependency(idx, parent_idx, dirty::STYLE);
        }

        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// Children of the node become roots; their own state is untouched.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;

        for child in 0..self.len {
            if self.parent[child as usize] == idx {
                self.dirty.remove_dependency(child, idx, dirty::STYLE);
                self.parent[child as usize] = INVALID;
            }
        }
        let p = self.parent[idx as usize];
        if p != INVALID {
            self.dirty.remove_dependency(idx, p, dirty::STYLE);
        }
        self.dirty.remove_key(idx);

        let i = idx as usize;
        self.parent[i] = INVALID;
        self.raw[i] = Vec::new();
        self.effective[i] = None;
        self.applied[i] = StyleMap::default();
        self.baselines[i] = BaselineMap::default();

        // Bump generation so old handles immediately fail validation.
        self.generation[i] += 1;
        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Topology API --

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.id_at(p))
    }

    /// Returns the direct children of a node, in slot order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.validate(id);
        (0..self.len)
            .filter(|&c| self.parent[c as usize] == id.idx)
            .map(|c| self.id_at(c))
            .collect()
    }

    // -- Raw values --

    /// Returns the raw value of `key` on `id` at `breakpoint`.
    #[must_use]
    pub fn raw_value(&self, id: NodeId, breakpoint: BreakpointIndex, key: &str) -> Option<&str> {
        self.validate(id);
        self.raw[id.idx as usize]
            .get(breakpoint.get())
            .and_then(|values| values.get(key))
            .map(String::as_str)
    }

    /// Sets (`Some`) or deletes (`None`) the raw value of `key` on `id` at
    /// `breakpoint`.
    ///
    /// Returns whether the stored value changed. Nothing is marked dirty; the
    /// engine re-merges effective values when the node is next resolved.
    pub fn set_raw_value(
        &mut self,
        id: NodeId,
        breakpoint: BreakpointIndex,
        key: &str,
        value: Option<&str>,
    ) -> bool {
        self.validate(id);
        let slots = &mut self.raw[id.idx as usize];
        match value {
            Some(value) => {
                if slots.len() <= breakpoint.get() {
                    slots.resize_with(breakpoint.get() + 1, ValueMap::default);
                }
                let values = &mut slots[breakpoint.get()];
                if values.get(key).is_some_and(|old| old == value) {
                    false
                } else {
                    values.insert(key.to_string(), value.to_string());
                    true
                }
            }
            None => slots
                .get_mut(breakpoint.get())
                .is_some_and(|values| values.shift_remove(key).is_some()),
        }
    }

    /// Returns the raw value map of `id` at `breakpoint`, if any were set.
    #[must_use]
    pub fn raw_values(&self, id: NodeId, breakpoint: BreakpointIndex) -> Option<&ValueMap> {
        self.validate(id);
        self.raw[id.idx as usize].get(breakpoint.get())
    }

    // -- Computed state getters (read-only) --

    /// Returns the effective value map of a node, or `None` if it has never
    /// been resolved.
    #[must_use]
    pub fn effective(&self, id: NodeId) -> Option<&ValueMap> {
        self.validate(id);
        self.effective[id.idx as usize].as_ref()
    }

    /// Returns the output styles last applied to a node.
    #[must_use]
    pub fn applied(&self, id: NodeId) -> &StyleMap {
        self.validate(id);
        &self.applied[id.idx as usize]
    }

    /// Returns the baselines captured for a node's overridden properties.
    #[must_use]
    pub fn baselines(&self, id: NodeId) -> &BaselineMap {
        self.validate(id);
        &self.baselines[id.idx as usize]
    }

    // -- Internal helpers --

    /// Returns the current handle for a live slot.
    pub(crate) fn id_at(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Returns whether `idx` is an allocated, non-freed slot.
    pub(crate) fn is_live_slot(&self, idx: u32) -> bool {
        idx < self.len && !self.free_list.contains(&idx)
    }

    /// Marks `idx` dirty in `channel` without propagation.
    pub(crate) fn mark(&mut self, idx: u32, channel: Channel) {
        self.dirty.mark(idx, channel);
    }

    /// Drains `channel`, returning marked slots parents-first.
    pub(crate) fn drain(&mut self, channel: Channel) -> Vec<u32> {
        self.dirty.drain(channel).deterministic().run().collect()
    }

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }
}
