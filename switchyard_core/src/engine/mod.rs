// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The resolution engine.
//!
//! [`Engine`] owns breakpoint activation state, the node store, per-breakpoint
//! observation sets and the dependency-listener graph. Every entry point
//! marks dirty channels and then runs one *pass* that drains them:
//!
//! 1. **EFFECTIVE** — For each drained node, rebuild the effective value map
//!    by walking the active set highest priority first. The first breakpoint
//!    that defines a key wins.
//! 2. **STYLE** — For each drained node (parents first), resolve the declared
//!    dependencies of every builder, run the builders, merge their outputs
//!    into one candidate map and apply it through the [`StyleSink`].
//!
//! # Entry points
//!
//! | Signal | Entry point | Pass |
//! |---|---|---|
//! | breakpoint transition | [`breakpoint_changed`](Engine::breakpoint_changed) | full recompute |
//! | host resync | [`refresh`](Engine::refresh) | full recompute |
//! | node attached | [`register`](Engine::register) | partial |
//! | attribute change | [`attribute_changed`](Engine::attribute_changed) | partial |
//! | explicit | [`notify_node_changed`](Engine::notify_node_changed) | partial |
//! | text direction | [`set_direction`](Engine::set_direction) | direction listeners |
//!
//! A full recompute clears the dependency-listener graph and the
//! directionality subscriptions first; both are re-derived while builders run.
//! A partial pass re-merges one node and re-runs the builders of the nodes
//! listening on it, one level deep.
//!
//! # Reentrancy
//!
//! A latch is held for the duration of every full recompute. An activation
//! signal that observes the latch is handled according to
//! [`ReentrancyPolicy`].

mod apply;
mod config;
mod resolve;

pub use config::{EngineConfig, ReentrancyPolicy};

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use crate::breakpoint::{ActivationSource, ActiveSet, BreakpointRegistry};
use crate::builder::{BuildCache, BuilderRegistry};
use crate::direction::Direction;
use crate::dirty;
use crate::node::{NodeId, NodeStore};
use crate::sink::StyleSink;
use crate::style::{StyleMap, ValueMap};
#[cfg(feature = "trace-rich")]
use crate::trace::PropertyChange;
use crate::trace::{ActivationEvent, PassBeginEvent, PassEndEvent, PassKind, Tracer};

/// What [`Engine::breakpoint_changed`] did with an activation signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActivationOutcome {
    /// The active set was recomputed and every resolved node re-resolved.
    Recomputed,
    /// The signal repeated the breakpoint's known state; nothing ran.
    Unchanged,
    /// No breakpoint with that name is registered.
    UnknownBreakpoint,
    /// A recompute was in flight and the signal was discarded
    /// ([`ReentrancyPolicy::Drop`]).
    Dropped,
    /// A recompute was in flight and a corrective recompute was queued
    /// ([`ReentrancyPolicy::Requery`]).
    Deferred,
}

/// The set of changes produced by a single engine pass.
///
/// Node references are raw slot indices, matching
/// [`NodeId::index`](crate::node::NodeId::index).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleChanges {
    /// Nodes whose builders ran, in resolution order.
    pub resolved: Vec<u32>,
    /// Nodes that received at least one style sink write.
    pub restyled: Vec<u32>,
    /// Properties written back to their baseline or removed.
    pub restored_properties: usize,
}

impl StyleChanges {
    /// Returns whether the pass wrote nothing through the style sink.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.restyled.is_empty()
    }

    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.resolved.clear();
        self.restyled.clear();
        self.restored_properties = 0;
    }

    fn append(&mut self, mut other: Self) {
        self.resolved.append(&mut other.resolved);
        self.restyled.append(&mut other.restyled);
        self.restored_properties += other.restored_properties;
    }
}

/// The breakpoint-aware style resolution engine.
///
/// Generic over the [`ActivationSource`] it queries whenever the active set
/// is recomputed.
#[derive(Debug)]
pub struct Engine<A: ActivationSource> {
    breakpoints: Arc<BreakpointRegistry>,
    builders: Arc<BuilderRegistry>,
    activation: A,
    config: EngineConfig,

    pub(crate) nodes: NodeStore,
    active: ActiveSet,
    /// Observed nodes per breakpoint, indexed by breakpoint.
    observers: Vec<BTreeSet<u32>>,
    /// Dependency listeners: producer slot -> consumer slots.
    pub(crate) listeners: BTreeMap<u32, BTreeSet<u32>>,
    pub(crate) dir_listeners: BTreeSet<u32>,

    pub(crate) direction: Direction,
    pub(crate) environment: ValueMap,
    pub(crate) cache: BuildCache,

    activating: bool,
    pending: bool,
    pass: u64,

    #[cfg(feature = "trace-rich")]
    pub(crate) property_changes: Vec<PropertyChange>,
}

impl<A: ActivationSource> Engine<A> {
    /// Creates an engine and computes the initial active set.
    ///
    /// No style is written until the first pass runs.
    #[must_use]
    pub fn new(
        breakpoints: Arc<BreakpointRegistry>,
        builders: Arc<BuilderRegistry>,
        activation: A,
        config: EngineConfig,
    ) -> Self {
        let active = breakpoints.active_set(&activation);
        let observers = vec![BTreeSet::new(); breakpoints.len()];
        Self {
            breakpoints,
            builders,
            activation,
            config,
            nodes: NodeStore::new(),
            active,
            observers,
            listeners: BTreeMap::new(),
            dir_listeners: BTreeSet::new(),
            direction: Direction::default(),
            environment: ValueMap::default(),
            cache: BuildCache::new(),
            activating: false,
            pending: false,
            pass: 0,
            #[cfg(feature = "trace-rich")]
            property_changes: Vec::new(),
        }
    }

    // -- Node API --

    /// Creates a node under `parent`. The node is not observed at any
    /// breakpoint until [`register`](Self::register) is called.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale.
    pub fn create_node(&mut self, parent: Option<NodeId>) -> NodeId {
        self.nodes.create_node(parent)
    }

    /// Sets or deletes a raw value without resolving.
    ///
    /// Use this to seed values before [`register`](Self::register). Returns
    /// `false` if `breakpoint` is not registered.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    pub fn set_raw_value(
        &mut self,
        id: NodeId,
        breakpoint: &str,
        key: &str,
        value: Option<&str>,
    ) -> bool {
        self.nodes.validate(id);
        let Some(bp) = self.breakpoints.index_of(breakpoint) else {
            return false;
        };
        self.nodes.set_raw_value(id, bp, key, value);
        true
    }

    /// Observes `id` at `breakpoint` and resolves it immediately through the
    /// partial path, so a newly attached node is styled without waiting for
    /// the next activation signal.
    ///
    /// An unknown breakpoint name still resolves the node but records no
    /// observation.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    pub fn register(
        &mut self,
        id: NodeId,
        breakpoint: &str,
        sink: &mut dyn StyleSink,
        tracer: &mut Tracer<'_>,
    ) -> StyleChanges {
        self.nodes.validate(id);
        if let Some(bp) = self.breakpoints.index_of(breakpoint) {
            self.observers[bp.get()].insert(id.idx);
        }
        self.notify_node_changed(id, sink, tracer)
    }

    /// Applies an attribute signal: sets (`Some`) or deletes (`None`) the raw
    /// value, then runs [`notify_node_changed`](Self::notify_node_changed).
    ///
    /// A signal for an unknown breakpoint is ignored.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    pub fn attribute_changed(
        &mut self,
        id: NodeId,
        breakpoint: &str,
        key: &str,
        value: Option<&str>,
        sink: &mut dyn StyleSink,
        tracer: &mut Tracer<'_>,
    ) -> StyleChanges {
        if !self.set_raw_value(id, breakpoint, key, value) {
            return StyleChanges::default();
        }
        self.notify_node_changed(id, sink, tracer)
    }

    /// Partial resolve: re-merges `id`'s effective values, re-runs its
    /// builders and applies the result, then re-runs the builders of every
    /// node listening on `id` (one level) and applies theirs.
    ///
    /// Never triggers a full recompute.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    pub fn notify_node_changed(
        &mut self,
        id: NodeId,
        sink: &mut dyn StyleSink,
        tracer: &mut Tracer<'_>,
    ) -> StyleChanges {
        self.nodes.validate(id);
        self.begin_pass(PassKind::Node, tracer);
        self.nodes.mark(id.idx, dirty::EFFECTIVE);
        self.nodes.mark(id.idx, dirty::STYLE);
        if let Some(consumers) = self.listeners.get(&id.idx) {
            for &consumer in consumers {
                self.nodes.mark(consumer, dirty::STYLE);
            }
        }
        self.finish_pass(PassKind::Node, sink, tracer)
    }

    /// Removes `id` from every observation set, from the dependency-listener
    /// graph as producer and consumer, and from the directionality
    /// subscriptions, then frees its slot.
    ///
    /// Children of the node become roots. Styles already written are left
    /// in place. Removing a stale handle is a no-op.
    pub fn remove(&mut self, id: NodeId) {
        if !self.nodes.is_alive(id) {
            return;
        }
        let idx = id.idx;
        for observed in &mut self.observers {
            observed.remove(&idx);
        }
        self.listeners.remove(&idx);
        self.listeners.retain(|_, consumers| {
            consumers.remove(&idx);
            !consumers.is_empty()
        });
        self.dir_listeners.remove(&idx);
        self.nodes.destroy_node(id);
    }

    // -- Environment signals --

    /// Handles an activation signal for the breakpoint named `name`.
    ///
    /// Runs a full recompute only when `matches` differs from the
    /// breakpoint's state in the current active set. The activation source
    /// is re-queried for every breakpoint, so it must already reflect the
    /// transition.
    pub fn breakpoint_changed(
        &mut self,
        name: &str,
        matches: bool,
        sink: &mut dyn StyleSink,
        tracer: &mut Tracer<'_>,
    ) -> ActivationOutcome {
        let breakpoint = self.breakpoints.index_of(name);
        let outcome = match breakpoint {
            None => ActivationOutcome::UnknownBreakpoint,
            Some(_) if self.activating => match self.config.reentrancy {
                ReentrancyPolicy::Drop => ActivationOutcome::Dropped,
                ReentrancyPolicy::Requery => {
                    self.pending = true;
                    ActivationOutcome::Deferred
                }
            },
            Some(bp) if self.active.contains(bp) == matches => ActivationOutcome::Unchanged,
            Some(_) => ActivationOutcome::Recomputed,
        };
        tracer.activation(&ActivationEvent {
            pass: self.pass,
            breakpoint,
            matches,
            outcome,
        });
        if outcome == ActivationOutcome::Recomputed {
            let _ = self.recompute_all(PassKind::Activation, sink, tracer);
        }
        outcome
    }

    /// Runs a full recompute unconditionally.
    ///
    /// Hosts call this once after seeding the initial tree, and whenever
    /// they need to resynchronize with the activation source or with new
    /// [environment](Self::set_environment) values.
    pub fn refresh(&mut self, sink: &mut dyn StyleSink, tracer: &mut Tracer<'_>) -> StyleChanges {
        self.recompute_all(PassKind::Activation, sink, tracer)
    }

    /// Changes the text direction and re-resolves exactly the nodes whose
    /// builders read it. Does nothing if the direction is unchanged.
    pub fn set_direction(
        &mut self,
        direction: Direction,
        sink: &mut dyn StyleSink,
        tracer: &mut Tracer<'_>,
    ) -> StyleChanges {
        if self.direction == direction {
            return StyleChanges::default();
        }
        self.direction = direction;
        self.begin_pass(PassKind::Direction, tracer);
        for &idx in &self.dir_listeners {
            self.nodes.mark(idx, dirty::STYLE);
        }
        self.finish_pass(PassKind::Direction, sink, tracer)
    }

    /// Sets (`Some`) or deletes (`None`) the value that environment
    /// dependencies named `key` resolve to.
    ///
    /// Environment reads record no dependency; the new value is picked up by
    /// the next pass that resolves a reader.
    pub fn set_environment(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.environment.insert(key.to_string(), value.to_string());
            }
            None => {
                self.environment.shift_remove(key);
            }
        }
    }

    // -- Queries --

    /// The breakpoint registry.
    #[must_use]
    pub fn breakpoints(&self) -> &BreakpointRegistry {
        &self.breakpoints
    }

    /// The builder registry.
    #[must_use]
    pub fn builders(&self) -> &BuilderRegistry {
        &self.builders
    }

    /// The node store.
    #[must_use]
    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    /// The active set computed by the last full recompute.
    #[must_use]
    pub fn active_set(&self) -> &ActiveSet {
        &self.active
    }

    /// The effective value map of `id`, or `None` before its first resolve.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    #[must_use]
    pub fn effective(&self, id: NodeId) -> Option<&ValueMap> {
        self.nodes.effective(id)
    }

    /// The output styles last applied to `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    #[must_use]
    pub fn applied(&self, id: NodeId) -> &StyleMap {
        self.nodes.applied(id)
    }

    /// Nodes whose builders read `id`'s values through `parent.*`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    #[must_use]
    pub fn dependents(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes.validate(id);
        self.listeners
            .get(&id.idx)
            .into_iter()
            .flatten()
            .map(|&idx| self.nodes.id_at(idx))
            .collect()
    }

    /// Nodes subscribed to text direction changes.
    #[must_use]
    pub fn direction_listeners(&self) -> Vec<NodeId> {
        self.dir_listeners
            .iter()
            .map(|&idx| self.nodes.id_at(idx))
            .collect()
    }

    /// Breakpoints `id` is observed at, in registration order.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    #[must_use]
    pub fn observed_at(&self, id: NodeId) -> Vec<&str> {
        self.nodes.validate(id);
        self.breakpoints
            .iter()
            .filter(|(bp, _)| self.observers[bp.get()].contains(&id.idx))
            .map(|(_, bp)| bp.name.as_str())
            .collect()
    }

    /// The current text direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The environment value for `key`, if set.
    #[must_use]
    pub fn environment(&self, key: &str) -> Option<&str> {
        self.environment.get(key).map(String::as_str)
    }

    /// Whether a full recompute is in flight.
    #[must_use]
    pub fn is_recomputing(&self) -> bool {
        self.activating
    }

    /// Number of passes run so far.
    #[must_use]
    pub fn pass(&self) -> u64 {
        self.pass
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The activation source.
    #[must_use]
    pub fn activation(&self) -> &A {
        &self.activation
    }

    /// Mutable access to the activation source, for hosts that update it
    /// before delivering a signal.
    pub fn activation_mut(&mut self) -> &mut A {
        &mut self.activation
    }

    /// The builder memo cache.
    #[must_use]
    pub fn cache(&self) -> &BuildCache {
        &self.cache
    }

    /// Drops every memoized builder output.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    // -- Passes --

    /// Full recompute, followed by at most one corrective recompute under
    /// [`ReentrancyPolicy::Requery`].
    fn recompute_all(
        &mut self,
        kind: PassKind,
        sink: &mut dyn StyleSink,
        tracer: &mut Tracer<'_>,
    ) -> StyleChanges {
        let mut changes = self.recompute_once(kind, sink, tracer);
        if self.config.reentrancy == ReentrancyPolicy::Requery {
            let latest = self.breakpoints.active_set(&self.activation);
            if core::mem::take(&mut self.pending) || latest != self.active {
                changes.append(self.recompute_once(PassKind::Requery, sink, tracer));
            }
        }
        changes
    }

    fn recompute_once(
        &mut self,
        kind: PassKind,
        sink: &mut dyn StyleSink,
        tracer: &mut Tracer<'_>,
    ) -> StyleChanges {
        self.activating = true;
        self.listeners.clear();
        self.dir_listeners.clear();
        self.active = self.breakpoints.active_set(&self.activation);
        self.begin_pass(kind, tracer);

        for bp in self.active.iter() {
            for &idx in &self.observers[bp.get()] {
                self.nodes.mark(idx, dirty::EFFECTIVE);
                self.nodes.mark(idx, dirty::STYLE);
            }
        }
        // Previously resolved nodes re-merge too, so values from breakpoints
        // that went inactive are cleared.
        for idx in 0..self.nodes.len {
            if self.nodes.effective[idx as usize].is_some() {
                self.nodes.mark(idx, dirty::EFFECTIVE);
                self.nodes.mark(idx, dirty::STYLE);
            }
        }

        let changes = self.finish_pass(kind, sink, tracer);
        self.activating = false;
        changes
    }

    fn begin_pass(&mut self, kind: PassKind, tracer: &mut Tracer<'_>) {
        self.pass += 1;
        tracer.pass_begin(&PassBeginEvent {
            pass: self.pass,
            kind,
            active_breakpoints: self.active.len(),
        });
    }

    fn finish_pass(
        &mut self,
        kind: PassKind,
        sink: &mut dyn StyleSink,
        tracer: &mut Tracer<'_>,
    ) -> StyleChanges {
        let mut changes = StyleChanges::default();
        self.flush(sink, &mut changes);
        #[cfg(feature = "trace-rich")]
        {
            if !self.property_changes.is_empty() {
                tracer.property_changes(self.pass, &self.property_changes);
                self.property_changes.clear();
            }
        }
        tracer.pass_end(&PassEndEvent {
            pass: self.pass,
            kind,
            resolved: changes.resolved.len(),
            restyled: changes.restyled.len(),
        });
        changes
    }

    /// Drains EFFECTIVE, then STYLE.
    fn flush(&mut self, sink: &mut dyn StyleSink, changes: &mut StyleChanges) {
        for idx in self.nodes.drain(dirty::EFFECTIVE) {
            if self.nodes.is_live_slot(idx) {
                self.merge_effective(idx);
            }
        }
        for idx in self.nodes.drain(dirty::STYLE) {
            if !self.nodes.is_live_slot(idx) || self.nodes.effective[idx as usize].is_none() {
                continue;
            }
            let candidate = self.resolve_styles(idx);
            changes.resolved.push(idx);
            self.apply_styles(idx, candidate, sink, changes);
        }
    }
}
