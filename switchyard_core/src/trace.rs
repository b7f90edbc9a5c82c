// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for engine passes.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! engine calls at each stage of a pass. All method bodies default to no-ops,
//! so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates [`PropertyChange`] events and the
//!   corresponding `TraceSink` method.

use crate::breakpoint::BreakpointIndex;
use crate::engine::ActivationOutcome;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which kind of engine pass is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassKind {
    /// Full recompute after a breakpoint transition (or an explicit refresh).
    Activation,
    /// Corrective full recompute after the active set moved mid-pass.
    Requery,
    /// Partial resolve of one node and its dependents.
    Node,
    /// Re-resolve of directionality listeners.
    Direction,
}

/// What a style sink write did.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyChangeKind {
    /// A candidate value was written.
    Set,
    /// A captured baseline value was written back.
    Restore,
    /// The property was removed because it had no baseline.
    Remove,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Marks the beginning of an engine pass.
#[derive(Clone, Copy, Debug)]
pub struct PassBeginEvent {
    /// Monotonic pass counter.
    pub pass: u64,
    /// Which path is running.
    pub kind: PassKind,
    /// Size of the active set the pass resolves against.
    pub active_breakpoints: usize,
}

/// Marks the end of an engine pass.
#[derive(Clone, Copy, Debug)]
pub struct PassEndEvent {
    /// Monotonic pass counter.
    pub pass: u64,
    /// Which path ran.
    pub kind: PassKind,
    /// Nodes whose builders ran.
    pub resolved: usize,
    /// Nodes that received at least one style sink write.
    pub restyled: usize,
}

/// Emitted for every activation signal delivered to the engine.
#[derive(Clone, Copy, Debug)]
pub struct ActivationEvent {
    /// Pass counter at the time of the signal.
    pub pass: u64,
    /// The breakpoint the signal addressed, if it is registered.
    pub breakpoint: Option<BreakpointIndex>,
    /// The reported activation state.
    pub matches: bool,
    /// What the engine did with the signal.
    pub outcome: ActivationOutcome,
}

/// A single style sink write.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct PropertyChange {
    /// Slot index of the node written to.
    pub node_index: u32,
    /// What the write did.
    pub kind: PropertyChangeKind,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a pass begins.
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        _ = e;
    }

    /// Called when a pass ends.
    fn on_pass_end(&mut self, e: &PassEndEvent) {
        _ = e;
    }

    /// Called for every activation signal.
    fn on_activation(&mut self, e: &ActivationEvent) {
        _ = e;
    }

    /// Called with the style sink writes of one pass (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    fn on_property_changes(&mut self, pass: u64, changes: &[PropertyChange]) {
        _ = (pass, changes);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PassBeginEvent`].
    #[inline]
    pub fn pass_begin(&mut self, e: &PassBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassEndEvent`].
    #[inline]
    pub fn pass_end(&mut self, e: &PassEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ActivationEvent`].
    #[inline]
    pub fn activation(&mut self, e: &ActivationEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_activation(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits the style sink writes of one pass (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn property_changes(&mut self, pass: u64, changes: &[PropertyChange]) {
        if let Some(s) = &mut self.sink {
            s.on_property_changes(pass, changes);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
