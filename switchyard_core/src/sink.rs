// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style sink contract for host integrations.
//!
//! The engine decides *which* concrete properties apply to a node; the host
//! decides *how* they are written. A host element layer (DOM elements, native
//! views, a terminal cell grid) implements [`StyleSink`] and passes it to
//! every engine entry point that may write styles.
//!
//! # Baselines
//!
//! The first time the engine overrides a property on a node it reads the
//! current value through [`StyleSink::property`] and remembers it as the
//! node's *baseline*. When the property stops applying, the engine writes the
//! baseline back (or removes the property if there was none). A sink must
//! therefore make every write immediately visible to subsequent reads.

use alloc::string::String;

use crate::node::NodeId;

/// Writes and reads concrete property values on host elements.
///
/// Both DOM-backed sinks and in-memory test doubles implement this trait.
///
/// # Pseudocode
///
/// ```rust,ignore
/// fn on_media_change(name: &str, matches: bool) {
///     let outcome = engine.breakpoint_changed(name, matches, &mut dom, &mut Tracer::none());
///     // `dom.set_property` / `dom.remove_property` have already been called
///     // for every node whose styles changed.
/// }
/// ```
pub trait StyleSink {
    /// Returns the value `name` currently has on `node`, or `None` if unset.
    fn property(&self, node: NodeId, name: &str) -> Option<String>;

    /// Sets `name` to `value` on `node`. Must be idempotent.
    fn set_property(&mut self, node: NodeId, name: &str, value: &str);

    /// Removes `name` from `node`.
    fn remove_property(&mut self, node: NodeId, name: &str);
}
