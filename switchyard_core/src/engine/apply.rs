// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style application against the previously applied map.
//!
//! Only differences reach the [`StyleSink`]: a property whose value is
//! unchanged is not rewritten, and a property that stops applying is written
//! back to its captured baseline (or removed when it had none).

use super::{Engine, StyleChanges};
use crate::breakpoint::ActivationSource;
use crate::sink::StyleSink;
use crate::style::StyleMap;
#[cfg(feature = "trace-rich")]
use crate::trace::{PropertyChange, PropertyChangeKind};

impl<A: ActivationSource> Engine<A> {
    pub(super) fn apply_styles(
        &mut self,
        idx: u32,
        candidate: StyleMap,
        sink: &mut dyn StyleSink,
        changes: &mut StyleChanges,
    ) {
        let id = self.nodes.id_at(idx);
        let previous = core::mem::take(&mut self.nodes.applied[idx as usize]);
        let baselines = &mut self.nodes.baselines[idx as usize];
        let mut wrote = false;

        for (name, style) in &candidate {
            if previous.get(name).is_some_and(|p| p.value == style.value) {
                continue;
            }
            if !baselines.contains_key(name) {
                baselines.insert(name.clone(), sink.property(id, name));
            }
            sink.set_property(id, name, &style.value);
            wrote = true;
            #[cfg(feature = "trace-rich")]
            self.property_changes.push(PropertyChange {
                node_index: idx,
                kind: PropertyChangeKind::Set,
            });
        }

        for name in previous.keys() {
            if candidate.contains_key(name) {
                continue;
            }
            match baselines.shift_remove(name).flatten() {
                Some(baseline) => {
                    sink.set_property(id, name, &baseline);
                    #[cfg(feature = "trace-rich")]
                    self.property_changes.push(PropertyChange {
                        node_index: idx,
                        kind: PropertyChangeKind::Restore,
                    });
                }
                None => {
                    sink.remove_property(id, name);
                    #[cfg(feature = "trace-rich")]
                    self.property_changes.push(PropertyChange {
                        node_index: idx,
                        kind: PropertyChangeKind::Remove,
                    });
                }
            }
            changes.restored_properties += 1;
            wrote = true;
        }

        self.nodes.applied[idx as usize] = candidate;
        if wrote {
            changes.restyled.push(idx);
        }
    }
}
