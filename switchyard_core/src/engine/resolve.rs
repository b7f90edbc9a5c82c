// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effective value merge and builder resolution.

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use super::Engine;
use crate::breakpoint::ActivationSource;
use crate::builder::DependencySpec;
use crate::node::INVALID;
use crate::style::{StyleMap, ValueMap, merge_candidate};

impl<A: ActivationSource> Engine<A> {
    /// Rebuilds the effective map of `idx` from its raw values.
    ///
    /// Walks the active set highest priority first; the first breakpoint that
    /// defines a key wins and lower definitions are ignored.
    pub(super) fn merge_effective(&mut self, idx: u32) {
        let raw = &self.nodes.raw[idx as usize];
        let mut effective = ValueMap::default();
        for bp in self.active.iter() {
            let Some(values) = raw.get(bp.get()) else {
                continue;
            };
            for (key, value) in values {
                if !effective.contains_key(key) {
                    effective.insert(key.clone(), value.clone());
                }
            }
        }
        self.nodes.effective[idx as usize] = Some(effective);
    }

    /// Runs every builder of `idx` and merges the outputs into a candidate
    /// map, in effective-map order.
    pub(super) fn resolve_styles(&mut self, idx: u32) -> StyleMap {
        let builders = Arc::clone(&self.builders);
        let Some(effective) = self.nodes.effective[idx as usize].clone() else {
            return StyleMap::default();
        };

        let mut candidate = StyleMap::default();
        for (key, input) in &effective {
            let builder = builders.get(key);
            debug_assert!(builder.is_some(), "no builder registered for key {key:?}");
            let Some(builder) = builder else {
                continue;
            };
            let args: Vec<String> = builder
                .dependencies()
                .iter()
                .map(|spec| self.resolve_dependency(idx, spec))
                .collect();
            let output = if self.config.memoize {
                self.cache.build(builder, input, &args)
            } else {
                builder.build(input, &args)
            };
            merge_candidate(&mut candidate, output);
        }
        candidate
    }

    /// Resolves one dependency of a builder running for `idx`, recording the
    /// listener edge or subscription the read implies.
    fn resolve_dependency(&mut self, idx: u32, spec: &DependencySpec) -> String {
        match spec {
            DependencySpec::Own(key) => self.lookup(idx, key),
            DependencySpec::Parent(key) => {
                let parent = self.nodes.parent[idx as usize];
                if parent == INVALID {
                    return String::new();
                }
                if self.nodes.effective[parent as usize].is_some() {
                    self.listeners.entry(parent).or_default().insert(idx);
                }
                self.lookup(parent, key)
            }
            DependencySpec::Directionality => {
                self.dir_listeners.insert(idx);
                self.direction.as_str().to_string()
            }
            DependencySpec::Environment(key) => {
                self.environment.get(key).cloned().unwrap_or_default()
            }
        }
    }

    /// Effective value of `key` on `idx`, else the applied output property of
    /// that name, else `""`.
    fn lookup(&self, idx: u32, key: &str) -> String {
        let i = idx as usize;
        if let Some(value) = self.nodes.effective[i].as_ref().and_then(|e| e.get(key)) {
            return value.clone();
        }
        self.nodes.applied[i]
            .get(key)
            .map(|style| style.value.clone())
            .unwrap_or_default()
    }
}
