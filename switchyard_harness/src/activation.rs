// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};

use switchyard_core::breakpoint::{ActivationSource, Breakpoint};

/// Activation source whose state is set directly by name.
///
/// Flip a breakpoint here first, then deliver the matching signal to the
/// engine: the engine re-queries this source during the recompute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MockActivation {
    active: BTreeSet<String>,
}

impl MockActivation {
    /// Creates a source with nothing active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source with `names` active.
    #[must_use]
    pub fn with_active<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            active: names.into_iter().map(str::to_string).collect(),
        }
    }

    /// Marks `name` active. Returns `false` if it already was.
    pub fn activate(&mut self, name: &str) -> bool {
        self.active.insert(name.to_string())
    }

    /// Marks `name` inactive. Returns `false` if it already was.
    pub fn deactivate(&mut self, name: &str) -> bool {
        self.active.remove(name)
    }

    /// Returns whether `name` is active.
    #[must_use]
    pub fn is_active(&self, name: &str) -> bool {
        self.active.contains(name)
    }
}

impl ActivationSource for MockActivation {
    fn matches(&self, breakpoint: &Breakpoint) -> bool {
        self.is_active(&breakpoint.name)
    }
}
