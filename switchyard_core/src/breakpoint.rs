// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breakpoint descriptors, the immutable registry, and active-set ordering.
//!
//! A [`Breakpoint`] names one layout environment (for example a screen-size
//! band) with a priority. The [`BreakpointRegistry`] is built once and never
//! mutated. Which breakpoints currently apply is decided by an external
//! [`ActivationSource`]; [`BreakpointRegistry::active_set`] re-queries it and
//! produces an [`ActiveSet`] ordered highest priority first.
//!
//! # Fallback
//!
//! At most one breakpoint is the *fallback*: the lowest-priority breakpoint
//! holding values declared without any breakpoint qualifier. It is always a
//! member of the active set, regardless of what the activation source says.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Name of the fallback breakpoint.
pub const FALLBACK_BREAKPOINT_KEY: &str = "";

/// Media handle of the fallback breakpoint.
pub const FALLBACK_MEDIA: &str = "all";

/// Index of a breakpoint within its [`BreakpointRegistry`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BreakpointIndex(pub u16);

impl BreakpointIndex {
    /// Returns the index as a `usize` for slice access.
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for BreakpointIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BreakpointIndex({})", self.0)
    }
}

/// A named, prioritized layout condition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Breakpoint {
    /// Unique name, used by attribute signals to address the breakpoint.
    pub name: String,
    /// Precedence. Higher values win when two breakpoints define a key.
    pub priority: i32,
    /// Opaque activation handle (typically a media query) interpreted by the
    /// [`ActivationSource`].
    pub media: String,
}

impl Breakpoint {
    /// Creates a breakpoint descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, priority: i32, media: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority,
            media: media.into(),
        }
    }

    /// The fallback breakpoint for unqualified values.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(FALLBACK_BREAKPOINT_KEY, i32::MIN, FALLBACK_MEDIA)
    }

    /// Returns whether this is the fallback breakpoint.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.name == FALLBACK_BREAKPOINT_KEY
    }
}

/// Answers whether a breakpoint's activation condition currently holds.
///
/// Hosts back this with their environment (media queries, window size
/// classes, container sizes). The engine queries it only while computing a
/// new [`ActiveSet`], never caches individual answers, and ignores it for
/// the fallback breakpoint.
pub trait ActivationSource {
    /// Returns whether `breakpoint` is currently active.
    fn matches(&self, breakpoint: &Breakpoint) -> bool;
}

/// Ordered, immutable set of breakpoint descriptors.
#[derive(Clone, Debug, Default)]
pub struct BreakpointRegistry {
    breakpoints: Vec<Breakpoint>,
    fallback: Option<BreakpointIndex>,
}

impl BreakpointRegistry {
    /// Builds a registry from breakpoints in registration order.
    ///
    /// # Panics
    ///
    /// Panics if two breakpoints share a name or if there are more than
    /// `u16::MAX` breakpoints.
    #[must_use]
    pub fn new(breakpoints: Vec<Breakpoint>) -> Self {
        assert!(
            breakpoints.len() <= u16::MAX as usize,
            "too many breakpoints ({})",
            breakpoints.len()
        );
        for (i, bp) in breakpoints.iter().enumerate() {
            assert!(
                breakpoints[..i].iter().all(|other| other.name != bp.name),
                "duplicate breakpoint name {:?}",
                bp.name
            );
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "length checked against u16::MAX above"
        )]
        let fallback = breakpoints
            .iter()
            .position(Breakpoint::is_fallback)
            .map(|i| BreakpointIndex(i as u16));
        Self {
            breakpoints,
            fallback,
        }
    }

    /// Builds a registry with [`Breakpoint::fallback`] registered first,
    /// followed by `breakpoints`.
    #[must_use]
    pub fn with_fallback(breakpoints: Vec<Breakpoint>) -> Self {
        let mut all = Vec::with_capacity(breakpoints.len() + 1);
        all.push(Breakpoint::fallback());
        all.extend(breakpoints);
        Self::new(all)
    }

    /// Number of registered breakpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    /// Returns whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Returns the breakpoint at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn get(&self, index: BreakpointIndex) -> &Breakpoint {
        &self.breakpoints[index.get()]
    }

    /// Looks up a breakpoint by name.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "registry length is bounded by u16::MAX"
    )]
    pub fn index_of(&self, name: &str) -> Option<BreakpointIndex> {
        self.breakpoints
            .iter()
            .position(|bp| bp.name == name)
            .map(|i| BreakpointIndex(i as u16))
    }

    /// Returns the fallback breakpoint's index, if one is registered.
    #[must_use]
    pub fn fallback(&self) -> Option<BreakpointIndex> {
        self.fallback
    }

    /// Iterates breakpoints in registration order.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "registry length is bounded by u16::MAX"
    )]
    pub fn iter(&self) -> impl Iterator<Item = (BreakpointIndex, &Breakpoint)> {
        self.breakpoints
            .iter()
            .enumerate()
            .map(|(i, bp)| (BreakpointIndex(i as u16), bp))
    }

    /// Re-queries every breakpoint and returns the active ones, highest
    /// priority first.
    ///
    /// Ties are broken by registration order. The fallback is always included.
    #[must_use]
    pub fn active_set(&self, source: &dyn ActivationSource) -> ActiveSet {
        let mut order: Vec<BreakpointIndex> = self
            .iter()
            .filter(|(_, bp)| bp.is_fallback() || source.matches(bp))
            .map(|(i, _)| i)
            .collect();
        // `sort_by` is stable, so equal priorities keep registration order.
        order.sort_by(|a, b| self.get(*b).priority.cmp(&self.get(*a).priority));
        ActiveSet { order }
    }
}

/// Breakpoints currently satisfying their condition, highest priority first.
///
/// Recomputed wholesale by [`BreakpointRegistry::active_set`]; never mutated
/// in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveSet {
    order: Vec<BreakpointIndex>,
}

impl ActiveSet {
    /// Iterates active breakpoints in descending priority.
    pub fn iter(&self) -> impl Iterator<Item = BreakpointIndex> + '_ {
        self.order.iter().copied()
    }

    /// Returns whether `index` is active.
    #[must_use]
    pub fn contains(&self, index: BreakpointIndex) -> bool {
        self.order.contains(&index)
    }

    /// Number of active breakpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns whether no breakpoint is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the active breakpoints as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[BreakpointIndex] {
        &self.order
    }
}
