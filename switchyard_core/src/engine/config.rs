// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

/// What to do with an activation signal that arrives while a full recompute
/// is in flight.
///
/// Passed to the [`Engine`](super::Engine) via
/// [`EngineConfig::reentrancy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReentrancyPolicy {
    /// Discard the signal.
    ///
    /// The in-flight pass queried the activation source when it started, so
    /// a transition that lands after that point is lost until the next
    /// signal.
    Drop,
    /// Remember the signal, and after every full recompute query the
    /// activation source again.
    ///
    /// If a signal was deferred or the active set moved while the pass ran,
    /// exactly one corrective recompute follows.
    Requery,
}

/// Configuration for the [`Engine`](super::Engine).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Policy for overlapping activation signals.
    pub reentrancy: ReentrancyPolicy,
    /// Whether builder outputs are memoized by input and resolved arguments.
    pub memoize: bool,
}

impl EngineConfig {
    /// Default configuration: corrective requery, memoized builders.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reentrancy: ReentrancyPolicy::Requery,
            memoize: true,
        }
    }

    /// Configuration that drops overlapping activation signals.
    #[must_use]
    pub const fn parity() -> Self {
        Self {
            reentrancy: ReentrancyPolicy::Drop,
            memoize: true,
        }
    }

    /// Returns this configuration with memoization switched on or off.
    #[must_use]
    pub const fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
