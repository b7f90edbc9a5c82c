// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use switchyard_core::engine::ActivationOutcome;
use switchyard_core::trace::{
    ActivationEvent, PassBeginEvent, PassEndEvent, PassKind, PropertyChange, TraceSink,
};

use crate::recorder::PropertyCounts;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its destination.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Short lowercase name for a pass kind.
#[must_use]
pub fn kind_name(kind: PassKind) -> &'static str {
    match kind {
        PassKind::Activation => "activation",
        PassKind::Requery => "requery",
        PassKind::Node => "node",
        PassKind::Direction => "direction",
    }
}

/// Short lowercase name for an activation outcome.
#[must_use]
pub fn outcome_name(outcome: ActivationOutcome) -> &'static str {
    match outcome {
        ActivationOutcome::Recomputed => "recomputed",
        ActivationOutcome::Unchanged => "unchanged",
        ActivationOutcome::UnknownBreakpoint => "unknown",
        ActivationOutcome::Dropped => "DROPPED",
        ActivationOutcome::Deferred => "deferred",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:begin] pass={} kind={} active={}",
            e.pass,
            kind_name(e.kind),
            e.active_breakpoints,
        );
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:end] pass={} kind={} resolved={} restyled={}",
            e.pass,
            kind_name(e.kind),
            e.resolved,
            e.restyled,
        );
    }

    fn on_activation(&mut self, e: &ActivationEvent) {
        let breakpoint = match e.breakpoint {
            Some(bp) => bp.0.to_string(),
            None => "?".to_string(),
        };
        let _ = writeln!(
            self.writer,
            "[activation] pass={} breakpoint={breakpoint} matches={} outcome={}",
            e.pass,
            e.matches,
            outcome_name(e.outcome),
        );
    }

    fn on_property_changes(&mut self, pass: u64, changes: &[PropertyChange]) {
        let counts = PropertyCounts::tally(changes);
        let _ = writeln!(
            self.writer,
            "[properties] pass={pass} set={} restore={} remove={}",
            counts.set, counts.restore, counts.remove,
        );
    }
}
