// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! [`on_property_changes`](TraceSink::on_property_changes) stores only the
//! per-kind counts.

use switchyard_core::breakpoint::BreakpointIndex;
use switchyard_core::engine::ActivationOutcome;
use switchyard_core::trace::{
    ActivationEvent, PassBeginEvent, PassEndEvent, PassKind, PropertyChange, PropertyChangeKind,
    TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PASS_BEGIN: u8 = 1;
const TAG_PASS_END: u8 = 2;
const TAG_ACTIVATION: u8 = 3;
const TAG_PROPERTY_CHANGES_COUNT: u8 = 4;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "counts capped at u32::MAX for recording"
    )]
    fn write_count(&mut self, v: usize) {
        self.write_u32(v.min(u32::MAX as usize) as u32);
    }

    fn write_option_breakpoint(&mut self, v: Option<BreakpointIndex>) {
        match v {
            Some(bp) => {
                self.write_u8(1);
                self.write_u16(bp.0);
            }
            None => {
                self.write_u8(0);
                self.write_u16(0);
            }
        }
    }

    fn write_kind(&mut self, k: PassKind) {
        self.write_u8(match k {
            PassKind::Activation => 0,
            PassKind::Requery => 1,
            PassKind::Node => 2,
            PassKind::Direction => 3,
        });
    }

    fn write_outcome(&mut self, o: ActivationOutcome) {
        self.write_u8(match o {
            ActivationOutcome::Recomputed => 0,
            ActivationOutcome::Unchanged => 1,
            ActivationOutcome::UnknownBreakpoint => 2,
            ActivationOutcome::Dropped => 3,
            ActivationOutcome::Deferred => 4,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.write_u8(TAG_PASS_BEGIN);
        self.write_u64(e.pass);
        self.write_kind(e.kind);
        self.write_count(e.active_breakpoints);
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        self.write_u8(TAG_PASS_END);
        self.write_u64(e.pass);
        self.write_kind(e.kind);
        self.write_count(e.resolved);
        self.write_count(e.restyled);
    }

    fn on_activation(&mut self, e: &ActivationEvent) {
        self.write_u8(TAG_ACTIVATION);
        self.write_u64(e.pass);
        self.write_option_breakpoint(e.breakpoint);
        self.write_u8(u8::from(e.matches));
        self.write_outcome(e.outcome);
    }

    fn on_property_changes(&mut self, pass: u64, changes: &[PropertyChange]) {
        let counts = PropertyCounts::tally(changes);
        self.write_u8(TAG_PROPERTY_CHANGES_COUNT);
        self.write_u64(pass);
        self.write_u32(counts.set);
        self.write_u32(counts.restore);
        self.write_u32(counts.remove);
    }
}

// ---------------------------------------------------------------------------
// Property change counts
// ---------------------------------------------------------------------------

/// Style sink writes of one pass, counted by [`PropertyChangeKind`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropertyCounts {
    /// Candidate values written.
    pub set: u32,
    /// Baselines written back.
    pub restore: u32,
    /// Properties removed for lack of a baseline.
    pub remove: u32,
}

impl PropertyCounts {
    /// Counts `changes` by kind, saturating at `u32::MAX`.
    #[must_use]
    pub fn tally(changes: &[PropertyChange]) -> Self {
        let mut counts = Self::default();
        for change in changes {
            let slot = match change.kind {
                PropertyChangeKind::Set => &mut counts.set,
                PropertyChangeKind::Restore => &mut counts.restore,
                PropertyChangeKind::Remove => &mut counts.remove,
            };
            *slot = slot.saturating_add(1);
        }
        counts
    }

    /// Total writes across all kinds.
    #[must_use]
    pub fn total(&self) -> u64 {
        u64::from(self.set) + u64::from(self.restore) + u64::from(self.remove)
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`PassBeginEvent`].
    PassBegin(PassBeginEvent),
    /// A [`PassEndEvent`].
    PassEnd(PassEndEvent),
    /// An [`ActivationEvent`].
    Activation(ActivationEvent),
    /// Property change counts for a pass.
    PropertyChangesCount {
        /// Pass counter.
        pass: u64,
        /// Writes by kind.
        counts: PropertyCounts,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_u16(&mut self) -> Option<u16> {
        self.take().map(u16::from_le_bytes)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_count(&mut self) -> Option<usize> {
        self.read_u32().map(|v| v as usize)
    }

    fn read_option_breakpoint(&mut self) -> Option<Option<BreakpointIndex>> {
        let present = self.read_u8()?;
        let index = self.read_u16()?;
        Some((present != 0).then_some(BreakpointIndex(index)))
    }

    fn read_kind(&mut self) -> Option<PassKind> {
        Some(match self.read_u8()? {
            0 => PassKind::Activation,
            1 => PassKind::Requery,
            2 => PassKind::Node,
            _ => PassKind::Direction,
        })
    }

    fn read_outcome(&mut self) -> Option<ActivationOutcome> {
        Some(match self.read_u8()? {
            0 => ActivationOutcome::Recomputed,
            1 => ActivationOutcome::Unchanged,
            2 => ActivationOutcome::UnknownBreakpoint,
            3 => ActivationOutcome::Dropped,
            _ => ActivationOutcome::Deferred,
        })
    }

    fn decode_pass_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassBegin(PassBeginEvent {
            pass: self.read_u64()?,
            kind: self.read_kind()?,
            active_breakpoints: self.read_count()?,
        }))
    }

    fn decode_pass_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassEnd(PassEndEvent {
            pass: self.read_u64()?,
            kind: self.read_kind()?,
            resolved: self.read_count()?,
            restyled: self.read_count()?,
        }))
    }

    fn decode_activation(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Activation(ActivationEvent {
            pass: self.read_u64()?,
            breakpoint: self.read_option_breakpoint()?,
            matches: self.read_u8()? != 0,
            outcome: self.read_outcome()?,
        }))
    }

    fn decode_property_changes_count(&mut self) -> Option<RecordedEvent> {
        let pass = self.read_u64()?;
        let counts = PropertyCounts {
            set: self.read_u32()?,
            restore: self.read_u32()?,
            remove: self.read_u32()?,
        };
        Some(RecordedEvent::PropertyChangesCount { pass, counts })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_PASS_BEGIN => self.decode_pass_begin(),
            TAG_PASS_END => self.decode_pass_end(),
            TAG_ACTIVATION => self.decode_activation(),
            TAG_PROPERTY_CHANGES_COUNT => self.decode_property_changes_count(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
