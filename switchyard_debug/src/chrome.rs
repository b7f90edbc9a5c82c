// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Engine events carry no wall-clock time. Timestamps are logical: the `n`th
//! recorded event is placed at `n` microseconds, so passes nest and order
//! correctly in the viewer while their widths only reflect event counts.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::pretty::{kind_name, outcome_name};
use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for (ts, recorded) in decode(bytes).enumerate() {
        match recorded {
            RecordedEvent::PassBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": kind_name(e.kind),
                    "cat": "Pass",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "pass": e.pass,
                        "active_breakpoints": e.active_breakpoints,
                    }
                }));
            }
            RecordedEvent::PassEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": kind_name(e.kind),
                    "cat": "Pass",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "pass": e.pass,
                        "resolved": e.resolved,
                        "restyled": e.restyled,
                    }
                }));
            }
            RecordedEvent::Activation(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Activation",
                    "cat": "Signal",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "pass": e.pass,
                        "breakpoint": e.breakpoint.map(|bp| bp.0),
                        "matches": e.matches,
                        "outcome": outcome_name(e.outcome),
                    }
                }));
            }
            RecordedEvent::PropertyChangesCount { counts, .. } => {
                events.push(json!({
                    "ph": "C",
                    "name": "PropertyWrites",
                    "cat": "Rich",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "set": counts.set,
                        "restore": counts.restore,
                        "remove": counts.remove,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}
