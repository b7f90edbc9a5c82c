// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breakpoint-aware style resolution for trees of styleable nodes.
//!
//! `switchyard_core` decides which style declarations apply to each node of
//! an element tree under the currently active set of responsive breakpoints,
//! and keeps them correct as breakpoints activate and deactivate and as node
//! attributes change. It is `no_std` compatible (with `alloc`) and stores
//! node state in struct-of-arrays layout behind generational handles.
//!
//! # Architecture
//!
//! Three external signal sources drive the [`Engine`](engine::Engine):
//!
//! ```text
//!   activation change ──► breakpoint_changed() ─┐
//!   attribute change  ──► attribute_changed() ──┼─► mark dirty channels
//!   direction change  ──► set_direction() ──────┘          │
//!                                                          ▼
//!        EFFECTIVE drain: merge raw values by breakpoint precedence
//!                                                          │
//!                                                          ▼
//!        STYLE drain: run builders, merge outputs ──► StyleSink writes
//! ```
//!
//! **[`breakpoint`]** — Immutable breakpoint registry, the
//! [`ActivationSource`](breakpoint::ActivationSource) seam, and the ordered
//! [`ActiveSet`](breakpoint::ActiveSet).
//!
//! **[`builder`]** — The [`Builder`](builder::Builder) contract mapping one
//! semantic key's value to prioritized output properties, its registry, and
//! the engine-owned memo cache.
//!
//! **[`node`]** — Struct-of-arrays node store: raw values per breakpoint,
//! effective values, applied styles and captured baselines.
//!
//! **[`engine`]** — The switchyard. Owns activation state, node observation
//! sets, the dependency-listener graph, and orchestrates recomputation.
//!
//! **[`dirty`]** — Dirty channels drained by each engine pass.
//!
//! **[`sink`]** — The [`StyleSink`](sink::StyleSink) trait hosts implement to
//! write concrete property values onto their elements.
//!
//! **[`style`]** — Output property maps and the priority merge rule.
//!
//! **[`direction`]** — Text direction used by directionality-dependent builders.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! engine instrumentation, with zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-property
//!   write events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod breakpoint;
pub mod builder;
pub mod direction;
pub mod dirty;
pub mod engine;
pub mod node;
pub mod sink;
pub mod style;
pub mod trace;
