// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable test doubles for hosts and tests driving a switchyard engine.
//!
//! - [`MockActivation`] — an [`ActivationSource`] backed by a set of active
//!   breakpoint names that tests flip directly.
//! - [`MemoryDocument`] — a [`StyleSink`] holding per-node property tables,
//!   with preset baselines and a log of every write.
//!
//! [`ActivationSource`]: switchyard_core::breakpoint::ActivationSource
//! [`StyleSink`]: switchyard_core::sink::StyleSink

#![no_std]

extern crate alloc;

mod activation;
mod document;

pub use activation::MockActivation;
pub use document::{MemoryDocument, Write};

#[cfg(test)]
mod scenarios;
