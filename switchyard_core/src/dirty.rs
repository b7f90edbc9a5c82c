// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The engine uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! batch the work of each pass. Entry points only mark channels; the pass
//! then drains them in a fixed order.
//!
//! # Channels
//!
//! - **[`EFFECTIVE`]** — A node's raw values or the active set changed. Its
//!   effective value map is re-merged from the active breakpoints.
//! - **[`STYLE`]** — A node's builders must run again and the merged output
//!   must be applied through the style sink. Marked for every node in
//!   `EFFECTIVE`, for dependents of a changed node, and for directionality
//!   listeners.
//!
//! # Ordering
//!
//! Each node carries a structural dependency edge on its parent in the
//! [`STYLE`] channel, so a deterministic drain visits parents before their
//! children. These edges describe the tree only; the dependency-listener
//! graph discovered while resolving builders is kept separately by the
//! engine and is never stored in the tracker.

use understory_dirty::Channel;

/// Raw values or active breakpoints changed — re-merge effective values.
pub const EFFECTIVE: Channel = Channel::new(0);

/// Builders must re-run and the result be applied.
pub const STYLE: Channel = Channel::new(1);
