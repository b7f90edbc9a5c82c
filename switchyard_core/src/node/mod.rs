// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node data model.
//!
//! A *node* represents one styleable element. Each node has:
//!
//! - An identity ([`NodeId`]) — a generational handle that becomes stale when
//!   the node is removed, preventing use-after-free bugs at the API level.
//! - A parent link, fixed at creation. Nodes form a plain acyclic tree: a
//!   parent must already exist when its child is created.
//! - **Raw values** per breakpoint, written by attribute signals.
//! - **Computed state** produced by engine passes: the effective value map,
//!   the last applied output styles, and the baselines captured before each
//!   property was first overridden.
//!
//! Nodes are stored in struct-of-arrays layout with index-based handles.

mod id;
mod store;

pub use id::{INVALID, NodeId};
pub use store::{BaselineMap, NodeStore};
