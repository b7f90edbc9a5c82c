// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builder catalogue for `switchyard_core`.
//!
//! Each builder handles one semantic key and is a pure, total function of
//! its input:
//!
//! | Key | Builder | Output |
//! |---|---|---|
//! | `order` | [`Order`] | `order` |
//! | `hide` | [`Hide`] | `display: none` at priority 100 |
//! | `areas` | [`Areas`] | `display: grid`, `grid-template-areas` |
//! | `auto` | [`Auto`] | `display: grid`, `grid-auto-flow` |
//! | `row` | [`Row`] | `grid-row` |
//!
//! [`catalog`] returns a registry with all of them.

#![no_std]

extern crate alloc;

mod coerce;
mod grid;
mod hide;
mod order;

pub use coerce::coerce_bool;
pub use grid::{Areas, Auto, Row};
pub use hide::Hide;
pub use order::Order;

use switchyard_core::builder::BuilderRegistry;

/// Returns a registry with every builder in this crate.
#[must_use]
pub fn catalog() -> BuilderRegistry {
    BuilderRegistry::new()
        .with(Order)
        .with(Hide)
        .with(Areas)
        .with(Auto)
        .with(Row)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn catalog_registers_every_key() {
        let registry = catalog();
        assert_eq!(
            registry.keys().collect::<Vec<_>>(),
            ["order", "hide", "areas", "auto", "row"]
        );
    }
}
