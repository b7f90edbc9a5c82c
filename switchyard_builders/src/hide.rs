// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};

use switchyard_core::builder::Builder;
use switchyard_core::style::{StyleMap, StyleValue};

use crate::coerce::coerce_bool;

/// Priority of the `display: none` override, above any layout builder.
const HIDE_PRIORITY: i32 = 100;

/// `hide`: hides the element while the value coerces to true.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hide;

impl Builder for Hide {
    fn key(&self) -> &str {
        "hide"
    }

    fn build(&self, input: &str, _: &[String]) -> StyleMap {
        let mut styles = StyleMap::default();
        if coerce_bool(input) {
            styles.insert(
                "display".to_string(),
                StyleValue::new("none", HIDE_PRIORITY),
            );
        }
        styles
    }
}
