// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};

use switchyard_core::builder::Builder;
use switchyard_core::style::{StyleMap, StyleValue};

/// `order`: the flex/grid item order.
///
/// An empty value means `0`. Only the leading integer is read, so `"3px"`
/// yields `3`; a value with no leading integer yields no output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Order;

impl Builder for Order {
    fn key(&self) -> &str {
        "order"
    }

    fn build(&self, input: &str, _: &[String]) -> StyleMap {
        let input = if input.is_empty() { "0" } else { input };
        let mut styles = StyleMap::default();
        if let Some(order) = leading_integer(input) {
            styles.insert("order".to_string(), StyleValue::new(order.to_string(), 0));
        }
        styles
    }
}

/// Parses an optionally signed run of decimal digits after leading
/// whitespace, ignoring whatever follows.
fn leading_integer(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let digits_from = usize::from(s.starts_with(['+', '-']));
    let len = s[digits_from..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if len == 0 {
        return None;
    }
    s[..digits_from + len].parse().ok()
}
