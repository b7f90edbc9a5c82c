// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Attribute-style boolean coercion.
///
/// Presence means true: every value except the literal `"false"` coerces to
/// `true`, including the empty string of a bare attribute.
#[must_use]
pub fn coerce_bool(input: &str) -> bool {
    input != "false"
}
