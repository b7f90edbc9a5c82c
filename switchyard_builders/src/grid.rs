// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid container and item builders.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use switchyard_core::builder::Builder;
use switchyard_core::style::{StyleMap, StyleValue};

const AREA_DELIMITER: char = '|';

fn grid_display(styles: &mut StyleMap) {
    styles.insert("display".to_string(), StyleValue::new("grid", 0));
}

/// `areas`: named template areas, one row per `|`-separated segment.
///
/// `"header header | side main"` becomes
/// `grid-template-areas: "header header" "side main"`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Areas;

impl Builder for Areas {
    fn key(&self) -> &str {
        "areas"
    }

    fn build(&self, input: &str, _: &[String]) -> StyleMap {
        let input = if input.is_empty() { "none" } else { input };
        let areas: Vec<String> = input
            .split(AREA_DELIMITER)
            .map(|row| format!("\"{}\"", row.trim()))
            .collect();
        let mut styles = StyleMap::default();
        grid_display(&mut styles);
        styles.insert(
            "grid-template-areas".to_string(),
            StyleValue::new(areas.join(" "), 0),
        );
        styles
    }
}

/// `auto`: the grid auto-placement flow.
///
/// The first word is the direction (`row`, `column` or `dense`, anything
/// else reads as `row`); a second word `dense` packs the flow.
#[derive(Clone, Copy, Debug, Default)]
pub struct Auto;

impl Builder for Auto {
    fn key(&self) -> &str {
        "auto"
    }

    fn build(&self, input: &str, _: &[String]) -> StyleMap {
        let input = if input.is_empty() { "initial" } else { input };
        let mut words = input.split(' ');
        let direction = match words.next() {
            Some(d @ ("row" | "column" | "dense")) => d,
            _ => "row",
        };
        let dense = words.next() == Some("dense") && direction != "dense";
        let flow = if dense {
            format!("{direction} dense")
        } else {
            direction.to_string()
        };
        let mut styles = StyleMap::default();
        grid_display(&mut styles);
        styles.insert("grid-auto-flow".to_string(), StyleValue::new(flow, 0));
        styles
    }
}

/// `row`: the grid item's row placement, `auto` when empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct Row;

impl Builder for Row {
    fn key(&self) -> &str {
        "row"
    }

    fn build(&self, input: &str, _: &[String]) -> StyleMap {
        let input = if input.is_empty() { "auto" } else { input };
        let mut styles = StyleMap::default();
        styles.insert("grid-row".to_string(), StyleValue::new(input, 0));
        styles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(styles: &'a StyleMap, name: &str) -> &'a str {
        &styles[name].value
    }

    #[test]
    fn areas_quote_each_row() {
        let styles = Areas.build("header header | side main", &[]);
        assert_eq!(value(&styles, "display"), "grid");
        assert_eq!(
            value(&styles, "grid-template-areas"),
            "\"header header\" \"side main\""
        );
    }

    #[test]
    fn areas_default_to_none() {
        let styles = Areas.build("", &[]);
        assert_eq!(value(&styles, "grid-template-areas"), "\"none\"");
    }

    #[test]
    fn auto_flow_directions() {
        assert_eq!(value(&Auto.build("column", &[]), "grid-auto-flow"), "column");
        assert_eq!(
            value(&Auto.build("column dense", &[]), "grid-auto-flow"),
            "column dense"
        );
        assert_eq!(value(&Auto.build("dense dense", &[]), "grid-auto-flow"), "dense");
    }

    #[test]
    fn auto_unknown_direction_reads_as_row() {
        assert_eq!(value(&Auto.build("", &[]), "grid-auto-flow"), "row");
        assert_eq!(
            value(&Auto.build("diagonal dense", &[]), "grid-auto-flow"),
            "row dense"
        );
    }

    #[test]
    fn row_defaults_to_auto() {
        assert_eq!(value(&Row.build("", &[]), "grid-row"), "auto");
        assert_eq!(value(&Row.build("1 / 3", &[]), "grid-row"), "1 / 3");
    }

    #[test]
    fn display_priority_matches_layout_builders() {
        let styles = Auto.build("row", &[]);
        assert_eq!(styles["display"], StyleValue::new("grid", 0));
    }
}
