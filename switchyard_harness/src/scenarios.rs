// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios: catalogue builders, mock activation, in-memory
//! document.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use switchyard_builders::catalog;
use switchyard_core::breakpoint::{Breakpoint, BreakpointRegistry};
use switchyard_core::builder::{Builder, DependencySpec};
use switchyard_core::direction::Direction;
use switchyard_core::engine::{ActivationOutcome, Engine, EngineConfig};
use switchyard_core::node::NodeId;
use switchyard_core::style::{StyleMap, StyleValue};
use switchyard_core::trace::Tracer;

use crate::{MemoryDocument, MockActivation, Write};

/// `offset`: `margin-inline-start` scaled by the parent's `order`.
struct Offset {
    deps: Vec<DependencySpec>,
}

impl Builder for Offset {
    fn key(&self) -> &str {
        "offset"
    }

    fn dependencies(&self) -> &[DependencySpec] {
        &self.deps
    }

    fn build(&self, input: &str, args: &[String]) -> StyleMap {
        let step: i64 = input.parse().unwrap_or(0);
        let parent: i64 = args.first().and_then(|a| a.parse().ok()).unwrap_or(0);
        let mut styles = StyleMap::default();
        styles.insert(
            "margin-inline-start".to_string(),
            StyleValue::new(format!("{}px", step * parent), 0),
        );
        styles
    }
}

/// `align`: `text-align` with `start`/`end` mapped through the direction.
struct Align {
    deps: Vec<DependencySpec>,
}

impl Builder for Align {
    fn key(&self) -> &str {
        "align"
    }

    fn dependencies(&self) -> &[DependencySpec] {
        &self.deps
    }

    fn build(&self, input: &str, args: &[String]) -> StyleMap {
        let rtl = args.first().is_some_and(|dir| dir == "rtl");
        let value = match (input, rtl) {
            ("start", false) | ("end", true) => "left",
            ("start", true) | ("end", false) => "right",
            (other, _) => other,
        };
        let mut styles = StyleMap::default();
        styles.insert("text-align".to_string(), StyleValue::new(value, 0));
        styles
    }
}

fn engine_with(active: &[&str], config: EngineConfig) -> Engine<MockActivation> {
    let breakpoints = BreakpointRegistry::with_fallback(vec![
        Breakpoint::new("xs", 0, "(max-width: 599px)"),
        Breakpoint::new("md", 1, "(min-width: 960px) and (max-width: 1279px)"),
    ]);
    let builders = catalog()
        .with(Offset {
            deps: vec![DependencySpec::parse("parent.order")],
        })
        .with(Align {
            deps: vec![DependencySpec::parse("directionality")],
        });
    Engine::new(
        Arc::new(breakpoints),
        Arc::new(builders),
        MockActivation::with_active(active.iter().copied()),
        config,
    )
}

fn engine(active: &[&str]) -> Engine<MockActivation> {
    engine_with(active, EngineConfig::new())
}

fn set(engine: &mut Engine<MockActivation>, on: bool, name: &str, doc: &mut MemoryDocument) -> ActivationOutcome {
    if on {
        engine.activation_mut().activate(name);
    } else {
        engine.activation_mut().deactivate(name);
    }
    engine.breakpoint_changed(name, on, doc, &mut Tracer::none())
}

fn seed(engine: &mut Engine<MockActivation>, node: NodeId, values: &[(&str, &str, &str)]) {
    for &(bp, key, value) in values {
        assert!(engine.set_raw_value(node, bp, key, Some(value)));
    }
}

#[test]
fn order_follows_highest_active_breakpoint() {
    let mut engine = engine(&["xs"]);
    let mut doc = MemoryDocument::new();
    let n = engine.create_node(None);
    seed(&mut engine, n, &[("xs", "order", "2"), ("md", "order", "3")]);
    engine.register(n, "xs", &mut doc, &mut Tracer::none());
    engine.register(n, "md", &mut doc, &mut Tracer::none());

    assert_eq!(engine.effective(n).unwrap()["order"], "2");
    assert_eq!(engine.applied(n)["order"], StyleValue::new("2", 0));

    assert_eq!(set(&mut engine, true, "md", &mut doc), ActivationOutcome::Recomputed);
    assert_eq!(engine.effective(n).unwrap()["order"], "3");
    assert_eq!(engine.applied(n)["order"], StyleValue::new("3", 0));
    assert_eq!(doc.get(n, "order"), Some("3"));
}

#[test]
fn precedence_ignores_registration_order() {
    for bps in [["xs", "md"], ["md", "xs"]] {
        let mut engine = engine(&["xs", "md"]);
        let mut doc = MemoryDocument::new();
        let n = engine.create_node(None);
        for bp in bps {
            let value = if bp == "md" { "10" } else { "5" };
            seed(&mut engine, n, &[(bp, "order", value)]);
            engine.register(n, bp, &mut doc, &mut Tracer::none());
        }
        assert_eq!(doc.get(n, "order"), Some("10"));
    }
}

#[test]
fn inactive_only_key_never_applies() {
    let mut engine = engine(&["xs"]);
    let mut doc = MemoryDocument::new();
    let n = engine.create_node(None);
    seed(&mut engine, n, &[("md", "hide", "true")]);
    engine.register(n, "md", &mut doc, &mut Tracer::none());
    engine.refresh(&mut doc, &mut Tracer::none());

    assert!(!engine.effective(n).unwrap().contains_key("hide"));
    assert!(doc.writes().is_empty());
}

#[test]
fn hide_restores_display_baseline() {
    let mut engine = engine(&["xs"]);
    let n = engine.create_node(None);
    let mut doc = MemoryDocument::new().with_baseline(n, "display", "flex");
    engine.register(n, "xs", &mut doc, &mut Tracer::none());

    engine.attribute_changed(n, "xs", "hide", Some("true"), &mut doc, &mut Tracer::none());
    assert_eq!(engine.applied(n)["display"], StyleValue::new("none", 100));
    assert_eq!(doc.get(n, "display"), Some("none"));

    engine.attribute_changed(n, "xs", "hide", Some("false"), &mut doc, &mut Tracer::none());
    assert!(engine.applied(n).is_empty());
    assert_eq!(doc.get(n, "display"), Some("flex"));

    engine.attribute_changed(n, "xs", "hide", Some(""), &mut doc, &mut Tracer::none());
    assert_eq!(doc.get(n, "display"), Some("none"));
    engine.attribute_changed(n, "xs", "hide", None, &mut doc, &mut Tracer::none());
    assert_eq!(doc.get(n, "display"), Some("flex"));
}

#[test]
fn hide_outranks_grid_display() {
    let mut engine = engine(&["xs"]);
    let mut doc = MemoryDocument::new();
    let n = engine.create_node(None);
    seed(&mut engine, n, &[("xs", "areas", "a b | c d"), ("xs", "hide", "true")]);
    engine.register(n, "xs", &mut doc, &mut Tracer::none());
    assert_eq!(doc.get(n, "display"), Some("none"));
    assert_eq!(doc.get(n, "grid-template-areas"), Some("\"a b\" \"c d\""));

    engine.attribute_changed(n, "xs", "hide", None, &mut doc, &mut Tracer::none());
    assert_eq!(doc.get(n, "display"), Some("grid"));
}

#[test]
fn equal_priority_collision_keeps_first_key() {
    let mut engine = engine(&["xs"]);
    let mut doc = MemoryDocument::new();
    let n = engine.create_node(None);
    // Both produce `display: grid` at priority 0; `areas` is seen first.
    seed(&mut engine, n, &[("xs", "areas", "a"), ("xs", "auto", "column")]);
    engine.register(n, "xs", &mut doc, &mut Tracer::none());
    let applied: Vec<&str> = engine.applied(n).keys().map(String::as_str).collect();
    assert_eq!(applied, ["display", "grid-template-areas", "grid-auto-flow"]);
}

#[test]
fn unchanged_state_writes_nothing() {
    let mut engine = engine(&["xs", "md"]);
    let mut doc = MemoryDocument::new();
    let n = engine.create_node(None);
    seed(&mut engine, n, &[("xs", "order", "1"), ("md", "row", "1 / 3")]);
    engine.register(n, "xs", &mut doc, &mut Tracer::none());
    assert_eq!(doc.writes().len(), 2);
    doc.clear_log();

    engine.refresh(&mut doc, &mut Tracer::none());
    engine.refresh(&mut doc, &mut Tracer::none());
    engine.notify_node_changed(n, &mut doc, &mut Tracer::none());
    assert!(doc.writes().is_empty());
}

#[test]
fn round_trip_through_breakpoints_restores_baselines() {
    let mut engine = engine(&["xs"]);
    let n = engine.create_node(None);
    let mut doc = MemoryDocument::new().with_baseline(n, "grid-row", "2");
    seed(&mut engine, n, &[("md", "row", "1 / 3"), ("md", "order", "4")]);
    engine.register(n, "md", &mut doc, &mut Tracer::none());
    let before = format!("{:?}", doc.properties(n));

    set(&mut engine, true, "md", &mut doc);
    assert_eq!(doc.get(n, "grid-row"), Some("1 / 3"));
    assert_eq!(doc.get(n, "order"), Some("4"));

    set(&mut engine, false, "md", &mut doc);
    assert_eq!(format!("{:?}", doc.properties(n)), before);
    assert_eq!(
        doc.writes().last(),
        Some(&Write::Remove {
            node: n,
            name: "order".to_string(),
        })
    );
}

#[test]
fn parent_dependency_propagates_on_activation() {
    let mut engine = engine(&["xs"]);
    let mut doc = MemoryDocument::new();
    let parent = engine.create_node(None);
    let child = engine.create_node(Some(parent));
    seed(&mut engine, parent, &[("xs", "order", "2"), ("md", "order", "5")]);
    seed(&mut engine, child, &[("", "offset", "4")]);
    engine.register(parent, "xs", &mut doc, &mut Tracer::none());
    engine.register(child, "", &mut doc, &mut Tracer::none());
    assert_eq!(doc.get(child, "margin-inline-start"), Some("8px"));

    set(&mut engine, true, "md", &mut doc);
    assert_eq!(doc.get(child, "margin-inline-start"), Some("20px"));
    // The child's own raw values never changed.
    assert_eq!(engine.effective(child).unwrap()["offset"], "4");
}

#[test]
fn parent_attribute_change_reaches_dependents() {
    let mut engine = engine(&["xs"]);
    let mut doc = MemoryDocument::new();
    let root = engine.create_node(None);
    let parent = engine.create_node(Some(root));
    let child = engine.create_node(Some(parent));
    seed(&mut engine, root, &[("xs", "order", "1")]);
    seed(&mut engine, parent, &[("xs", "order", "3"), ("xs", "offset", "1")]);
    seed(&mut engine, child, &[("xs", "offset", "2")]);
    for n in [root, parent, child] {
        engine.register(n, "xs", &mut doc, &mut Tracer::none());
    }
    assert_eq!(doc.get(parent, "margin-inline-start"), Some("1px"));
    assert_eq!(doc.get(child, "margin-inline-start"), Some("6px"));

    let changes =
        engine.attribute_changed(root, "xs", "order", Some("7"), &mut doc, &mut Tracer::none());
    // One level: the parent listens on the root; the child listens on the
    // parent, whose effective values did not change.
    assert_eq!(changes.resolved, [root.index(), parent.index()]);
    assert_eq!(doc.get(parent, "margin-inline-start"), Some("7px"));
    assert_eq!(doc.get(child, "margin-inline-start"), Some("6px"));
}

#[test]
fn direction_change_touches_only_subscribers() {
    let mut engine = engine(&["xs"]);
    let mut doc = MemoryDocument::new();
    let a = engine.create_node(None);
    let b = engine.create_node(None);
    seed(&mut engine, a, &[("xs", "align", "start")]);
    seed(&mut engine, b, &[("xs", "order", "1")]);
    engine.register(a, "xs", &mut doc, &mut Tracer::none());
    engine.register(b, "xs", &mut doc, &mut Tracer::none());
    assert_eq!(doc.get(a, "text-align"), Some("left"));
    doc.clear_log();

    engine.set_direction(Direction::Rtl, &mut doc, &mut Tracer::none());
    assert_eq!(
        doc.writes(),
        [Write::Set {
            node: a,
            name: "text-align".to_string(),
            value: "right".to_string(),
        }]
    );
    assert_eq!(engine.direction_listeners(), [a]);
}

#[test]
fn removed_node_is_never_written_again() {
    let mut engine = engine(&["xs"]);
    let mut doc = MemoryDocument::new();
    let parent = engine.create_node(None);
    let child = engine.create_node(Some(parent));
    seed(&mut engine, parent, &[("xs", "order", "2"), ("md", "order", "5")]);
    seed(&mut engine, child, &[("xs", "offset", "1")]);
    engine.register(parent, "xs", &mut doc, &mut Tracer::none());
    engine.register(child, "xs", &mut doc, &mut Tracer::none());

    engine.remove(child);
    engine.remove(child);
    doc.clear_log();
    set(&mut engine, true, "md", &mut doc);
    assert!(doc.writes().iter().all(|w| match w {
        Write::Set { node, .. } | Write::Remove { node, .. } => *node == parent,
    }));
    assert!(engine.dependents(parent).is_empty());
}

#[test]
fn parity_config_resolves_like_default() {
    for config in [EngineConfig::new(), EngineConfig::parity().with_memoize(false)] {
        let mut engine = engine_with(&["xs"], config);
        let mut doc = MemoryDocument::new();
        let n = engine.create_node(None);
        seed(&mut engine, n, &[("xs", "auto", "row dense"), ("md", "auto", "column")]);
        engine.register(n, "xs", &mut doc, &mut Tracer::none());
        assert_eq!(doc.get(n, "grid-auto-flow"), Some("row dense"));
        set(&mut engine, true, "md", &mut doc);
        assert_eq!(doc.get(n, "grid-auto-flow"), Some("column"));
    }
}
