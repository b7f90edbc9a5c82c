// Copyright 2026 the Switchyard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives a three-node grid through breakpoint transitions, an attribute
//! edit and a direction flip, tracing every pass.
//!
//! Events go to both a [`PrettyPrintSink`](switchyard_debug::pretty::PrettyPrintSink)
//! on stdout and a [`RecorderSink`](switchyard_debug::recorder::RecorderSink),
//! which is exported as a Chrome trace JSON file at the end.

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use switchyard_core::breakpoint::{Breakpoint, BreakpointRegistry};
use switchyard_core::direction::Direction;
use switchyard_core::engine::{Engine, EngineConfig};
use switchyard_core::node::NodeId;
use switchyard_core::trace::{
    ActivationEvent, PassBeginEvent, PassEndEvent, PropertyChange, TraceSink, Tracer,
};
use switchyard_harness::{MemoryDocument, MockActivation};

use switchyard_debug::pretty::PrettyPrintSink;
use switchyard_debug::recorder::RecorderSink;

/// Forwards every event to both sinks.
struct Tee {
    pretty: PrettyPrintSink,
    recorder: RecorderSink,
}

impl TraceSink for Tee {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.pretty.on_pass_begin(e);
        self.recorder.on_pass_begin(e);
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        self.pretty.on_pass_end(e);
        self.recorder.on_pass_end(e);
    }

    fn on_activation(&mut self, e: &ActivationEvent) {
        self.pretty.on_activation(e);
        self.recorder.on_activation(e);
    }

    fn on_property_changes(&mut self, pass: u64, changes: &[PropertyChange]) {
        self.pretty.on_property_changes(pass, changes);
        self.recorder.on_property_changes(pass, changes);
    }
}

fn dump(doc: &MemoryDocument, label: &str, nodes: &[(&str, NodeId)]) {
    println!("-- {label}");
    for (name, id) in nodes {
        let props: Vec<String> = doc
            .properties(*id)
            .into_iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect();
        println!("   {name:<8} {{ {} }}", props.join("; "));
    }
}

fn main() {
    // -- registries --------------------------------------------------------
    let breakpoints = Arc::new(BreakpointRegistry::with_fallback(vec![
        Breakpoint::new("xs", 0, "(max-width: 599px)"),
        Breakpoint::new("md", 1, "(min-width: 960px)"),
    ]));
    let builders = Arc::new(switchyard_builders::catalog());

    let mut engine = Engine::new(
        breakpoints,
        builders,
        MockActivation::with_active(["xs"]),
        EngineConfig::new(),
    );

    let mut tee = Tee {
        pretty: PrettyPrintSink::new(Box::new(std::io::stdout())),
        recorder: RecorderSink::new(),
    };

    // -- tree --------------------------------------------------------------
    let grid = engine.create_node(None);
    let header = engine.create_node(Some(grid));
    let sidebar = engine.create_node(Some(grid));

    let mut doc = MemoryDocument::new().with_baseline(sidebar, "display", "block");

    engine.set_raw_value(grid, "", "areas", Some("header | main"));
    engine.set_raw_value(grid, "md", "areas", Some("header header | side main"));
    engine.set_raw_value(header, "", "order", Some("0"));
    engine.set_raw_value(header, "xs", "order", Some("2"));
    engine.set_raw_value(sidebar, "xs", "hide", Some(""));
    engine.set_raw_value(sidebar, "md", "row", Some("2 / 3"));

    {
        let mut tracer = Tracer::new(&mut tee);
        for (id, breakpoint) in [(grid, "md"), (header, "xs"), (sidebar, "xs"), (sidebar, "md")] {
            let _ = engine.register(id, breakpoint, &mut doc, &mut tracer);
        }
    }
    let nodes = [("grid", grid), ("header", header), ("sidebar", sidebar)];
    dump(&doc, "initial (xs)", &nodes);

    // -- breakpoint transitions -------------------------------------------
    engine.activation_mut().deactivate("xs");
    engine.activation_mut().activate("md");
    {
        let mut tracer = Tracer::new(&mut tee);
        let _ = engine.breakpoint_changed("xs", false, &mut doc, &mut tracer);
        // Already folded into the recompute above.
        let _ = engine.breakpoint_changed("md", true, &mut doc, &mut tracer);
    }
    dump(&doc, "md", &nodes);

    // -- attribute edit ----------------------------------------------------
    {
        let mut tracer = Tracer::new(&mut tee);
        let _ = engine.attribute_changed(header, "", "order", Some("-1"), &mut doc, &mut tracer);
    }
    dump(&doc, "order edit", &nodes);

    // -- direction ---------------------------------------------------------
    {
        let mut tracer = Tracer::new(&mut tee);
        let _ = engine.set_direction(Direction::Rtl, &mut doc, &mut tracer);
    }

    // -- back to xs --------------------------------------------------------
    engine.activation_mut().deactivate("md");
    engine.activation_mut().activate("xs");
    {
        let mut tracer = Tracer::new(&mut tee);
        let _ = engine.breakpoint_changed("md", false, &mut doc, &mut tracer);
    }
    dump(&doc, "xs again", &nodes);

    // -- export Chrome trace -----------------------------------------------
    let path = "switchyard_trace.json";
    let file = File::create(path).expect("failed to create trace file");
    let mut writer = BufWriter::new(file);
    switchyard_debug::chrome::export(tee.recorder.as_bytes(), &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({} passes)", engine.pass());
}
