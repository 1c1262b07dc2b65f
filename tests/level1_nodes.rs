//! Level 1: Adding Nodes
//!
//! Tests catalog-driven node creation, id uniqueness and the initial row state.

mod common;

use common::harness::FlowHarness;
use slint::Model;
use slint_flow_editor::{icon_color, Catalog, EditorConfig, Point, Size, WORKFLOW_STEPS};
use std::collections::HashSet;

#[test]
fn test_harness_starts_empty() {
    let harness = FlowHarness::new();
    assert_eq!(harness.nodes.row_count(), 0);
    assert_eq!(harness.connectors.row_count(), 0);
    assert_eq!(harness.pending.row_count(), 0);
}

#[test]
fn test_add_node_places_top_left_at_center() {
    let harness = FlowHarness::new();
    let id = harness.ctrl.add_node("chat-message").unwrap();

    let row = harness.row(&id).unwrap();
    assert_eq!((row.x, row.y), (640.0, 360.0));
    assert_eq!((row.width, row.height), (150.0, 100.0));
    assert_eq!(row.title.as_str(), "On Chat Message");
    assert!(row.show_output);
    assert_eq!(harness.port_id(&id), None);
}

#[test]
fn test_add_node_increases_count_by_one() {
    let harness = FlowHarness::new();
    for (i, step) in WORKFLOW_STEPS.iter().enumerate() {
        harness.ctrl.add_node(step.kind).unwrap();
        assert_eq!(harness.nodes.row_count(), i + 1);
    }
}

#[test]
fn test_node_ids_are_unique() {
    let harness = FlowHarness::new();
    let ids: HashSet<String> = (0..50)
        .map(|_| harness.ctrl.add_node("filter").unwrap().to_string())
        .collect();
    assert_eq!(ids.len(), 50);
}

#[test]
fn test_unknown_kind_adds_nothing() {
    let harness = FlowHarness::new();
    assert!(harness.ctrl.add_node("does-not-exist").is_none());
    assert_eq!(harness.nodes.row_count(), 0);
}

#[test]
fn test_configured_node_size() {
    let harness = FlowHarness::with_config(EditorConfig::default().with_node_size(Size::new(200.0, 80.0)));
    let id = harness.ctrl.add_node("email").unwrap();
    let row = harness.row(&id).unwrap();
    assert_eq!((row.width, row.height), (200.0, 80.0));
}

#[test]
fn test_row_icon_color_matches_catalog() {
    let harness = FlowHarness::new();
    let id = harness.ctrl.add_node("gmail").unwrap();
    let archetype = Catalog::new().find("gmail").unwrap();
    assert_eq!(harness.row(&id).unwrap().icon_color, archetype.icon_color());
    assert_eq!(archetype.icon_color(), icon_color("gmail"));
}

#[test]
fn test_stacked_nodes_share_center() {
    let harness = FlowHarness::new();
    let a = harness.ctrl.add_node("edit").unwrap();
    let b = harness.ctrl.add_node("edit").unwrap();
    assert_ne!(a, b);
    assert_eq!(harness.position(&a), harness.position(&b));
    assert_eq!(harness.position(&a), Some(Point::new(640.0, 360.0)));
}
