//! Test harness mirroring the flow-builder demo wiring.
//!
//! Binds plain row structs instead of Slint-generated ones so the controller
//! can be driven without a window.

#![allow(dead_code)]

use super::ListenerTracker;
use slint::{Color, Model, SharedString, VecModel};
use slint_flow_editor::{
    DragOutcome, EditorConfig, FlowEditorController, NodeGeometry, NodeId, Point, PointerHost,
};
use std::rc::Rc;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeRow {
    pub id: SharedString,
    pub title: SharedString,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub icon_color: Color,
    pub show_output: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectorRow {
    pub source: SharedString,
    pub target: SharedString,
    pub commands: SharedString,
}

pub struct FlowHarness {
    pub ctrl: FlowEditorController,
    pub listeners: ListenerTracker,
    pub nodes: Rc<VecModel<NodeRow>>,
    pub connectors: Rc<VecModel<ConnectorRow>>,
    pub pending: Rc<VecModel<ConnectorRow>>,
}

impl FlowHarness {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let listeners = ListenerTracker::new();
        let host: Rc<dyn PointerHost> = Rc::new(listeners.clone());
        let ctrl = FlowEditorController::with_host(config, host);

        let nodes = Rc::new(VecModel::default());
        ctrl.bind_node_model(nodes.clone(), |view| NodeRow {
            id: view.id.as_str().into(),
            title: view.title.as_str().into(),
            x: view.x,
            y: view.y,
            width: view.width,
            height: view.height,
            icon_color: view.icon_color,
            show_output: view.show_output,
        });

        let connectors = Rc::new(VecModel::default());
        ctrl.bind_connector_model(connectors.clone(), connector_row);

        let pending = Rc::new(VecModel::default());
        ctrl.bind_pending_cable_model(pending.clone(), connector_row);

        Self {
            ctrl,
            listeners,
            nodes,
            connectors,
            pending,
        }
    }

    /// Add a node through the sidebar path and move it to `(x, y)`.
    pub fn add_at(&self, kind: &str, x: f32, y: f32) -> NodeId {
        let id = self.ctrl.add_node(kind).expect("known archetype");
        self.ctrl
            .editor()
            .borrow_mut()
            .move_node(&id, Point::new(x, y))
            .expect("node exists");
        self.ctrl.refresh();
        id
    }

    pub fn row(&self, id: &NodeId) -> Option<NodeRow> {
        self.nodes.iter().find(|row| row.id.as_str() == id.as_str())
    }

    pub fn position(&self, id: &NodeId) -> Option<Point> {
        self.ctrl.editor().borrow().node(id).map(|node| node.position())
    }

    pub fn port_id(&self, id: &NodeId) -> Option<NodeId> {
        self.ctrl.editor().borrow().node(id).and_then(|node| node.port_id.clone())
    }

    /// Output port of `id` in canvas coordinates.
    pub fn output_port(&self, id: &NodeId) -> Point {
        let editor = self.ctrl.editor();
        let editor = editor.borrow();
        editor.node(id).expect("node exists").output_port()
    }

    /// Input port of `id` in canvas coordinates.
    pub fn input_port(&self, id: &NodeId) -> Point {
        let editor = self.ctrl.editor();
        let editor = editor.borrow();
        editor.node(id).expect("node exists").input_port()
    }

    /// Full node drag in screen coordinates.
    pub fn drag_node(&self, id: &NodeId, from: Point, to: Point) -> Option<DragOutcome> {
        self.ctrl.node_pointer_down(id.as_str(), from.x, from.y);
        self.ctrl.pointer_moved(to.x, to.y);
        self.ctrl.pointer_released(to.x, to.y)
    }

    /// Full cable drag from the output port of `id` to `to` (screen coordinates).
    pub fn drag_cable(&self, id: &NodeId, to: Point) -> Option<DragOutcome> {
        let start = self.ctrl.viewport().canvas_to_screen(self.output_port(id));
        self.ctrl.cable_pointer_down(id.as_str(), start.x, start.y);
        self.ctrl.pointer_moved(to.x, to.y);
        self.ctrl.pointer_released(to.x, to.y)
    }
}

fn connector_row(c: &slint_flow_editor::Connector) -> ConnectorRow {
    ConnectorRow {
        source: c.source.as_str().into(),
        target: c.target.as_ref().map(|t| t.as_str()).unwrap_or_default().into(),
        commands: c.commands().into(),
    }
}
