//! # Slint Flow Editor
//!
//! Core of an n8n-style workflow builder for Slint: a canvas of fixed-size
//! nodes that can be dragged around and wired output-to-input with cables.
//!
//! ## Features
//!
//! - **Connector routing** - S-curves for forward links, rounded orthogonal
//!   routes for backward ones, always with an arrowhead
//! - **Drag controller** - node moves and cable drags with a 30px snap to
//!   input ports; listener registration is released on every exit path
//! - **Node store** - id-indexed, insertion-ordered, validated mutations
//! - **Catalog** - the sidebar's archetype list with search
//! - **Zoom and pan** - Ctrl + wheel, Space + drag, fit and reset
//!
//! ## Quick Start
//!
//! ```ignore
//! use slint_flow_editor::FlowEditorController;
//!
//! let ctrl = FlowEditorController::new();
//! ctrl.bind_node_model(nodes.clone(), |view| NodeRow { /* ... */ });
//! ctrl.bind_connector_model(connectors.clone(), |c| ConnectorRow {
//!     commands: c.commands().into(),
//! });
//! window.on_pointer_moved(ctrl.pointer_moved_callback());
//! ```
//!
//! The plain-Rust pieces ([`FlowEditor`], [`NodeStore`], [`route_connector`])
//! work without a window and are what the tests drive directly.

pub mod catalog;
pub mod compositor;
pub mod config;
pub mod controller;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod path;
pub mod store;
pub mod sync;
pub mod viewport;

pub use catalog::{icon_color, Archetype, Catalog, Icon, WORKFLOW_STEPS};
pub use compositor::{Connector, FlowEditor, NodeAction, NodeView, Scene};
pub use config::EditorConfig;
pub use controller::FlowEditorController;
pub use drag::{DragArea, DragController, DragOutcome, DragSession, ImplicitGrab, ListenerGuard, PointerHost};
pub use error::{EditorError, Result};
pub use geometry::{find_port_near, NodeGeometry, Point, Size};
pub use grid::{generate_grid_commands, grid_cell_commands};
pub use path::{generate_connector_path, route_connector, ConnectorPath, ConnectorRoute, PathCommand};
pub use store::{Node, NodeId, NodeStore};
pub use sync::SceneModels;
pub use viewport::{CanvasKey, CanvasMode, CursorShape, PanZoomController, Viewport};
