//! High-level controller wiring the flow editor into a Slint window.
//!
//! [`FlowEditorController`] bundles the [`FlowEditor`], the zoom/pan state and
//! the bound models behind one cloneable handle, and hands out ready-made
//! callbacks.
//!
//! # Example
//!
//! ```ignore
//! use slint_flow_editor::FlowEditorController;
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = FlowEditorController::new();
//!
//!     let nodes = Rc::new(VecModel::<NodeRow>::default());
//!     ctrl.bind_node_model(nodes.clone(), |view| NodeRow { /* ... */ });
//!     window.set_nodes(ModelRc::from(nodes));
//!
//!     window.on_node_pointer_down(ctrl.node_pointer_down_callback());
//!     window.on_cable_pointer_down(ctrl.cable_pointer_down_callback());
//!     window.on_pointer_moved(ctrl.pointer_moved_callback());
//!     window.on_pointer_released(ctrl.pointer_released_callback());
//!     window.on_add_node(ctrl.add_node_callback());
//!
//!     window.run().unwrap();
//! }
//! ```

use crate::catalog::Archetype;
use crate::compositor::{Connector, FlowEditor, NodeAction, NodeView, Scene};
use crate::config::EditorConfig;
use crate::drag::{DragArea, DragOutcome, PointerHost};
use crate::geometry::{Point, Size};
use crate::grid::generate_grid_commands;
use crate::store::{Node, NodeId};
use crate::sync::SceneModels;
use crate::viewport::{CanvasKey, CanvasMode, CursorShape, PanZoomController, Viewport};
use slint::{SharedString, VecModel};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Controller that owns the editor state and provides callback implementations.
///
/// Pointer coordinates passed in are in screen (window) space; they are
/// mapped to canvas space through the current [`Viewport`] before they reach
/// the drag logic. Every mutation re-renders the scene into the bound models.
///
/// Clone this controller to share it across callbacks.
#[derive(Clone)]
pub struct FlowEditorController {
    editor: Rc<RefCell<FlowEditor>>,
    canvas: Rc<RefCell<PanZoomController>>,
    models: Rc<RefCell<SceneModels>>,
    container: Rc<Cell<Size>>,
}

impl Default for FlowEditorController {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowEditorController {
    /// Create a controller with default settings and a 1280×720 container.
    pub fn new() -> Self {
        Self::with_editor(FlowEditor::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self::with_editor(FlowEditor::new(config))
    }

    /// Drag sessions register their global pointer listeners on `host`.
    pub fn with_host(config: EditorConfig, host: Rc<dyn PointerHost>) -> Self {
        Self::with_editor(FlowEditor::with_host(config, host))
    }

    fn with_editor(editor: FlowEditor) -> Self {
        Self {
            editor: Rc::new(RefCell::new(editor)),
            canvas: Rc::new(RefCell::new(PanZoomController::new())),
            models: Rc::new(RefCell::new(SceneModels::new())),
            container: Rc::new(Cell::new(Size::new(1280.0, 720.0))),
        }
    }

    /// Shared access to the editor, e.g. to seed nodes.
    pub fn editor(&self) -> Rc<RefCell<FlowEditor>> {
        self.editor.clone()
    }

    pub fn viewport(&self) -> Viewport {
        *self.canvas.borrow().viewport()
    }

    pub fn mode(&self) -> CanvasMode {
        self.canvas.borrow().mode()
    }

    pub fn cursor(&self) -> CursorShape {
        self.canvas.borrow().cursor()
    }

    pub fn scale_label(&self) -> SharedString {
        self.viewport().scale_label().into()
    }

    pub fn container_size(&self) -> Size {
        self.container.get()
    }

    /// Size of the visible canvas area; used to place new nodes and for the
    /// zoom buttons.
    pub fn set_container_size(&self, width: f32, height: f32) {
        self.container.set(Size::new(width, height));
    }

    // === Model binding ===

    pub fn bind_node_model<R, F>(&self, model: Rc<VecModel<R>>, constructor: F)
    where
        R: Clone + 'static,
        F: Fn(&NodeView) -> R + 'static,
    {
        self.models.borrow_mut().bind_nodes(model, constructor);
        self.refresh();
    }

    pub fn bind_connector_model<R, F>(&self, model: Rc<VecModel<R>>, constructor: F)
    where
        R: Clone + 'static,
        F: Fn(&Connector) -> R + 'static,
    {
        self.models.borrow_mut().bind_connectors(model, constructor);
        self.refresh();
    }

    /// Bind a model that holds the in-flight cable (zero or one row).
    pub fn bind_pending_cable_model<R, F>(&self, model: Rc<VecModel<R>>, constructor: F)
    where
        R: Clone + 'static,
        F: Fn(&Connector) -> R + 'static,
    {
        self.models.borrow_mut().bind_pending_cable(model, constructor);
        self.refresh();
    }

    /// Bind the sidebar list; it is filled with the full catalog right away.
    pub fn bind_catalog_model<R, F>(&self, model: Rc<VecModel<R>>, constructor: F)
    where
        R: Clone + 'static,
        F: Fn(&Archetype) -> R + 'static,
    {
        self.models.borrow_mut().bind_catalog(model, constructor);
        self.search("");
    }

    /// Render the scene and push it into every bound model.
    pub fn refresh(&self) {
        let scene = self.scene();
        self.models.borrow().sync(&scene);
    }

    pub fn scene(&self) -> Scene {
        self.editor.borrow().render(&self.viewport())
    }

    // === Direct handlers ===

    /// Add a node of catalog type `kind` with its top-left at the center of
    /// the visible area.
    pub fn add_node(&self, kind: &str) -> Option<NodeId> {
        let center = self.viewport().screen_to_canvas(self.container.get().center());
        let added = self
            .editor
            .borrow_mut()
            .add_node(kind, center)
            .map(|node| node.id.clone());
        match added {
            Ok(id) => {
                self.refresh();
                Some(id)
            }
            Err(err) => {
                tracing::warn!(%err, "add node rejected");
                None
            }
        }
    }

    /// Filter the bound sidebar model.
    pub fn search(&self, query: &str) {
        let catalog = *self.editor.borrow().catalog();
        self.models.borrow().sync_catalog(&catalog.search(query));
    }

    /// Pointer-down on a node body; starts a move, or a pan while Space is held.
    pub fn node_pointer_down(&self, id: &str, x: f32, y: f32) {
        self.pointer_down(id, DragArea::Node, Point::new(x, y));
    }

    /// Pointer-down on a node's output affordance; starts a cable.
    ///
    /// Returns false when nothing started. A press on an already wired node
    /// lands on a hidden affordance and is dropped quietly.
    pub fn cable_pointer_down(&self, id: &str, x: f32, y: f32) -> bool {
        self.pointer_down(id, DragArea::Cable, Point::new(x, y))
    }

    /// Pointer-down on the empty canvas; only meaningful for panning.
    pub fn canvas_pointer_down(&self, x: f32, y: f32) -> bool {
        self.canvas.borrow_mut().pointer_down(Point::new(x, y))
    }

    fn pointer_down(&self, id: &str, area: DragArea, screen: Point) -> bool {
        if self.canvas.borrow_mut().pointer_down(screen) {
            return true;
        }
        let id = NodeId::from(id);
        if area == DragArea::Cable && self.editor.borrow().node(&id).is_some_and(Node::is_connected) {
            tracing::debug!(node = %id, "output already wired, press ignored");
            return false;
        }
        let pointer = self.viewport().screen_to_canvas(screen);
        let started = self.editor.borrow_mut().begin_drag(&id, area, pointer);
        if let Err(err) = &started {
            tracing::warn!(%err, node = %id, ?area, "drag refused");
        }
        self.refresh();
        started.is_ok()
    }

    pub fn pointer_moved(&self, x: f32, y: f32) {
        let screen = Point::new(x, y);
        if !self.canvas.borrow_mut().pointer_move(screen) {
            let pointer = self.viewport().screen_to_canvas(screen);
            if let Err(err) = self.editor.borrow_mut().pointer_move(pointer) {
                tracing::warn!(%err, "drag move failed");
            }
        }
        self.refresh();
    }

    pub fn pointer_released(&self, x: f32, y: f32) -> Option<DragOutcome> {
        self.canvas.borrow_mut().pointer_up();
        let pointer = self.viewport().screen_to_canvas(Point::new(x, y));
        let result = self.editor.borrow_mut().pointer_up(pointer);
        self.refresh();
        match result {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(%err, "drag release failed");
                None
            }
        }
    }

    /// Pointer capture was lost: drop the drag and any pan.
    pub fn cancel_drag(&self) {
        self.canvas.borrow_mut().pointer_up();
        self.editor.borrow_mut().cancel_drag();
        self.refresh();
    }

    /// Wheel over the canvas; zooms only while Control is held.
    pub fn wheel(&self, x: f32, y: f32, delta_y: f32) -> bool {
        let consumed = self.canvas.borrow_mut().wheel(Point::new(x, y), delta_y);
        if consumed {
            self.refresh();
        }
        consumed
    }

    pub fn key_pressed(&self, text: &str) -> bool {
        self.canvas.borrow_mut().key_down(CanvasKey::from_key_text(text))
    }

    pub fn key_released(&self, text: &str) -> bool {
        let key = CanvasKey::from_key_text(text);
        self.canvas.borrow_mut().key_up(key);
        key != CanvasKey::Other
    }

    pub fn zoom_in(&self) {
        let container = self.container.get();
        self.canvas.borrow_mut().viewport_mut().zoom_in(container);
        self.refresh();
    }

    pub fn zoom_out(&self) {
        let container = self.container.get();
        self.canvas.borrow_mut().viewport_mut().zoom_out(container);
        self.refresh();
    }

    pub fn reset_view(&self) {
        let container = self.container.get();
        let content = self.editor.borrow().config().content_size;
        self.canvas.borrow_mut().viewport_mut().reset(container, content);
        self.refresh();
    }

    pub fn fit_to_screen(&self) {
        let container = self.container.get();
        let (content, padding) = {
            let editor = self.editor.borrow();
            (editor.config().content_size, editor.config().fit_padding)
        };
        self.canvas
            .borrow_mut()
            .viewport_mut()
            .fit_to_screen(container, content, padding);
        self.refresh();
    }

    pub fn node_action(&self, id: &str, action: NodeAction) {
        if let Err(err) = self.editor.borrow_mut().node_action(&NodeId::from(id), action) {
            tracing::warn!(%err, ?action, "node action rejected");
        }
    }

    /// Grid commands for the current viewport.
    pub fn grid_commands(&self, width: f32, height: f32) -> SharedString {
        let spacing = self.editor.borrow().config().grid_spacing;
        generate_grid_commands(width, height, &self.viewport(), spacing).into()
    }

    // === Callback factories ===

    /// Returns a callback for `node-pointer-down(id, x, y)`.
    pub fn node_pointer_down_callback(&self) -> impl Fn(SharedString, f32, f32) {
        let ctrl = self.clone();
        move |id, x, y| ctrl.node_pointer_down(&id, x, y)
    }

    /// Returns a callback for `cable-pointer-down(id, x, y)`.
    pub fn cable_pointer_down_callback(&self) -> impl Fn(SharedString, f32, f32) {
        let ctrl = self.clone();
        move |id, x, y| {
            ctrl.cable_pointer_down(&id, x, y);
        }
    }

    pub fn pointer_moved_callback(&self) -> impl Fn(f32, f32) {
        let ctrl = self.clone();
        move |x, y| ctrl.pointer_moved(x, y)
    }

    pub fn pointer_released_callback(&self) -> impl Fn(f32, f32) {
        let ctrl = self.clone();
        move |x, y| {
            ctrl.pointer_released(x, y);
        }
    }

    /// Returns a callback for `add-node(kind)`.
    pub fn add_node_callback(&self) -> impl Fn(SharedString) {
        let ctrl = self.clone();
        move |kind| {
            ctrl.add_node(&kind);
        }
    }

    pub fn search_callback(&self) -> impl Fn(SharedString) {
        let ctrl = self.clone();
        move |query| ctrl.search(&query)
    }

    /// Returns a callback for `wheel(x, y, delta-y) -> bool`.
    pub fn wheel_callback(&self) -> impl Fn(f32, f32, f32) -> bool {
        let ctrl = self.clone();
        move |x, y, delta_y| ctrl.wheel(x, y, delta_y)
    }

    pub fn key_pressed_callback(&self) -> impl Fn(SharedString) -> bool {
        let ctrl = self.clone();
        move |text| ctrl.key_pressed(&text)
    }

    pub fn key_released_callback(&self) -> impl Fn(SharedString) -> bool {
        let ctrl = self.clone();
        move |text| ctrl.key_released(&text)
    }
}
