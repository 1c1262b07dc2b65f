//! Root composition: owns the node store and the single active drag, and
//! projects both into a renderable [`Scene`].

use crate::catalog::{icon_color, Archetype, Catalog};
use crate::config::EditorConfig;
use crate::drag::{DragArea, DragController, DragOutcome, ImplicitGrab, PointerHost};
use crate::error::{EditorError, Result};
use crate::geometry::{NodeGeometry, Point};
use crate::path::{route_connector, ConnectorPath};
use crate::store::{Node, NodeId, NodeStore};
use crate::viewport::Viewport;
use slint::Color;
use std::rc::Rc;

/// A connector ready to draw, in scene (screen) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub source: NodeId,
    /// `None` for the cable still being dragged.
    pub target: Option<NodeId>,
    pub start: Point,
    pub end: Point,
    pub path: ConnectorPath,
}

impl Connector {
    fn new(source: NodeId, target: Option<NodeId>, start: Point, end: Point) -> Self {
        Self {
            source,
            target,
            start,
            end,
            path: route_connector(start, end),
        }
    }

    pub fn commands(&self) -> String {
        self.path.to_string()
    }
}

/// One node box, positioned in scene coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub id: NodeId,
    pub kind: String,
    pub title: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub icon_color: Color,
    /// Whether the "+" output affordance is drawn.
    pub show_output: bool,
}

/// Everything the UI draws for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub connectors: Vec<Connector>,
    pub nodes: Vec<NodeView>,
    pub pending_cable: Option<Connector>,
}

/// Actions offered on a node's hover toolbar. Not wired to behavior yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAction {
    Delete,
    Power,
    Play,
    More,
}

/// Owner of the node list and the drag session in progress.
pub struct FlowEditor {
    store: NodeStore,
    catalog: Catalog,
    config: EditorConfig,
    host: Rc<dyn PointerHost>,
    drag: Option<DragController>,
}

impl Default for FlowEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl FlowEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_host(config, Rc::new(ImplicitGrab))
    }

    /// Editor whose drag sessions register global pointer listeners on `host`.
    pub fn with_host(config: EditorConfig, host: Rc<dyn PointerHost>) -> Self {
        Self {
            store: NodeStore::new(),
            catalog: Catalog::new(),
            config,
            host,
            drag: None,
        }
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.store.get(id)
    }

    // === Mutation entry points ===

    /// Add a node of catalog type `kind` with its top-left at `position`.
    pub fn add_node(&mut self, kind: &str, position: Point) -> Result<&Node> {
        let archetype = self
            .catalog
            .find(kind)
            .ok_or_else(|| EditorError::UnknownArchetype(kind.to_owned()))?;
        Ok(self.add_archetype(archetype, position))
    }

    pub fn add_archetype(&mut self, archetype: &Archetype, position: Point) -> &Node {
        self.store.add(archetype.kind, position, self.config.node_size)
    }

    pub fn move_node(&mut self, id: &NodeId, position: Point) -> Result<()> {
        self.store.move_node(id, position)
    }

    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> Result<()> {
        self.store.connect(source, target)
    }

    /// Hover toolbar buttons are placeholders.
    pub fn node_action(&mut self, id: &NodeId, action: NodeAction) -> Result<()> {
        if !self.store.contains(id) {
            return Err(EditorError::NodeNotFound(id.clone()));
        }
        tracing::debug!(node = %id, ?action, "node action ignored");
        Ok(())
    }

    // === Pointer input (canvas coordinates) ===

    /// Pointer-down on a node body or its output affordance.
    ///
    /// Any session still open (its pointer-up never arrived) is cancelled
    /// first, so its listeners are released before the new ones attach.
    pub fn begin_drag(&mut self, id: &NodeId, area: DragArea, pointer: Point) -> Result<()> {
        self.cancel_drag();
        let drag = DragController::begin(&self.store, id, area, pointer, self.host.clone())?;
        self.drag = Some(drag);
        Ok(())
    }

    pub fn pointer_move(&mut self, pointer: Point) -> Result<()> {
        match self.drag.as_mut() {
            Some(drag) => drag.pointer_move(&mut self.store, pointer, self.config.snap_radius),
            None => Ok(()),
        }
    }

    /// Pointer released; returns `None` when no drag was active.
    pub fn pointer_up(&mut self, pointer: Point) -> Result<Option<DragOutcome>> {
        match self.drag.take() {
            Some(drag) => drag
                .pointer_up(&mut self.store, pointer, self.config.snap_radius)
                .map(Some),
            None => Ok(None),
        }
    }

    /// Drop the active session without committing anything.
    pub fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            drag.cancel();
        }
    }

    pub fn active_drag(&self) -> Option<&DragController> {
        self.drag.as_ref()
    }

    pub fn is_dragging_cable(&self) -> bool {
        self.drag.as_ref().is_some_and(|d| d.area() == DragArea::Cable)
    }

    // === Rendering ===

    /// Project the store and the drag state through `viewport`.
    ///
    /// Paths are derived fresh on every call.
    pub fn render(&self, viewport: &Viewport) -> Scene {
        let dragging_cable = self.is_dragging_cable();

        let connectors = self
            .store
            .links()
            .map(|(source, target)| {
                Connector::new(
                    source.id.clone(),
                    Some(target.id.clone()),
                    viewport.canvas_to_screen(source.output_port()),
                    viewport.canvas_to_screen(target.input_port()),
                )
            })
            .collect();

        let nodes = self
            .store
            .iter()
            .map(|node| {
                let origin = viewport.canvas_to_screen(node.position());
                NodeView {
                    id: node.id.clone(),
                    kind: node.kind.clone(),
                    title: self
                        .catalog
                        .find(&node.kind)
                        .map(|a| a.title.to_owned())
                        .unwrap_or_else(|| node.kind.clone()),
                    x: origin.x,
                    y: origin.y,
                    width: node.width * viewport.scale,
                    height: node.height * viewport.scale,
                    icon_color: icon_color(&node.kind),
                    show_output: node.port_id.is_none() && !dragging_cable,
                }
            })
            .collect();

        let pending_cable = self.drag.as_ref().and_then(|drag| {
            let end = drag.cable_endpoint()?;
            let source = self.store.get(drag.node_id())?;
            Some(Connector::new(
                source.id.clone(),
                None,
                viewport.canvas_to_screen(source.output_port()),
                viewport.canvas_to_screen(end),
            ))
        });

        Scene {
            connectors,
            nodes,
            pending_cable,
        }
    }
}
