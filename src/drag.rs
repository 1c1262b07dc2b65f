//! Per-node pointer interaction: moving a node or dragging a cable out of its
//! output port.
//!
//! A drag starts on pointer-down and ends on pointer-up. While it is active
//! the host routes global pointer-move/up events to it; that routing is
//! acquired through [`PointerHost::attach`] and released by the
//! [`ListenerGuard`] when the session is dropped, whichever way the drag ends.

use crate::error::{EditorError, Result};
use crate::geometry::{find_port_near, NodeGeometry, Point};
use crate::store::{Node, NodeId, NodeStore};
use std::rc::Rc;

/// Where the pointer went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragArea {
    /// Node body: move the node.
    Node,
    /// Output port affordance: drag a new cable.
    Cable,
}

/// Receives global pointer listener registration for one drag session.
pub trait PointerHost {
    fn attach(&self, owner: &NodeId);
    fn detach(&self, owner: &NodeId);
}

/// Host for toolkits that already deliver move/up events to the pressed
/// element (implicit pointer grab), so nothing needs registering.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImplicitGrab;

impl PointerHost for ImplicitGrab {
    fn attach(&self, _owner: &NodeId) {}
    fn detach(&self, _owner: &NodeId) {}
}

/// Keeps the pointer listeners of a drag session registered until dropped.
pub struct ListenerGuard {
    host: Rc<dyn PointerHost>,
    owner: NodeId,
}

impl ListenerGuard {
    pub fn acquire(host: Rc<dyn PointerHost>, owner: NodeId) -> Self {
        host.attach(&owner);
        Self { host, owner }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.host.detach(&self.owner);
    }
}

/// Ephemeral state of the interaction in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub area: DragArea,
    /// Pointer position at pointer-down.
    pub origin: Point,
    /// Node's top-left at pointer-down.
    pub anchor: Point,
    /// Live cable endpoint (snapped or raw cursor), or the last cursor seen
    /// for node drags.
    pub cursor: Point,
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    Moved { id: NodeId, position: Point },
    Connected { source: NodeId, target: NodeId },
    /// Cable released away from every input port.
    Discarded,
}

/// Drag state machine for one node.
pub struct DragController {
    node_id: NodeId,
    session: DragSession,
    _listeners: ListenerGuard,
}

impl std::fmt::Debug for DragController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("node_id", &self.node_id)
            .field("session", &self.session)
            .finish()
    }
}

impl DragController {
    /// Pointer-down on `node_id` in `area`.
    ///
    /// Cable drags are refused for nodes whose output is already wired.
    pub fn begin(
        store: &NodeStore,
        node_id: &NodeId,
        area: DragArea,
        pointer: Point,
        host: Rc<dyn PointerHost>,
    ) -> Result<Self> {
        let node = store
            .get(node_id)
            .ok_or_else(|| EditorError::NodeNotFound(node_id.clone()))?;

        if area == DragArea::Cable {
            if let Some(target) = &node.port_id {
                return Err(EditorError::AlreadyConnected {
                    source_id: node_id.clone(),
                    target_id: target.clone(),
                });
            }
        }

        tracing::debug!(node = %node_id, ?area, x = pointer.x, y = pointer.y, "drag started");
        Ok(Self {
            node_id: node_id.clone(),
            session: DragSession {
                area,
                origin: pointer,
                anchor: node.position(),
                cursor: pointer,
            },
            _listeners: ListenerGuard::acquire(host, node_id.clone()),
        })
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn area(&self) -> DragArea {
        self.session.area
    }

    /// Live endpoint of the cable being dragged.
    pub fn cable_endpoint(&self) -> Option<Point> {
        (self.session.area == DragArea::Cable).then_some(self.session.cursor)
    }

    /// Another node whose input port lies within `snap_radius` of `cursor`.
    pub fn snap_target<'a>(&self, store: &'a NodeStore, cursor: Point, snap_radius: f32) -> Option<&'a Node> {
        find_port_near(cursor, store, |node: &Node| node.id == self.node_id, snap_radius)
    }

    /// Pointer moved while the session is active.
    pub fn pointer_move(&mut self, store: &mut NodeStore, pointer: Point, snap_radius: f32) -> Result<()> {
        match self.session.area {
            DragArea::Node => {
                self.session.cursor = pointer;
                // Always recomputed from the anchor so rounding never accumulates.
                let position = self.session.anchor + (pointer - self.session.origin);
                store.move_node(&self.node_id, position)
            }
            DragArea::Cable => {
                self.session.cursor = match self.snap_target(store, pointer, snap_radius) {
                    Some(target) => target.input_port(),
                    None => pointer,
                };
                tracing::trace!(node = %self.node_id, x = self.session.cursor.x, y = self.session.cursor.y, "cable moved");
                Ok(())
            }
        }
    }

    /// Pointer released. Consumes the session, releasing its listeners.
    pub fn pointer_up(self, store: &mut NodeStore, pointer: Point, snap_radius: f32) -> Result<DragOutcome> {
        let outcome = match self.session.area {
            DragArea::Node => {
                let position = store
                    .get(&self.node_id)
                    .map(Node::position)
                    .ok_or_else(|| EditorError::NodeNotFound(self.node_id.clone()))?;
                DragOutcome::Moved {
                    id: self.node_id.clone(),
                    position,
                }
            }
            DragArea::Cable => {
                let target = self
                    .snap_target(store, pointer, snap_radius)
                    .map(|node| node.id.clone());
                match target {
                    Some(target) => {
                        store.connect(&self.node_id, &target)?;
                        DragOutcome::Connected {
                            source: self.node_id.clone(),
                            target,
                        }
                    }
                    None => DragOutcome::Discarded,
                }
            }
        };
        tracing::debug!(node = %self.node_id, ?outcome, "drag finished");
        Ok(outcome)
    }

    /// Abandon the session without committing (e.g. pointer capture lost).
    pub fn cancel(self) {
        tracing::debug!(node = %self.node_id, "drag cancelled");
    }
}
