//! Node records and the id-indexed store that owns them.

use crate::error::{EditorError, Result};
use crate::geometry::{NodeGeometry, Point, Size};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Opaque node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// Fresh random (v4 UUID) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One placed workflow step.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Archetype tag, e.g. `"chat-message"`.
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Node this node's output is wired to.
    pub port_id: Option<NodeId>,
}

impl Node {
    pub fn new(id: NodeId, kind: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            id,
            kind: kind.into(),
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
            port_id: None,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_connected(&self) -> bool {
        self.port_id.is_some()
    }
}

impl NodeGeometry for Node {
    fn rect(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.width, self.height)
    }
}

/// Ordered collection of nodes with O(1) lookup by id.
///
/// Insertion order is render order. There is no removal path, so positions in
/// `nodes` stay valid for the index.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    fn get_mut(&mut self, id: &NodeId) -> Result<&mut Node> {
        match self.index.get(id) {
            Some(&i) => Ok(&mut self.nodes[i]),
            None => Err(EditorError::NodeNotFound(id.clone())),
        }
    }

    /// Nodes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Append an existing record. Its `port_id`, if any, must already resolve.
    pub fn insert(&mut self, node: Node) -> Result<&Node> {
        if self.index.contains_key(&node.id) {
            return Err(EditorError::DuplicateNode(node.id));
        }
        if let Some(target) = &node.port_id {
            if *target == node.id {
                return Err(EditorError::SelfConnection(node.id));
            }
            if !self.index.contains_key(target) {
                return Err(EditorError::NodeNotFound(target.clone()));
            }
        }

        Ok(self.append(node))
    }

    /// Create a node with a fresh id and append it.
    pub fn add(&mut self, kind: impl Into<String>, position: Point, size: Size) -> &Node {
        let mut id = NodeId::generate();
        while self.index.contains_key(&id) {
            id = NodeId::generate();
        }
        self.append(Node::new(id, kind, position, size))
    }

    fn append(&mut self, node: Node) -> &Node {
        tracing::debug!(id = %node.id, kind = %node.kind, x = node.x, y = node.y, "node added");
        let slot = self.nodes.len();
        self.index.insert(node.id.clone(), slot);
        self.nodes.push(node);
        &self.nodes[slot]
    }

    /// Place a node's top-left corner at `position`.
    pub fn move_node(&mut self, id: &NodeId, position: Point) -> Result<()> {
        let node = self.get_mut(id)?;
        node.x = position.x;
        node.y = position.y;
        tracing::trace!(id = %id, x = position.x, y = position.y, "node moved");
        Ok(())
    }

    /// Wire `source`'s output to `target`'s input.
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> Result<()> {
        if source == target {
            return Err(EditorError::SelfConnection(source.clone()));
        }
        if !self.contains(target) {
            return Err(EditorError::NodeNotFound(target.clone()));
        }
        let node = self.get_mut(source)?;
        if let Some(existing) = &node.port_id {
            return Err(EditorError::AlreadyConnected {
                source_id: source.clone(),
                target_id: existing.clone(),
            });
        }
        node.port_id = Some(target.clone());
        tracing::debug!(source = %source, target = %target, "nodes connected");
        Ok(())
    }

    /// The node `node` is wired to, or `None` when unset or dangling.
    pub fn linked_target(&self, node: &Node) -> Option<&Node> {
        node.port_id.as_ref().and_then(|id| self.get(id))
    }

    /// Every resolvable (source, target) pair in insertion order.
    pub fn links(&self) -> impl Iterator<Item = (&Node, &Node)> + '_ {
        self.nodes
            .iter()
            .filter_map(move |node| self.linked_target(node).map(|target| (node, target)))
    }
}

impl<'a> IntoIterator for &'a NodeStore {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
