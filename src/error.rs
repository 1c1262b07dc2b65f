use crate::store::NodeId;
use thiserror::Error;

/// Reasons an editor operation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),
    #[error("node {0} already exists")]
    DuplicateNode(NodeId),
    #[error("cannot connect node {0} to itself")]
    SelfConnection(NodeId),
    #[error("node {source_id} is already connected to {target_id}")]
    AlreadyConnected { source_id: NodeId, target_id: NodeId },
    #[error("unknown node type {0:?}")]
    UnknownArchetype(String),
}

pub type Result<T, E = EditorError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let a = NodeId::from("a");
        let b = NodeId::from("b");
        assert_eq!(EditorError::NodeNotFound(a.clone()).to_string(), "node a not found");
        assert_eq!(
            EditorError::SelfConnection(a.clone()).to_string(),
            "cannot connect node a to itself"
        );
        assert_eq!(
            EditorError::AlreadyConnected { source_id: a, target_id: b }.to_string(),
            "node a is already connected to b"
        );
        assert_eq!(
            EditorError::UnknownArchetype("nope".into()).to_string(),
            "unknown node type \"nope\""
        );
    }
}
