//! Relay module: the broadcaster entry point.

use crate::network::{Level, NodeId};

/// Forwards every received pulse, unchanged, to all of its targets.
#[derive(Debug, Clone)]
pub struct Relay {
    pub id: NodeId,
    pub name: String,
    pub targets: Vec<NodeId>,
}

impl Relay {
    pub fn new(id: NodeId, name: String, targets: Vec<NodeId>) -> Self {
        Self {
            id,
            name,
            targets,
        }
    }

    /// Receive a pulse. The source is ignored; the level is always forwarded.
    pub fn receive(&self, _source: NodeId, level: Level) -> Option<Level> {
        Some(level)
    }
}
