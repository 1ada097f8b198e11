//! Flip-flop (toggle) module.
//!
//! A toggle holds a single on/off flag, initially off. High pulses are
//! ignored entirely. A low pulse flips the flag and the toggle emits its
//! new state: high when it turned on, low when it turned off.

use crate::network::{Level, NodeId};

/// Flip-flop module.
#[derive(Debug, Clone)]
pub struct Toggle {
    pub id: NodeId,
    pub name: String,
    pub targets: Vec<NodeId>,
    on: bool,
}

impl Toggle {
    pub fn new(id: NodeId, name: String, targets: Vec<NodeId>) -> Self {
        Self {
            id,
            name,
            targets,
            on: false,
        }
    }

    /// Receive a pulse, returning the level to emit (if any).
    pub fn receive(&mut self, _source: NodeId, level: Level) -> Option<Level> {
        match level {
            Level::High => None,
            Level::Low => {
                self.on = !self.on;
                Some(Level::from(self.on))
            }
        }
    }

    /// Check whether the flag is currently on.
    pub fn is_on(&self) -> bool {
        self.on
    }
}
