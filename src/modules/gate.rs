//! Conjunction (gate) module.
//!
//! A gate remembers the last level received from each of its inputs, all
//! initially low. On every pulse it records the new level for that input and
//! then emits low if every remembered level is high, high otherwise.
//!
//! The set of inputs is fixed when the network is built: it is exactly the
//! set of modules whose target lists name this gate.

use std::collections::BTreeMap;

use crate::network::{Level, NodeId};

/// Conjunction module.
#[derive(Debug, Clone)]
pub struct Gate {
    pub id: NodeId,
    pub name: String,
    pub targets: Vec<NodeId>,
    /// Last level received from each input
    memory: BTreeMap<NodeId, Level>,
}

impl Gate {
    pub fn new(id: NodeId, name: String, targets: Vec<NodeId>) -> Self {
        Self {
            id,
            name,
            targets,
            memory: BTreeMap::new(),
        }
    }

    /// Register an input, remembered as low until it sends a pulse.
    pub fn add_input(&mut self, source: NodeId) {
        self.memory.entry(source).or_insert(Level::Low);
    }

    /// Receive a pulse, returning the level to emit.
    ///
    /// Gates emit on every pulse, regardless of its level.
    pub fn receive(&mut self, source: NodeId, level: Level) -> Option<Level> {
        self.memory.insert(source, level);
        Some(if self.all_high() { Level::Low } else { Level::High })
    }

    /// Check whether every remembered input is high.
    pub fn all_high(&self) -> bool {
        self.memory.values().all(Level::is_high)
    }

    /// Inputs in id order.
    pub fn inputs(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.memory.keys().copied()
    }

    /// Last level received from an input, if it is one.
    pub fn input_level(&self, source: NodeId) -> Option<Level> {
        self.memory.get(&source).copied()
    }
}
