//! Module models for pulse simulation.
//!
//! This module provides the three module behaviors:
//! - Relay: the `broadcaster` entry point
//! - Toggle: `%` flip-flops
//! - Gate: `&` conjunctions
//!
//! Each variant consumes one pulse and reports the level (if any) it emits
//! to every one of its targets, in target-list order.

mod gate;
mod relay;
mod toggle;

pub use gate::Gate;
pub use relay::Relay;
pub use toggle::Toggle;

use crate::dsl::{ModuleDef, ModuleKind};
use crate::network::{Level, NodeId, Pulse};

/// A network module.
#[derive(Debug, Clone)]
pub enum Module {
    Relay(Relay),
    Toggle(Toggle),
    Gate(Gate),
}

impl Module {
    /// Create a module from a DSL definition with resolved targets.
    pub fn from_def(id: NodeId, def: &ModuleDef, targets: Vec<NodeId>) -> Self {
        let name = def.name.clone();
        match def.kind {
            ModuleKind::Relay => Module::Relay(Relay::new(id, name, targets)),
            ModuleKind::Toggle => Module::Toggle(Toggle::new(id, name, targets)),
            ModuleKind::Gate => Module::Gate(Gate::new(id, name, targets)),
        }
    }

    pub fn kind(&self) -> ModuleKind {
        match self {
            Module::Relay(_) => ModuleKind::Relay,
            Module::Toggle(_) => ModuleKind::Toggle,
            Module::Gate(_) => ModuleKind::Gate,
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Module::Relay(r) => r.id,
            Module::Toggle(t) => t.id,
            Module::Gate(g) => g.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Module::Relay(r) => &r.name,
            Module::Toggle(t) => &t.name,
            Module::Gate(g) => &g.name,
        }
    }

    pub fn targets(&self) -> &[NodeId] {
        match self {
            Module::Relay(r) => &r.targets,
            Module::Toggle(t) => &t.targets,
            Module::Gate(g) => &g.targets,
        }
    }

    /// Deliver a pulse, returning the level this module emits in response.
    pub fn receive(&mut self, source: NodeId, level: Level) -> Option<Level> {
        match self {
            Module::Relay(r) => r.receive(source, level),
            Module::Toggle(t) => t.receive(source, level),
            Module::Gate(g) => g.receive(source, level),
        }
    }

    /// Deliver a pulse and build the outgoing pulses, one per target in
    /// target-list order.
    pub fn fire(&mut self, source: NodeId, level: Level) -> Vec<Pulse> {
        match self.receive(source, level) {
            Some(out) => {
                let id = self.id();
                self.targets()
                    .iter()
                    .map(|&target| Pulse::new(id, target, out))
                    .collect()
            }
            None => Vec::new(),
        }
    }
}
