//! Module network structure.

use std::collections::HashMap;

use tracing::debug;

use super::types::NodeId;
use crate::dsl::{self, ModuleKind, NetworkAst};
use crate::error::{PulseNetError, Result};
use crate::modules::Module;
use crate::{BROADCASTER, BUTTON};

/// A module network ready for simulation.
///
/// Topology is fixed once built; only module state changes while pulses
/// propagate. Clone the network to start an independent run from the same
/// initial state.
#[derive(Debug, Clone)]
pub struct Network {
    /// Modules indexed by node id (`None` for the button and for sinks)
    pub modules: Vec<Option<Module>>,

    /// Mapping from names to node IDs
    pub node_map: HashMap<String, NodeId>,

    /// Reverse mapping from node IDs to names
    pub node_names: Vec<String>,

    /// The relay that receives each press
    pub broadcaster: NodeId,
}

impl Network {
    /// Parse, build and validate a network from module-list text.
    pub fn parse(input: &str) -> Result<Self> {
        let network = Self::from_ast(dsl::parse(input)?)?;
        super::validate_network(&network)?;
        Ok(network)
    }

    /// Build a network from a parsed AST.
    pub fn from_ast(ast: NetworkAst) -> Result<Self> {
        let mut node_map = HashMap::new();
        let mut node_names = vec![BUTTON.to_string()];

        // Declared modules first, so their ids follow declaration order
        for def in &ast.modules {
            if node_map.contains_key(&def.name) {
                return Err(PulseNetError::DuplicateModule {
                    name: def.name.clone(),
                });
            }
            node_map.insert(def.name.clone(), NodeId(node_names.len()));
            node_names.push(def.name.clone());
        }

        // Then sinks: targets without a definition
        for def in &ast.modules {
            for target in &def.targets {
                if !node_map.contains_key(target) {
                    node_map.insert(target.clone(), NodeId(node_names.len()));
                    node_names.push(target.clone());
                }
            }
        }

        let broadcaster = ast
            .find(BROADCASTER)
            .map(|def| node_map[&def.name])
            .ok_or(PulseNetError::MissingBroadcaster)?;

        let mut modules: Vec<Option<Module>> = vec![None; node_names.len()];
        for def in &ast.modules {
            let id = node_map[&def.name];
            let targets = def.targets.iter().map(|t| node_map[t]).collect();
            modules[id.0] = Some(Module::from_def(id, def, targets));
        }

        // Fan-in pass: every gate remembers each module that targets it
        let edges: Vec<(NodeId, NodeId)> = modules
            .iter()
            .flatten()
            .flat_map(|m| m.targets().iter().map(move |&t| (m.id(), t)))
            .collect();
        for (source, target) in edges {
            if let Some(Module::Gate(gate)) = &mut modules[target.0] {
                gate.add_input(source);
            }
        }

        debug!(
            modules = ast.modules.len(),
            sinks = node_names.len() - 1 - ast.modules.len(),
            "built module network"
        );

        Ok(Network {
            modules,
            node_map,
            node_names,
            broadcaster,
        })
    }

    /// Find a node ID by name.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.node_map.get(name).copied()
    }

    /// Get the name of a node.
    pub fn node_name(&self, node: NodeId) -> &str {
        &self.node_names[node.0]
    }

    /// Get the module at a node, or `None` for the button and sinks.
    pub fn module(&self, node: NodeId) -> Option<&Module> {
        self.modules.get(node.0).and_then(Option::as_ref)
    }

    pub fn module_mut(&mut self, node: NodeId) -> Option<&mut Module> {
        self.modules.get_mut(node.0).and_then(Option::as_mut)
    }

    /// Look up a module by name.
    pub fn module_by_name(&self, name: &str) -> Option<&Module> {
        self.find_node(name).and_then(|id| self.module(id))
    }

    /// Iterate over all declared modules in declaration order.
    pub fn iter_modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter().flatten()
    }

    /// Number of declared modules.
    pub fn module_count(&self) -> usize {
        self.iter_modules().count()
    }

    /// Names that are targeted but never declared.
    pub fn sinks(&self) -> Vec<&str> {
        (1..self.node_names.len())
            .filter(|&i| self.modules[i].is_none())
            .map(|i| self.node_names[i].as_str())
            .collect()
    }

    /// Modules whose target list names `node`, in declaration order.
    pub fn predecessors(&self, node: NodeId) -> Vec<NodeId> {
        self.iter_modules()
            .filter(|m| m.targets().contains(&node))
            .map(Module::id)
            .collect()
    }

    /// Resolve the module whose inputs decide when `name` first fires.
    ///
    /// A declared module resolves to itself. A sink fed by exactly one gate
    /// resolves to that gate.
    pub fn resolve_terminal(&self, name: &str) -> Result<NodeId> {
        let id = self
            .find_node(name)
            .ok_or_else(|| PulseNetError::not_found(name))?;

        if self.module(id).is_some() {
            return Ok(id);
        }

        match self.predecessors(id).as_slice() {
            [] => Err(PulseNetError::NoPredecessors {
                name: name.to_string(),
            }),
            [feeder] if self.module(*feeder).map(Module::kind) == Some(ModuleKind::Gate) => {
                Ok(*feeder)
            }
            feeders => Err(PulseNetError::InvalidTopology {
                message: format!(
                    "sink '{}' is fed by {} module(s) that are not a single conjunction; name the terminal module directly",
                    name,
                    feeders.len()
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Level;

    const EXAMPLE: &str = "broadcaster -> a, b\n%a -> inv\n%b -> con\n&con -> output\n&inv -> con\n";

    #[test]
    fn test_ids_follow_declaration_then_sinks() {
        let net = Network::parse(EXAMPLE).unwrap();
        assert_eq!(net.node_name(NodeId::BUTTON), BUTTON);
        assert_eq!(net.find_node("broadcaster"), Some(NodeId(1)));
        assert_eq!(net.find_node("inv"), Some(NodeId(5)));
        assert_eq!(net.find_node("output"), Some(NodeId(6)));
        assert_eq!(net.broadcaster, NodeId(1));
        assert_eq!(net.module_count(), 5);
        assert_eq!(net.sinks(), vec!["output"]);
    }

    #[test]
    fn test_gate_fan_in_matches_edges() {
        let net = Network::parse(EXAMPLE).unwrap();
        let con = net.find_node("con").unwrap();
        let Some(Module::Gate(gate)) = net.module(con) else {
            panic!("con should be a gate");
        };
        let b = net.find_node("b").unwrap();
        let inv = net.find_node("inv").unwrap();
        assert_eq!(gate.inputs().collect::<Vec<_>>(), vec![b, inv]);
        assert_eq!(gate.input_level(b), Some(Level::Low));
        assert_eq!(net.predecessors(con), vec![b, inv]);
    }

    #[test]
    fn test_duplicate_module() {
        let err = Network::parse("broadcaster -> a\n%a -> b\n&a -> c").unwrap_err();
        assert!(matches!(err, PulseNetError::DuplicateModule { name } if name == "a"));
    }

    #[test]
    fn test_missing_broadcaster() {
        let err = Network::parse("%a -> broadcaster").unwrap_err();
        assert!(matches!(err, PulseNetError::MissingBroadcaster));
    }

    #[test]
    fn test_resolve_terminal() {
        let net = Network::parse("broadcaster -> a\n%a -> con\n&con -> rx\n%x -> y, y2\n%z -> y").unwrap();
        let con = net.find_node("con").unwrap();
        assert_eq!(net.resolve_terminal("rx").unwrap(), con);
        assert_eq!(net.resolve_terminal("con").unwrap(), con);
        assert!(matches!(
            net.resolve_terminal("nowhere"),
            Err(PulseNetError::ModuleNotFound { .. })
        ));
        assert!(matches!(
            net.resolve_terminal("y"),
            Err(PulseNetError::InvalidTopology { .. })
        ));
    }
}
