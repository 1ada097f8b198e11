//! Network validation.

use std::collections::VecDeque;

use tracing::warn;

use crate::error::{PulseNetError, Result};
use crate::modules::Module;

use super::{Network, NodeId};

/// Validate a network for simulation.
///
/// Rejects:
/// - A broadcaster that targets itself (a press would never drain)
///
/// Warns about:
/// - Conjunctions with no inputs, which emit low on every pulse
/// - Modules the broadcaster can never reach
pub fn validate_network(network: &Network) -> Result<()> {
    let broadcaster = network
        .module(network.broadcaster)
        .ok_or(PulseNetError::MissingBroadcaster)?;

    if broadcaster.targets().contains(&network.broadcaster) {
        return Err(PulseNetError::InvalidTopology {
            message: "broadcaster cannot target itself".to_string(),
        });
    }

    for module in network.iter_modules() {
        if let Module::Gate(gate) = module {
            if gate.inputs().next().is_none() {
                warn!(module = %gate.name, "conjunction has no inputs");
            }
        }
    }

    let reachable = reachable_from(network, network.broadcaster);
    for module in network.iter_modules() {
        if !reachable[module.id().0] {
            warn!(module = module.name(), "module is unreachable from broadcaster");
        }
    }

    Ok(())
}

fn reachable_from(network: &Network, start: NodeId) -> Vec<bool> {
    let mut seen = vec![false; network.node_names.len()];
    let mut queue = VecDeque::from([start]);
    seen[start.0] = true;

    while let Some(node) = queue.pop_front() {
        let Some(module) = network.module(node) else {
            continue;
        };
        for &target in module.targets() {
            if !seen[target.0] {
                seen[target.0] = true;
                queue.push_back(target);
            }
        }
    }

    seen
}
