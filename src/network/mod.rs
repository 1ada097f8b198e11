//! Module network representation and validation.
//!
//! This module provides the internal representation of a module list after
//! parsing. The [`Network`] struct holds every module, the names of sinks,
//! and the resolved edges between them in a form suitable for simulation.

mod graph;
mod types;
mod validate;

pub use graph::Network;
pub use types::*;
pub use validate::validate_network;
