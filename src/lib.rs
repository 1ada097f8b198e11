//! # Pulsenet Core
//!
//! A pulse-propagation simulator for networks of flip-flop and conjunction
//! modules.
//!
//! This library provides:
//! - A small line-oriented DSL for describing module networks
//! - A breadth-first scheduler that propagates the pulses of one button press
//! - Pulse statistics over many presses
//! - Period detection that predicts, via least common multiples, the press at
//!   which a terminal module first sees all of its inputs high
//!
//! ## Architecture
//!
//! - [`dsl`] - Parser for the module-list language
//! - [`network`] - Network graph representation and validation
//! - [`modules`] - Relay, toggle and gate behavior
//! - [`sim`] - Pulse scheduler and period detector
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! pulsenet modules.txt --presses 1000 --sink rx
//! ```
//!
//! ### Library
//!
//! ```
//! use pulsenet_core::{Network, Simulator};
//!
//! let network = Network::parse("broadcaster -> a\n%a -> out").unwrap();
//! let mut sim = Simulator::new(network);
//! let counts = sim.run(2);
//! assert_eq!((counts.low, counts.high), (5, 1));
//! ```
//!
//! ## Simulation Method
//!
//! Each press seeds a queue with a single low pulse from the button to the
//! broadcaster. Pulses are dequeued one at a time, counted, and delivered to
//! their destination module, which may append one pulse per target to the
//! back of the queue. Pulses addressed to names with no module definition are
//! counted and dropped.

pub mod dsl;
pub mod error;
pub mod modules;
pub mod network;
pub mod sim;

// Re-export main types for convenience
pub use error::{PulseNetError, Result};
pub use network::{Level, Network, NodeId, Pulse};
pub use sim::{DetectorConfig, PeriodDetector, Simulator};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmPulseNet;

/// Name of the relay module that receives every press.
pub const BROADCASTER: &str = "broadcaster";

/// Name of the external actor that sends the first pulse of a press.
pub const BUTTON: &str = "button";

/// Presses used for the pulse statistic.
pub const DEFAULT_PRESSES: u64 = 1000;

/// Sink whose first low pulse the period detector predicts.
pub const DEFAULT_SINK: &str = "rx";
