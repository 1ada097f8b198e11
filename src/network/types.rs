//! Core types for network representation.

use std::fmt;

/// A unique identifier for a named node in the network.
///
/// Every name that appears in the module list gets an id, including
/// sinks that are only ever targeted. Node 0 is always the external button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The external actor that injects the first pulse of every press.
    pub const BUTTON: NodeId = NodeId(0);

    /// Check if this is the button.
    pub fn is_button(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_button() {
            write!(f, "BTN")
        } else {
            write!(f, "N{}", self.0)
        }
    }
}

/// Signal level carried by a pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    pub fn is_high(&self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => write!(f, "low"),
            Level::High => write!(f, "high"),
        }
    }
}

/// A pulse in flight along one edge of the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub source: NodeId,
    pub destination: NodeId,
    pub level: Level,
}

impl Pulse {
    pub fn new(source: NodeId, destination: NodeId, level: Level) -> Self {
        Self {
            source,
            destination,
            level,
        }
    }
}
