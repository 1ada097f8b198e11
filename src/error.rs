//! Error types for the Pulsenet simulator.
//!
//! This module provides a unified error type [`PulseNetError`] that covers
//! all error conditions that can occur during module-list parsing, network
//! construction, and period detection. Pulses addressed to undeclared
//! modules are not errors; they are counted and dropped by the scheduler.

use thiserror::Error;

/// Result type alias using [`PulseNetError`].
pub type Result<T> = std::result::Result<T, PulseNetError>;

/// Unified error type for all Pulsenet operations.
#[derive(Error, Debug)]
pub enum PulseNetError {
    // ============ DSL Parsing Errors ============
    /// A module line that does not follow `[prefix]<name> -> <targets>`
    #[error("Malformed module line {line}: {message}")]
    MalformedModuleLine { line: usize, message: String },

    // ============ Network Construction Errors ============
    /// The same module name was defined twice
    #[error("Duplicate module definition '{name}'")]
    DuplicateModule { name: String },

    /// No `broadcaster` entry point was declared
    #[error("Network has no broadcaster module (declare 'broadcaster -> ...')")]
    MissingBroadcaster,

    /// A module or sink name that does not appear anywhere in the network
    #[error("Module '{name}' not found in network")]
    ModuleNotFound { name: String },

    /// Network shape the simulator cannot run
    #[error("Invalid network topology: {message}")]
    InvalidTopology { message: String },

    /// The terminal module has no modules feeding it
    #[error("Module '{name}' has no predecessors")]
    NoPredecessors { name: String },

    // ============ Period Detection Errors ============
    /// A predecessor never emitted a high pulse within the press cap
    #[error("No period found for '{module}' after {presses} presses")]
    NoPeriodFound { module: String, presses: u64 },

    /// A recorded period could not be confirmed by a second emission
    #[error("Period of '{module}' unverified: first high at press {first}, second at {second:?}")]
    UnverifiedPeriod {
        module: String,
        first: u64,
        second: Option<u64>,
    },

    /// The least common multiple of the periods does not fit in a u64
    #[error("Least common multiple of periods overflows u64")]
    PeriodOverflow,

    // ============ I/O Errors ============
    /// Error reading the module list file
    #[error("Failed to read module list '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl PulseNetError {
    /// Create a malformed module line error
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedModuleLine {
            line,
            message: message.into(),
        }
    }

    /// Create a module-not-found error
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::ModuleNotFound { name: name.into() }
    }
}
