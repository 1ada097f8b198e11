//! DSL parser for module lists.
//!
//! A module list is line-oriented: each line declares one module, its
//! behavior, and the modules it sends pulses to.
//!
//! # Grammar Overview
//!
//! ```text
//! network  = { line }
//! line     = module | empty
//! module   = [prefix] name '->' target { ',' target }
//!
//! prefix   = '%' | '&'
//! name     = identifier
//! target   = identifier
//! identifier = (letter | digit | '_') { letter | digit | '_' }
//! ```
//!
//! # Module Kinds
//!
//! | Prefix | Kind | Behavior |
//! |--------|------|----------|
//! | (none) | Relay | Only `broadcaster`; forwards each pulse to all targets |
//! | `%` | Toggle | Flips on a low pulse and emits its new state; ignores high |
//! | `&` | Gate | Remembers each input; emits low iff all inputs are high |
//!
//! Any other leading character, `#` and `-` included, makes the line
//! malformed.
//!
//! Targets that never appear on the left of a line are sinks: they receive
//! pulses but never emit.
//!
//! # Example
//!
//! ```text
//! broadcaster -> a, b
//! %a -> inv
//! %b -> con
//! &con -> output
//! &inv -> con
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a module-list string into an AST.
pub fn parse(input: &str) -> Result<NetworkAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer);
    parser.parse()
}

/// Parse a module-list file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<NetworkAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::PulseNetError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
