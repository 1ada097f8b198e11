//! Parser for the module-list DSL.

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{PulseNetError, Result};
use crate::BROADCASTER;

/// Parser for module-list DSL.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            current: Token {
                kind: TokenKind::Newline,
                text: String::new(),
                line: 0,
                column: 0,
            },
        }
    }

    /// Parse the entire module list.
    pub fn parse(&mut self) -> Result<NetworkAst> {
        let mut ast = NetworkAst::new();
        self.advance();

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance();
                continue;
            }

            let module = self.parse_module()?;
            ast.modules.push(module);

            if self.current.kind == TokenKind::Newline {
                self.advance();
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn expect_name(&mut self, what: &str) -> Result<String> {
        if self.current.kind == TokenKind::Identifier {
            let name = self.current.text.clone();
            self.advance();
            Ok(name)
        } else {
            Err(PulseNetError::malformed(
                self.current.line,
                format!("expected {}, got {:?}", what, self.current.text),
            ))
        }
    }

    fn parse_module(&mut self) -> Result<ModuleDef> {
        let line = self.current.line;

        let (kind, name) = match self.current.kind {
            TokenKind::Percent | TokenKind::Ampersand => {
                let prefix = self.current.text.chars().next().unwrap_or('?');
                let kind = ModuleKind::from_prefix(prefix).ok_or_else(|| {
                    PulseNetError::malformed(line, format!("unknown module prefix '{}'", prefix))
                })?;
                self.advance();
                let name = self.expect_name("module name")?;
                if name == BROADCASTER {
                    return Err(PulseNetError::malformed(
                        line,
                        format!("'{}' must not carry a '{}' prefix", BROADCASTER, prefix),
                    ));
                }
                (kind, name)
            }
            TokenKind::Identifier => {
                let name = self.expect_name("module name")?;
                if name != BROADCASTER {
                    return Err(PulseNetError::malformed(
                        line,
                        format!(
                            "module '{}' has no prefix (only '{}' may omit one)",
                            name, BROADCASTER
                        ),
                    ));
                }
                (ModuleKind::Relay, name)
            }
            TokenKind::Symbol => {
                return Err(PulseNetError::malformed(
                    line,
                    format!("unknown module prefix '{}'", self.current.text),
                ));
            }
            _ => {
                return Err(PulseNetError::malformed(
                    line,
                    format!("expected module definition, got {:?}", self.current.text),
                ));
            }
        };

        if self.current.kind != TokenKind::Arrow {
            return Err(PulseNetError::malformed(
                line,
                format!("expected '->' after '{}'", name),
            ));
        }
        self.advance();

        let mut targets = Vec::new();
        while self.current.kind != TokenKind::Newline && self.current.kind != TokenKind::Eof {
            if !targets.is_empty() {
                if self.current.kind != TokenKind::Comma {
                    return Err(PulseNetError::malformed(
                        line,
                        format!("expected ',' between targets, got {:?}", self.current.text),
                    ));
                }
                self.advance();
            }
            targets.push(self.expect_name("target name")?);
        }

        if targets.is_empty() {
            return Err(PulseNetError::malformed(
                line,
                format!("module '{}' has an empty target list", name),
            ));
        }

        Ok(ModuleDef {
            kind,
            name,
            targets,
            line,
        })
    }
}
