//! Lexer (tokenizer) for the module-list DSL.
//!
//! The lexer never fails. Characters that cannot start a name or a
//! separator come out as [`TokenKind::Symbol`] and are rejected by the
//! parser with the line they appear on.

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the DSL.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A module or sink name
    Identifier,
    /// Flip-flop prefix '%'
    Percent,
    /// Conjunction prefix '&'
    Ampersand,
    /// Target list separator '->'
    Arrow,
    /// Comma between targets
    Comma,
    /// Any other single non-whitespace character, including a lone '-'
    Symbol,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Lexer for tokenizing module-list input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let line = self.line;
        let column = self.column;

        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => return self.token(TokenKind::Eof, String::new(), line, column),
        };

        match ch {
            '\n' => {
                self.advance();
                self.token(TokenKind::Newline, "\n".to_string(), line, column)
            }
            '%' => {
                self.advance();
                self.token(TokenKind::Percent, "%".to_string(), line, column)
            }
            '&' => {
                self.advance();
                self.token(TokenKind::Ampersand, "&".to_string(), line, column)
            }
            ',' => {
                self.advance();
                self.token(TokenKind::Comma, ",".to_string(), line, column)
            }
            '-' => {
                self.advance();
                if self.chars.peek() == Some(&'>') {
                    self.advance();
                    self.token(TokenKind::Arrow, "->".to_string(), line, column)
                } else {
                    self.token(TokenKind::Symbol, "-".to_string(), line, column)
                }
            }
            _ if ch.is_alphanumeric() || ch == '_' => {
                let text = self.read_identifier();
                self.token(TokenKind::Identifier, text, line, column)
            }
            _ => {
                self.advance();
                self.token(TokenKind::Symbol, ch.to_string(), line, column)
            }
        }
    }

    fn token(&self, kind: TokenKind, text: String, line: usize, column: usize) -> Token {
        Token {
            kind,
            text,
            line,
            column,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token();
            let done = tok.kind == TokenKind::Eof;
            out.push(tok.kind);
            if done {
                return out;
            }
        }
    }

    #[test]
    fn test_lexer_module_line() {
        assert_eq!(
            kinds("%a -> b, c"),
            vec![
                TokenKind::Percent,
                TokenKind::Identifier,
                TokenKind::Arrow,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_tracks_position() {
        let mut lexer = Lexer::new("broadcaster -> a\n&inv -> b");
        let tok = lexer.next_token();
        assert_eq!((tok.text.as_str(), tok.line, tok.column), ("broadcaster", 1, 1));

        for _ in 0..3 {
            lexer.next_token();
        }
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Ampersand);
        assert_eq!((tok.line, tok.column), (2, 1));
    }

    #[test]
    fn test_lexer_crlf() {
        assert_eq!(
            kinds("broadcaster -> a\r\n%a -> b\r\n"),
            vec![
                TokenKind::Identifier,
                TokenKind::Arrow,
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Percent,
                TokenKind::Identifier,
                TokenKind::Arrow,
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_unknown_prefix_is_symbol() {
        for (input, text) in [("$x -> y", "$"), ("#x -> y", "#"), ("§x -> y", "§")] {
            let tok = Lexer::new(input).next_token();
            assert_eq!(tok.kind, TokenKind::Symbol);
            assert_eq!(tok.text, text);
        }
    }

    #[test]
    fn test_lexer_lone_dash_is_symbol() {
        let mut lexer = Lexer::new("a - b");
        lexer.next_token();
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Symbol);
        assert_eq!((tok.text.as_str(), tok.line, tok.column), ("-", 1, 3));
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    }
}
