use crate::lexeme::Lexeme;
use syntax_core::{Position, TextSlice};

/// A token produced by the tokenizer.
///
/// Tokens are read-only to all consumers; clones share the underlying
/// text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    lexeme: Lexeme,
    text: TextSlice,
    position: Position,
}

impl Token {
    pub(crate) fn new(lexeme: Lexeme, text: TextSlice, position: Position) -> Self {
        Self {
            lexeme,
            text,
            position,
        }
    }

    /// Returns the lexical category of this token.
    pub fn lexeme(&self) -> &Lexeme {
        &self.lexeme
    }

    /// Returns the matched source text.
    pub fn text(&self) -> &TextSlice {
        &self.text
    }

    /// Returns the position of the first character of this token.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
