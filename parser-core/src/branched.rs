use crate::buffer::TokenBuffer;
use lexer_core::{LexemeSet, LexicalError, Token, Tokenizer};
use syntax_core::Position;

/// A speculative cursor over the shared token stream.
///
/// A branch is an independent cursor at the same position sharing the same
/// buffer; creating, merging, and discarding branches are all O(1) because
/// nothing beyond an index is ever copied or undone. `merge` consumes the
/// branch by value, so a merged branch cannot be touched again. A branch's
/// position only moves forward while it is alive.
#[derive(Debug)]
pub struct BranchedLexer {
    buffer: TokenBuffer,
    position: usize,
}

impl BranchedLexer {
    /// Creates a root cursor over the given buffer.
    pub fn new(buffer: TokenBuffer) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Convenience: tokenizer + buffer + root cursor in one step.
    pub fn from_source<S: Into<String>>(source: S, lexemes: &LexemeSet) -> Self {
        Self::new(TokenBuffer::new(Tokenizer::new(source, lexemes)))
    }

    /// Returns the next token without advancing; `Ok(None)` at end of
    /// input.
    pub fn peek(&self) -> Result<Option<Token>, LexicalError> {
        self.buffer.get(self.position)
    }

    /// Returns the next token and advances this cursor by one.
    pub fn read(&mut self) -> Result<Option<Token>, LexicalError> {
        let token = self.buffer.get(self.position)?;
        if token.is_some() {
            self.position += 1;
        }
        Ok(token)
    }

    /// Returns an independent cursor at the current position sharing the
    /// token buffer.
    pub fn branch(&self) -> BranchedLexer {
        BranchedLexer {
            buffer: self.buffer.clone(),
            position: self.position,
        }
    }

    /// Commits the branch's advanced position into `self`.
    ///
    /// Consumes the branch; dropping an unmerged branch instead discards
    /// its advances and leaves `self` untouched.
    pub fn merge(&mut self, branch: BranchedLexer) {
        debug_assert!(self.buffer.same_buffer(&branch.buffer));
        debug_assert!(branch.position >= self.position);
        self.position = branch.position;
    }

    /// Index of the next token to be read.
    pub fn token_index(&self) -> usize {
        self.position
    }

    /// Position of the next token, or the end-of-input sentinel.
    ///
    /// Used for diagnostics; a lexical failure at the frontier also maps
    /// to the sentinel here, since the failure itself carries the precise
    /// position on its own channel.
    pub fn position(&self) -> Position {
        match self.buffer.get(self.position) {
            Ok(Some(token)) => token.position(),
            _ => Position::end_of_input(),
        }
    }
}
