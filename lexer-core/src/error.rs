use syntax_core::Position;
use thiserror::Error;

/// No lexeme matched at a non-EOF position.
///
/// Fatal to tokenizing from that point on; the tokenizer cannot skip the
/// offending character and resynchronize.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected character {found:?} at {position}")]
pub struct LexicalError {
    /// Position of the first character no lexeme could match.
    pub position: Position,
    /// The offending character.
    pub found: char,
}

impl LexicalError {
    pub fn new(position: Position, found: char) -> Self {
        Self { position, found }
    }
}
