use lexer_core::LexicalError;
use syntax_core::Position;
use thiserror::Error;

/// A required combinator sequence could not complete.
///
/// Raised only by `or_fail` wrappers and custom rules; plain alternation
/// never produces one, it just tries the next alternative.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({position})")]
pub struct SyntaxError {
    /// Position of the first unconsumed token, or the end-of-input
    /// sentinel when the stream was exhausted.
    pub position: Position,
    /// Human-readable message, e.g. `"Expected )."`.
    pub message: String,
}

impl SyntaxError {
    pub fn new<S: Into<String>>(position: Position, message: S) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }

    /// Builds the conventional `"Expected {what}."` message.
    pub fn expected(position: Position, what: &str) -> Self {
        Self::new(position, format!("Expected {what}."))
    }
}

/// The single checked failure channel of a parse.
///
/// There is no partial or best-effort AST: a failed parse produces only
/// one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    /// Returns the source position the failure points at.
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lexical(err) => err.position,
            ParseError::Syntax(err) => err.position,
        }
    }
}

/// Result of a combinator attempt.
///
/// `Ok(Some(value))` is a match, `Ok(None)` is a recoverable mismatch (the
/// normal backtracking signal), and `Err` is a hard failure that aborts
/// the whole parse.
pub type ParseResult<T> = Result<Option<T>, ParseError>;
