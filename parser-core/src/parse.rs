use crate::branched::BranchedLexer;
use crate::error::{ParseError, SyntaxError};
use crate::rule::ParsingRule;
use lexer_core::LexemeSet;

/// Parses `source` with `root`, requiring the token stream to be fully
/// consumed.
///
/// Leftover tokens after a successful root match are rejected with a
/// `"Statement expected."` diagnostic at the first unconsumed token's
/// position; a root mismatch reports the same diagnostic at the first
/// token. There is no partial result on failure.
pub fn parse_top_level<T: 'static>(
    source: &str,
    lexemes: &LexemeSet,
    root: &ParsingRule<T>,
) -> Result<T, ParseError> {
    let mut lexer = BranchedLexer::from_source(source, lexemes);
    match root.try_parse(&mut lexer)? {
        Some(value) => match lexer.peek()? {
            Some(extra) => {
                Err(SyntaxError::new(extra.position(), "Statement expected.").into())
            }
            None => Ok(value),
        },
        None => Err(SyntaxError::new(lexer.position(), "Statement expected.").into()),
    }
}
