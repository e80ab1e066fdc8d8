//! Speculative-backtracking parser combinators over a shared token stream.
//!
//! The token stream is materialized lazily into an append-only buffer;
//! branches are cheap index cursors over that buffer, and every combinator
//! that can fail partway through runs on a fresh branch that is merged into
//! its parent only on success. Failure therefore never leaks consumption.

pub mod branched;
pub mod buffer;
pub mod container;
pub mod error;
pub mod parse;
pub mod rule;

pub use branched::BranchedLexer;
pub use buffer::TokenBuffer;
pub use container::RuleContainer;
pub use error::{ParseError, ParseResult, SyntaxError};
pub use lexer_core::{Lexeme, LexemeSet, LexicalError, LexicalRule, Token, Tokenizer};
pub use parse::parse_top_level;
pub use rule::{LexemeExt, ParsingRule};
pub use syntax_core::{Position, TextSlice};
