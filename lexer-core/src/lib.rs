//! Lexical analysis: a composable character-rule algebra compiled into a
//! longest-match tokenizer with trivia skipping and position tracking.

pub mod cursor;
pub mod error;
pub mod lexeme;
pub mod rule;
pub mod token;
pub mod tokenizer;

pub use cursor::{CharCursor, Checkpoint};
pub use error::LexicalError;
pub use lexeme::{Lexeme, LexemeSet};
pub use rule::LexicalRule;
pub use syntax_core::{Position, TextSlice};
pub use token::Token;
pub use tokenizer::Tokenizer;
