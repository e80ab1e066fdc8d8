use crate::cursor::CharCursor;
use crate::error::LexicalError;
use crate::lexeme::{Lexeme, LexemeSet};
use crate::token::Token;
use syntax_core::Position;

/// Applies the longest-matching lexeme at the cursor, skips trivia, and
/// yields tokens.
///
/// At every position each registered lexeme's rule is attempted from a
/// checkpoint; the match consuming the most characters wins, with ties
/// broken by declaration order. Zero-length matches never win, so a set
/// containing `Empty`-like rules cannot stall the tokenizer.
pub struct Tokenizer {
    cursor: CharCursor,
    lexemes: Vec<Lexeme>,
}

impl Tokenizer {
    /// Creates a tokenizer over the given source text.
    pub fn new<S: Into<String>>(source: S, lexemes: &LexemeSet) -> Self {
        Self {
            cursor: CharCursor::new(source),
            lexemes: lexemes.lexemes().to_vec(),
        }
    }

    /// Returns the current position of the underlying cursor.
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Produces the next token, skipping trivia.
    ///
    /// Returns `Ok(None)` at end of input; end of input is a condition,
    /// never a token.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexicalError> {
        loop {
            if self.cursor.is_eof() {
                return Ok(None);
            }

            let start = self.cursor.checkpoint();
            let mut best: Option<(Lexeme, crate::cursor::Checkpoint)> = None;
            let mut best_len = 0;

            for lexeme in &self.lexemes {
                if lexeme.rule().try_match(&mut self.cursor) {
                    let len = self.cursor.offset() - start.offset();
                    // Strict '>' keeps the first-declared lexeme on ties
                    // and rejects zero-length matches.
                    if len > best_len {
                        best_len = len;
                        best = Some((lexeme.clone(), self.cursor.checkpoint()));
                    }
                }
                self.cursor.restore(start);
            }

            match best {
                None => {
                    let found = self.cursor.peek().unwrap_or('\0');
                    return Err(LexicalError::new(start.position(), found));
                }
                Some((lexeme, end)) => {
                    self.cursor.restore(end);
                    if lexeme.is_trivia() {
                        continue;
                    }
                    let text = self.cursor.slice(start.offset(), end.offset());
                    return Ok(Some(Token::new(lexeme, text, start.position())));
                }
            }
        }
    }

    /// Collects all remaining tokens.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexicalError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}
