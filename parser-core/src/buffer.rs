use lexer_core::{LexicalError, Token, Tokenizer};
use std::cell::RefCell;
use std::rc::Rc;

/// A growable, append-only token stream materialized lazily from a
/// tokenizer.
///
/// Once a token exists at an index it is never re-tokenized or mutated,
/// which lets any number of branches share one buffer by reference.
/// Clones are handles onto the same buffer. Single-threaded by design:
/// the only mutation is appending when a cursor reads past the
/// materialized prefix, and `Rc<RefCell<..>>` serializes that for free.
#[derive(Clone)]
pub struct TokenBuffer {
    inner: Rc<RefCell<BufferInner>>,
}

struct BufferInner {
    tokenizer: Tokenizer,
    tokens: Vec<Token>,
    exhausted: bool,
    failed: Option<LexicalError>,
}

impl TokenBuffer {
    /// Creates a buffer drawing from the given tokenizer.
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BufferInner {
                tokenizer,
                tokens: Vec::new(),
                exhausted: false,
                failed: None,
            })),
        }
    }

    /// Returns the token at `index`, tokenizing further input on demand.
    ///
    /// `Ok(None)` means the stream ended before `index`. A lexical failure
    /// is cached and re-surfaced on every read that runs past it.
    pub fn get(&self, index: usize) -> Result<Option<Token>, LexicalError> {
        let mut inner = self.inner.borrow_mut();
        while inner.tokens.len() <= index {
            if let Some(err) = &inner.failed {
                return Err(err.clone());
            }
            if inner.exhausted {
                return Ok(None);
            }
            match inner.tokenizer.next_token() {
                Ok(Some(token)) => inner.tokens.push(token),
                Ok(None) => inner.exhausted = true,
                Err(err) => {
                    inner.failed = Some(err.clone());
                    return Err(err);
                }
            }
        }
        Ok(inner.tokens.get(index).cloned())
    }

    /// Returns true if both handles refer to the same buffer.
    pub fn same_buffer(&self, other: &TokenBuffer) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of tokens materialized so far.
    pub fn materialized_len(&self) -> usize {
        self.inner.borrow().tokens.len()
    }
}

impl std::fmt::Debug for TokenBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenBuffer")
            .field("materialized_len", &self.materialized_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexer_core::{LexemeSet, LexicalRule};

    fn word_lexemes() -> LexemeSet {
        let mut set = LexemeSet::new();
        set.define_trivia("ws", LexicalRule::char(' ').many1());
        set.define(
            "word",
            LexicalRule::char_when(|ch| ch.is_ascii_alphabetic()).many1(),
        );
        set
    }

    #[test]
    fn test_lazy_materialization() {
        let set = word_lexemes();
        let buffer = TokenBuffer::new(Tokenizer::new("a b c", &set));
        assert_eq!(buffer.materialized_len(), 0);
        assert_eq!(buffer.get(1).unwrap().unwrap().text(), &"b");
        assert_eq!(buffer.materialized_len(), 2);
        assert_eq!(buffer.get(0).unwrap().unwrap().text(), &"a");
        assert_eq!(buffer.get(3).unwrap(), None);
        assert_eq!(buffer.materialized_len(), 3);
    }

    #[test]
    fn test_lexical_failure_is_sticky() {
        let set = word_lexemes();
        let buffer = TokenBuffer::new(Tokenizer::new("ok !", &set));
        assert!(buffer.get(0).unwrap().is_some());
        let first = buffer.get(1).unwrap_err();
        let second = buffer.get(1).unwrap_err();
        assert_eq!(first, second);
    }
}
