use crate::rule::LexicalRule;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A named lexical category: a matching rule plus a trivia flag.
///
/// Lexemes are identity-compared, not structurally compared: two lexemes
/// are the same category iff they came from the same `define` call. The
/// grammar layer branches on *which* lexeme a token carries, so structural
/// equality of rules would be meaningless here.
#[derive(Clone)]
pub struct Lexeme {
    inner: Arc<LexemeInner>,
}

struct LexemeInner {
    id: usize,
    name: String,
    rule: LexicalRule,
    is_trivia: bool,
}

impl Lexeme {
    /// Returns the declaration index within the owning [`LexemeSet`].
    pub fn id(&self) -> usize {
        self.inner.id
    }

    /// Returns the name given at definition time.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the matching rule.
    pub fn rule(&self) -> &LexicalRule {
        &self.inner.rule
    }

    /// Returns true if tokens of this lexeme are skipped by the tokenizer.
    pub fn is_trivia(&self) -> bool {
        self.inner.is_trivia
    }
}

impl PartialEq for Lexeme {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Lexeme {}

impl Hash for Lexeme {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexeme")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("is_trivia", &self.inner.is_trivia)
            .finish()
    }
}

/// The registry owning all lexemes of a language.
///
/// Declaration order matters: when two lexemes match prefixes of equal
/// length, the earlier-declared one wins.
#[derive(Debug, Default)]
pub struct LexemeSet {
    lexemes: Vec<Lexeme>,
}

impl LexemeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a lexeme that produces tokens.
    pub fn define<S: Into<String>>(&mut self, name: S, rule: LexicalRule) -> Lexeme {
        self.insert(name.into(), rule, false)
    }

    /// Defines a trivia lexeme (whitespace, comments): recognized and
    /// consumed by the tokenizer but never emitted as a token.
    pub fn define_trivia<S: Into<String>>(&mut self, name: S, rule: LexicalRule) -> Lexeme {
        self.insert(name.into(), rule, true)
    }

    fn insert(&mut self, name: String, rule: LexicalRule, is_trivia: bool) -> Lexeme {
        let lexeme = Lexeme {
            inner: Arc::new(LexemeInner {
                id: self.lexemes.len(),
                name,
                rule,
                is_trivia,
            }),
        };
        self.lexemes.push(lexeme.clone());
        lexeme
    }

    /// Returns all lexemes in declaration order.
    pub fn lexemes(&self) -> &[Lexeme] {
        &self.lexemes
    }

    /// Returns the number of defined lexemes.
    pub fn len(&self) -> usize {
        self.lexemes.len()
    }

    /// Returns true if no lexemes have been defined.
    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }
}
