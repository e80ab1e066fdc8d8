use crate::branched::BranchedLexer;
use crate::error::{ParseResult, SyntaxError};
use lexer_core::{Lexeme, Token};
use std::ops::BitOr;
use std::rc::Rc;

/// A combinator attempt against a lexer.
///
/// The contract every implementation upholds: if the attempt does not
/// succeed, the lexer's position is unchanged relative to where the
/// evaluation started. Combinators that can fail partway through run
/// their sub-rules on a fresh branch and merge it only on overall
/// success.
pub trait Rule<T> {
    fn try_parse(&self, lexer: &mut BranchedLexer) -> ParseResult<T>;
}

/// An immutable combinator value over the token stream.
///
/// Rules are cheap to clone (shared handles) and stateless: a rule may be
/// evaluated against any lexer any number of times. Variants hold handles
/// to other rules, forming a directed graph that may be cyclic through
/// [`RuleContainer`](crate::RuleContainer) indirections.
pub struct ParsingRule<T> {
    rule: Rc<dyn Rule<T>>,
}

impl<T> Clone for ParsingRule<T> {
    fn clone(&self) -> Self {
        Self {
            rule: Rc::clone(&self.rule),
        }
    }
}

impl<T: 'static> ParsingRule<T> {
    /// Wraps a [`Rule`] implementation in a shareable handle.
    pub fn from_rule<R: Rule<T> + 'static>(rule: R) -> Self {
        Self {
            rule: Rc::new(rule),
        }
    }

    /// Evaluates this rule against the lexer.
    pub fn try_parse(&self, lexer: &mut BranchedLexer) -> ParseResult<T> {
        self.rule.try_parse(lexer)
    }

    /// Succeeds iff the next token carries `lexeme`; converts it to `T`.
    pub fn token_map<F>(lexeme: &Lexeme, convert: F) -> Self
    where
        F: Fn(Token) -> T + 'static,
    {
        Self::from_rule(TokenRule {
            lexeme: lexeme.clone(),
            convert: Box::new(convert),
        })
    }

    /// Always succeeds, consumes nothing, returns a clone of `value`.
    pub fn empty(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_rule(EmptyRule { value })
    }

    /// Escape hatch: arbitrary imperative logic against the lexer.
    ///
    /// This is the sanctioned way to express context-sensitive lookahead
    /// (line-sensitive statement termination and the like) that the
    /// declarative combinators do not cover. The closure runs on a fresh
    /// branch; its consumption is committed only when it returns a match.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut BranchedLexer) -> ParseResult<T> + 'static,
    {
        Self::from_rule(CustomRule { f: Box::new(f) })
    }

    /// This rule followed immediately by `second`; both results combined.
    ///
    /// If this rule fails, `second` is never attempted. If this rule
    /// succeeds and `second` fails, nothing is consumed.
    pub fn then<U, V, F>(&self, second: &ParsingRule<U>, combine: F) -> ParsingRule<V>
    where
        U: 'static,
        V: 'static,
        F: Fn(T, U) -> V + 'static,
    {
        ParsingRule::from_rule(ConcatRule {
            first: self.clone(),
            second: second.clone(),
            combine: Box::new(combine),
        })
    }

    /// Ordered choice: this rule, else `other` from the same start
    /// position. No longest-match arbitration between the two.
    pub fn or(&self, other: &ParsingRule<T>) -> ParsingRule<T> {
        ParsingRule::from_rule(AlternateRule {
            first: self.clone(),
            second: other.clone(),
        })
    }

    /// Greedy repetition; `max == 0` means unbounded.
    ///
    /// Stops at the first failed attempt or at `max`, fails if fewer than
    /// `min` repetitions were obtained, and never reconsiders the count
    /// when a later rule fails.
    pub fn repeat<U, F>(&self, min: usize, max: usize, reduce: F) -> ParsingRule<U>
    where
        U: 'static,
        F: Fn(Vec<T>) -> U + 'static,
    {
        ParsingRule::from_rule(RepeatRule {
            content: self.clone(),
            min,
            max,
            reduce: Box::new(reduce),
        })
    }

    /// Zero or more repetitions, collected in order.
    pub fn many0(&self) -> ParsingRule<Vec<T>> {
        self.repeat(0, 0, |items| items)
    }

    /// One or more repetitions, collected in order.
    pub fn many1(&self) -> ParsingRule<Vec<T>> {
        self.repeat(1, 0, |items| items)
    }

    /// Transforms a successful result; propagates failure unchanged.
    pub fn map<U, F>(&self, f: F) -> ParsingRule<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        ParsingRule::from_rule(MapRule {
            inner: self.clone(),
            f: Box::new(f),
        })
    }

    /// Promotes a mismatch of this rule into a hard, propagating
    /// [`SyntaxError`] carrying `message` and the current position.
    ///
    /// Used where the grammar author knows no other alternative remains,
    /// so silent backtracking past a required token would only hide the
    /// real problem.
    pub fn or_fail<S: Into<String>>(&self, message: S) -> ParsingRule<T> {
        ParsingRule::from_rule(OrFailRule {
            inner: self.clone(),
            message: message.into(),
        })
    }

    /// `or_fail` with the conventional `"Expected {expected}."` message.
    pub fn or_fail_expected(&self, expected: &str) -> ParsingRule<T> {
        self.or_fail(format!("Expected {expected}."))
    }
}

impl ParsingRule<Token> {
    /// Succeeds iff the next token carries `lexeme`; yields the token.
    pub fn token(lexeme: &Lexeme) -> Self {
        Self::token_map(lexeme, |token| token)
    }
}

/// Bridge from the lexical layer into the combinator algebra.
pub trait LexemeExt {
    /// The parsing rule matching one token of this lexeme.
    fn parsing_rule(&self) -> ParsingRule<Token>;
}

impl LexemeExt for Lexeme {
    fn parsing_rule(&self) -> ParsingRule<Token> {
        ParsingRule::token(self)
    }
}

impl<T: 'static> BitOr for ParsingRule<T> {
    type Output = ParsingRule<T>;

    fn bitor(self, rhs: ParsingRule<T>) -> ParsingRule<T> {
        self.or(&rhs)
    }
}

impl<T: 'static> BitOr for &ParsingRule<T> {
    type Output = ParsingRule<T>;

    fn bitor(self, rhs: &ParsingRule<T>) -> ParsingRule<T> {
        self.or(rhs)
    }
}

struct TokenRule<T> {
    lexeme: Lexeme,
    convert: Box<dyn Fn(Token) -> T>,
}

impl<T> Rule<T> for TokenRule<T> {
    fn try_parse(&self, lexer: &mut BranchedLexer) -> ParseResult<T> {
        match lexer.peek()? {
            Some(token) if token.lexeme() == &self.lexeme => {
                lexer.read()?;
                Ok(Some((self.convert)(token)))
            }
            _ => Ok(None),
        }
    }
}

struct EmptyRule<T: Clone> {
    value: T,
}

impl<T: Clone> Rule<T> for EmptyRule<T> {
    fn try_parse(&self, _lexer: &mut BranchedLexer) -> ParseResult<T> {
        Ok(Some(self.value.clone()))
    }
}

struct ConcatRule<A, B, T> {
    first: ParsingRule<A>,
    second: ParsingRule<B>,
    combine: Box<dyn Fn(A, B) -> T>,
}

impl<A: 'static, B: 'static, T> Rule<T> for ConcatRule<A, B, T> {
    fn try_parse(&self, lexer: &mut BranchedLexer) -> ParseResult<T> {
        // One shared branch for the pair; the caller's lexer moves only
        // if both halves succeed.
        let mut branch = lexer.branch();
        let Some(a) = self.first.try_parse(&mut branch)? else {
            return Ok(None);
        };
        let Some(b) = self.second.try_parse(&mut branch)? else {
            return Ok(None);
        };
        lexer.merge(branch);
        Ok(Some((self.combine)(a, b)))
    }
}

struct AlternateRule<T> {
    first: ParsingRule<T>,
    second: ParsingRule<T>,
}

impl<T: 'static> Rule<T> for AlternateRule<T> {
    fn try_parse(&self, lexer: &mut BranchedLexer) -> ParseResult<T> {
        let mut branch = lexer.branch();
        if let Some(value) = self.first.try_parse(&mut branch)? {
            lexer.merge(branch);
            return Ok(Some(value));
        }
        // Second alternative starts over from the original position.
        let mut branch = lexer.branch();
        if let Some(value) = self.second.try_parse(&mut branch)? {
            lexer.merge(branch);
            return Ok(Some(value));
        }
        Ok(None)
    }
}

struct RepeatRule<A, T> {
    content: ParsingRule<A>,
    min: usize,
    max: usize,
    reduce: Box<dyn Fn(Vec<A>) -> T>,
}

impl<A: 'static, T> Rule<T> for RepeatRule<A, T> {
    fn try_parse(&self, lexer: &mut BranchedLexer) -> ParseResult<T> {
        let mut branch = lexer.branch();
        let mut items = Vec::new();
        loop {
            if self.max > 0 && items.len() == self.max {
                break;
            }
            let before = branch.token_index();
            match self.content.try_parse(&mut branch)? {
                Some(value) => {
                    if branch.token_index() == before {
                        // Zero-consumption match; repeating it would never
                        // terminate.
                        break;
                    }
                    items.push(value);
                }
                None => break,
            }
        }
        if items.len() < self.min {
            return Ok(None);
        }
        lexer.merge(branch);
        Ok(Some((self.reduce)(items)))
    }
}

struct MapRule<A, T> {
    inner: ParsingRule<A>,
    f: Box<dyn Fn(A) -> T>,
}

impl<A: 'static, T> Rule<T> for MapRule<A, T> {
    fn try_parse(&self, lexer: &mut BranchedLexer) -> ParseResult<T> {
        match self.inner.try_parse(lexer)? {
            Some(value) => Ok(Some((self.f)(value))),
            None => Ok(None),
        }
    }
}

struct CustomRule<T> {
    f: Box<dyn Fn(&mut BranchedLexer) -> ParseResult<T>>,
}

impl<T> Rule<T> for CustomRule<T> {
    fn try_parse(&self, lexer: &mut BranchedLexer) -> ParseResult<T> {
        let mut branch = lexer.branch();
        match (self.f)(&mut branch)? {
            Some(value) => {
                lexer.merge(branch);
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}

struct OrFailRule<T> {
    inner: ParsingRule<T>,
    message: String,
}

impl<T: 'static> Rule<T> for OrFailRule<T> {
    fn try_parse(&self, lexer: &mut BranchedLexer) -> ParseResult<T> {
        match self.inner.try_parse(lexer)? {
            Some(value) => Ok(Some(value)),
            None => Err(SyntaxError::new(lexer.position(), self.message.clone()).into()),
        }
    }
}
