use crate::cursor::CharCursor;
use std::ops::BitOr;

/// A composable character-level matcher.
///
/// Rules are pure values; matching walks the rule tree against a cursor and
/// either consumes the matched characters or leaves the cursor where it
/// started. Composite rules restore the cursor themselves on failure, so
/// `try_match` never leaks partial consumption.
#[derive(Debug, Clone)]
pub enum LexicalRule {
    /// Matches exactly the given character.
    Char(char),
    /// Matches any one of the given characters.
    Chars(Vec<char>),
    /// Matches any single character except the given one.
    NotChar(char),
    /// Matches any single character not in the given set.
    NotChars(Vec<char>),
    /// Matches any single character satisfying the predicate.
    CharWhen(fn(char) -> bool),
    /// Matches the exact string.
    Literal(String),
    /// Matches any single character.
    AnyChar,
    /// Matches the first rule followed immediately by the second.
    Concat(Box<LexicalRule>, Box<LexicalRule>),
    /// Ordered choice: tries the first rule, then the second from the same
    /// start position.
    Alternate(Box<LexicalRule>, Box<LexicalRule>),
    /// Greedy repetition of the inner rule. `max == 0` means unbounded.
    Repeat {
        rule: Box<LexicalRule>,
        min: usize,
        max: usize,
    },
    /// Matches nothing and always succeeds.
    Empty,
}

impl LexicalRule {
    /// A rule matching exactly `ch`.
    pub fn char(ch: char) -> Self {
        LexicalRule::Char(ch)
    }

    /// A rule matching any one of `chars`.
    pub fn one_of<I: IntoIterator<Item = char>>(chars: I) -> Self {
        LexicalRule::Chars(chars.into_iter().collect())
    }

    /// A rule matching any single character except `ch`.
    pub fn not_char(ch: char) -> Self {
        LexicalRule::NotChar(ch)
    }

    /// A rule matching any single character not in `chars`.
    pub fn none_of<I: IntoIterator<Item = char>>(chars: I) -> Self {
        LexicalRule::NotChars(chars.into_iter().collect())
    }

    /// A rule matching any single character satisfying `predicate`.
    pub fn char_when(predicate: fn(char) -> bool) -> Self {
        LexicalRule::CharWhen(predicate)
    }

    /// A rule matching the exact string `text`.
    pub fn literal<S: Into<String>>(text: S) -> Self {
        LexicalRule::Literal(text.into())
    }

    /// A rule matching any single character.
    pub fn any_char() -> Self {
        LexicalRule::AnyChar
    }

    /// A rule matching nothing.
    pub fn empty() -> Self {
        LexicalRule::Empty
    }

    /// This rule followed immediately by `next`.
    pub fn then(self, next: LexicalRule) -> Self {
        LexicalRule::Concat(Box::new(self), Box::new(next))
    }

    /// Ordered choice between this rule and `other`.
    pub fn or(self, other: LexicalRule) -> Self {
        LexicalRule::Alternate(Box::new(self), Box::new(other))
    }

    /// Greedy repetition; `max == 0` means unbounded.
    pub fn repeat(self, min: usize, max: usize) -> Self {
        LexicalRule::Repeat {
            rule: Box::new(self),
            min,
            max,
        }
    }

    /// Zero or more repetitions.
    pub fn many0(self) -> Self {
        self.repeat(0, 0)
    }

    /// One or more repetitions.
    pub fn many1(self) -> Self {
        self.repeat(1, 0)
    }

    /// Attempts to match this rule at the cursor.
    ///
    /// On success the cursor has consumed the matched characters; on
    /// failure the cursor is unchanged.
    pub fn try_match(&self, cursor: &mut CharCursor) -> bool {
        match self {
            LexicalRule::Char(expected) => consume_if(cursor, |ch| ch == *expected),
            LexicalRule::Chars(set) => consume_if(cursor, |ch| set.contains(&ch)),
            LexicalRule::NotChar(excluded) => consume_if(cursor, |ch| ch != *excluded),
            LexicalRule::NotChars(set) => consume_if(cursor, |ch| !set.contains(&ch)),
            LexicalRule::CharWhen(predicate) => consume_if(cursor, *predicate),
            LexicalRule::Literal(text) => {
                if cursor.starts_with(text) {
                    for _ in text.chars() {
                        cursor.advance();
                    }
                    true
                } else {
                    false
                }
            }
            LexicalRule::AnyChar => cursor.advance().is_some(),
            LexicalRule::Concat(first, second) => {
                let checkpoint = cursor.checkpoint();
                if first.try_match(cursor) && second.try_match(cursor) {
                    true
                } else {
                    cursor.restore(checkpoint);
                    false
                }
            }
            LexicalRule::Alternate(first, second) => {
                first.try_match(cursor) || second.try_match(cursor)
            }
            LexicalRule::Repeat { rule, min, max } => {
                let checkpoint = cursor.checkpoint();
                let mut count = 0;
                loop {
                    if *max > 0 && count == *max {
                        break;
                    }
                    let before = cursor.offset();
                    if !rule.try_match(cursor) {
                        break;
                    }
                    if cursor.offset() == before {
                        // Inner rule matched zero characters; counting it
                        // again would never terminate.
                        break;
                    }
                    count += 1;
                }
                if count >= *min {
                    true
                } else {
                    cursor.restore(checkpoint);
                    false
                }
            }
            LexicalRule::Empty => true,
        }
    }
}

fn consume_if<F: Fn(char) -> bool>(cursor: &mut CharCursor, predicate: F) -> bool {
    match cursor.peek() {
        Some(ch) if predicate(ch) => {
            cursor.advance();
            true
        }
        _ => false,
    }
}

impl BitOr for LexicalRule {
    type Output = LexicalRule;

    fn bitor(self, rhs: LexicalRule) -> LexicalRule {
        self.or(rhs)
    }
}
