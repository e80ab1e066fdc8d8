use crate::branched::BranchedLexer;
use crate::error::ParseResult;
use crate::rule::{ParsingRule, Rule};
use once_cell::unsync::OnceCell;
use std::rc::Rc;

/// A set-once indirection cell enabling mutually recursive grammars.
///
/// Declare empty containers first, wire every rule body afterward, and
/// let recursive references resolve through the container instead of
/// requiring an acyclic declaration order:
///
/// ```
/// use parser_core::{LexemeSet, LexicalRule, ParsingRule, RuleContainer};
///
/// let mut set = LexemeSet::new();
/// let lparen = set.define("lparen", LexicalRule::char('('));
/// let rparen = set.define("rparen", LexicalRule::char(')'));
/// let one = set.define("one", LexicalRule::char('1'));
///
/// let expr = RuleContainer::<i64>::new();
/// let parenthesized = ParsingRule::token(&lparen)
///     .then(&expr.rule(), |_, inner| inner)
///     .then(&ParsingRule::token(&rparen), |inner, _| inner);
/// expr.set(ParsingRule::token_map(&one, |_| 1) | parenthesized);
///
/// let value = parser_core::parse_top_level("((1))", &set, &expr.rule()).unwrap();
/// assert_eq!(value, 1);
/// ```
///
/// Misuse is a programming error, not a parse failure: assigning twice
/// panics immediately, and parsing through a container that was never
/// assigned panics at first use.
pub struct RuleContainer<T> {
    cell: Rc<OnceCell<ParsingRule<T>>>,
}

impl<T> Clone for RuleContainer<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T> Default for RuleContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RuleContainer<T> {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            cell: Rc::new(OnceCell::new()),
        }
    }

    /// Assigns the content rule. May be called exactly once.
    pub fn set(&self, rule: ParsingRule<T>) {
        if self.cell.set(rule).is_err() {
            panic!("RuleContainer::set called twice");
        }
    }

    /// Returns true if the content has been assigned.
    pub fn is_set(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: 'static> RuleContainer<T> {
    /// Returns a rule delegating to the container's content at parse
    /// time.
    pub fn rule(&self) -> ParsingRule<T> {
        ParsingRule::from_rule(ContainerRule {
            cell: Rc::clone(&self.cell),
        })
    }
}

struct ContainerRule<T> {
    cell: Rc<OnceCell<ParsingRule<T>>>,
}

impl<T: 'static> Rule<T> for ContainerRule<T> {
    fn try_parse(&self, lexer: &mut BranchedLexer) -> ParseResult<T> {
        let content = self
            .cell
            .get()
            .expect("RuleContainer used before its content was assigned");
        content.try_parse(lexer)
    }
}
