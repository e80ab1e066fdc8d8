//! Grammar-level behavior: mutually recursive containers, required-token
//! diagnostics, full-consumption enforcement, and line-sensitive custom
//! lookahead.

use parser_core::{
    parse_top_level, BranchedLexer, Lexeme, LexemeSet, LexicalRule, ParseError, ParsingRule,
    Position, RuleContainer, SyntaxError,
};
use proptest::prelude::*;

struct Fixture {
    set: LexemeSet,
    number: Lexeme,
    lparen: Lexeme,
    rparen: Lexeme,
    semicolon: Lexeme,
}

fn fixture() -> Fixture {
    let mut set = LexemeSet::new();
    set.define_trivia("ws", LexicalRule::one_of([' ', '\n']).many1());
    let number = set.define(
        "number",
        LexicalRule::char_when(|ch| ch.is_ascii_digit()).many1(),
    );
    let lparen = set.define("lparen", LexicalRule::char('('));
    let rparen = set.define("rparen", LexicalRule::char(')'));
    let semicolon = set.define("semicolon", LexicalRule::char(';'));
    Fixture {
        set,
        number,
        lparen,
        rparen,
        semicolon,
    }
}

/// number | '(' expr ')', wired through a container so the grammar can
/// reference itself.
fn paren_grammar(fx: &Fixture) -> ParsingRule<i64> {
    let expr = RuleContainer::<i64>::new();
    let number = ParsingRule::token_map(&fx.number, |t| t.text().parse().unwrap());
    let parenthesized = ParsingRule::token(&fx.lparen)
        .then(&expr.rule(), |_, inner| inner)
        .then(
            &ParsingRule::token(&fx.rparen).or_fail_expected(")"),
            |inner, _| inner,
        );
    expr.set(number | parenthesized);
    expr.rule()
}

#[test]
fn mutual_recursion_via_container() {
    let fx = fixture();
    let expr = paren_grammar(&fx);
    assert_eq!(parse_top_level("1", &fx.set, &expr).unwrap(), 1);
    assert_eq!(parse_top_level("((((1))))", &fx.set, &expr).unwrap(), 1);

    let deep = format!("{}7{}", "(".repeat(64), ")".repeat(64));
    assert_eq!(parse_top_level(&deep, &fx.set, &expr).unwrap(), 7);
}

#[test]
fn missing_close_paren_reports_end_of_input() {
    let fx = fixture();
    let expr = paren_grammar(&fx);
    match parse_top_level("(1", &fx.set, &expr).unwrap_err() {
        ParseError::Syntax(SyntaxError { position, message }) => {
            assert_eq!(message, "Expected ).");
            assert!(position.is_end_of_input());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_close_paren_reports_unexpected_token() {
    let fx = fixture();
    let expr = paren_grammar(&fx);
    match parse_top_level("(1 2)", &fx.set, &expr).unwrap_err() {
        ParseError::Syntax(SyntaxError { position, message }) => {
            assert_eq!(message, "Expected ).");
            assert_eq!(position, Position::at(1, 4, 3));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn leftover_tokens_are_rejected() {
    let fx = fixture();
    let expr = paren_grammar(&fx);
    match parse_top_level("1 (2)", &fx.set, &expr).unwrap_err() {
        ParseError::Syntax(SyntaxError { position, message }) => {
            assert_eq!(message, "Statement expected.");
            assert_eq!(position, Position::at(1, 3, 2));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn root_mismatch_is_reported_at_first_token() {
    let fx = fixture();
    let expr = paren_grammar(&fx);
    match parse_top_level(")", &fx.set, &expr).unwrap_err() {
        ParseError::Syntax(SyntaxError { position, message }) => {
            assert_eq!(message, "Statement expected.");
            assert_eq!(position, Position::at(1, 1, 0));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Statement-terminator inference: a statement ends at `;`, or at a line
/// break before the next token, or at end of input; anything else is a
/// hard error. This is the custom-rule escape hatch doing lookahead the
/// declarative combinators cannot express.
fn statement_grammar(fx: &Fixture) -> ParsingRule<Vec<i64>> {
    let expr = paren_grammar(fx);
    let semicolon = fx.semicolon.clone();
    let statement = ParsingRule::custom(move |lexer: &mut BranchedLexer| {
        let start_line = match lexer.peek()? {
            Some(token) => token.position().line,
            None => return Ok(None),
        };
        let Some(value) = expr.try_parse(lexer)? else {
            return Ok(None);
        };
        match lexer.peek()? {
            None => Ok(Some(value)),
            Some(token) if token.lexeme() == &semicolon => {
                lexer.read()?;
                Ok(Some(value))
            }
            Some(token) if token.position().line > start_line => Ok(Some(value)),
            Some(token) => Err(SyntaxError::expected(token.position(), ";").into()),
        }
    });
    statement.many1()
}

#[test]
fn statements_terminated_by_semicolon_or_line_break() {
    let fx = fixture();
    let program = statement_grammar(&fx);
    assert_eq!(
        parse_top_level("1; 2; (3)\n4", &fx.set, &program).unwrap(),
        vec![1, 2, 3, 4]
    );
}

proptest! {
    /// Parenthesized nesting is depth-independent: the recursion resolves
    /// through the container for any nesting the call stack can take.
    #[test]
    fn nesting_depth_is_transparent(depth in 0usize..128, value in 0u32..1000) {
        let fx = fixture();
        let expr = paren_grammar(&fx);
        let source = format!("{}{value}{}", "(".repeat(depth), ")".repeat(depth));
        prop_assert_eq!(
            parse_top_level(&source, &fx.set, &expr).unwrap(),
            i64::from(value)
        );
    }
}

#[test]
fn unterminated_statement_is_a_hard_error() {
    let fx = fixture();
    let program = statement_grammar(&fx);
    match parse_top_level("1 2", &fx.set, &program).unwrap_err() {
        ParseError::Syntax(SyntaxError { position, message }) => {
            assert_eq!(message, "Expected ;.");
            assert_eq!(position, Position::at(1, 3, 2));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
