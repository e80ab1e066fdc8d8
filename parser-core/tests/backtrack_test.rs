//! Backtracking guarantees: failed alternatives and greedy repeats must
//! never leak consumption into the caller's cursor.

use parser_core::{BranchedLexer, Lexeme, LexemeSet, LexicalRule, ParsingRule, Token};

struct Fixture {
    set: LexemeSet,
    a: Lexeme,
    b: Lexeme,
    x: Lexeme,
    y: Lexeme,
    word: Lexeme,
}

fn fixture() -> Fixture {
    let mut set = LexemeSet::new();
    set.define_trivia("ws", LexicalRule::char(' ').many1());
    let a = set.define("a", LexicalRule::char('a'));
    let b = set.define("b", LexicalRule::char('b'));
    let x = set.define("x", LexicalRule::char('x'));
    let y = set.define("y", LexicalRule::char('y'));
    let word = set.define(
        "word",
        LexicalRule::char_when(|ch| ch.is_ascii_alphabetic()).many1(),
    );
    Fixture { set, a, b, x, y, word }
}

fn seq3(first: &Lexeme, second: &Lexeme, third: &Lexeme) -> ParsingRule<String> {
    ParsingRule::token(first)
        .then(&ParsingRule::token(second), |l: Token, r: Token| {
            format!("{l}{r}")
        })
        .then(&ParsingRule::token(third), |l, r| format!("{l}{r}"))
}

#[test]
fn failed_alternative_leaves_no_trace() {
    let fx = fixture();
    // (a b x) | (a b y) on "a b y": the first alternative consumes two
    // tokens before failing; the second must start from the origin and
    // the final position must be exactly its consumption.
    let rule = seq3(&fx.a, &fx.b, &fx.x) | seq3(&fx.a, &fx.b, &fx.y);

    let mut lexer = BranchedLexer::from_source("a b y", &fx.set);
    assert_eq!(rule.try_parse(&mut lexer).unwrap(), Some("aby".to_string()));
    assert_eq!(lexer.token_index(), 3);
}

#[test]
fn both_alternatives_failing_consumes_nothing() {
    let fx = fixture();
    let rule = seq3(&fx.a, &fx.b, &fx.x) | seq3(&fx.a, &fx.b, &fx.y);

    let mut lexer = BranchedLexer::from_source("a b b", &fx.set);
    assert_eq!(rule.try_parse(&mut lexer).unwrap(), None);
    assert_eq!(lexer.token_index(), 0);
}

#[test]
fn greedy_repeat_does_not_reconsider_count() {
    let fx = fixture();
    // word+ word: the repeat eats every word, leaving nothing for the
    // trailing rule, and the count is never backed off.
    let words = ParsingRule::token(&fx.word).many1();
    let rule = words.then(&ParsingRule::token(&fx.word), |ws, last| (ws.len(), last));

    let mut lexer = BranchedLexer::from_source("one two three", &fx.set);
    assert_eq!(rule.try_parse(&mut lexer).unwrap().map(|(n, _)| n), None);
    assert_eq!(lexer.token_index(), 0);
}

#[test]
fn repeat_stops_at_first_failed_attempt() {
    let fx = fixture();
    let ab = ParsingRule::token(&fx.a).then(&ParsingRule::token(&fx.b), |_, r: Token| r);
    let mut lexer = BranchedLexer::from_source("a b a b a x", &fx.set);
    let pairs = ab.many0().try_parse(&mut lexer).unwrap().unwrap();
    assert_eq!(pairs.len(), 2);
    // The trailing half-pair "a" was rolled back.
    assert_eq!(lexer.token_index(), 4);
}

#[test]
fn nested_alternation_restarts_from_origin() {
    let fx = fixture();
    // ((a b) | a) then y, on "a y": the inner alternation first consumes
    // "a" while trying "a b", fails, then retries plain "a" from the
    // origin.
    let inner = ParsingRule::token(&fx.a).then(&ParsingRule::token(&fx.b), |l: Token, _| l)
        | ParsingRule::token(&fx.a);
    let rule = inner.then(&ParsingRule::token(&fx.y), |l, _| l.text().to_string());

    let mut lexer = BranchedLexer::from_source("a y", &fx.set);
    assert_eq!(rule.try_parse(&mut lexer).unwrap(), Some("a".to_string()));
    assert_eq!(lexer.token_index(), 2);
}
