//! A calculator grammar built purely on the public combinator API.
//!
//! Demonstrates the intended shape of a grammar layer: lexemes declared
//! once in a [`LexemeSet`], precedence expressed as an expr/term/factor
//! ladder, recursion wired through [`RuleContainer`] indirections, and
//! statement termination inferred by a custom lookahead rule (`;`, a line
//! break before the next token, or end of input).

use lexer_core::{LexemeSet, LexicalRule};
use parser_core::{
    parse_top_level, BranchedLexer, LexemeExt, ParseError, ParsingRule, RuleContainer,
    SyntaxError,
};

/// The calculator language: lexemes plus the wired grammar rules.
pub struct CalcGrammar {
    lexemes: LexemeSet,
    expression: ParsingRule<f64>,
    program: ParsingRule<Vec<f64>>,
}

impl CalcGrammar {
    pub fn new() -> Self {
        let mut set = LexemeSet::new();

        let digit = LexicalRule::char_when(|ch| ch.is_ascii_digit());
        set.define_trivia(
            "whitespace",
            LexicalRule::char_when(char::is_whitespace).many1(),
        );
        set.define_trivia(
            "comment",
            LexicalRule::literal("//").then(LexicalRule::not_char('\n').many0()),
        );
        let number = set.define(
            "number",
            digit.clone().many1().then(
                LexicalRule::char('.')
                    .then(digit.many1())
                    .or(LexicalRule::empty()),
            ),
        );
        let plus = set.define("plus", LexicalRule::char('+'));
        let minus = set.define("minus", LexicalRule::char('-'));
        let star = set.define("star", LexicalRule::char('*'));
        let slash = set.define("slash", LexicalRule::char('/'));
        let lparen = set.define("lparen", LexicalRule::char('('));
        let rparen = set.define("rparen", LexicalRule::char(')'));
        let semicolon = set.define("semicolon", LexicalRule::char(';'));

        // factor := number | '(' expression ')' | '-' factor
        let expression = RuleContainer::<f64>::new();
        let factor = RuleContainer::<f64>::new();

        let number_rule = ParsingRule::token_map(&number, |token| {
            token.text().parse().expect("number lexeme is a valid float")
        });
        let parenthesized = lparen
            .parsing_rule()
            .then(
                &expression.rule().or_fail_expected("expression"),
                |_, inner| inner,
            )
            .then(
                &rparen.parsing_rule().or_fail_expected(")"),
                |inner, _| inner,
            );
        let negated = minus
            .parsing_rule()
            .then(&factor.rule().or_fail_expected("expression"), |_, value: f64| -value);
        factor.set(number_rule | parenthesized | negated);

        // term := factor (('*' | '/') factor)*
        let mul_op = ParsingRule::token_map(&star, |_| Op::Mul)
            | ParsingRule::token_map(&slash, |_| Op::Div);
        let term = fold_chain(&factor.rule(), &mul_op);

        // expression := term (('+' | '-') term)*
        let add_op = ParsingRule::token_map(&plus, |_| Op::Add)
            | ParsingRule::token_map(&minus, |_| Op::Sub);
        expression.set(fold_chain(&term, &add_op));

        // statement := expression (';' | line break | end of input)
        let expr_rule = expression.rule();
        let statement = ParsingRule::custom(move |lexer: &mut BranchedLexer| {
            let start_line = match lexer.peek()? {
                Some(token) => token.position().line,
                None => return Ok(None),
            };
            let Some(value) = expr_rule.try_parse(lexer)? else {
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

        Self {
            lexemes: set,
            expression: expression.rule(),
            program: statement.many1(),
        }
    }

    /// Evaluates a single expression; the whole input must be consumed.
    pub fn eval_expression(&self, source: &str) -> Result<f64, ParseError> {
        parse_top_level(source, &self.lexemes, &self.expression)
    }

    /// Evaluates a sequence of statements, returning one value per
    /// statement.
    pub fn eval_program(&self, source: &str) -> Result<Vec<f64>, ParseError> {
        parse_top_level(source, &self.lexemes, &self.program)
    }
}

impl Default for CalcGrammar {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div => lhs / rhs,
        }
    }
}

/// operand (op operand)*, folded left-associatively.
fn fold_chain(operand: &ParsingRule<f64>, op: &ParsingRule<Op>) -> ParsingRule<f64> {
    let tail = op.then(operand, |op, value| (op, value)).many0();
    operand.then(&tail, |first, rest| {
        rest.into_iter()
            .fold(first, |acc, (op, value)| op.apply(acc, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_and_unary_minus() {
        let calc = CalcGrammar::new();
        assert_eq!(calc.eval_expression("42").unwrap(), 42.0);
        assert_eq!(calc.eval_expression("3.25").unwrap(), 3.25);
        assert_eq!(calc.eval_expression("-7").unwrap(), -7.0);
        assert_eq!(calc.eval_expression("--7").unwrap(), 7.0);
    }

    #[test]
    fn test_comments_are_trivia() {
        let calc = CalcGrammar::new();
        assert_eq!(
            calc.eval_program("1 + 1 // sum\n2 * 2").unwrap(),
            vec![2.0, 4.0]
        );
    }
}
