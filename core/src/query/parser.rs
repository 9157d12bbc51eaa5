//! Recursive descent parser for boolean queries.
//!
//! # Grammar
//!
//! ```text
//! or_expr   := and_expr ('||' and_expr)*
//! and_expr  := not_expr ('&&' not_expr)*
//! not_expr  := '!' not_expr | primary
//! primary   := TERM | '(' or_expr ')'
//! ```
//!
//! `!` and `(` may nest at most [`MAX_DEPTH`] levels, which also bounds the
//! depth of the resulting tree.

use super::lexer::{Lexer, Token};
use crate::error::Malformed;
use std::fmt;

/// Combined nesting limit for `!` and parentheses.
pub const MAX_DEPTH: usize = 256;

/// Query tree. `And`/`Or` hold every operand of one flat chain (at least two).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Term(String),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
    Group(Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Term(t) => f.write_str(t),
            Expr::And(operands) => write_joined(f, operands, " && "),
            Expr::Or(operands) => write_joined(f, operands, " || "),
            Expr::Not(e) => write!(f, "!{e}"),
            Expr::Group(e) => write!(f, "({e})"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, operands: &[Expr], sep: &str) -> fmt::Result {
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{operand}")?;
    }
    Ok(())
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    offset: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, Malformed> {
        let mut lexer = Lexer::new(input);
        let (current, offset) = lexer.next_token()?;
        Ok(Self { lexer, current, offset, depth: 0 })
    }

    /// Parse the whole input as one expression.
    pub fn parse(&mut self) -> Result<Expr, Malformed> {
        let expr = self.parse_or_expr()?;
        match self.current {
            Token::Eof => Ok(expr),
            Token::RightParen => Err(Malformed::UnbalancedParenthesis { offset: self.offset }),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_or_expr(&mut self) -> Result<Expr, Malformed> {
        let mut operands = vec![self.parse_and_expr()?];
        while self.current == Token::Or {
            self.advance()?;
            operands.push(self.parse_and_expr()?);
        }
        Ok(combine(operands, Expr::Or))
    }

    fn parse_and_expr(&mut self) -> Result<Expr, Malformed> {
        let mut operands = vec![self.parse_not_expr()?];
        while self.current == Token::And {
            self.advance()?;
            operands.push(self.parse_not_expr()?);
        }
        Ok(combine(operands, Expr::And))
    }

    fn parse_not_expr(&mut self) -> Result<Expr, Malformed> {
        if self.current == Token::Not {
            self.descend()?;
            self.advance()?;
            let inner = self.parse_not_expr();
            self.depth -= 1;
            return Ok(Expr::Not(Box::new(inner?)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, Malformed> {
        match std::mem::replace(&mut self.current, Token::Eof) {
            Token::Term(term) => {
                self.advance()?;
                Ok(Expr::Term(term))
            }
            Token::LeftParen => {
                let open = self.offset;
                self.descend()?;
                let group = self.parse_group(open);
                self.depth -= 1;
                group
            }
            Token::Eof => Err(Malformed::UnexpectedEnd),
            other => {
                self.current = other;
                Err(self.unexpected())
            }
        }
    }

    /// Everything after an opening parenthesis at `open`.
    fn parse_group(&mut self, open: usize) -> Result<Expr, Malformed> {
        self.advance()?;
        if self.current == Token::RightParen {
            return Err(Malformed::EmptyGroup { offset: open });
        }
        let inner = self.parse_or_expr()?;
        match self.current {
            Token::RightParen => {
                self.advance()?;
                Ok(Expr::Group(Box::new(inner)))
            }
            Token::Eof => Err(Malformed::UnbalancedParenthesis { offset: open }),
            _ => Err(self.unexpected()),
        }
    }

    /// Enter one `!` or `(` level.
    fn descend(&mut self) -> Result<(), Malformed> {
        if self.depth >= MAX_DEPTH {
            return Err(Malformed::TooDeep { limit: MAX_DEPTH, offset: self.offset });
        }
        self.depth += 1;
        Ok(())
    }

    fn advance(&mut self) -> Result<(), Malformed> {
        let (token, offset) = self.lexer.next_token()?;
        self.current = token;
        self.offset = offset;
        Ok(())
    }

    fn unexpected(&self) -> Malformed {
        Malformed::UnexpectedToken { found: self.current.to_string(), offset: self.offset }
    }
}

fn combine(mut operands: Vec<Expr>, op: fn(Vec<Expr>) -> Expr) -> Expr {
    match operands.len() {
        1 => operands.swap_remove(0),
        _ => op(operands),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Expr, Malformed> {
        Parser::new(input)?.parse()
    }

    fn term(t: &str) -> Expr {
        Expr::Term(t.into())
    }

    #[test]
    fn precedence_not_and_or() {
        let expr = parse("a || b && !c").unwrap();
        assert_eq!(
            expr,
            Expr::Or(vec![term("a"), Expr::And(vec![term("b"), Expr::Not(Box::new(term("c")))])])
        );
    }

    #[test]
    fn chains_are_flat() {
        let expr = parse("a && b && c").unwrap();
        assert_eq!(expr, Expr::And(vec![term("a"), term("b"), term("c")]));
    }

    #[test]
    fn groups_override_precedence() {
        let expr = parse("(a || b) && c").unwrap();
        assert_eq!(
            expr,
            Expr::And(vec![Expr::Group(Box::new(Expr::Or(vec![term("a"), term("b")]))), term("c")])
        );
        assert_eq!(expr.to_string(), "(a || b) && c");
    }

    #[test]
    fn display_round_trips() {
        let expr = parse("data&&some&&(hello||!!world)").unwrap();
        let printed = expr.to_string();
        assert_eq!(printed, "data && some && (hello || !!world)");
        assert_eq!(parse(&printed).unwrap(), expr);
    }

    #[test]
    fn long_flat_chains_parse() {
        let query = vec!["a"; 100_000].join(" && ");
        match parse(&query).unwrap() {
            Expr::And(operands) => assert_eq!(operands.len(), 100_000),
            other => panic!("expected a conjunction, got {other:?}"),
        }
    }

    #[test]
    fn nesting_up_to_the_limit_is_accepted() {
        let bangs = format!("{}a", "!".repeat(MAX_DEPTH));
        assert!(parse(&bangs).is_ok());
        let parens = format!("{}a{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(parse(&parens).is_ok());
        let mixed = format!("{}a{}", "!(".repeat(MAX_DEPTH / 2), ")".repeat(MAX_DEPTH / 2));
        assert!(parse(&mixed).is_ok());
    }

    #[test]
    fn nesting_past_the_limit_is_rejected() {
        let bangs = format!("{}a", "!".repeat(5_000));
        assert_eq!(
            parse(&bangs),
            Err(Malformed::TooDeep { limit: MAX_DEPTH, offset: MAX_DEPTH })
        );
        let parens = format!("{}a{}", "(".repeat(1_000), ")".repeat(1_000));
        assert_eq!(
            parse(&parens),
            Err(Malformed::TooDeep { limit: MAX_DEPTH, offset: MAX_DEPTH })
        );
        assert!(matches!(parse(&"(".repeat(200_000)), Err(Malformed::TooDeep { .. })));
    }

    #[test]
    fn structural_errors() {
        assert_eq!(parse("(a && b"), Err(Malformed::UnbalancedParenthesis { offset: 0 }));
        assert_eq!(parse("a && b)"), Err(Malformed::UnbalancedParenthesis { offset: 6 }));
        assert_eq!(parse("a &&"), Err(Malformed::UnexpectedEnd));
        assert_eq!(parse("!"), Err(Malformed::UnexpectedEnd));
        assert_eq!(parse("a && ()"), Err(Malformed::EmptyGroup { offset: 5 }));
        assert_eq!(
            parse("|| a"),
            Err(Malformed::UnexpectedToken { found: "`||`".into(), offset: 0 })
        );
        assert_eq!(
            parse("a b"),
            Err(Malformed::UnexpectedToken { found: "term `b`".into(), offset: 2 })
        );
        assert_eq!(
            parse("(a b)"),
            Err(Malformed::UnexpectedToken { found: "term `b`".into(), offset: 3 })
        );
        assert_eq!(parse("   "), Err(Malformed::UnexpectedEnd));
    }
}
