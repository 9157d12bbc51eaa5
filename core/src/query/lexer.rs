//! Splits a query into terms, `&&`, `||`, `!` and parentheses.

use crate::error::Malformed;
use crate::tokenizer::WORD_RE;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Term(String),
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Term(t) => write!(f, "term `{t}`"),
            Token::And => f.write_str("`&&`"),
            Token::Or => f.write_str("`||`"),
            Token::Not => f.write_str("`!`"),
            Token::LeftParen => f.write_str("`(`"),
            Token::RightParen => f.write_str("`)`"),
            Token::Eof => f.write_str("end of query"),
        }
    }
}

pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset of the next unread character.
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Next token and the byte offset it starts at.
    pub fn next_token(&mut self) -> Result<(Token, usize), Malformed> {
        self.skip_whitespace();
        let start = self.position;
        let Some(ch) = self.peek() else {
            return Ok((Token::Eof, start));
        };

        let token = match ch {
            '(' => {
                self.position += 1;
                Token::LeftParen
            }
            ')' => {
                self.position += 1;
                Token::RightParen
            }
            '!' => {
                self.position += 1;
                Token::Not
            }
            '&' => self.doubled('&', Token::And)?,
            '|' => self.doubled('|', Token::Or)?,
            _ => match WORD_RE.find_at(self.input, start) {
                Some(m) if m.start() == start => {
                    self.position = m.end();
                    Token::Term(m.as_str().to_owned())
                }
                _ => return Err(Malformed::UnexpectedCharacter { ch, offset: start }),
            },
        };
        Ok((token, start))
    }

    /// `&&` and `||`: a lone `&` or `|` is an error.
    fn doubled(&mut self, ch: char, token: Token) -> Result<Token, Malformed> {
        let rest = &self.input[self.position..];
        if rest.len() >= 2 && rest.as_bytes()[1] == ch as u8 {
            self.position += 2;
            Ok(token)
        } else {
            Err(Malformed::UnexpectedCharacter { ch, offset: self.position })
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.position += ch.len_utf8();
        }
    }
}
