//! Concrete syntax for rational expressions.
//!
//! ```text
//! union  := concat ('+' concat)*
//! concat := star ('.'? star)*
//! star   := atom '*'*
//! atom   := letter | 'ε' | '∅' | '(' union ')' | '[' union ']' | '{' union '}'
//! ```
//!
//! Letters are single ASCII alphanumeric characters and whitespace is
//! ignored.
//! The three bracket pairs are interchangeable, which lets the output of
//! `Display` be read back.

use crate::error::{ParseError, Result};
use crate::rational::expr::{self, Expr};
use std::iter::Peekable;
use std::str::CharIndices;

/// Parse `text` into an expression; `Ok(None)` is the empty language.
pub fn parse(text: &str) -> Result<Option<Expr>> {
    let mut parser = Parser::new(text);
    let expr = parser.union()?;
    match parser.peek() {
        None => Ok(expr),
        Some((offset, found)) => Err(ParseError::UnexpectedChar { offset, found }),
    }
}

struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
    /// Offsets of the open brackets, innermost last
    groups: Vec<usize>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices().peekable(),
            groups: Vec::new(),
        }
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
        self.chars.peek().copied()
    }

    fn bump(&mut self) {
        self.chars.next();
    }

    fn union(&mut self) -> Result<Option<Expr>> {
        let mut result = self.concat()?;
        while let Some((_, '+')) = self.peek() {
            self.bump();
            let right = self.concat()?;
            result = expr::union(result, right);
        }
        Ok(result)
    }

    fn concat(&mut self) -> Result<Option<Expr>> {
        let mut result = self.star()?;
        loop {
            match self.peek() {
                Some((_, '.')) => {
                    self.bump();
                }
                Some((_, c)) if starts_atom(c) => {}
                _ => return Ok(result),
            }
            let right = self.star()?;
            result = expr::concat(result, right);
        }
    }

    fn star(&mut self) -> Result<Option<Expr>> {
        let mut result = self.atom()?;
        while let Some((_, '*')) = self.peek() {
            self.bump();
            result = expr::star(result);
        }
        Ok(result)
    }

    fn atom(&mut self) -> Result<Option<Expr>> {
        let Some((offset, c)) = self.peek() else {
            return Err(match self.groups.last() {
                Some(&offset) => ParseError::UnclosedGroup { offset },
                None => ParseError::UnexpectedEnd,
            });
        };

        match c {
            'ε' => {
                self.bump();
                Ok(Some(Expr::epsilon()))
            }
            '∅' => {
                self.bump();
                Ok(None)
            }
            '(' | '[' | '{' => {
                self.bump();
                let close = closing(c);
                self.groups.push(offset);
                let inner = self.union()?;
                match self.peek() {
                    Some((_, found)) if found == close => {
                        self.bump();
                        self.groups.pop();
                        Ok(inner)
                    }
                    Some((at, found)) => Err(ParseError::UnexpectedChar { offset: at, found }),
                    None => Err(ParseError::UnclosedGroup { offset }),
                }
            }
            c if c.is_ascii_alphanumeric() => {
                self.bump();
                Ok(Some(Expr::letter(c)))
            }
            found => Err(ParseError::UnexpectedChar { offset, found }),
        }
    }
}

fn starts_atom(c: char) -> bool {
    matches!(c, 'ε' | '∅' | '(' | '[' | '{') || c.is_ascii_alphanumeric()
}

fn closing(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}
