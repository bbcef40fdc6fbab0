use anyhow::{bail, Result};
use std::fmt;
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub enum SExpr {
    Atom(String),
    List(Vec<SExpr>),
}

impl SExpr {
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            SExpr::Atom(a) => Some(a),
            SExpr::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SExpr]> {
        match self {
            SExpr::List(items) => Some(items),
            SExpr::Atom(_) => None,
        }
    }
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExpr::Atom(a) => write!(f, "{}", a),
            SExpr::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

pub fn parse_all(input: &str) -> Result<Vec<SExpr>> {
    let mut p = Parser {
        s: input,
        i: 0,
        line: 1,
    };
    let mut exprs = Vec::new();
    while p.skip_ws() {
        let e = p.parse_expr()?;
        trace!(%e, "parsed sexpr");
        exprs.push(e);
    }
    Ok(exprs)
}

struct Parser<'a> {
    s: &'a str,
    i: usize,
    line: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.s[self.i..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.i += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    /// Skips whitespace and `;` line comments. Returns whether input remains.
    fn skip_ws(&mut self) -> bool {
        loop {
            while self.peek().map_or(false, char::is_whitespace) {
                self.bump();
            }
            // `;;` is an operator inside lists, a comment only at line level
            if self.peek() == Some(';') && !self.at_operator() {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
                continue;
            }
            break;
        }
        self.i < self.s.len()
    }

    fn at_operator(&self) -> bool {
        self.s[self.i..].starts_with(";;")
            && self.s[self.i + 2..]
                .chars()
                .next()
                .map_or(false, |c| c.is_whitespace() || c == ')')
            && self.s[..self.i].trim_end().ends_with(|c: char| c == '(')
    }

    fn parse_expr(&mut self) -> Result<SExpr> {
        match self.peek() {
            Some('(') => self.parse_list(),
            Some(')') => bail!("line {}: unexpected closing paren", self.line),
            Some(_) => self.parse_atom(),
            None => bail!("unexpected end of input"),
        }
    }

    fn parse_list(&mut self) -> Result<SExpr> {
        let start = self.line;
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some(')') => {
                    self.bump();
                    break;
                }
                Some(_) => items.push(self.parse_expr()?),
                None => bail!("line {}: unterminated list", start),
            }
        }
        Ok(SExpr::List(items))
    }

    /// `|` opens a quoted name unless it starts one of the operators `|`,
    /// `|->` or `|=>`.
    fn at_quote(&self) -> bool {
        self.peek() == Some('|')
            && !matches!(self.peek_second(), None | Some('-' | '=' | ')'))
            && !self.peek_second().map_or(false, char::is_whitespace)
    }

    fn parse_atom(&mut self) -> Result<SExpr> {
        if self.at_quote() {
            let start = self.line;
            self.bump();
            let mut s = String::new();
            loop {
                match self.bump() {
                    Some('|') => return Ok(SExpr::Atom(s)),
                    Some(c) => s.push(c),
                    None => bail!("line {}: unterminated quoted name", start),
                }
            }
        }
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '(' || c == ')' {
                break;
            }
            s.push(c);
            self.bump();
        }
        Ok(SExpr::Atom(s))
    }
}
