use serde_json::Value;
use thiserror::Error;

use crate::types::{CmpOp, FilterExpr, JsonPath, Operand, Segment, Selector};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum JsonPathError {
    #[error("expected '$' at start of path")]
    ExpectedRoot,
    #[error("unexpected character {0:?} at offset {1}")]
    UnexpectedChar(char, usize),
    #[error("unexpected end of path")]
    UnexpectedEnd,
    #[error("unclosed string literal")]
    UnclosedString,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("invalid number literal")]
    InvalidNumber,
    #[error("invalid selector at offset {0}")]
    InvalidSelector(usize),
}

/// Hand-rolled recursive-descent parser for the path grammar.
pub struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn parse(input: &'a str) -> Result<JsonPath, JsonPathError> {
        let mut parser = Self { input: input.trim(), pos: 0 };
        if parser.peek() != Some('$') {
            return Err(JsonPathError::ExpectedRoot);
        }
        parser.advance();
        let path = parser.parse_segments()?;
        parser.skip_whitespace();
        match parser.peek() {
            None => Ok(path),
            Some(c) => Err(JsonPathError::UnexpectedChar(c, parser.pos)),
        }
    }

    fn parse_segments(&mut self) -> Result<JsonPath, JsonPathError> {
        let mut segments = Vec::new();
        loop {
            match self.peek() {
                Some('.') => {
                    self.advance();
                    if self.peek() == Some('.') {
                        // recursive descent
                        self.advance();
                        let selectors = self.parse_descendant_selectors()?;
                        segments.push(Segment { selectors, recursive: true });
                    } else if self.peek() == Some('*') {
                        self.advance();
                        segments.push(Segment {
                            selectors: vec![Selector::Wildcard],
                            recursive: false,
                        });
                    } else {
                        let name = self.parse_identifier()?;
                        segments.push(Segment {
                            selectors: vec![Selector::Name(name)],
                            recursive: false,
                        });
                    }
                }
                Some('[') => {
                    let selectors = self.parse_bracket_selectors()?;
                    segments.push(Segment { selectors, recursive: false });
                }
                _ => break,
            }
        }
        Ok(JsonPath { segments })
    }

    fn parse_descendant_selectors(&mut self) -> Result<Vec<Selector>, JsonPathError> {
        match self.peek() {
            Some('*') => {
                self.advance();
                Ok(vec![Selector::Wildcard])
            }
            Some('[') => self.parse_bracket_selectors(),
            _ => Ok(vec![Selector::Name(self.parse_identifier()?)]),
        }
    }

    fn parse_bracket_selectors(&mut self) -> Result<Vec<Selector>, JsonPathError> {
        self.expect('[')?;
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(']') {
                self.advance();
                break;
            }
            selectors.push(self.parse_bracket_selector()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some(']') => {
                    self.advance();
                    break;
                }
                Some(c) => return Err(JsonPathError::UnexpectedChar(c, self.pos)),
                None => return Err(JsonPathError::UnexpectedEnd),
            }
        }
        if selectors.is_empty() {
            return Err(JsonPathError::InvalidSelector(self.pos));
        }
        Ok(selectors)
    }

    fn parse_bracket_selector(&mut self) -> Result<Selector, JsonPathError> {
        match self.peek() {
            Some('\'') | Some('"') => Ok(Selector::Name(self.parse_string()?)),
            Some('*') => {
                self.advance();
                Ok(Selector::Wildcard)
            }
            Some(':') | Some('-') | Some('0'..='9') => self.parse_index_or_slice(),
            Some('?') => {
                self.advance();
                self.skip_whitespace();
                self.expect('(')?;
                let expr = self.parse_or()?;
                self.skip_whitespace();
                self.expect(')')?;
                Ok(Selector::Filter(expr))
            }
            _ => Err(JsonPathError::InvalidSelector(self.pos)),
        }
    }

    fn parse_index_or_slice(&mut self) -> Result<Selector, JsonPathError> {
        let start = self.parse_optional_int()?;
        if self.peek() == Some(':') {
            self.advance();
            let end = self.parse_optional_int()?;
            let step = if self.peek() == Some(':') {
                self.advance();
                self.parse_optional_int()?
            } else {
                None
            };
            Ok(Selector::Slice { start, end, step })
        } else {
            match start {
                Some(i) => Ok(Selector::Index(i)),
                None => Err(JsonPathError::InvalidNumber),
            }
        }
    }

    fn parse_optional_int(&mut self) -> Result<Option<isize>, JsonPathError> {
        self.skip_whitespace();
        if matches!(self.peek(), Some('0'..='9') | Some('-')) {
            Ok(Some(self.parse_int()?))
        } else {
            Ok(None)
        }
    }

    fn parse_int(&mut self) -> Result<isize, JsonPathError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| JsonPathError::InvalidNumber)
    }

    fn parse_identifier(&mut self) -> Result<String, JsonPathError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                self.advance();
            } else {
                break;
            }
        }
        if self.pos == start {
            return match self.peek() {
                Some(c) => Err(JsonPathError::UnexpectedChar(c, self.pos)),
                None => Err(JsonPathError::UnexpectedEnd),
            };
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_string(&mut self) -> Result<String, JsonPathError> {
        let quote = self.peek().ok_or(JsonPathError::UnexpectedEnd)?;
        self.advance();
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(JsonPathError::UnclosedString),
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(out);
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some('n') => out.push('\n'),
                        Some('t') => out.push('\t'),
                        Some('r') => out.push('\r'),
                        Some('\\') => out.push('\\'),
                        Some('\'') => out.push('\''),
                        Some('"') => out.push('"'),
                        _ => return Err(JsonPathError::InvalidEscape),
                    }
                    self.advance();
                }
                Some(c) => {
                    out.push(c);
                    self.advance();
                }
            }
        }
    }

    // ── Filter expressions ───────────────────────────────────────────────

    fn parse_or(&mut self) -> Result<FilterExpr, JsonPathError> {
        let mut left = self.parse_and()?;
        loop {
            self.skip_whitespace();
            if self.eat_str("||") {
                let right = self.parse_and()?;
                left = FilterExpr::Or(Box::new(left), Box::new(right));
            } else {
                return Ok(left);
            }
        }
    }

    fn parse_and(&mut self) -> Result<FilterExpr, JsonPathError> {
        let mut left = self.parse_unary()?;
        loop {
            self.skip_whitespace();
            if self.eat_str("&&") {
                let right = self.parse_unary()?;
                left = FilterExpr::And(Box::new(left), Box::new(right));
            } else {
                return Ok(left);
            }
        }
    }

    fn parse_unary(&mut self) -> Result<FilterExpr, JsonPathError> {
        self.skip_whitespace();
        match self.peek() {
            Some('!') => {
                self.advance();
                Ok(FilterExpr::Not(Box::new(self.parse_unary()?)))
            }
            Some('(') => {
                self.advance();
                let inner = self.parse_or()?;
                self.skip_whitespace();
                self.expect(')')?;
                Ok(inner)
            }
            _ => self.parse_comparison(),
        }
    }

    fn parse_comparison(&mut self) -> Result<FilterExpr, JsonPathError> {
        let left = self.parse_operand()?;
        self.skip_whitespace();
        match self.parse_cmp_op() {
            Some(op) => {
                let right = self.parse_operand()?;
                Ok(FilterExpr::Compare { op, left, right })
            }
            None => match left {
                // a bare path is an existence test
                Operand::Current(_) | Operand::Root(_) => Ok(FilterExpr::Exists(left)),
                Operand::Literal(_) => Err(JsonPathError::InvalidSelector(self.pos)),
            },
        }
    }

    fn parse_cmp_op(&mut self) -> Option<CmpOp> {
        let ops: [(&str, CmpOp); 6] = [
            ("==", CmpOp::Eq),
            ("!=", CmpOp::Ne),
            ("<=", CmpOp::Le),
            (">=", CmpOp::Ge),
            ("<", CmpOp::Lt),
            (">", CmpOp::Gt),
        ];
        for (text, op) in ops {
            if self.eat_str(text) {
                return Some(op);
            }
        }
        None
    }

    fn parse_operand(&mut self) -> Result<Operand, JsonPathError> {
        self.skip_whitespace();
        match self.peek() {
            Some('@') => {
                self.advance();
                Ok(Operand::Current(self.parse_segments()?))
            }
            Some('$') => {
                self.advance();
                Ok(Operand::Root(self.parse_segments()?))
            }
            Some('\'') | Some('"') => Ok(Operand::Literal(Value::String(self.parse_string()?))),
            Some('0'..='9') | Some('-') => {
                let start = self.pos;
                if self.peek() == Some('-') {
                    self.advance();
                }
                while matches!(self.peek(), Some('0'..='9') | Some('.') | Some('e') | Some('E'))
                    || (matches!(self.peek(), Some('+') | Some('-'))
                        && matches!(self.prev(), Some('e') | Some('E')))
                {
                    self.advance();
                }
                // parse through serde_json so the literal keeps its text
                let literal: Value = serde_json::from_str(&self.input[start..self.pos])
                    .map_err(|_| JsonPathError::InvalidNumber)?;
                if !literal.is_number() {
                    return Err(JsonPathError::InvalidNumber);
                }
                Ok(Operand::Literal(literal))
            }
            _ => {
                if self.eat_str("true") {
                    Ok(Operand::Literal(Value::Bool(true)))
                } else if self.eat_str("false") {
                    Ok(Operand::Literal(Value::Bool(false)))
                } else if self.eat_str("null") {
                    Ok(Operand::Literal(Value::Null))
                } else {
                    Err(JsonPathError::InvalidSelector(self.pos))
                }
            }
        }
    }

    // ── Cursor primitives ────────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn prev(&self) -> Option<char> {
        self.input[..self.pos].chars().next_back()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), JsonPathError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(c) => Err(JsonPathError::UnexpectedChar(c, self.pos)),
            None => Err(JsonPathError::UnexpectedEnd),
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        if self.input[self.pos..].starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }
}
