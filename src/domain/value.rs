//! Typed configuration values and their self-describing literal syntax.
//!
//! Every value kind has a distinct textual form so a literal can be mapped
//! back to its type without hints:
//!
//! - `true` / `false` — boolean
//! - `"text"` — string, with `\\ \" \n \r \t \u{HEX}` escapes
//! - `rgba(r, g, b, a)` — color
//! - anything else `f64` accepts — number

use std::fmt;
use std::str::FromStr;

use crate::domain::color::Color;
use crate::domain::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Color(Color),
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Color(_) => ValueKind::Color,
            Value::Text(_) => ValueKind::Text,
            Value::Number(_) => ValueKind::Number,
            Value::Boolean(_) => ValueKind::Boolean,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Color,
    Text,
    Number,
    Boolean,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Color => "color",
            ValueKind::Text => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Color(c) => write!(f, "{c}"),
            Value::Text(s) => write_quoted(f, s),
            Value::Number(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// `#` and `;` start INI comments, so they never appear raw in output.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in s.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '#' | ';' => write!(f, "\\u{{{:x}}}", ch as u32)?,
            c if c.is_control() => write!(f, "\\u{{{:x}}}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_literal(s)
    }
}

/// Parse a single value literal.
pub fn parse_literal(input: &str) -> Result<Value, ParseError> {
    let mut parser = Parser::new(input);
    parser.skip_whitespace();
    let value = match parser.peek() {
        None => return Err(ParseError::new("empty value", parser.pos)),
        Some('"') => Value::Text(parser.parse_quoted()?),
        Some(_) if parser.peek_keyword("rgba") => Value::Color(parser.parse_rgba()?),
        Some(_) if parser.consume_keyword("true") => Value::Boolean(true),
        Some(_) if parser.consume_keyword("false") => Value::Boolean(false),
        Some(_) => Value::Number(parser.parse_number()?),
    };
    parser.expect_end()?;
    Ok(value)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => Err(ParseError::new(
                format!("expected '{}', found '{}'", expected, ch),
                self.pos,
            )),
            None => Err(ParseError::new(
                format!("expected '{}', found end of input", expected),
                self.pos,
            )),
        }
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Ok(()),
            Some(ch) => Err(ParseError::new(
                format!("unexpected '{}' after value", ch),
                self.pos,
            )),
        }
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        let remaining = self.remaining();
        remaining.starts_with(keyword)
            && !remaining[keyword.len()..]
                .chars()
                .next()
                .map(|c| c.is_alphanumeric() || c == '_')
                .unwrap_or(false)
    }

    fn consume_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_keyword(keyword) {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    fn parse_number(&mut self) -> Result<f64, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == ',' || ch == ')' {
                break;
            }
            self.advance();
        }
        let token = &self.input[start..self.pos];
        if token.is_empty() {
            return Err(ParseError::new("expected number", start));
        }
        token
            .parse::<f64>()
            .map_err(|_| ParseError::new(format!("unrecognized value '{}'", token), start))
    }

    fn parse_rgba(&mut self) -> Result<Color, ParseError> {
        self.consume_keyword("rgba");
        self.expect_char('(')?;
        let red = self.parse_number()?;
        self.expect_char(',')?;
        let green = self.parse_number()?;
        self.expect_char(',')?;
        let blue = self.parse_number()?;
        self.expect_char(',')?;
        let alpha = self.parse_number()?;
        self.expect_char(')')?;
        Ok(Color::new(red, green, blue, alpha))
    }

    fn parse_quoted(&mut self) -> Result<String, ParseError> {
        let open = self.pos;
        self.advance();
        let mut out = String::new();
        loop {
            let at = self.pos;
            match self.advance() {
                None => return Err(ParseError::new("unterminated string", open)),
                Some('"') => return Ok(out),
                Some('\\') => out.push(self.parse_escape(at)?),
                Some(ch) => out.push(ch),
            }
        }
    }

    fn parse_escape(&mut self, at: usize) -> Result<char, ParseError> {
        match self.advance() {
            Some('\\') => Ok('\\'),
            Some('"') => Ok('"'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('u') => {
                self.expect_char('{')?;
                let start = self.pos;
                while let Some(ch) = self.peek() {
                    if !ch.is_ascii_hexdigit() {
                        break;
                    }
                    self.advance();
                }
                let digits = &self.input[start..self.pos];
                self.expect_char('}')?;
                u32::from_str_radix(digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        ParseError::new(format!("invalid unicode escape '{}'", digits), at)
                    })
            }
            Some(ch) => Err(ParseError::new(format!("unknown escape '\\{}'", ch), at)),
            None => Err(ParseError::new("unterminated string", at)),
        }
    }
}
