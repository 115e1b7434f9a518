//! The pushdown event parser layered over the lexer.

use std::io::BufRead;
use std::num::IntErrorKind;

use crate::error::{DecodeError, ErrorCode};
use crate::grammar::{Acc, EmitOp, KeyOp};
use crate::lexer::Lexer;
use crate::tables;

/// Parse events deeper than 64 containers abort with `Recursion`.
pub const MAX_DEPTH: usize = 64;

/// Which syntactic form produced an event. Consumers use this to pick
/// one-line or multi-line rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Short,
    Long,
}

/// Event kinds, in stable ordinal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum EventKind {
    Null = 0,
    Bool = 1,
    Int = 2,
    Float = 3,
    Data = 4,
    String = 5,
    ArrayIn = 6,
    ArrayOut = 7,
    MapIn = 8,
    MapOut = 9,
}

/// A scalar payload or container boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Data(Vec<u8>),
    String(String),
    ArrayIn,
    ArrayOut,
    MapIn,
    MapOut,
}

/// One parse event. `key` is set only for events produced directly inside
/// a map context.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub key: Option<String>,
    pub form: Form,
    pub payload: Payload,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self.payload {
            Payload::Null => EventKind::Null,
            Payload::Bool(_) => EventKind::Bool,
            Payload::Int(_) => EventKind::Int,
            Payload::Float(_) => EventKind::Float,
            Payload::Data(_) => EventKind::Data,
            Payload::String(_) => EventKind::String,
            Payload::ArrayIn => EventKind::ArrayIn,
            Payload::ArrayOut => EventKind::ArrayOut,
            Payload::MapIn => EventKind::MapIn,
            Payload::MapOut => EventKind::MapOut,
        }
    }
}

/// Pulls typed events out of a token stream.
///
/// Each call to [`next_event`](Parser::next_event) consumes tokens until
/// exactly one event is ready, the document ends, or the parse fails. On
/// the first error the stream is poisoned and no partial results are
/// returned.
///
/// ## Example
/// ```rust
/// use procyon_parser::{Lexer, Parser, Payload};
///
/// let mut parser = Parser::new(Lexer::new("[1, 2]".as_bytes()));
/// let mut payloads = Vec::new();
/// while let Some(event) = parser.next_event().unwrap() {
///     payloads.push(event.payload);
/// }
/// assert_eq!(
///     payloads,
///     [Payload::ArrayIn, Payload::Int(1), Payload::Int(2), Payload::ArrayOut]
/// );
/// ```
pub struct Parser<R> {
    lexer: Lexer<R>,
    stack: Vec<u8>,
    acc_bytes: Vec<u8>,
    acc_text: String,
    key: Option<String>,
}

impl<R: BufRead> Parser<R> {
    pub fn new(lexer: Lexer<R>) -> Parser<R> {
        Parser {
            lexer,
            stack: vec![0],
            acc_bytes: Vec::new(),
            acc_text: String::new(),
            key: None,
        }
    }

    /// Produce the next event, or `None` at the end of the document.
    pub fn next_event(&mut self) -> Result<Option<Event>, DecodeError> {
        loop {
            self.lex_advance()?;
            if self.stack.is_empty() {
                return Ok(None);
            }
            let state = match self.stack.pop() {
                Some(state) => state,
                None => return Ok(None),
            };
            let kind = self.lexer.token_kind();
            let parse = tables::parse();
            let def = &parse.defs[parse.table[state as usize][kind as usize] as usize];

            if let Some(code) = def.error {
                let (lineno, column) = if kind.is_virtual() {
                    (
                        self.lexer.lineno().saturating_sub(1).max(1),
                        self.lexer.prev_width().max(1) as u64,
                    )
                } else {
                    (self.lexer.lineno(), self.lexer.token_begin() as u64 + 1)
                };
                return Err(DecodeError::new(code, lineno, column));
            }

            for op in def.acc {
                match op {
                    Acc::Data => append_hex(self.lexer.token_text(), &mut self.acc_bytes),
                    Acc::Str => {
                        let text = token_str(&self.lexer)?;
                        self.acc_text.push_str(line_payload(text));
                    }
                    Acc::Nl => self.acc_text.push('\n'),
                    Acc::Sp => self.acc_text.push(' '),
                }
            }

            let mut event = None;
            if let Some(op) = def.emit {
                let key = self.key.take();
                let (form, payload) = self.payload(op)?;
                event = Some(Event { key, form, payload });
            }

            if let Some(op) = def.key {
                let text = token_str(&self.lexer)?;
                let bare = &text[..text.len() - 1];
                self.key = Some(match op {
                    KeyOp::Unquoted => bare.to_string(),
                    KeyOp::Quoted => self.unescape(bare)?,
                });
            }

            for &state in def.extend.iter().rev() {
                self.stack.push(state);
            }
            if self.stack.len() > MAX_DEPTH {
                return Err(DecodeError::new(
                    ErrorCode::Recursion,
                    self.lexer.lineno(),
                    self.lexer.token_begin() as u64 + 1,
                ));
            }

            if event.is_some() {
                return Ok(event);
            }
        }
    }

    fn lex_advance(&mut self) -> Result<(), DecodeError> {
        self.lexer.advance()?;
        if let Some((code, column)) = self.lexer.error() {
            return Err(DecodeError::new(code, self.lexer.lineno(), column as u64));
        }
        Ok(())
    }

    fn payload(&mut self, op: EmitOp) -> Result<(Form, Payload), DecodeError> {
        let payload = match op {
            EmitOp::Null => Payload::Null,
            EmitOp::True => Payload::Bool(true),
            EmitOp::False => Payload::Bool(false),
            EmitOp::Inf => Payload::Float(f64::INFINITY),
            EmitOp::NegInf => Payload::Float(f64::NEG_INFINITY),
            EmitOp::Nan => Payload::Float(f64::NAN),
            EmitOp::Int => Payload::Int(self.int_value()?),
            EmitOp::Float => Payload::Float(self.float_value()?),
            EmitOp::Data => {
                let mut bytes = Vec::new();
                append_hex(self.lexer.token_text(), &mut bytes);
                Payload::Data(bytes)
            }
            EmitOp::AccData => Payload::Data(std::mem::take(&mut self.acc_bytes)),
            EmitOp::Str => {
                let text = token_str(&self.lexer)?;
                Payload::String(self.unescape(text)?)
            }
            EmitOp::AccStr => Payload::String(std::mem::take(&mut self.acc_text)),
            EmitOp::ShortArrayIn => return Ok((Form::Short, Payload::ArrayIn)),
            EmitOp::ShortArrayOut => return Ok((Form::Short, Payload::ArrayOut)),
            EmitOp::LongArrayIn => return Ok((Form::Long, Payload::ArrayIn)),
            EmitOp::LongArrayOut => return Ok((Form::Long, Payload::ArrayOut)),
            EmitOp::ShortMapIn => return Ok((Form::Short, Payload::MapIn)),
            EmitOp::ShortMapOut => return Ok((Form::Short, Payload::MapOut)),
            EmitOp::LongMapIn => return Ok((Form::Long, Payload::MapIn)),
            EmitOp::LongMapOut => return Ok((Form::Long, Payload::MapOut)),
        };
        let form = match op {
            EmitOp::AccData | EmitOp::AccStr => Form::Long,
            _ => Form::Short,
        };
        Ok((form, payload))
    }

    fn int_value(&self) -> Result<i64, DecodeError> {
        let text = token_str(&self.lexer)?;
        text.parse::<i64>().map_err(|e| {
            let code = match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ErrorCode::IntOverflow,
                _ => ErrorCode::InvalidInt,
            };
            self.token_error(code)
        })
    }

    fn float_value(&self) -> Result<f64, DecodeError> {
        // Out-of-range literals saturate to +/-inf in `from_str`.
        let text = token_str(&self.lexer)?;
        text.parse::<f64>()
            .map_err(|_| self.token_error(ErrorCode::InvalidFloat))
    }

    /// Decode the payload of a short `"..."` token (quotes still attached
    /// when called for a value; the caller strips the ':' of a quoted key).
    fn unescape(&self, text: &str) -> Result<String, DecodeError> {
        let inner = &text[1..text.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('b') => out.push('\u{8}'),
                Some('f') => out.push('\u{c}'),
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some('/') => out.push('/'),
                Some('u') => out.push(take_code_point(&mut chars, 4, self)?),
                Some('U') => out.push(take_code_point(&mut chars, 8, self)?),
                _ => return Err(self.token_error(ErrorCode::BadEsc)),
            }
        }
        Ok(out)
    }

    fn token_error(&self, code: ErrorCode) -> DecodeError {
        DecodeError::new(
            code,
            self.lexer.lineno(),
            self.lexer.token_begin() as u64 + 1,
        )
    }
}

impl<R> std::fmt::Debug for Parser<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("depth", &self.stack.len())
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

fn token_str<'a, R: BufRead>(lexer: &'a Lexer<R>) -> Result<&'a str, DecodeError> {
    std::str::from_utf8(lexer.token_text())
        .map_err(|_| DecodeError::new(ErrorCode::Internal, lexer.lineno(), 1))
}

/// Collect the hex payload of a `$` token; the lexer has already verified
/// an even nibble count.
fn append_hex(text: &[u8], out: &mut Vec<u8>) {
    let mut pending = None;
    for &b in text {
        let nibble = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => continue,
        };
        match pending.take() {
            None => pending = Some(nibble),
            Some(hi) => out.push((hi << 4) | nibble),
        }
    }
}

/// The payload of a `>` or `|` line: everything after the lead character,
/// minus one separator space or tab.
fn line_payload(text: &str) -> &str {
    let rest = match text.get(1..) {
        Some(rest) => rest,
        None => return "",
    };
    match rest.as_bytes().first() {
        Some(b' ') | Some(b'\t') => &rest[1..],
        _ => rest,
    }
}

fn take_code_point<R: BufRead>(
    chars: &mut std::str::Chars<'_>,
    digits: u32,
    parser: &Parser<R>,
) -> Result<char, DecodeError> {
    let mut value = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| parser.token_error(ErrorCode::BadUesc))?;
        value = value * 16 + digit;
    }
    // Surrogate halves are not representable in a Rust string.
    char::from_u32(value).ok_or_else(|| parser.token_error(ErrorCode::BadUesc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn events(input: &str) -> Vec<Event> {
        let mut parser = Parser::new(Lexer::new(input.as_bytes()));
        let mut out = Vec::new();
        while let Some(event) = parser.next_event().unwrap() {
            out.push(event);
        }
        out
    }

    fn decode_error(input: &str) -> DecodeError {
        let mut parser = Parser::new(Lexer::new(input.as_bytes()));
        loop {
            match parser.next_event() {
                Ok(Some(_)) => {}
                Ok(None) => panic!("no error for {input:?}"),
                Err(e) => return e,
            }
        }
    }

    fn ev(key: Option<&str>, form: Form, payload: Payload) -> Event {
        Event {
            key: key.map(str::to_string),
            form,
            payload,
        }
    }

    #[test]
    fn scalar_document() {
        assert_eq!(events("null"), [ev(None, Form::Short, Payload::Null)]);
        assert_eq!(events("true"), [ev(None, Form::Short, Payload::Bool(true))]);
        assert_eq!(events("-7"), [ev(None, Form::Short, Payload::Int(-7))]);
    }

    #[test]
    fn long_array_events_nest() {
        assert_eq!(
            events("* 1\n* * 2\n  * * 3\n"),
            [
                ev(None, Form::Long, Payload::ArrayIn),
                ev(None, Form::Short, Payload::Int(1)),
                ev(None, Form::Long, Payload::ArrayIn),
                ev(None, Form::Short, Payload::Int(2)),
                ev(None, Form::Long, Payload::ArrayIn),
                ev(None, Form::Short, Payload::Int(3)),
                ev(None, Form::Long, Payload::ArrayOut),
                ev(None, Form::Long, Payload::ArrayOut),
                ev(None, Form::Long, Payload::ArrayOut),
            ]
        );
    }

    #[test]
    fn keys_attach_to_the_next_event() {
        assert_eq!(
            events("one: 1\nand:\n  two: 2\n"),
            [
                ev(None, Form::Long, Payload::MapIn),
                ev(Some("one"), Form::Short, Payload::Int(1)),
                ev(Some("and"), Form::Long, Payload::MapIn),
                ev(Some("two"), Form::Short, Payload::Int(2)),
                ev(None, Form::Long, Payload::MapOut),
                ev(None, Form::Long, Payload::MapOut),
            ]
        );
    }

    #[test]
    fn short_containers_are_flagged_short() {
        assert_eq!(
            events("{a: [1], b: {}}"),
            [
                ev(None, Form::Short, Payload::MapIn),
                ev(Some("a"), Form::Short, Payload::ArrayIn),
                ev(None, Form::Short, Payload::Int(1)),
                ev(None, Form::Short, Payload::ArrayOut),
                ev(Some("b"), Form::Short, Payload::MapIn),
                ev(None, Form::Short, Payload::MapOut),
                ev(None, Form::Short, Payload::MapOut),
            ]
        );
    }

    #[test]
    fn wrap_lines_join_with_spaces() {
        assert_eq!(
            events("> hello\n> world\n!\n"),
            [ev(None, Form::Long, Payload::String("hello world".into()))]
        );
    }

    #[test]
    fn data_accumulates_across_lines() {
        assert_eq!(
            events("$ 00\n$ 01\n"),
            [ev(None, Form::Long, Payload::Data(vec![0, 1]))]
        );
    }

    #[test]
    fn inline_long_string_under_a_key() {
        assert_eq!(
            events("a: > x\nb: 2\n"),
            [
                ev(None, Form::Long, Payload::MapIn),
                ev(Some("a"), Form::Long, Payload::String("x\n".into())),
                ev(Some("b"), Form::Short, Payload::Int(2)),
                ev(None, Form::Long, Payload::MapOut),
            ]
        );
    }

    #[test]
    fn depth_limit_is_enforced() {
        let just_inside = format!("{}null", "*".repeat(63));
        assert_eq!(events(&just_inside).len(), 63 * 2 + 1);
        let too_deep = format!("{}null", "*".repeat(64));
        assert_eq!(decode_error(&too_deep).code, ErrorCode::Recursion);
        let way_too_deep = format!("{}null", "*".repeat(512));
        assert_eq!(decode_error(&way_too_deep).code, ErrorCode::Recursion);
    }

    #[test]
    fn error_positions() {
        assert_eq!(
            decode_error(""),
            DecodeError::new(ErrorCode::Long, 1, 1)
        );
        assert_eq!(
            decode_error("one:"),
            DecodeError::new(ErrorCode::Long, 1, 5)
        );
        assert_eq!(
            decode_error("1 1"),
            DecodeError::new(ErrorCode::Suffix, 1, 3)
        );
        assert_eq!(
            decode_error("1\n1"),
            DecodeError::new(ErrorCode::Sibling, 2, 1)
        );
        assert_eq!(
            decode_error("one: 1\n  two: 2\n"),
            DecodeError::new(ErrorCode::Child, 2, 3)
        );
        assert_eq!(
            decode_error("9223372036854775808"),
            DecodeError::new(ErrorCode::IntOverflow, 1, 1)
        );
        assert_eq!(
            decode_error("[1"),
            DecodeError::new(ErrorCode::ArrayEnd, 1, 3)
        );
    }

    #[test]
    fn surrogate_escapes_are_rejected() {
        assert_eq!(decode_error("\"\\ud800\"").code, ErrorCode::BadUesc);
        assert_eq!(decode_error("\"\\UFFFFFFFF\"").code, ErrorCode::BadUesc);
        assert_eq!(
            events("\"\\U0010FFFF\""),
            [ev(None, Form::Short, Payload::String("\u{10FFFF}".into()))]
        );
    }
}
