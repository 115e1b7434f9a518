//! Tree construction: reduce the event stream to a [`Value`].

use std::io::BufRead;

use ordered_float::OrderedFloat;

use crate::error::{DecodeError, ErrorCode};
use crate::lexer::Lexer;
use crate::parser::{Parser, Payload};
use crate::value::{Map, Value};

/// Load a single value from newline-delimited input.
pub fn load<R: BufRead>(input: R) -> Result<Value, DecodeError> {
    let mut parser = Parser::new(Lexer::new(input));
    let mut stack: Vec<(Option<String>, Value)> = Vec::new();
    let mut result = None;

    while let Some(event) = parser.next_event()? {
        match event.payload {
            Payload::ArrayIn => {
                stack.push((event.key, Value::Array(Vec::new())));
                continue;
            }
            Payload::MapIn => {
                stack.push((event.key, Value::Map(Map::new())));
                continue;
            }
            Payload::ArrayOut | Payload::MapOut => {}
            Payload::Null => stack.push((event.key, Value::Null)),
            Payload::Bool(b) => stack.push((event.key, Value::Bool(b))),
            Payload::Int(i) => stack.push((event.key, Value::Int(i))),
            Payload::Float(f) => stack.push((event.key, Value::Float(OrderedFloat(f)))),
            Payload::Data(d) => stack.push((event.key, Value::Data(d))),
            Payload::String(s) => stack.push((event.key, Value::String(s))),
        }

        let (key, value) = match stack.pop() {
            Some(top) => top,
            None => return Err(DecodeError::new(ErrorCode::Internal, 1, 1)),
        };
        match stack.last_mut() {
            None => result = Some(value),
            Some((_, Value::Array(items))) => items.push(value),
            Some((_, Value::Map(entries))) => {
                entries.insert(key.unwrap_or_default(), value);
            }
            Some(_) => return Err(DecodeError::new(ErrorCode::Internal, 1, 1)),
        }
    }

    result.ok_or_else(|| DecodeError::new(ErrorCode::Internal, 1, 1))
}

/// Load a single value from a string.
pub fn loads(input: &str) -> Result<Value, DecodeError> {
    load(input.as_bytes())
}
