//! The JSON bridge: translate Procyon to JSON as a pure event-stream pass,
//! and JSON to canonical Procyon through the value tree.
//!
//! [`to_json`] preserves the source's layout choices: containers parsed
//! from the short form render on one line, long-form containers render one
//! element per line with tab indentation. Values JSON cannot spell are
//! mapped the way the reference tools do: `nan` becomes `null`, the
//! infinities become `1e999` / `-1e999`, and data becomes a lowercase hex
//! string.
//!
//! ## Example
//! ```rust
//! assert_eq!(
//!     procyon_json::to_json("* 1\n* [2, 3]\n".as_bytes()).unwrap(),
//!     "[\n\t1,\n\t[2, 3]\n]\n"
//! );
//! assert_eq!(
//!     procyon_json::json_to_procyon("{\"a\": [1, 2]}").unwrap(),
//!     "a:  [1, 2]\n"
//! );
//! ```

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(future_incompatible, unreachable_pub, rust_2018_idioms)]

use std::io::BufRead;

use procyon_encoder::{dumps, format_float, Style};
use procyon_parser::{DecodeError, EventKind, Form, Lexer, Map, Parser, Payload, Value};
use thiserror::Error;

/// A failure converting JSON input to Procyon.
#[derive(Error, Debug)]
pub enum FromJsonError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("integer {0} does not fit the signed 64-bit range")]
    IntOutOfRange(serde_json::Number),
}

/// Render a Procyon document as JSON text.
pub fn to_json<R: BufRead>(input: R) -> Result<String, DecodeError> {
    let mut parser = Parser::new(Lexer::new(input));
    let mut out = String::new();
    let mut long_depth = 0usize;
    let mut short_depth = 0usize;
    let mut is_first_item = true;
    let mut is_first_event = true;

    while let Some(event) = parser.next_event()? {
        let kind = event.kind();
        let is_in = matches!(kind, EventKind::ArrayIn | EventKind::MapIn);
        let is_out = matches!(kind, EventKind::ArrayOut | EventKind::MapOut);
        let is_short = event.form == Form::Short;
        let inside_short = short_depth > 0;

        if is_out {
            if !inside_short {
                out.push('\n');
                push_tabs(&mut out, long_depth - 1);
            }
        } else if !is_first_item {
            if inside_short {
                out.push_str(", ");
            } else {
                out.push_str(",\n");
                push_tabs(&mut out, long_depth);
            }
        } else if !(inside_short || is_first_event) {
            out.push('\n');
            push_tabs(&mut out, long_depth);
        }

        if let Some(key) = &event.key {
            push_json_string(&mut out, key);
            out.push_str(": ");
        }

        match &event.payload {
            Payload::Null => out.push_str("null"),
            Payload::Bool(true) => out.push_str("true"),
            Payload::Bool(false) => out.push_str("false"),
            Payload::Int(i) => out.push_str(&i.to_string()),
            Payload::Float(f) => out.push_str(&json_float(*f)),
            Payload::Data(data) => {
                out.push('"');
                for byte in data {
                    out.push_str(&format!("{byte:02x}"));
                }
                out.push('"');
            }
            Payload::String(s) => push_json_string(&mut out, s),
            Payload::ArrayIn => out.push('['),
            Payload::ArrayOut => out.push(']'),
            Payload::MapIn => out.push('{'),
            Payload::MapOut => out.push('}'),
        }

        is_first_event = false;
        is_first_item = is_in;
        let depth = if is_short {
            &mut short_depth
        } else {
            &mut long_depth
        };
        if is_in {
            *depth += 1;
        } else if is_out {
            *depth -= 1;
        }
    }
    out.push('\n');
    Ok(out)
}

/// Render a Procyon document (given as a string) as JSON text.
pub fn to_json_str(input: &str) -> Result<String, DecodeError> {
    to_json(input.as_bytes())
}

/// Parse JSON text into a Procyon value.
pub fn from_json(input: &str) -> Result<Value, FromJsonError> {
    let parsed: serde_json::Value = serde_json::from_str(input)?;
    json_value(parsed)
}

/// Parse JSON text and re-serialise it as canonical Procyon.
pub fn json_to_procyon(input: &str) -> Result<String, FromJsonError> {
    Ok(dumps(&from_json(input)?, Style::Default))
}

fn json_value(value: serde_json::Value) -> Result<Value, FromJsonError> {
    Ok(match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::from(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if integer_out_of_range(&n) {
                return Err(FromJsonError::IntOutOfRange(n));
            } else {
                Value::from(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::from(s),
        serde_json::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(json_value)
                .collect::<Result<_, _>>()?,
        ),
        serde_json::Value::Object(entries) => {
            let mut map = Map::new();
            for (key, value) in entries {
                map.insert(key, json_value(value)?);
            }
            Value::Map(map)
        }
    })
}

/// Integer literals that fit neither `i64` nor `u64` parse as lossy whole
/// floats, so any whole number at or past 2^63 in magnitude is an
/// overflowed integer rather than a float value.
fn integer_out_of_range(n: &serde_json::Number) -> bool {
    if n.as_u64().is_some() {
        return true;
    }
    match n.as_f64() {
        Some(f) => {
            let bound = -(i64::MIN as f64);
            f.is_finite() && f.fract() == 0.0 && (f >= bound || f <= -bound)
        }
        None => false,
    }
}

fn json_float(f: f64) -> String {
    if f.is_nan() {
        "null".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "1e999" } else { "-1e999" }.to_string()
    } else {
        format_float(f)
    }
}

fn push_tabs(out: &mut String, n: usize) {
    for _ in 0..n {
        out.push('\t');
    }
}

fn push_json_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}
