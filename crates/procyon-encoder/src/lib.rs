//! Canonical serialisation for Procyon values.
//!
//! The encoder walks a [`Value`] tree and chooses per node between the
//! one-line short form and the indentation-driven long form: scalars are
//! always short, containers stay short only while every member is a
//! scalar, strings go long once they hold a newline or reach 72 code
//! points, and data goes long past four bytes. The output is canonical:
//! feeding it back through the parser yields an equal value, and dumping
//! that value reproduces the output byte for byte.
//!
//! ## Example
//! ```rust
//! use procyon_encoder::{dumps, Style};
//! use procyon_parser::Value;
//!
//! let value: Value = vec![Value::from(1i64), Value::from(2i64)].into();
//! assert_eq!(dumps(&value, Style::Default), "[1, 2]\n");
//! assert_eq!(dumps(&value, Style::Minified), "[1,2]");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(future_incompatible, unreachable_pub, rust_2018_idioms)]

use std::io;

use procyon_parser::Value;
use thiserror::Error;

mod classify;
mod convert;
mod encoder;
mod number;
mod strings;

pub use crate::convert::Converter;
pub use crate::encoder::Style;
pub use crate::number::format_float;

use crate::encoder::Encoder;

/// A serialisation failure: a converter rejected a value, or the output
/// writer failed.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("conversion failed: {0}")]
    Convert(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl EncodeError {
    /// Shorthand for converters rejecting a value.
    pub fn convert(message: impl Into<String>) -> EncodeError {
        EncodeError::Convert(message.into())
    }
}

/// Serialise a value to a string.
pub fn dumps(value: &Value, style: Style) -> String {
    let mut out = String::new();
    // Without a converter the walk cannot fail.
    let _ = Encoder::new(style, None).write_document(&mut out, value);
    out
}

/// Serialise a value, passing it and every long-form child through
/// `converter` first.
pub fn dumps_converted(
    value: &Value,
    style: Style,
    converter: &Converter,
) -> Result<String, EncodeError> {
    let mut out = String::new();
    Encoder::new(style, Some(converter)).write_document(&mut out, value)?;
    Ok(out)
}

/// Serialise a value to a writer.
pub fn dump<W: io::Write>(value: &Value, out: &mut W, style: Style) -> io::Result<()> {
    out.write_all(dumps(value, style).as_bytes())
}

/// Serialise a converted value to a writer.
pub fn dump_converted<W: io::Write>(
    value: &Value,
    out: &mut W,
    style: Style,
    converter: &Converter,
) -> Result<(), EncodeError> {
    let text = dumps_converted(value, style, converter)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}
