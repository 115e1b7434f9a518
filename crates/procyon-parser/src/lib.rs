//! A parser for Procyon, a human-readable, indentation-sensitive data
//! language covering the JSON value domain plus first-class binary data.
//!
//! The crate is organised the way the format works: a table-driven lexer
//! ([`Lexer`]) turns lines of bytes into tokens, with `LINE_IN` /
//! `LINE_EQ` / `LINE_OUT` synthesised from indentation; a pushdown parser
//! ([`Parser`]) turns tokens into a stream of typed events; and
//! [`load`] / [`loads`] reduce events to a [`Value`] tree. The lexer and
//! parser are driven by tables compiled once from a declarative grammar,
//! so both are small loops over static arrays.
//!
//! ## Example
//! ```rust
//! use procyon_parser::{loads, Value};
//!
//! let value = loads("stars:    50\nstripes:  13\n").unwrap();
//! let map = value.as_map().unwrap();
//! assert_eq!(map["stars"], Value::Int(50));
//! assert_eq!(map["stripes"], Value::Int(13));
//! ```
//!
//! Errors carry the exact source position and a stable code:
//! ```rust
//! use procyon_parser::loads;
//!
//! let err = loads("[1, 2").unwrap_err();
//! assert_eq!(err.to_string(), "1:6: expected ',' or ']'");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(future_incompatible, unreachable_pub, rust_2018_idioms)]

mod decode;
mod error;
mod grammar;
mod lexer;
mod parser;
mod tables;
mod token;
mod value;

pub use crate::decode::{load, loads};
pub use crate::error::{DecodeError, ErrorCode};
pub use crate::lexer::Lexer;
pub use crate::parser::{Event, EventKind, Form, Parser, Payload, MAX_DEPTH};
pub use crate::token::{Token, TokenKind};
pub use crate::value::{Kind, Map, Value};
