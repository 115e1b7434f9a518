//! Short-form eligibility.
//!
//! A value that classifies as short serialises on one line; everything
//! else takes the indentation-driven long form. The container rules are
//! shallow on purpose: only scalar members keep a container short, so any
//! nested container (or any string or data member) forces the parent onto
//! multiple lines.

use procyon_parser::Value;

pub(crate) fn is_short(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) => true,
        Value::Data(data) => data.len() <= 4,
        Value::String(s) => is_short_string(s),
        Value::Array(items) => items.iter().all(|v| v.kind().is_scalar()),
        Value::Map(entries) => entries.values().all(|v| v.kind().is_scalar()),
    }
}

/// Strings holding unprintable characters must use the quoted form, where
/// they can be escaped; otherwise a newline forces the long form and a
/// length of 72 code points opts into wrapping.
pub(crate) fn is_short_string(s: &str) -> bool {
    if s.chars().any(is_unprintable) {
        return true;
    }
    if s.contains('\n') {
        return false;
    }
    s.chars().count() < 72
}

// Everything below U+0020 except newline, plus DEL.
fn is_unprintable(c: char) -> bool {
    matches!(c, '\0'..='\u{9}' | '\u{b}'..='\u{1f}' | '\u{7f}')
}
