//! String rendering helpers: quoted-form escaping and the 72-column
//! paragraph wrapper used by the long form.

use unicode_general_category::{get_general_category, GeneralCategory};

/// Append a quoted short string, escaping the JSON set plus every
/// control, format, private-use and unassigned code point.
pub(crate) fn push_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c => match get_general_category(c) {
                GeneralCategory::Control
                | GeneralCategory::Format
                | GeneralCategory::PrivateUse
                | GeneralCategory::Unassigned => {
                    if (c as u32) < 0x10000 {
                        out.push_str(&format!("\\u{:04x}", c as u32));
                    } else {
                        out.push_str(&format!("\\U{:08x}", c as u32));
                    }
                }
                _ => out.push(c),
            },
        }
    }
    out.push('"');
}

/// True when the key can be spelled without quotes.
pub(crate) fn is_bare_key(key: &str) -> bool {
    key.bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'/' | b'+' | b'-'))
}

pub(crate) fn push_key(out: &mut String, key: &str) {
    if is_bare_key(key) {
        out.push_str(key);
    } else {
        push_quoted(out, key);
    }
}

/// Split a paragraph into lines of at most 72 code points, preferring to
/// break on spaces. A word longer than the limit takes its whole line; a
/// break is never placed where it would strand an empty remainder.
pub(crate) fn wrap_lines(paragraph: &str) -> Vec<String> {
    let mut s: Vec<char> = paragraph.chars().collect();
    let mut out = Vec::new();
    loop {
        if s.len() <= 72 {
            out.push(s.iter().collect());
            return out;
        }
        let head = &s[..73];
        let tail = &s[73..];
        if let Some(pos) = head.iter().rposition(|&c| c == ' ') {
            let line_tail = &head[pos + 1..];
            if !line_tail.is_empty() || !tail.is_empty() {
                out.push(head[..pos].iter().collect());
                s = line_tail.iter().chain(tail).copied().collect();
            } else {
                out.push(s.iter().collect());
                return out;
            }
        } else if let Some(pos) = tail.iter().position(|&c| c == ' ') {
            out.push(head.iter().chain(&tail[..pos]).copied().collect());
            s = tail[pos + 1..].to_vec();
        } else {
            out.push(s.iter().collect());
            return out;
        }
    }
}
