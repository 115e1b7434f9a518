//! The canonical serializer.

use std::borrow::Cow;

use procyon_parser::Value;

use crate::convert::Converter;
use crate::number::format_float;
use crate::{classify, strings, EncodeError};

/// Output styles.
///
/// `Default` produces the canonical multi-line form. `Short` forces the
/// one-line form on every value, and `Minified` additionally drops the
/// spaces after `:` and `,`. Only `Default` terminates the output with a
/// newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Default,
    Short,
    Minified,
}

impl Style {
    fn always_short(self) -> bool {
        !matches!(self, Style::Default)
    }

    fn separators(self) -> (&'static str, &'static str) {
        match self {
            Style::Default | Style::Short => (": ", ", "),
            Style::Minified => (":", ","),
        }
    }
}

pub(crate) struct Encoder<'a> {
    always_short: bool,
    colon: &'static str,
    comma: &'static str,
    converter: Option<&'a Converter>,
}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

fn push_hex(out: &mut String, byte: u8) {
    out.push(HEX_DIGITS[usize::from(byte >> 4)] as char);
    out.push(HEX_DIGITS[usize::from(byte & 15)] as char);
}

impl<'a> Encoder<'a> {
    pub(crate) fn new(style: Style, converter: Option<&'a Converter>) -> Encoder<'a> {
        let (colon, comma) = style.separators();
        Encoder {
            always_short: style.always_short(),
            colon,
            comma,
            converter,
        }
    }

    pub(crate) fn write_document(
        &self,
        out: &mut String,
        value: &Value,
    ) -> Result<(), EncodeError> {
        let value = self.converted(value)?;
        if self.should_write_short(&value) {
            self.write_short(out, &value);
        } else {
            self.write_long(out, &value, "")?;
        }
        if !self.always_short {
            out.push('\n');
        }
        Ok(())
    }

    fn converted<'v>(&self, value: &'v Value) -> Result<Cow<'v, Value>, EncodeError> {
        match self.converter {
            Some(converter) => converter.apply(value),
            None => Ok(Cow::Borrowed(value)),
        }
    }

    fn should_write_short(&self, value: &Value) -> bool {
        self.always_short || classify::is_short(value)
    }

    // The short form never recurses into the converter: one-line values
    // were classified from the members they already have.
    fn write_short(&self, out: &mut String, value: &Value) {
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(true) => out.push_str("true"),
            Value::Bool(false) => out.push_str("false"),
            Value::Int(i) => out.push_str(&i.to_string()),
            Value::Float(f) => out.push_str(&format_float(f.0)),
            Value::Data(data) => {
                out.push('$');
                for &byte in data {
                    push_hex(out, byte);
                }
            }
            Value::String(s) => strings::push_quoted(out, s),
            Value::Array(items) => {
                out.push('[');
                let mut first = true;
                for item in items {
                    if !first {
                        out.push_str(self.comma);
                    }
                    first = false;
                    self.write_short(out, item);
                }
                out.push(']');
            }
            Value::Map(entries) => {
                out.push('{');
                let mut first = true;
                for (key, item) in entries {
                    if !first {
                        out.push_str(self.comma);
                    }
                    first = false;
                    strings::push_key(out, key);
                    out.push_str(self.colon);
                    self.write_short(out, item);
                }
                out.push('}');
            }
        }
    }

    fn write_long(&self, out: &mut String, value: &Value, indent: &str) -> Result<(), EncodeError> {
        match value {
            Value::Data(data) => self.write_long_data(out, data, indent),
            Value::String(s) => self.write_long_string(out, s, indent),
            Value::Array(items) => self.write_long_array(out, items, indent)?,
            Value::Map(entries) => self.write_long_map(out, entries, indent)?,
            scalar => self.write_short(out, scalar),
        }
        Ok(())
    }

    /// 32 bytes per `$` row, grouped four bytes to a word.
    fn write_long_data(&self, out: &mut String, data: &[u8], indent: &str) {
        for (i, &byte) in data.iter().enumerate() {
            if i == 0 {
                out.push_str("$\t");
            } else if i % 32 == 0 {
                out.push('\n');
                out.push_str(indent);
                out.push_str("$\t");
            } else if i % 4 == 0 {
                out.push(' ');
            }
            push_hex(out, byte);
        }
    }

    fn write_long_string(&self, out: &mut String, s: &str, indent: &str) {
        let mut paragraphs: Vec<&str> = s.split('\n').collect();
        let trailing_newline = paragraphs.last() == Some(&"");
        if trailing_newline {
            paragraphs.pop();
        }

        let mut prefix: Option<String> = None;
        let mut can_use_gt = true;
        for paragraph in paragraphs {
            match &prefix {
                Some(p) => out.push_str(p),
                None => prefix = Some(format!("\n{indent}")),
            }

            if can_use_gt || paragraph.is_empty() {
                out.push('>');
            } else {
                out.push('|');
            }
            if paragraph.is_empty() {
                can_use_gt = true;
                continue;
            }
            can_use_gt = false;

            out.push('\t');
            let mut line_prefix: Option<String> = None;
            for line in strings::wrap_lines(paragraph) {
                match &line_prefix {
                    Some(p) => out.push_str(p),
                    None => line_prefix = Some(format!("\n{indent}>\t")),
                }
                out.push_str(&line);
            }
        }

        if !trailing_newline {
            if let Some(p) = &prefix {
                out.push_str(p);
            }
            out.push('!');
        }
    }

    fn write_long_array(
        &self,
        out: &mut String,
        items: &[Value],
        indent: &str,
    ) -> Result<(), EncodeError> {
        let child_indent = format!("{indent}\t");
        let mut first = true;
        for item in items {
            if !first {
                out.push('\n');
                out.push_str(indent);
            }
            first = false;
            out.push_str("*\t");
            let item = self.converted(item)?;
            if self.should_write_short(&item) {
                self.write_short(out, &item);
            } else {
                self.write_long(out, &item, &child_indent)?;
            }
        }
        Ok(())
    }

    fn write_long_map(
        &self,
        out: &mut String,
        entries: &procyon_parser::Map,
        indent: &str,
    ) -> Result<(), EncodeError> {
        let child_indent = format!("{indent}\t");

        // Pre-render the keys so short values can be aligned one column
        // past the widest short entry's colon.
        let mut adjusted = Vec::with_capacity(entries.len());
        let mut max_short_key = 0;
        for (key, value) in entries {
            let mut rendered = String::new();
            strings::push_key(&mut rendered, key);
            let value = self.converted(value)?;
            let short = self.should_write_short(&value);
            if short {
                max_short_key = max_short_key.max(rendered.chars().count());
            }
            adjusted.push((rendered, value, short));
        }

        let mut first = true;
        for (key, value, short) in &adjusted {
            if !first {
                out.push('\n');
                out.push_str(indent);
            }
            first = false;
            if *short {
                let written = key.chars().count() + 1;
                out.push_str(key);
                out.push(':');
                for _ in written..max_short_key + 3 {
                    out.push(' ');
                }
                self.write_short(out, value);
            } else {
                out.push_str(key);
                if key.is_empty() {
                    out.push_str(":\t");
                } else {
                    out.push_str(":\n");
                    out.push_str(&child_indent);
                }
                self.write_long(out, value, &child_indent)?;
            }
        }
        Ok(())
    }
}
