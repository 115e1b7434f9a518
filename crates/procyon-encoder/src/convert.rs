//! Pre-serialisation conversion hooks.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use procyon_parser::{Kind, Value};

use crate::EncodeError;

/// A hook applied to values before they are classified and serialised.
///
/// Converters compose: a [`Seq`](Converter::Seq) applies its steps left to
/// right, and a [`ByKind`](Converter::ByKind) dispatches on the value's
/// [`Kind`], passing values of unlisted kinds through untouched. The
/// encoder applies the hook to the root value and to every child of a
/// long-form container.
///
/// ## Example
/// ```rust
/// use procyon_encoder::{dumps_converted, Converter, Style};
/// use procyon_parser::Value;
///
/// let redact = Converter::func(|_| Ok(Value::from("<data>")));
/// let value = Value::Array(vec![Value::Data(vec![1, 2, 3, 4, 5]), Value::Data(vec![6; 5])]);
/// let out = dumps_converted(&value, Style::Default, &Converter::by_kind([(
///     procyon_parser::Kind::Data,
///     redact,
/// )]))
/// .unwrap();
/// assert_eq!(out, "*\t\"<data>\"\n*\t\"<data>\"\n");
/// ```
pub enum Converter {
    /// A single conversion step.
    Func(Box<dyn Fn(&Value) -> Result<Value, EncodeError>>),
    /// Steps applied left to right.
    Seq(Vec<Converter>),
    /// Dispatch on the concrete kind of the incoming value.
    ByKind(HashMap<Kind, Converter>),
}

impl Converter {
    pub fn func(f: impl Fn(&Value) -> Result<Value, EncodeError> + 'static) -> Converter {
        Converter::Func(Box::new(f))
    }

    pub fn seq(steps: impl IntoIterator<Item = Converter>) -> Converter {
        Converter::Seq(steps.into_iter().collect())
    }

    pub fn by_kind(entries: impl IntoIterator<Item = (Kind, Converter)>) -> Converter {
        Converter::ByKind(entries.into_iter().collect())
    }

    pub(crate) fn apply<'a>(&self, value: &'a Value) -> Result<Cow<'a, Value>, EncodeError> {
        match self {
            Converter::Func(f) => f(value).map(Cow::Owned),
            Converter::Seq(steps) => {
                let mut current = Cow::Borrowed(value);
                for step in steps {
                    let next = step.apply(current.as_ref())?.into_owned();
                    current = Cow::Owned(next);
                }
                Ok(current)
            }
            Converter::ByKind(by_kind) => match by_kind.get(&value.kind()) {
                Some(converter) => converter.apply(value),
                None => Ok(Cow::Borrowed(value)),
            },
        }
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Converter::Func(_) => f.write_str("Converter::Func"),
            Converter::Seq(steps) => f.debug_tuple("Converter::Seq").field(steps).finish(),
            Converter::ByKind(by_kind) => {
                let kinds: Vec<&Kind> = by_kind.keys().collect();
                f.debug_tuple("Converter::ByKind").field(&kinds).finish()
            }
        }
    }
}
