use indexmap::IndexMap;
use ordered_float::OrderedFloat;

/// An insertion-ordered `str -> Value` mapping.
pub type Map = IndexMap<String, Value>;

/// Type tags for [`Value`], in stable ordinal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Kind {
    Null = 0,
    Bool = 1,
    Int = 2,
    Float = 3,
    Data = 4,
    String = 5,
    Array = 6,
    Map = 7,
}

impl Kind {
    /// Null, bool, int and float; the kinds whose rendering is always a
    /// single short word.
    pub fn is_scalar(self) -> bool {
        self <= Kind::Float
    }
}

/// An in-memory Procyon value.
///
/// Covers the JSON value domain plus first-class binary data. Integers are
/// exactly the signed 64-bit range; floats are IEEE-754 binary64 wrapped in
/// [`OrderedFloat`] so that values are `Eq` and NaN compares equal to
/// itself, which is how round-trips are checked. Maps preserve insertion
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Data(Vec<u8>),
    String(String),
    Array(Vec<Value>),
    Map(Map),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Data(_) => Kind::Data,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Map(_) => Kind::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(f.0),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            Value::Data(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(OrderedFloat(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(d: Vec<u8>) -> Value {
        Value::Data(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Value {
        Value::Array(a)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Value {
        Value::Map(m)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Value {
        Value::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Value {
        Value::Map(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_compares_equal_by_type_tag() {
        assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
        assert_ne!(Value::from(f64::NAN), Value::from(0.0));
    }

    #[test]
    fn kind_ordinals_are_stable() {
        let values: [(Value, u8); 8] = [
            (Value::Null, 0),
            (Value::from(true), 1),
            (Value::from(3i64), 2),
            (Value::from(3.0), 3),
            (Value::Data(vec![]), 4),
            (Value::from("s"), 5),
            (Value::Array(vec![]), 6),
            (Value::Map(Map::new()), 7),
        ];
        for (value, ordinal) in values {
            assert_eq!(value.kind() as u8, ordinal);
        }
    }
}
