//! The JSON value model.
//!
//! A [JsonValue] is an immutable, structurally recursive representation of any JSON
//! document. Object members are stored as a vector of key/value pairs which preserves
//! insertion order; that order carries no semantic weight, and equality between objects
//! is key-set based. Accessors never fail: a missing key, an out-of-range index or an
//! access against the wrong kind of node all resolve to [JsonValue::Null].
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops::Index;

/// Basic enumeration of different JSON values
#[derive(Debug, Clone)]
pub enum JsonValue {
    /// Map of values, keys unique, insertion order preserved
    Object(Vec<(String, JsonValue)>),
    /// Array of values
    Array(Vec<JsonValue>),
    /// Canonical string value
    String(String),
    /// Numeric value, always double precision
    Number(f64),
    /// Canonical boolean value
    Boolean(bool),
    /// Canonical null value
    Null,
}

impl JsonValue {
    /// Select the named child of an object. Anything other than an object with the
    /// given key present resolves to [JsonValue::Null]
    pub fn child_by_key(&self, name: &str) -> &JsonValue {
        match self {
            JsonValue::Object(pairs) => pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value)
                .unwrap_or(&JsonValue::Null),
            _ => &JsonValue::Null,
        }
    }

    /// Select an array element by position. Negative indices wrap around from the end
    /// of the array; out-of-range indices and non-array receivers resolve to
    /// [JsonValue::Null]
    pub fn child_by_index(&self, index: i64) -> &JsonValue {
        match self {
            JsonValue::Array(items) => {
                let len = items.len() as i64;
                let resolved = if index < 0 { index + len } else { index };
                if (0..len).contains(&resolved) {
                    &items[resolved as usize]
                } else {
                    &JsonValue::Null
                }
            }
            _ => &JsonValue::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// The keys of an object in insertion order; empty for any other kind of value
    pub fn keys(&self) -> Vec<&str> {
        match self {
            JsonValue::Object(pairs) => pairs.iter().map(|(key, _)| key.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// The member values of an object or the elements of an array, in order; empty for
    /// any other kind of value
    pub fn values(&self) -> Vec<&JsonValue> {
        match self {
            JsonValue::Object(pairs) => pairs.iter().map(|(_, value)| value).collect(),
            JsonValue::Array(items) => items.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Rank used to order values of different kinds relative to each other
    fn rank(&self) -> u8 {
        match self {
            JsonValue::Object(_) => 0,
            JsonValue::Array(_) => 1,
            JsonValue::Number(_) => 2,
            JsonValue::String(_) => 3,
            JsonValue::Boolean(_) => 4,
            JsonValue::Null => 5,
        }
    }

    /// A total ordering over heterogeneous values: objects before arrays before numbers
    /// before strings before booleans before null. Containers of the same kind compare
    /// by size alone, scalars compare natively.
    ///
    /// This is deliberately not an [Ord] implementation: two distinct containers of the
    /// same size compare as equal here, which the `Ord`/`Eq` consistency contract does
    /// not allow. It exists for producing reproducible orderings of mixed fixtures.
    pub fn total_cmp(&self, other: &JsonValue) -> Ordering {
        match (self, other) {
            (JsonValue::Object(l), JsonValue::Object(r)) => l.len().cmp(&r.len()),
            (JsonValue::Array(l), JsonValue::Array(r)) => l.len().cmp(&r.len()),
            (JsonValue::Number(l), JsonValue::Number(r)) => l.total_cmp(r),
            (JsonValue::String(l), JsonValue::String(r)) => l.cmp(r),
            (JsonValue::Boolean(l), JsonValue::Boolean(r)) => l.cmp(r),
            (JsonValue::Null, JsonValue::Null) => Ordering::Equal,
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Structural, deep equality. Objects compare as key sets regardless of insertion
/// order. NaN never occurs in a parsed document, so native f64 equality is sound here.
impl PartialEq for JsonValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsonValue::Object(l), JsonValue::Object(r)) => {
                l.len() == r.len()
                    && l.iter().all(|(key, value)| {
                        r.iter()
                            .find(|(other_key, _)| other_key == key)
                            .is_some_and(|(_, other_value)| other_value == value)
                    })
            }
            (JsonValue::Array(l), JsonValue::Array(r)) => l == r,
            (JsonValue::String(l), JsonValue::String(r)) => l == r,
            (JsonValue::Number(l), JsonValue::Number(r)) => l == r,
            (JsonValue::Boolean(l), JsonValue::Boolean(r)) => l == r,
            (JsonValue::Null, JsonValue::Null) => true,
            _ => false,
        }
    }
}

impl Eq for JsonValue {}

impl Index<&str> for JsonValue {
    type Output = JsonValue;

    /// Shorthand member access, exactly equivalent to [JsonValue::child_by_key]
    fn index(&self, key: &str) -> &JsonValue {
        self.child_by_key(key)
    }
}

impl Index<i64> for JsonValue {
    type Output = JsonValue;

    /// Shorthand element access, exactly equivalent to [JsonValue::child_by_index]
    fn index(&self, index: i64) -> &JsonValue {
        self.child_by_index(index)
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Boolean(value)
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Number(value)
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Number(value as f64)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(values: Vec<JsonValue>) -> Self {
        JsonValue::Array(values)
    }
}

/// Emits the compact JSON text encoding of the value. Object members are written in
/// insertion order, which is not part of the encoding contract.
impl Display for JsonValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonValue::Object(pairs) => {
                write!(f, "{{")?;
                for (index, (key, value)) in pairs.iter().enumerate() {
                    if index > 0 {
                        write!(f, ",")?;
                    }
                    write_escaped(f, key)?;
                    write!(f, ":{value}")?;
                }
                write!(f, "}}")
            }
            JsonValue::Array(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            JsonValue::String(s) => write_escaped(f, s),
            JsonValue::Number(n) => {
                // Integral doubles print without a trailing ".0" so that re-decoding
                // yields an equal value
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            JsonValue::Boolean(b) => write!(f, "{b}"),
            JsonValue::Null => write!(f, "null"),
        }
    }
}

fn write_escaped(f: &mut Formatter<'_>, s: &str) -> std::fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            '\u{0008}' => write!(f, "\\b")?,
            '\u{000c}' => write!(f, "\\f")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "\"")
}
