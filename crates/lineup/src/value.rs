//! Cell values.
//!
//! A [`Value`] is the raw datum held by a cell: text, a number, a bool, an
//! explicit null, or nothing at all. Null and missing are distinct so that
//! sorting can rank "explicitly empty" above "never set".

use std::cmp::Ordering;
use std::fmt;

/// The raw datum stored in a table cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Text content.
    Text(String),
    /// Integer content.
    Int(i64),
    /// Floating-point content.
    Float(f64),
    /// Boolean content.
    Bool(bool),
    /// An explicitly empty value.
    Null,
    /// A value that was never set.
    Missing,
}

impl Value {
    /// True for [`Value::Null`] and [`Value::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Null | Value::Missing)
    }

    /// Numeric view of the value, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// Stringification used by the default renderer and transposed output.
/// Null and missing values render as the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null | Value::Missing => Ok(()),
        }
    }
}

/// Ordering used by sorting: real values sort before null, null before
/// missing. Two real values compare numerically when both are numeric,
/// lexicographically on their rendered text otherwise.
pub(crate) fn compare(a: &Value, b: &Value) -> Ordering {
    let rank_a = missing_rank(a);
    let rank_b = missing_rank(b);
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }
    if rank_a > 0 {
        return Ordering::Equal;
    }

    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn missing_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 1,
        Value::Missing => 2,
        _ => 0,
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            // Nested structures render as their JSON text
            other => Value::Text(other.to_string()),
        }
    }
}
