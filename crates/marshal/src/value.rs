//! [`Value`] — the native value union every codec in this crate speaks.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A native value, as seen by the store's row and column APIs.
///
/// Values are immutable and carry their own tag; the codec never coerces
/// between tags except where a type explicitly allows it at encode time
/// (the timestamp and time-UUID codecs accept numeric epoch counts, and the
/// text codecs accept raw bytes subject to charset validation).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Raw bytes, stored as-is.
    Bytes(Vec<u8>),
    /// Arbitrary integer; also the payload for the fixed-width integer types.
    Int(i128),
    /// Text.
    Str(String),
    /// Boolean.
    Bool(bool),
    /// 64-bit IEEE-754 floating point.
    Double(f64),
    /// 32-bit IEEE-754 floating point.
    Float(f32),
    /// Calendar timestamp.
    Timestamp(DateTime<Utc>),
    /// UUID, time-ordered or lexical.
    Uuid(Uuid),
    /// Ordered components of a composite key.
    Tuple(Vec<Value>),
}

impl Value {
    /// Short tag name, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bytes(_) => "bytes",
            Value::Int(_) => "int",
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
            Value::Double(_) => "double",
            Value::Float(_) => "float",
            Value::Timestamp(_) => "timestamp",
            Value::Uuid(_) => "uuid",
            Value::Tuple(_) => "tuple",
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v as i128)
    }
}

impl From<i128> for Value {
    fn from(v: i128) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Tuple(v)
    }
}
