//! Column type descriptors.
//!
//! A [`ColumnType`] tells the codec how a column name or value is
//! represented on the wire. Descriptors are built once by the storage layer
//! and are immutable afterwards; `Composite` descriptors own their component
//! descriptors outright, so the component list is always a finite tree.

use std::fmt;

use crate::error::MarshalError;
use crate::value::Value;

/// The closed set of wire representations the store understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// Raw bytes, passed through unchanged.
    Bytes,
    /// 8-byte big-endian signed integer.
    Long,
    /// Minimal-length big-endian two's-complement integer.
    VarInt,
    /// 4-byte big-endian signed integer.
    Int32,
    /// 7-bit ASCII text.
    Ascii,
    /// UTF-8 text.
    Utf8,
    /// Single byte, `0x00` false / `0x01` true.
    Boolean,
    /// 8-byte big-endian IEEE-754 double.
    Double,
    /// 4-byte big-endian IEEE-754 float.
    Float,
    /// 16-byte version-1 (time-ordered) UUID.
    TimeUuid,
    /// 16-byte UUID compared lexically.
    LexicalUuid,
    /// Distributed counter; wire-identical to [`Kind::Long`].
    Counter,
    /// 8-byte big-endian count of milliseconds since the Unix epoch.
    Timestamp,
    /// Ordered sequence of independently typed components.
    Composite(Vec<ColumnType>),
    /// Caller-registered codec.
    Custom(CustomCodec),
}

impl Kind {
    /// Short name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Bytes => "bytes",
            Kind::Long => "long",
            Kind::VarInt => "varint",
            Kind::Int32 => "int32",
            Kind::Ascii => "ascii",
            Kind::Utf8 => "utf8",
            Kind::Boolean => "boolean",
            Kind::Double => "double",
            Kind::Float => "float",
            Kind::TimeUuid => "timeuuid",
            Kind::LexicalUuid => "lexicaluuid",
            Kind::Counter => "counter",
            Kind::Timestamp => "timestamp",
            Kind::Composite(_) => "composite",
            Kind::Custom(_) => "custom",
        }
    }
}

/// A caller-supplied pack/unpack pair for types the store does not know.
///
/// Codecs are plain function pointers carried on the descriptor itself, so
/// there is no process-wide registry and nothing to synchronize.
#[derive(Clone, Copy)]
pub struct CustomCodec {
    /// Name reported in diagnostics.
    pub name: &'static str,
    pub pack: fn(&Value) -> Result<Vec<u8>, MarshalError>,
    pub unpack: fn(&[u8]) -> Result<Value, MarshalError>,
}

impl fmt::Debug for CustomCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCodec").field("name", &self.name).finish()
    }
}

impl PartialEq for CustomCodec {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && std::ptr::eq(self.pack as *const (), other.pack as *const ())
            && std::ptr::eq(self.unpack as *const (), other.unpack as *const ())
    }
}

/// A type descriptor: the wire kind plus per-column ordering and defaulting.
///
/// `reversed` inverts the column's contribution to sort order; `default` is
/// carried for row-mapping layers that substitute it when a column is
/// absent; the codec itself never reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnType {
    pub kind: Kind,
    pub reversed: bool,
    pub default: Option<Value>,
}

impl ColumnType {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            reversed: false,
            default: None,
        }
    }

    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn bytes() -> Self {
        Self::new(Kind::Bytes)
    }

    pub fn long() -> Self {
        Self::new(Kind::Long)
    }

    pub fn var_int() -> Self {
        Self::new(Kind::VarInt)
    }

    pub fn int32() -> Self {
        Self::new(Kind::Int32)
    }

    pub fn ascii() -> Self {
        Self::new(Kind::Ascii)
    }

    pub fn utf8() -> Self {
        Self::new(Kind::Utf8)
    }

    pub fn boolean() -> Self {
        Self::new(Kind::Boolean)
    }

    pub fn double() -> Self {
        Self::new(Kind::Double)
    }

    pub fn float() -> Self {
        Self::new(Kind::Float)
    }

    pub fn time_uuid() -> Self {
        Self::new(Kind::TimeUuid)
    }

    pub fn lexical_uuid() -> Self {
        Self::new(Kind::LexicalUuid)
    }

    pub fn counter() -> Self {
        Self::new(Kind::Counter)
    }

    pub fn timestamp() -> Self {
        Self::new(Kind::Timestamp)
    }

    pub fn composite(components: Vec<ColumnType>) -> Self {
        Self::new(Kind::Composite(components))
    }
}

impl From<&str> for ColumnType {
    /// Parses a validator string as found in schema metadata.
    ///
    /// Accepts fully qualified Java class names
    /// (`org.apache.cassandra.db.marshal.LongType`), bare names (`LongType`),
    /// `ReversedType(...)` wrappers, and `CompositeType(...)` lists. Unknown
    /// names fall back to `BytesType`, matching the store's own behavior.
    fn from(s: &str) -> Self {
        parse_validator(s)
    }
}

fn parse_validator(s: &str) -> ColumnType {
    let s = s.trim();

    if let Some(inner) = inner_of(s, "CompositeType") {
        let components = split_top_level(inner).map(parse_validator).collect();
        return ColumnType::composite(components);
    }

    if let Some(inner) = inner_of(s, "ReversedType") {
        return parse_validator(inner).with_reversed(true);
    }

    let name = match s.rfind('.') {
        Some(index) => &s[index + 1..],
        None => s,
    };

    let kind = match name {
        "BytesType" => Kind::Bytes,
        "LongType" => Kind::Long,
        "IntegerType" => Kind::VarInt,
        "Int32Type" => Kind::Int32,
        "AsciiType" => Kind::Ascii,
        "UTF8Type" => Kind::Utf8,
        "BooleanType" => Kind::Boolean,
        "DoubleType" => Kind::Double,
        "FloatType" => Kind::Float,
        "TimeUUIDType" => Kind::TimeUuid,
        "LexicalUUIDType" | "UUIDType" => Kind::LexicalUuid,
        "CounterColumnType" => Kind::Counter,
        "DateType" => Kind::Timestamp,
        _ => Kind::Bytes,
    };
    ColumnType::new(kind)
}

/// Returns the parenthesized body when `s` is a `marker(...)` application,
/// qualified or not.
fn inner_of<'a>(s: &'a str, marker: &str) -> Option<&'a str> {
    let start = s.find(marker)?;
    let open = s[start..].find('(')? + start;
    let close = s.rfind(')')?;
    if close <= open {
        return None;
    }
    Some(&s[open + 1..close])
}

/// Splits on commas at paren depth zero, so nested `ReversedType(...)`
/// wrappers survive intact.
fn split_top_level(s: &str) -> impl Iterator<Item = &str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pieces.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&s[start..]);
    pieces.into_iter().map(str::trim).filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_qualified_name() {
        let ct = ColumnType::from("org.apache.cassandra.db.marshal.LongType");
        assert_eq!(ct.kind, Kind::Long);
        assert!(!ct.reversed);
    }

    #[test]
    fn parses_bare_names() {
        assert_eq!(ColumnType::from("IntegerType").kind, Kind::VarInt);
        assert_eq!(ColumnType::from("UTF8Type").kind, Kind::Utf8);
        assert_eq!(ColumnType::from("DateType").kind, Kind::Timestamp);
        assert_eq!(ColumnType::from("CounterColumnType").kind, Kind::Counter);
        assert_eq!(ColumnType::from("UUIDType").kind, Kind::LexicalUuid);
    }

    #[test]
    fn unknown_name_falls_back_to_bytes() {
        assert_eq!(ColumnType::from("FrobnicatorType").kind, Kind::Bytes);
        assert_eq!(ColumnType::from("").kind, Kind::Bytes);
    }

    #[test]
    fn parses_reversed_wrapper() {
        let ct = ColumnType::from("org.apache.cassandra.db.marshal.ReversedType(LongType)");
        assert_eq!(ct.kind, Kind::Long);
        assert!(ct.reversed);
    }

    #[test]
    fn parses_composite() {
        let ct = ColumnType::from("CompositeType(LongType, UTF8Type)");
        match ct.kind {
            Kind::Composite(components) => {
                assert_eq!(components.len(), 2);
                assert_eq!(components[0].kind, Kind::Long);
                assert_eq!(components[1].kind, Kind::Utf8);
            }
            other => panic!("expected composite, got {other:?}"),
        }
    }

    #[test]
    fn parses_reversed_component_inside_composite() {
        let ct = ColumnType::from("CompositeType(ReversedType(LongType), AsciiType)");
        match ct.kind {
            Kind::Composite(components) => {
                assert_eq!(components[0].kind, Kind::Long);
                assert!(components[0].reversed);
                assert_eq!(components[1].kind, Kind::Ascii);
                assert!(!components[1].reversed);
            }
            other => panic!("expected composite, got {other:?}"),
        }
    }

    #[test]
    fn default_is_carried_not_consulted() {
        let ct = ColumnType::long().with_default(Value::Int(42));
        assert_eq!(ct.default, Some(Value::Int(42)));
    }
}
