//! Composite key codec.
//!
//! A composite value is an ordered sequence of independently typed
//! components. Each component is framed as
//!
//! ```text
//!   <len>    <component bytes>    <eoc>
//!  2 bytes        len bytes       1 byte
//! ```
//!
//! with all integers big-endian. The framing is what makes the whole
//! encoding order-preserving: components are compared through their length
//! prefix and terminator, so one component's bytes can never be read as a
//! prefix of the next. The terminator also carries range semantics: a
//! non-`Equal` terminator marks an open-ended scan bound rather than an
//! exact value, letting callers build half-open ranges without knowing a
//! real successor value.

use ordwire_buffers::{Reader, Writer};

use crate::column_type::ColumnType;
use crate::error::MarshalError;
use crate::value::Value;

/// Largest component encoding the 2-byte length prefix can carry.
pub const MAX_COMPONENT_LEN: usize = u16::MAX as usize;

/// End-of-component terminator.
///
/// The byte values are wire constants fixed by the store's historical
/// format; they are not adjustable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eoc {
    /// Exact component value.
    Equal,
    /// Range bound below every key that continues this prefix.
    LessThanNext,
    /// Range bound above every key with this prefix.
    GreaterThanNext,
}

impl Eoc {
    pub const fn byte(self) -> u8 {
        match self {
            Eoc::Equal => 0x00,
            Eoc::LessThanNext => 0x01,
            Eoc::GreaterThanNext => 0xff,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Eoc::Equal),
            0x01 => Some(Eoc::LessThanNext),
            0xff => Some(Eoc::GreaterThanNext),
            _ => None,
        }
    }
}

/// One decoded (or to-be-encoded) composite segment: the component value and
/// its terminator. A part with a non-`Equal` terminator is an open-ended
/// range marker, not an exact value.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositePart {
    pub value: Value,
    pub eoc: Eoc,
}

impl CompositePart {
    /// An exact component value.
    pub fn exact(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            eoc: Eoc::Equal,
        }
    }

    pub fn with_eoc(value: impl Into<Value>, eoc: Eoc) -> Self {
        Self {
            value: value.into(),
            eoc,
        }
    }

    /// True when this part is a range bound rather than an exact value.
    pub fn is_sentinel(&self) -> bool {
        self.eoc != Eoc::Equal
    }
}

/// Encodes a sequence of components against their type descriptors.
///
/// Fewer parts than descriptors is legal (a prefix addresses every key it
/// starts), but extra parts have no type to encode with and are rejected.
/// A component descriptor's `reversed` flag bit-inverts that component's
/// encoded bytes before framing, which inverts its contribution to the byte
/// order without touching the other components.
pub fn pack_composite(
    parts: &[CompositePart],
    components: &[ColumnType],
) -> Result<Vec<u8>, MarshalError> {
    if parts.len() > components.len() {
        return Err(MarshalError::mismatch(
            "at most as many parts as component types",
            format!("{} parts for {} types", parts.len(), components.len()),
        ));
    }
    let mut writer = Writer::new();
    for (part, column_type) in parts.iter().zip(components) {
        let encoded = crate::encode(&part.value, column_type)?;
        if encoded.len() > MAX_COMPONENT_LEN {
            return Err(MarshalError::ComponentTooLarge(encoded.len()));
        }
        writer.u16(encoded.len() as u16);
        writer.bytes(&encoded);
        writer.u8(part.eoc.byte());
    }
    Ok(writer.flush())
}

/// Encodes exact values only, which is the common case.
pub fn pack_composite_values(
    values: &[Value],
    components: &[ColumnType],
) -> Result<Vec<u8>, MarshalError> {
    let parts: Vec<CompositePart> = values
        .iter()
        .map(|v| CompositePart::exact(v.clone()))
        .collect();
    pack_composite(&parts, components)
}

/// Encodes a prefix as the inclusive start bound of a range scan: every
/// component is exact except the last, which opens downward.
pub fn pack_range_start(
    values: &[Value],
    components: &[ColumnType],
) -> Result<Vec<u8>, MarshalError> {
    pack_range_bound(values, components, Eoc::LessThanNext)
}

/// Encodes a prefix as the inclusive end bound of a range scan: every
/// component is exact except the last, which opens upward.
pub fn pack_range_end(
    values: &[Value],
    components: &[ColumnType],
) -> Result<Vec<u8>, MarshalError> {
    pack_range_bound(values, components, Eoc::GreaterThanNext)
}

fn pack_range_bound(
    values: &[Value],
    components: &[ColumnType],
    last: Eoc,
) -> Result<Vec<u8>, MarshalError> {
    let mut parts: Vec<CompositePart> = values
        .iter()
        .map(|v| CompositePart::exact(v.clone()))
        .collect();
    if let Some(tail) = parts.last_mut() {
        tail.eoc = last;
    }
    pack_composite(&parts, components)
}

/// Decodes length-prefixed segments until the input is exhausted.
///
/// Truncation anywhere (inside a length prefix, a component, or a missing
/// terminator) fails with [`MarshalError::MalformedEncoding`]; there is
/// never a partial result.
pub fn unpack_composite(
    bytes: &[u8],
    components: &[ColumnType],
) -> Result<Vec<CompositePart>, MarshalError> {
    let mut reader = Reader::new(bytes);
    let mut types = components.iter();
    let mut parts = Vec::new();
    while !reader.is_empty() {
        let column_type = types.next().ok_or_else(|| {
            MarshalError::MalformedEncoding(
                "composite",
                format!("more than {} components", components.len()),
            )
        })?;
        let length = reader.u16().map_err(|_| {
            MarshalError::MalformedEncoding("composite", "truncated length prefix".to_owned())
        })?;
        let segment = reader.bytes(length as usize).map_err(|_| {
            MarshalError::MalformedEncoding(
                "composite",
                format!("component truncated before {length} bytes"),
            )
        })?;
        let eoc_byte = reader.u8().map_err(|_| {
            MarshalError::MalformedEncoding("composite", "missing end-of-component".to_owned())
        })?;
        let eoc = Eoc::from_byte(eoc_byte).ok_or_else(|| {
            MarshalError::MalformedEncoding(
                "composite",
                format!("unknown end-of-component byte 0x{eoc_byte:02x}"),
            )
        })?;
        let value = crate::decode(segment, column_type)?;
        parts.push(CompositePart { value, eoc });
    }
    Ok(parts)
}
