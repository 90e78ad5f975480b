//! Order-preserving typed binary marshaling for a column-oriented store.
//!
//! Native values (integers, text, timestamps, UUIDs, booleans, floats,
//! composite keys) convert to and from a byte representation whose raw
//! byte-wise comparison matches the semantic order of the decoded values,
//! the property the store's range scans over row and column keys depend on.
//!
//! The whole surface is two pure functions, [`encode`] and [`decode`],
//! driven by a [`ColumnType`] descriptor. There is no shared state and no
//! I/O; every call is a deterministic transform of its inputs and is safe
//! from any number of threads.
//!
//! ```
//! use ordwire_marshal::{decode, encode, ColumnType, Value};
//!
//! let key = ColumnType::composite(vec![ColumnType::utf8(), ColumnType::var_int()]);
//! let value = Value::Tuple(vec![Value::from("andrew"), Value::Int(20)]);
//! let bytes = encode(&value, &key).unwrap();
//! assert_eq!(decode(&bytes, &key).unwrap(), value);
//! ```

mod column_type;
mod error;
mod value;

pub mod composite;
pub mod scalar;
pub mod time_uuid;
pub mod timestamp;
pub mod varint;

pub use column_type::{ColumnType, CustomCodec, Kind};
pub use composite::{CompositePart, Eoc};
pub use error::MarshalError;
pub use value::Value;

/// Encodes a value in the wire format the descriptor names.
///
/// `Composite` descriptors take a [`Value::Tuple`]; a descriptor with
/// `reversed` set has its encoding bit-inverted, which inverts the value's
/// contribution to byte order symmetrically with [`decode`].
pub fn encode(value: &Value, column_type: &ColumnType) -> Result<Vec<u8>, MarshalError> {
    let bytes = match &column_type.kind {
        Kind::Composite(components) => match value {
            Value::Tuple(items) => composite::pack_composite_values(items, components)?,
            other => {
                return Err(MarshalError::TypeMismatch {
                    expected: "tuple",
                    found: other.kind_name().to_owned(),
                })
            }
        },
        Kind::Custom(codec) => (codec.pack)(value)?,
        kind => scalar::pack(kind, value)?,
    };
    Ok(if column_type.reversed {
        invert(bytes)
    } else {
        bytes
    })
}

/// Decodes wire bytes back into the value the descriptor names.
///
/// `Composite` descriptors yield a [`Value::Tuple`] of exact component
/// values; bytes carrying range-sentinel terminators are not values and are
/// rejected here; decode them part-by-part with
/// [`composite::unpack_composite`].
pub fn decode(bytes: &[u8], column_type: &ColumnType) -> Result<Value, MarshalError> {
    let inverted;
    let bytes = if column_type.reversed {
        inverted = invert(bytes.to_vec());
        inverted.as_slice()
    } else {
        bytes
    };
    match &column_type.kind {
        Kind::Composite(components) => {
            let parts = composite::unpack_composite(bytes, components)?;
            if parts.iter().any(CompositePart::is_sentinel) {
                return Err(MarshalError::TypeMismatch {
                    expected: "exact component values",
                    found: "range sentinel terminator".to_owned(),
                });
            }
            Ok(Value::Tuple(parts.into_iter().map(|p| p.value).collect()))
        }
        Kind::Custom(codec) => (codec.unpack)(bytes),
        kind => scalar::unpack(kind, bytes),
    }
}

fn invert(mut bytes: Vec<u8>) -> Vec<u8> {
    for byte in &mut bytes {
        *byte = !*byte;
    }
    bytes
}
