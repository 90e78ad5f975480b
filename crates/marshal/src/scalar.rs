//! Scalar codec registry.
//!
//! One pack/unpack pair per primitive [`Kind`], dispatched by a single
//! `match`, since the set of wire types is closed and known at compile time.
//! Composite and custom kinds are handled a level up, in the crate's
//! `encode`/`decode` entry points.

use uuid::Uuid;

use crate::column_type::Kind;
use crate::error::MarshalError;
use crate::time_uuid;
use crate::timestamp;
use crate::value::Value;
use crate::varint;

/// Encodes a value in the given scalar kind's wire format.
pub fn pack(kind: &Kind, value: &Value) -> Result<Vec<u8>, MarshalError> {
    match kind {
        Kind::Bytes => pack_bytes(value),
        Kind::Long | Kind::Counter => pack_long(value),
        Kind::VarInt => pack_varint(value),
        Kind::Int32 => pack_int32(value),
        Kind::Ascii => pack_ascii(value),
        Kind::Utf8 => pack_utf8(value),
        Kind::Boolean => pack_boolean(value),
        Kind::Double => pack_double(value),
        Kind::Float => pack_float(value),
        Kind::TimeUuid => pack_time_uuid(value),
        Kind::LexicalUuid => pack_lexical_uuid(value),
        Kind::Timestamp => timestamp::pack_timestamp(value),
        Kind::Composite(_) | Kind::Custom(_) => {
            Err(MarshalError::mismatch("a scalar kind", kind.name()))
        }
    }
}

/// Decodes a scalar kind's wire format back into a value.
///
/// Every length mismatch is a [`MarshalError::MalformedEncoding`]; nothing
/// is truncated or padded.
pub fn unpack(kind: &Kind, bytes: &[u8]) -> Result<Value, MarshalError> {
    match kind {
        Kind::Bytes => Ok(Value::Bytes(bytes.to_vec())),
        Kind::Long | Kind::Counter => {
            let fixed: [u8; 8] = bytes
                .try_into()
                .map_err(|_| MarshalError::wrong_length("long", 8, bytes.len()))?;
            Ok(Value::Int(i128::from(i64::from_be_bytes(fixed))))
        }
        Kind::VarInt => Ok(Value::Int(varint::decode_varint(bytes)?)),
        Kind::Int32 => {
            let fixed: [u8; 4] = bytes
                .try_into()
                .map_err(|_| MarshalError::wrong_length("int32", 4, bytes.len()))?;
            Ok(Value::Int(i128::from(i32::from_be_bytes(fixed))))
        }
        Kind::Ascii => {
            if !bytes.is_ascii() {
                return Err(MarshalError::InvalidCharacterEncoding("ASCII"));
            }
            // ASCII is a subset of UTF-8.
            Ok(Value::Str(String::from_utf8(bytes.to_vec()).unwrap()))
        }
        Kind::Utf8 => String::from_utf8(bytes.to_vec())
            .map(Value::Str)
            .map_err(|_| MarshalError::InvalidCharacterEncoding("UTF-8")),
        Kind::Boolean => {
            if bytes.len() != 1 {
                return Err(MarshalError::wrong_length("boolean", 1, bytes.len()));
            }
            Ok(Value::Bool(bytes[0] != 0))
        }
        Kind::Double => {
            let fixed: [u8; 8] = bytes
                .try_into()
                .map_err(|_| MarshalError::wrong_length("double", 8, bytes.len()))?;
            Ok(Value::Double(f64::from_be_bytes(fixed)))
        }
        Kind::Float => {
            let fixed: [u8; 4] = bytes
                .try_into()
                .map_err(|_| MarshalError::wrong_length("float", 4, bytes.len()))?;
            Ok(Value::Float(f32::from_be_bytes(fixed)))
        }
        Kind::TimeUuid => unpack_uuid("timeuuid", bytes),
        Kind::LexicalUuid => unpack_uuid("lexicaluuid", bytes),
        Kind::Timestamp => Ok(Value::Timestamp(timestamp::unpack_timestamp(bytes)?)),
        Kind::Composite(_) | Kind::Custom(_) => {
            Err(MarshalError::mismatch("a scalar kind", kind.name()))
        }
    }
}

fn pack_bytes(value: &Value) -> Result<Vec<u8>, MarshalError> {
    match value {
        Value::Bytes(b) => Ok(b.clone()),
        Value::Str(s) => Ok(s.as_bytes().to_vec()),
        other => Err(MarshalError::mismatch("bytes or str", other.kind_name())),
    }
}

fn pack_long(value: &Value) -> Result<Vec<u8>, MarshalError> {
    match value {
        Value::Int(v) => {
            let v = i64::try_from(*v).map_err(|_| MarshalError::ValueOutOfRange(*v, "long"))?;
            Ok(v.to_be_bytes().to_vec())
        }
        other => Err(MarshalError::mismatch("int", other.kind_name())),
    }
}

fn pack_varint(value: &Value) -> Result<Vec<u8>, MarshalError> {
    match value {
        Value::Int(v) => Ok(varint::encode_varint(*v)),
        other => Err(MarshalError::mismatch("int", other.kind_name())),
    }
}

fn pack_int32(value: &Value) -> Result<Vec<u8>, MarshalError> {
    match value {
        Value::Int(v) => {
            let v = i32::try_from(*v).map_err(|_| MarshalError::ValueOutOfRange(*v, "int32"))?;
            Ok(v.to_be_bytes().to_vec())
        }
        other => Err(MarshalError::mismatch("int", other.kind_name())),
    }
}

fn pack_ascii(value: &Value) -> Result<Vec<u8>, MarshalError> {
    let bytes = match value {
        Value::Str(s) => s.as_bytes(),
        Value::Bytes(b) => b.as_slice(),
        other => Err(MarshalError::mismatch("str or bytes", other.kind_name()))?,
    };
    if !bytes.is_ascii() {
        return Err(MarshalError::InvalidCharacterEncoding("ASCII"));
    }
    Ok(bytes.to_vec())
}

fn pack_utf8(value: &Value) -> Result<Vec<u8>, MarshalError> {
    match value {
        Value::Str(s) => Ok(s.as_bytes().to_vec()),
        Value::Bytes(b) => {
            // Pre-encoded input is accepted but still validated.
            std::str::from_utf8(b).map_err(|_| MarshalError::InvalidCharacterEncoding("UTF-8"))?;
            Ok(b.clone())
        }
        other => Err(MarshalError::mismatch("str or bytes", other.kind_name())),
    }
}

fn pack_boolean(value: &Value) -> Result<Vec<u8>, MarshalError> {
    match value {
        Value::Bool(b) => Ok(vec![u8::from(*b)]),
        other => Err(MarshalError::mismatch("bool", other.kind_name())),
    }
}

fn pack_double(value: &Value) -> Result<Vec<u8>, MarshalError> {
    match value {
        Value::Double(v) => Ok(v.to_be_bytes().to_vec()),
        other => Err(MarshalError::mismatch("double", other.kind_name())),
    }
}

fn pack_float(value: &Value) -> Result<Vec<u8>, MarshalError> {
    match value {
        Value::Float(v) => Ok(v.to_be_bytes().to_vec()),
        other => Err(MarshalError::mismatch("float", other.kind_name())),
    }
}

fn pack_time_uuid(value: &Value) -> Result<Vec<u8>, MarshalError> {
    match value {
        Value::Uuid(u) => Ok(u.as_bytes().to_vec()),
        // Instants are converted to a version-1 UUID with randomized
        // clock/node bits; use the time_uuid bound builders for slices.
        Value::Timestamp(_) | Value::Int(_) | Value::Double(_) => {
            Ok(time_uuid::uuid_from_time(value)?.as_bytes().to_vec())
        }
        other => Err(MarshalError::mismatch(
            "uuid or an instant",
            other.kind_name(),
        )),
    }
}

fn pack_lexical_uuid(value: &Value) -> Result<Vec<u8>, MarshalError> {
    match value {
        Value::Uuid(u) => Ok(u.as_bytes().to_vec()),
        other => Err(MarshalError::mismatch("uuid", other.kind_name())),
    }
}

fn unpack_uuid(type_name: &'static str, bytes: &[u8]) -> Result<Value, MarshalError> {
    Uuid::from_slice(bytes)
        .map(Value::Uuid)
        .map_err(|_| MarshalError::wrong_length(type_name, 16, bytes.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_is_identity() {
        let encoded = pack(&Kind::Bytes, &Value::Bytes(vec![0, 0xff, 7])).unwrap();
        assert_eq!(encoded, [0, 0xff, 7]);
        assert_eq!(
            unpack(&Kind::Bytes, &encoded).unwrap(),
            Value::Bytes(vec![0, 0xff, 7])
        );
    }

    #[test]
    fn long_wire_format() {
        let encoded = pack(&Kind::Long, &Value::Int(-2)).unwrap();
        assert_eq!(encoded, [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe]);
        assert_eq!(unpack(&Kind::Long, &encoded).unwrap(), Value::Int(-2));
    }

    #[test]
    fn long_range_checked() {
        let err = pack(&Kind::Long, &Value::Int(i128::from(i64::MAX) + 1)).unwrap_err();
        assert!(matches!(err, MarshalError::ValueOutOfRange(_, "long")));
    }

    #[test]
    fn long_rejects_seven_bytes() {
        let err = unpack(&Kind::Long, &[0u8; 7]).unwrap_err();
        assert_eq!(err, MarshalError::wrong_length("long", 8, 7));
    }

    #[test]
    fn int32_range_checked() {
        assert_eq!(
            pack(&Kind::Int32, &Value::Int(-1)).unwrap(),
            [0xff, 0xff, 0xff, 0xff]
        );
        let err = pack(&Kind::Int32, &Value::Int(i128::from(i32::MAX) + 1)).unwrap_err();
        assert!(matches!(err, MarshalError::ValueOutOfRange(_, "int32")));
    }

    #[test]
    fn counter_shares_the_long_format() {
        let long = pack(&Kind::Long, &Value::Int(1234)).unwrap();
        let counter = pack(&Kind::Counter, &Value::Int(1234)).unwrap();
        assert_eq!(long, counter);
        assert_eq!(unpack(&Kind::Counter, &counter).unwrap(), Value::Int(1234));
    }

    #[test]
    fn ascii_validation_both_ways() {
        assert_eq!(pack(&Kind::Ascii, &Value::Str("abc".into())).unwrap(), b"abc");
        let err = pack(&Kind::Ascii, &Value::Str("café".into())).unwrap_err();
        assert_eq!(err, MarshalError::InvalidCharacterEncoding("ASCII"));
        let err = unpack(&Kind::Ascii, &[0x80]).unwrap_err();
        assert_eq!(err, MarshalError::InvalidCharacterEncoding("ASCII"));
    }

    #[test]
    fn utf8_rejects_invalid_sequences() {
        let encoded = pack(&Kind::Utf8, &Value::Str("héllo".into())).unwrap();
        assert_eq!(
            unpack(&Kind::Utf8, &encoded).unwrap(),
            Value::Str("héllo".into())
        );
        let err = unpack(&Kind::Utf8, &[0xff, 0xfe]).unwrap_err();
        assert_eq!(err, MarshalError::InvalidCharacterEncoding("UTF-8"));
        let err = pack(&Kind::Utf8, &Value::Bytes(vec![0xff])).unwrap_err();
        assert_eq!(err, MarshalError::InvalidCharacterEncoding("UTF-8"));
    }

    #[test]
    fn boolean_strict_encode_permissive_decode() {
        assert_eq!(pack(&Kind::Boolean, &Value::Bool(false)).unwrap(), [0x00]);
        assert_eq!(pack(&Kind::Boolean, &Value::Bool(true)).unwrap(), [0x01]);
        assert_eq!(unpack(&Kind::Boolean, &[0x00]).unwrap(), Value::Bool(false));
        assert_eq!(unpack(&Kind::Boolean, &[0x5a]).unwrap(), Value::Bool(true));
        let err = unpack(&Kind::Boolean, &[0, 0]).unwrap_err();
        assert_eq!(err, MarshalError::wrong_length("boolean", 1, 2));
    }

    #[test]
    fn floats_are_ieee_big_endian() {
        let encoded = pack(&Kind::Double, &Value::Double(-0.0)).unwrap();
        assert_eq!(encoded, (-0.0f64).to_be_bytes());
        assert_eq!(
            unpack(&Kind::Double, &encoded).unwrap(),
            Value::Double(-0.0)
        );
        let encoded = pack(&Kind::Float, &Value::Float(1.5)).unwrap();
        assert_eq!(encoded, 1.5f32.to_be_bytes());
        let err = unpack(&Kind::Float, &[0u8; 8]).unwrap_err();
        assert_eq!(err, MarshalError::wrong_length("float", 4, 8));
    }

    #[test]
    fn uuids_are_sixteen_bytes() {
        let u = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
        let encoded = pack(&Kind::LexicalUuid, &Value::Uuid(u)).unwrap();
        assert_eq!(encoded, u.as_bytes());
        assert_eq!(
            unpack(&Kind::LexicalUuid, &encoded).unwrap(),
            Value::Uuid(u)
        );
        let err = unpack(&Kind::TimeUuid, &encoded[..15]).unwrap_err();
        assert_eq!(err, MarshalError::wrong_length("timeuuid", 16, 15));
    }

    #[test]
    fn time_uuid_accepts_instants() {
        let encoded = pack(&Kind::TimeUuid, &Value::Int(1_262_304_000)).unwrap();
        assert_eq!(encoded.len(), 16);
        match unpack(&Kind::TimeUuid, &encoded).unwrap() {
            Value::Uuid(u) => assert_eq!(u.get_version_num(), 1),
            other => panic!("expected uuid, got {other:?}"),
        }
    }

    #[test]
    fn lexical_uuid_rejects_instants() {
        let err = pack(&Kind::LexicalUuid, &Value::Int(12)).unwrap_err();
        assert!(matches!(err, MarshalError::TypeMismatch { .. }));
    }

    #[test]
    fn wrong_tag_is_a_type_mismatch() {
        let err = pack(&Kind::Long, &Value::Bool(true)).unwrap_err();
        assert_eq!(
            err,
            MarshalError::TypeMismatch {
                expected: "int",
                found: "bool".into()
            }
        );
    }
}
