//! Malformed input must fail loudly: never truncate, pad, or return a
//! partial result.

use ordwire_marshal::composite::unpack_composite;
use ordwire_marshal::{decode, encode, ColumnType, MarshalError, Value};

fn expect_malformed(result: Result<Value, MarshalError>) {
    match result {
        Err(MarshalError::MalformedEncoding(..)) => {}
        other => panic!("expected MalformedEncoding, got {other:?}"),
    }
}

#[test]
fn seven_byte_long_is_malformed() {
    expect_malformed(decode(&[0u8; 7], &ColumnType::long()));
}

#[test]
fn fixed_width_length_matrix() {
    expect_malformed(decode(&[0u8; 9], &ColumnType::long()));
    expect_malformed(decode(&[0u8; 3], &ColumnType::int32()));
    expect_malformed(decode(&[0u8; 5], &ColumnType::int32()));
    expect_malformed(decode(&[], &ColumnType::boolean()));
    expect_malformed(decode(&[0, 1], &ColumnType::boolean()));
    expect_malformed(decode(&[0u8; 7], &ColumnType::double()));
    expect_malformed(decode(&[0u8; 3], &ColumnType::float()));
    expect_malformed(decode(&[0u8; 15], &ColumnType::lexical_uuid()));
    expect_malformed(decode(&[0u8; 17], &ColumnType::time_uuid()));
    expect_malformed(decode(&[0u8; 7], &ColumnType::timestamp()));
    expect_malformed(decode(&[], &ColumnType::var_int()));
}

#[test]
fn invalid_text_is_a_charset_error_not_a_substitution() {
    let err = decode(&[0xff, 0xfe], &ColumnType::utf8()).unwrap_err();
    assert_eq!(err, MarshalError::InvalidCharacterEncoding("UTF-8"));
    let err = decode(&[b'a', 0x80], &ColumnType::ascii()).unwrap_err();
    assert_eq!(err, MarshalError::InvalidCharacterEncoding("ASCII"));
}

#[test]
fn truncated_composite_matrix() {
    let components = vec![ColumnType::utf8(), ColumnType::var_int()];
    let key = ColumnType::composite(components.clone());
    let whole = encode(
        &Value::Tuple(vec![Value::from("andrew"), Value::Int(20)]),
        &key,
    )
    .unwrap();

    // Every proper prefix that cuts a segment must fail; prefixes that end
    // exactly on a segment boundary are legal shorter composites.
    let boundary = 9; // len(2) + "andrew"(6) + eoc(1)
    for cut in 1..whole.len() {
        let result = decode(&whole[..cut], &key);
        if cut == boundary {
            assert!(result.is_ok(), "clean segment boundary at {cut}");
        } else {
            expect_malformed(result);
        }
    }

    // The part-level decoder applies the same rule.
    assert!(unpack_composite(&whole[..boundary], &components).is_ok());
    assert!(unpack_composite(&whole[..boundary + 1], &components).is_err());
}

#[test]
fn composite_with_extra_segment_is_malformed() {
    let one = vec![ColumnType::var_int()];
    let two = vec![ColumnType::var_int(), ColumnType::var_int()];
    let bytes = encode(
        &Value::Tuple(vec![Value::Int(1), Value::Int(2)]),
        &ColumnType::composite(two),
    )
    .unwrap();
    expect_malformed(decode(&bytes, &ColumnType::composite(one)));
}

#[test]
fn component_bytes_are_validated_not_trusted() {
    // A composite framing a 7-byte long component: framing is fine, the
    // component itself is not.
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&(7u16).to_be_bytes());
    bytes.extend_from_slice(&[0u8; 7]);
    bytes.push(0x00);
    expect_malformed(decode(
        &bytes,
        &ColumnType::composite(vec![ColumnType::long()]),
    ));
}

#[test]
fn errors_are_deterministic() {
    // The same bad input fails identically every time; these are pure
    // transforms, so retrying is meaningless by construction.
    let first = decode(&[0u8; 7], &ColumnType::long()).unwrap_err();
    let second = decode(&[0u8; 7], &ColumnType::long()).unwrap_err();
    assert_eq!(first, second);
}
