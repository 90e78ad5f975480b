//! Variable-length integer codec.
//!
//! Minimal-length big-endian two's-complement: the shortest byte string that
//! still carries the sign bit. Zero encodes as the single byte `0x00`, and
//! the empty buffer is rejected on decode.

use crate::error::MarshalError;

/// Encodes an integer as minimal-length big-endian two's complement.
pub fn encode_varint(value: i128) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    // Drop leading bytes that are pure sign extension.
    while start < bytes.len() - 1 {
        let byte = bytes[start];
        let next = bytes[start + 1];
        let redundant = (byte == 0x00 && next < 0x80) || (byte == 0xff && next >= 0x80);
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}

/// Decodes a minimal-length big-endian two's-complement integer.
pub fn decode_varint(bytes: &[u8]) -> Result<i128, MarshalError> {
    if bytes.is_empty() {
        return Err(MarshalError::MalformedEncoding(
            "varint",
            "empty input".to_owned(),
        ));
    }
    if bytes.len() > 16 {
        return Err(MarshalError::MalformedEncoding(
            "varint",
            format!("{} bytes exceeds the 16-byte integer width", bytes.len()),
        ));
    }
    let fill = if bytes[0] & 0x80 != 0 { 0xff } else { 0x00 };
    let mut wide = [fill; 16];
    wide[16 - bytes.len()..].copy_from_slice(bytes);
    Ok(i128::from_be_bytes(wide))
}
