//! Instant ↔ version-1 UUID conversion.
//!
//! Time-ordered columns use version-1 UUIDs as names; these helpers build a
//! UUID for a given instant (for writes, or for slice bounds) and recover
//! the instant from a UUID. The store breaks timestamp ties by comparing the
//! remaining UUID bytes, so the bound builders pin the clock and node bits
//! to their lowest and highest sorting values.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::MarshalError;
use crate::timestamp;
use crate::value::Value;

/// 100-ns intervals between the Gregorian epoch 1582-10-15 and the Unix
/// epoch 1970-01-01.
const GREGORIAN_OFFSET: i128 = 0x01b2_1dd2_1381_4000;

/// The lowest possible time UUID, as the store sorts them.
pub const LOWEST_TIME_UUID: Uuid = Uuid::from_u128(0x00000000_0000_1000_8080_808080808080);

/// The highest possible time UUID, as the store sorts them.
pub const HIGHEST_TIME_UUID: Uuid = Uuid::from_u128(0xffffffff_ffff_1fff_bf7f_7f7f7f7f7f7f);

fn build(micros: i64, clock_seq_hi: u8, clock_seq_low: u8, node: u64) -> Uuid {
    let ticks = (i128::from(micros) * 10 + GREGORIAN_OFFSET) as u128;
    let time_low = (ticks & 0xffff_ffff) as u32;
    let time_mid = ((ticks >> 32) & 0xffff) as u16;
    let time_hi_version = 0x1000 | ((ticks >> 48) & 0x0fff) as u16;
    let node_bytes = node.to_be_bytes();
    let d4 = [
        // Variant bits are always 10; only the low 6 bits are free.
        0x80 | (clock_seq_hi & 0x3f),
        clock_seq_low,
        node_bytes[2],
        node_bytes[3],
        node_bytes[4],
        node_bytes[5],
        node_bytes[6],
        node_bytes[7],
    ];
    Uuid::from_fields(time_low, time_mid, time_hi_version, &d4)
}

/// Builds a version-1 UUID for the given instant with randomized clock and
/// node bits. UUID inputs pass through unchanged.
pub fn uuid_from_time(value: &Value) -> Result<Uuid, MarshalError> {
    if let Value::Uuid(u) = value {
        return Ok(*u);
    }
    let micros = timestamp::epoch_micros(value)?;
    let bits: u64 = rand::random();
    let clock_seq_low = (bits & 0xff) as u8;
    let clock_seq_hi = ((bits >> 8) & 0xff) as u8;
    let node = (bits >> 16) & 0xffff_ffff_ffff;
    Ok(build(micros, clock_seq_hi, clock_seq_low, node))
}

/// The lowest-sorting UUID carrying the given instant. Use as the start of a
/// time slice.
pub fn uuid_lower_bound(value: &Value) -> Result<Uuid, MarshalError> {
    if let Value::Uuid(u) = value {
        return Ok(*u);
    }
    let micros = timestamp::epoch_micros(value)?;
    Ok(build(micros, 0x00, 0x80, 0x8080_8080_8080))
}

/// The highest-sorting UUID carrying the given instant. Use as the end of a
/// time slice.
pub fn uuid_upper_bound(value: &Value) -> Result<Uuid, MarshalError> {
    if let Value::Uuid(u) = value {
        return Ok(*u);
    }
    let micros = timestamp::epoch_micros(value)?;
    Ok(build(micros, 0x3f, 0x7f, 0x7f7f_7f7f_7f7f))
}

/// Recovers the instant carried by a version-1 UUID.
pub fn time_of_uuid(uuid: &Uuid) -> Result<DateTime<Utc>, MarshalError> {
    if uuid.get_version_num() != 1 {
        return Err(MarshalError::TypeMismatch {
            expected: "version 1 UUID",
            found: format!("version {} UUID", uuid.get_version_num()),
        });
    }
    let bytes = uuid.as_bytes();
    let time_low = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as u64;
    let time_mid = u16::from_be_bytes([bytes[4], bytes[5]]) as u64;
    let time_hi = (u16::from_be_bytes([bytes[6], bytes[7]]) & 0x0fff) as u64;
    let ticks = (time_hi << 48) | (time_mid << 32) | time_low;
    let micros = (i128::from(ticks) - GREGORIAN_OFFSET) / 10;
    let micros = i64::try_from(micros).map_err(|_| {
        MarshalError::MalformedEncoding("timeuuid", "timestamp out of range".to_owned())
    })?;
    DateTime::from_timestamp_micros(micros).ok_or_else(|| {
        MarshalError::MalformedEncoding("timeuuid", "timestamp out of range".to_owned())
    })
}
