//! Timestamp codec.
//!
//! The current on-disk format is a signed 64-bit big-endian count of
//! milliseconds since the Unix epoch. Historical data may instead carry a
//! microsecond count written by older clients; [`unpack_timestamp`] detects
//! that format and converts it transparently, while encoding always produces
//! the millisecond format. [`pack_timestamp_legacy`] is retained so the
//! detection path can be exercised against real legacy bytes.

use chrono::{DateTime, Utc};

use crate::error::MarshalError;
use crate::value::Value;

/// 0001-01-01T00:00:00Z in epoch milliseconds.
pub const MIN_CALENDAR_MS: i64 = -62_135_596_800_000;
/// 9999-12-31T23:59:59.999Z in epoch milliseconds.
pub const MAX_CALENDAR_MS: i64 = 253_402_300_799_999;

/// Accepted encode inputs: a calendar timestamp, or a numeric count of
/// seconds since the epoch (fractional seconds allowed for doubles).
fn epoch_millis(value: &Value) -> Result<i64, MarshalError> {
    match value {
        Value::Timestamp(dt) => Ok(dt.timestamp_millis()),
        Value::Int(seconds) => seconds
            .checked_mul(1000)
            .and_then(|ms| i64::try_from(ms).ok())
            .ok_or(MarshalError::ValueOutOfRange(*seconds, "timestamp")),
        Value::Double(seconds) => {
            if !seconds.is_finite() {
                return Err(MarshalError::UnsupportedTimestampInput("non-finite double"));
            }
            Ok((seconds * 1e3) as i64)
        }
        other => Err(MarshalError::UnsupportedTimestampInput(other.kind_name())),
    }
}

pub(crate) fn epoch_micros(value: &Value) -> Result<i64, MarshalError> {
    match value {
        Value::Timestamp(dt) => Ok(dt.timestamp_micros()),
        Value::Int(seconds) => seconds
            .checked_mul(1_000_000)
            .and_then(|us| i64::try_from(us).ok())
            .ok_or(MarshalError::ValueOutOfRange(*seconds, "timestamp")),
        Value::Double(seconds) => {
            if !seconds.is_finite() {
                return Err(MarshalError::UnsupportedTimestampInput("non-finite double"));
            }
            Ok((seconds * 1e6) as i64)
        }
        other => Err(MarshalError::UnsupportedTimestampInput(other.kind_name())),
    }
}

/// Encodes in the current format: epoch milliseconds, signed 64-bit
/// big-endian.
pub fn pack_timestamp(value: &Value) -> Result<Vec<u8>, MarshalError> {
    Ok(epoch_millis(value)?.to_be_bytes().to_vec())
}

/// Encodes in the legacy microsecond format.
///
/// New writers must not use this; it exists so the decoder's format
/// detection can be tested against bytes produced the old way.
pub fn pack_timestamp_legacy(value: &Value) -> Result<Vec<u8>, MarshalError> {
    Ok(epoch_micros(value)?.to_be_bytes().to_vec())
}

/// Decodes either timestamp format, preferring milliseconds.
///
/// The raw count is first read as milliseconds. When that lands outside the
/// representable calendar range (years 1-9999, the range the original
/// runtime's date type could construct), the count is re-read as
/// microseconds. A genuine millisecond timestamp outside that range is
/// therefore misread as microseconds; the boundary is inherent to the
/// detection scheme and matches the historical behavior.
pub fn unpack_timestamp(bytes: &[u8]) -> Result<DateTime<Utc>, MarshalError> {
    let raw = read_i64(bytes)?;
    if let Some(dt) = calendar_millis(raw) {
        return Ok(dt);
    }
    tracing::debug!(
        raw,
        "timestamp outside the calendar range as milliseconds, retrying as legacy microseconds"
    );
    calendar_millis(raw / 1000).ok_or_else(|| {
        MarshalError::MalformedEncoding(
            "timestamp",
            format!("{raw} is outside the calendar range in both known scales"),
        )
    })
}

/// Strict decode of the legacy microsecond format, without detection.
pub fn unpack_timestamp_legacy(bytes: &[u8]) -> Result<DateTime<Utc>, MarshalError> {
    let raw = read_i64(bytes)?;
    DateTime::from_timestamp_micros(raw).ok_or_else(|| {
        MarshalError::MalformedEncoding(
            "timestamp",
            format!("{raw} microseconds is outside the calendar range"),
        )
    })
}

fn read_i64(bytes: &[u8]) -> Result<i64, MarshalError> {
    let fixed: [u8; 8] = bytes
        .try_into()
        .map_err(|_| MarshalError::wrong_length("timestamp", 8, bytes.len()))?;
    Ok(i64::from_be_bytes(fixed))
}

fn calendar_millis(ms: i64) -> Option<DateTime<Utc>> {
    if !(MIN_CALENDAR_MS..=MAX_CALENDAR_MS).contains(&ms) {
        return None;
    }
    DateTime::from_timestamp_millis(ms)
}
