//! Byte buffer primitives shared by the ordwire codec crates.
//!
//! All multi-byte integers are big-endian, which is the network order the
//! store's wire format uses throughout.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

/// Errors surfaced by the bounds-checked [`Reader`] operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// A read would run past the end of the input.
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    /// Bytes claimed to be UTF-8 text are not valid UTF-8.
    #[error("invalid UTF-8")]
    InvalidUtf8,
}
