//! Length-prefixed UTF-8 strings, the string primitive of the change log.
//!
//! An entry is a 4-byte big-endian signed length followed by that many
//! bytes of UTF-8.

use std::io::{self, ErrorKind, Read, Write};

use crate::config::DEFAULT_MAX_RECORD_BYTES;
use crate::error::{PersistError, Result};

/// Size of the length prefix in bytes.
pub const LENGTH_PREFIX_BYTES: usize = 4;

/// Writes `s` with its length prefix.
pub fn write_string<W: Write + ?Sized>(out: &mut W, s: &str) -> Result<()> {
    let len = i32::try_from(s.len()).map_err(|_| {
        io::Error::new(
            ErrorKind::InvalidInput,
            format!("string of {} bytes exceeds length prefix range", s.len()),
        )
    })?;
    out.write_all(&len.to_be_bytes())?;
    out.write_all(s.as_bytes())?;
    Ok(())
}

/// Reads one length-prefixed string using the default size bound.
pub fn read_string<R: Read + ?Sized>(input: &mut R) -> Result<String> {
    read_string_bounded(input, DEFAULT_MAX_RECORD_BYTES)
}

/// Reads one length-prefixed string of at most `max_len` bytes.
///
/// A negative or oversized prefix and a non-UTF-8 payload are reported as
/// `PersistError::MalformedRecord`. Source failures, including EOF inside
/// the prefix or payload, are reported as `PersistError::Io`.
pub fn read_string_bounded<R: Read + ?Sized>(input: &mut R, max_len: usize) -> Result<String> {
    let mut prefix = [0u8; LENGTH_PREFIX_BYTES];
    input.read_exact(&mut prefix)?;
    let len = i32::from_be_bytes(prefix);
    if len < 0 {
        return Err(PersistError::MalformedRecord(format!(
            "negative length prefix {}",
            len
        )));
    }
    let len = len as usize;
    if len > max_len {
        return Err(PersistError::MalformedRecord(format!(
            "length prefix {} exceeds limit {}",
            len, max_len
        )));
    }

    let mut buf = vec![0u8; len];
    input.read_exact(&mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| PersistError::MalformedRecord(format!("payload is not UTF-8: {}", e)))
}
