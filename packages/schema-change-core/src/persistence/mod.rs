//! Change-log encoding: the length-prefixed text primitive, the
//! `Writable` protocol, and the schema-change record.


mod schema_change;
pub mod text;

use std::io::{Read, Write};

use crate::config::PersistConfig;
use crate::error::Result;

pub use schema_change::SchemaChangeRecord;

/// A value that can be appended to and replayed from the change log.
pub trait Writable: Sized {
    /// Writes the value to the sink as a single log entry.
    ///
    /// # Arguments
    /// * `out` - Open output sink
    ///
    /// # Returns
    /// `Result<()>`; sink failures surface as `PersistError::Io`.
    fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()>;

    /// Reads one log entry, rejecting payloads larger than
    /// `config.max_record_bytes`.
    fn read_with_config<R: Read + ?Sized>(input: &mut R, config: &PersistConfig) -> Result<Self>;

    /// Reads one log entry with the default configuration.
    fn read<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        Self::read_with_config(input, &PersistConfig::default())
    }
}
