//! Catalog schema-change records for the durable change log.
//!
//! Provides the column and index value types, the length-prefixed
//! text encoding used by the log, and the `SchemaChangeRecord` that
//! captures an add/drop columns operation on a table.

pub mod catalog;
pub mod config;
pub mod error;
pub mod persistence;

pub use catalog::{AggregationType, Column, Index, IndexType};
pub use error::{PersistError, Result};
pub use persistence::{SchemaChangeRecord, Writable};
