//! Catalog value types embedded in schema-change records.

mod column;
mod index;

pub use column::{AggregationType, Column};
pub use index::{Index, IndexType};
