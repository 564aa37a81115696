//! Log record for adding or dropping columns on a table.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{Read, Write};

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{Column, Index};
use crate::config::PersistConfig;
use crate::error::Result;

use super::{text, Writable};

/// Base index id recorded by logs that predate cross-cluster replication.
pub const UNKNOWN_BASE_INDEX_ID: i64 = -1;

fn unknown_base_index_id() -> i64 {
    UNKNOWN_BASE_INDEX_ID
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Persisted description of an add/drop columns schema change.
///
/// Immutable once constructed. Equality and hashing cover `db_id`,
/// `table_id`, `index_schema_map`, `indexes` and `job_id` only; the
/// replication fields and the raw statement are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaChangeRecord {
    #[serde(rename = "dbId")]
    db_id: i64,
    #[serde(rename = "tableId")]
    table_id: i64,
    // replication only
    #[serde(rename = "baseIndexId", default = "unknown_base_index_id")]
    base_index_id: i64,
    #[serde(rename = "indexSchemaMap", default, deserialize_with = "null_as_default")]
    index_schema_map: BTreeMap<i64, Vec<Column>>,
    // replication only
    #[serde(rename = "oldIndexSchemaMap", default, deserialize_with = "null_as_default")]
    old_index_schema_map: BTreeMap<i64, Vec<Column>>,
    // replication only
    #[serde(rename = "indexNameToId", default, deserialize_with = "null_as_default")]
    index_name_to_id: BTreeMap<String, i64>,
    #[serde(rename = "indexes", default, deserialize_with = "null_as_default")]
    indexes: Vec<Index>,
    #[serde(rename = "jobId")]
    job_id: i64,
    #[serde(rename = "rawSql", default, deserialize_with = "null_as_default")]
    raw_sql: String,
}

impl SchemaChangeRecord {
    /// Creates a record from the final layout chosen by a schema-change job.
    ///
    /// # Arguments
    /// * `db_id` - Owning database id
    /// * `table_id` - Altered table id
    /// * `base_index_id` - Base table-index id
    /// * `index_schema_map` - Post-change columns per table-index id
    /// * `old_index_schema_map` - Pre-change columns per table-index id
    /// * `index_name_to_id` - Table-index name to id
    /// * `indexes` - Secondary indexes after the change
    /// * `job_id` - Originating schema-change job id
    /// * `raw_sql` - Statement text that triggered the change
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db_id: i64,
        table_id: i64,
        base_index_id: i64,
        index_schema_map: BTreeMap<i64, Vec<Column>>,
        old_index_schema_map: BTreeMap<i64, Vec<Column>>,
        index_name_to_id: BTreeMap<String, i64>,
        indexes: Vec<Index>,
        job_id: i64,
        raw_sql: impl Into<String>,
    ) -> Self {
        Self {
            db_id,
            table_id,
            base_index_id,
            index_schema_map,
            old_index_schema_map,
            index_name_to_id,
            indexes,
            job_id,
            raw_sql: raw_sql.into(),
        }
    }

    pub fn db_id(&self) -> i64 {
        self.db_id
    }

    pub fn table_id(&self) -> i64 {
        self.table_id
    }

    pub fn index_schema_map(&self) -> &BTreeMap<i64, Vec<Column>> {
        &self.index_schema_map
    }

    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    pub fn job_id(&self) -> i64 {
        self.job_id
    }

    pub fn base_index_id(&self) -> i64 {
        self.base_index_id
    }

    pub fn old_index_schema_map(&self) -> &BTreeMap<i64, Vec<Column>> {
        &self.old_index_schema_map
    }

    pub fn index_name_to_id(&self) -> &BTreeMap<String, i64> {
        &self.index_name_to_id
    }

    pub fn raw_sql(&self) -> &str {
        &self.raw_sql
    }

    /// Compares every field, including those ignored by `==`.
    pub fn is_identical(&self, other: &Self) -> bool {
        self == other
            && self.base_index_id == other.base_index_id
            && self.old_index_schema_map == other.old_index_schema_map
            && self.index_name_to_id == other.index_name_to_id
            && self.raw_sql == other.raw_sql
    }

    /// Returns the canonical JSON form, identical to the log payload.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a record from its canonical JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Writable for SchemaChangeRecord {
    fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let json = self.to_json()?;
        text::write_string(out, &json)?;
        tracing::trace!(
            "Wrote schema change record for table {} (job {}, {} bytes)",
            self.table_id,
            self.job_id,
            json.len()
        );
        Ok(())
    }

    fn read_with_config<R: Read + ?Sized>(input: &mut R, config: &PersistConfig) -> Result<Self> {
        let json = text::read_string_bounded(input, config.max_record_bytes)?;
        let record = Self::from_json(&json)?;
        tracing::trace!(
            "Read schema change record for table {} (job {}, {} bytes)",
            record.table_id,
            record.job_id,
            json.len()
        );
        Ok(record)
    }
}

impl PartialEq for SchemaChangeRecord {
    fn eq(&self, other: &Self) -> bool {
        self.db_id == other.db_id
            && self.table_id == other.table_id
            && self.index_schema_map == other.index_schema_map
            && self.indexes == other.indexes
            && self.job_id == other.job_id
    }
}

impl Eq for SchemaChangeRecord {}

impl Hash for SchemaChangeRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.db_id.hash(state);
        self.table_id.hash(state);
        self.index_schema_map.hash(state);
        self.indexes.hash(state);
        self.job_id.hash(state);
    }
}

fn fmt_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}

fn fmt_schema_map(f: &mut fmt::Formatter<'_>, map: &BTreeMap<i64, Vec<Column>>) -> fmt::Result {
    f.write_str("{")?;
    for (i, (index_id, columns)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}=", index_id)?;
        fmt_list(f, columns)?;
    }
    f.write_str("}")
}

/// Human-readable form for logs and debugging. Not a persistence format;
/// use `to_json` or `Writable::write` for that.
impl fmt::Display for SchemaChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dbId: {} tableId: {} indexSchemaMap: ", self.db_id, self.table_id)?;
        fmt_schema_map(f, &self.index_schema_map)?;
        f.write_str(" oldIndexSchemaMap: ")?;
        fmt_schema_map(f, &self.old_index_schema_map)?;
        f.write_str(" indexes: ")?;
        fmt_list(f, &self.indexes)?;
        write!(f, " jobId: {}", self.job_id)
    }
}
