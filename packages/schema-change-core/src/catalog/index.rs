//! Secondary index definition.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexType {
    #[serde(rename = "BITMAP")]
    Bitmap,
    #[serde(rename = "INVERTED")]
    Inverted,
    #[serde(rename = "BLOOMFILTER")]
    BloomFilter,
    #[serde(rename = "NGRAM_BF")]
    NgramBloomFilter,
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexType::Bitmap => "BITMAP",
            IndexType::Inverted => "INVERTED",
            IndexType::BloomFilter => "BLOOMFILTER",
            IndexType::NgramBloomFilter => "NGRAM_BF",
        };
        f.write_str(name)
    }
}

/// Secondary index over one or more columns of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    /// Index id
    pub index_id: i64,
    /// Index name, unique within a table
    pub index_name: String,
    /// Indexed column names, in order
    pub columns: Vec<String>,
    /// Index kind
    pub index_type: IndexType,
    /// Index-specific properties (e.g., parser settings)
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Free-form comment
    #[serde(default)]
    pub comment: String,
}

impl Index {
    /// Creates an index with no properties and an empty comment.
    ///
    /// # Arguments
    /// * `index_id` - Index id
    /// * `index_name` - Index name
    /// * `columns` - Indexed column names
    /// * `index_type` - Index kind
    pub fn new(
        index_id: i64,
        index_name: impl Into<String>,
        columns: Vec<String>,
        index_type: IndexType,
    ) -> Self {
        Self {
            index_id,
            index_name: index_name.into(),
            columns,
            index_type,
            properties: BTreeMap::new(),
            comment: String::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) USING {}",
            self.index_name,
            self.columns.join(", "),
            self.index_type
        )?;
        if !self.properties.is_empty() {
            let props: Vec<String> = self
                .properties
                .iter()
                .map(|(k, v)| format!("\"{}\" = \"{}\"", k, v))
                .collect();
            write!(f, " PROPERTIES ({})", props.join(", "))?;
        }
        Ok(())
    }
}
