//! Column definition within a table-index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Aggregation applied to a value column in aggregate-key tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregationType {
    Sum,
    Max,
    Min,
    Replace,
    ReplaceIfNotNull,
    None,
}

impl fmt::Display for AggregationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregationType::Sum => "SUM",
            AggregationType::Max => "MAX",
            AggregationType::Min => "MIN",
            AggregationType::Replace => "REPLACE",
            AggregationType::ReplaceIfNotNull => "REPLACE_IF_NOT_NULL",
            AggregationType::None => "NONE",
        };
        f.write_str(name)
    }
}

/// Column definition as persisted in the catalog.
///
/// Position within the owning sequence defines physical column order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name
    pub name: String,
    /// Type descriptor (e.g., "INT", "VARCHAR(32)")
    pub r#type: String,
    /// Part of the key columns
    #[serde(default)]
    pub is_key: bool,
    /// Nullable column
    #[serde(default)]
    pub is_allow_null: bool,
    /// Aggregation for value columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_type: Option<AggregationType>,
    /// Literal default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Free-form comment
    #[serde(default)]
    pub comment: String,
    /// Stable column id, -1 when unassigned
    #[serde(default = "default_unique_id")]
    pub unique_id: i32,
}

fn default_unique_id() -> i32 {
    -1
}

impl Column {
    /// Creates a nullable, non-key column with no default.
    ///
    /// # Arguments
    /// * `name` - Column name
    /// * `type_desc` - Type descriptor
    pub fn new(name: impl Into<String>, type_desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r#type: type_desc.into(),
            is_key: false,
            is_allow_null: true,
            aggregation_type: None,
            default_value: None,
            comment: String::new(),
            unique_id: default_unique_id(),
        }
    }

    /// Marks the column as a key column. Key columns are never nullable.
    pub fn with_key(mut self) -> Self {
        self.is_key = true;
        self.is_allow_null = false;
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.is_allow_null = nullable;
        self
    }

    pub fn with_aggregation(mut self, aggregation: AggregationType) -> Self {
        self.aggregation_type = Some(aggregation);
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_unique_id(mut self, unique_id: i32) -> Self {
        self.unique_id = unique_id;
        self
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.r#type)?;
        if self.is_key {
            f.write_str(" KEY")?;
        }
        if let Some(aggregation) = self.aggregation_type {
            write!(f, " {}", aggregation)?;
        }
        f.write_str(if self.is_allow_null { " NULL" } else { " NOT NULL" })?;
        if let Some(value) = &self.default_value {
            write!(f, " DEFAULT \"{}\"", value)?;
        }
        if !self.comment.is_empty() {
            write!(f, " COMMENT \"{}\"", self.comment)?;
        }
        Ok(())
    }
}
