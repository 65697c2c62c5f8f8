// Copyright (c) 2025 - Cowboy AI, Inc.
//! Storage Descriptor
//!
//! Storage comes in two categories with different shapes:
//!
//! - **KeyValue**: a collection addressed by a single typed key
//! - **Relational**: ordered tables of primary and regular columns

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{ResourceId, SystemId};
use crate::errors::{GraphError, GraphResult};

/// Storage category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageCategory {
    KeyValue,
    Relational,
}

impl StorageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeyValue => "key_value",
            Self::Relational => "relational",
        }
    }
}

impl fmt::Display for StorageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StorageCategory {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" => Err(GraphError::MissingArgument("storage category")),
            "keyvalue" | "key-value" | "key_value" | "kv" => Ok(Self::KeyValue),
            "relational" | "sql" => Ok(Self::Relational),
            _ => Err(GraphError::InvalidStorageCategory(s.to_string())),
        }
    }
}

/// Column definition (name + engine-specific type)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
}

/// Relational table definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub primaries: Vec<Column>,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primaries: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Append a primary-key column
    pub fn primary(mut self, name: impl Into<String>, column_type: impl Into<String>) -> Self {
        self.primaries.push(Column {
            name: name.into(),
            column_type: column_type.into(),
        });
        self
    }

    /// Append a regular column
    pub fn column(mut self, name: impl Into<String>, column_type: impl Into<String>) -> Self {
        self.columns.push(Column {
            name: name.into(),
            column_type: column_type.into(),
        });
        self
    }
}

/// Key of a key-value collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
}

/// Driver payload for a storage resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub id: ResourceId,
    pub category: StorageCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default)]
    pub key: KeySpec,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<Table>,
}

/// Storage descriptor
///
/// # Examples
///
/// ```rust
/// use cim_resource_graph::domain::{Storage, StorageCategory, Table};
///
/// let users = Storage::new("Users", StorageCategory::Relational)
///     .unwrap()
///     .engine("postgres")
///     .table(Table::new("users").primary("id", "uuid").column("email", "text"));
/// assert_eq!(users.config().tables.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    system_id: SystemId,
    config: StorageConfig,
}

impl Storage {
    pub fn new(id: impl Into<String>, category: StorageCategory) -> GraphResult<Self> {
        Ok(Self {
            system_id: SystemId::generate(),
            config: StorageConfig {
                id: ResourceId::new(id)?,
                category,
                engine: None,
                collection: None,
                key: KeySpec::default(),
                tables: Vec::new(),
            },
        })
    }

    /// Construct from a category name such as `"keyvalue"` or `"relational"`
    ///
    /// The id is validated first, so a bad id wins over a bad category.
    pub fn with_category(id: impl Into<String>, category: &str) -> GraphResult<Self> {
        let id = ResourceId::new(id)?;
        let category = category.parse()?;
        Self::new(id, category)
    }

    /// Driver-specific engine (e.g. `dynamodb`, `postgres`)
    pub fn engine(mut self, name: impl Into<String>) -> Self {
        self.config.engine = Some(name.into());
        self
    }

    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.config.collection = Some(name.into());
        self
    }

    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.config.key.name = Some(name.into());
        self
    }

    pub fn key_type(mut self, key_type: impl Into<String>) -> Self {
        self.config.key.key_type = Some(key_type.into());
        self
    }

    pub fn table(mut self, table: Table) -> Self {
        self.config.tables.push(table);
        self
    }

    pub fn id(&self) -> &ResourceId {
        &self.config.id
    }

    pub fn system_id(&self) -> SystemId {
        self.system_id
    }

    pub fn category(&self) -> StorageCategory {
        self.config.category
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}
