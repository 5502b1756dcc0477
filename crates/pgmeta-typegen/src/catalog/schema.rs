//! Schema definitions.

use serde::{Deserialize, Serialize};

/// A database schema (namespace for relations and types).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDef {
    /// Catalog object id.
    pub id: u32,
    /// Schema name.
    pub name: String,
}

impl SchemaDef {
    /// Create a new schema definition.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
