//! Relation definitions (tables, views, materialized views, foreign tables).

use super::column::Operation;
use serde::{Deserialize, Serialize};

/// Kind of a relation.
///
/// Only plain tables accept writes; every other kind is emitted read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Ordinary table.
    Table,
    /// View.
    View,
    /// Materialized view.
    MaterializedView,
    /// Foreign table.
    ForeignTable,
}

/// A relation owning zero or more columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDef {
    /// Catalog object id, referenced by `ColumnDef::table_id`.
    pub id: u32,
    /// Owning schema name.
    pub schema: String,
    /// Relation name.
    pub name: String,
}

impl RelationKind {
    /// Check if this relation kind only supports reads.
    pub fn is_read_only(&self) -> bool {
        !matches!(self, RelationKind::Table)
    }

    /// Operations emitted for this relation kind, in emission order.
    pub fn operations(&self) -> &'static [Operation] {
        if self.is_read_only() {
            &[Operation::Select]
        } else {
            &Operation::ALL
        }
    }
}

impl RelationDef {
    /// Create a new relation definition.
    pub fn new(id: u32, schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            schema: schema.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_operations() {
        assert!(!RelationKind::Table.is_read_only());
        assert_eq!(
            RelationKind::Table.operations(),
            &[Operation::Select, Operation::Insert, Operation::Update]
        );
    }

    #[test]
    fn test_read_only_operations() {
        for kind in [
            RelationKind::View,
            RelationKind::MaterializedView,
            RelationKind::ForeignTable,
        ] {
            assert!(kind.is_read_only());
            assert_eq!(kind.operations(), &[Operation::Select]);
        }
    }
}
