//! The complete metadata snapshot handed to one generation call.

use super::{ColumnDef, RelationDef, RelationKind, SchemaDef, TypeDef};
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of schema objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorMetadata {
    /// Schemas.
    pub schemas: Vec<SchemaDef>,
    /// Ordinary tables.
    pub tables: Vec<RelationDef>,
    /// Views.
    pub views: Vec<RelationDef>,
    /// Materialized views.
    pub materialized_views: Vec<RelationDef>,
    /// Foreign tables.
    pub foreign_tables: Vec<RelationDef>,
    /// Columns of every relation above.
    pub columns: Vec<ColumnDef>,
    /// Scalar, enum and composite types.
    pub types: Vec<TypeDef>,
}

impl GeneratorMetadata {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(Error::InvalidMetadata)
    }

    /// Add a schema.
    pub fn with_schema(mut self, schema: SchemaDef) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Add a table.
    pub fn with_table(mut self, table: RelationDef) -> Self {
        self.tables.push(table);
        self
    }

    /// Add a view.
    pub fn with_view(mut self, view: RelationDef) -> Self {
        self.views.push(view);
        self
    }

    /// Add a materialized view.
    pub fn with_materialized_view(mut self, view: RelationDef) -> Self {
        self.materialized_views.push(view);
        self
    }

    /// Add a foreign table.
    pub fn with_foreign_table(mut self, table: RelationDef) -> Self {
        self.foreign_tables.push(table);
        self
    }

    /// Add a column.
    pub fn with_column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Add multiple columns.
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = ColumnDef>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Add a type.
    pub fn with_type(mut self, ty: TypeDef) -> Self {
        self.types.push(ty);
        self
    }

    /// Iterate over every relation tagged with its kind.
    pub fn relations(&self) -> impl Iterator<Item = (RelationKind, &RelationDef)> + '_ {
        tagged(RelationKind::Table, &self.tables)
            .chain(tagged(RelationKind::View, &self.views))
            .chain(tagged(RelationKind::MaterializedView, &self.materialized_views))
            .chain(tagged(RelationKind::ForeignTable, &self.foreign_tables))
    }
}

fn tagged(
    kind: RelationKind,
    relations: &[RelationDef],
) -> impl Iterator<Item = (RelationKind, &RelationDef)> + '_ {
    relations.iter().map(move |relation| (kind, relation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_accepts_partial_snapshot() {
        let json = r#"{
            "schemas": [{"id": 1, "name": "public"}],
            "tables": [{"id": 10, "schema": "public", "name": "todos"}],
            "columns": [{"table_id": 10, "name": "id", "format": "int8", "is_identity": true}]
        }"#;
        let metadata = GeneratorMetadata::from_json(json).unwrap();
        assert_eq!(metadata.schemas.len(), 1);
        assert_eq!(metadata.tables.len(), 1);
        assert!(metadata.views.is_empty());
        assert!(metadata.columns[0].is_identity);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = GeneratorMetadata::from_json("{\"schemas\": 3}").unwrap_err();
        assert!(matches!(err, Error::InvalidMetadata(_)));
    }

    #[test]
    fn test_relations_are_tagged() {
        let metadata = GeneratorMetadata::new()
            .with_table(RelationDef::new(1, "public", "a"))
            .with_view(RelationDef::new(2, "public", "b"))
            .with_materialized_view(RelationDef::new(3, "public", "c"))
            .with_foreign_table(RelationDef::new(4, "public", "d"));

        let kinds: Vec<_> = metadata.relations().map(|(kind, _)| kind).collect();
        assert_eq!(
            kinds,
            vec![
                RelationKind::Table,
                RelationKind::View,
                RelationKind::MaterializedView,
                RelationKind::ForeignTable
            ]
        );
    }
}
