//! Normalized, read-only view over a metadata snapshot.

use crate::catalog::{
    ColumnDef, GeneratorMetadata, RelationDef, RelationKind, SchemaDef, TypeDef, TypeKind,
};
use crate::diagnostics::Warning;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A relation together with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationEntry<'a> {
    /// Relation kind.
    pub kind: RelationKind,
    /// The relation.
    pub relation: &'a RelationDef,
}

/// Lookup structures built once per generation call.
///
/// Nothing here fails: dangling references are recorded as warnings and the
/// offending entity is left out.
#[derive(Debug)]
pub struct MetadataContext<'a> {
    schemas: BTreeMap<&'a str, &'a SchemaDef>,
    types_by_id: HashMap<u32, &'a TypeDef>,
    types_by_name: HashMap<&'a str, Vec<&'a TypeDef>>,
    enums: BTreeMap<&'a str, Vec<&'a TypeDef>>,
    composites: BTreeMap<&'a str, Vec<&'a TypeDef>>,
    relations: BTreeMap<&'a str, Vec<RelationEntry<'a>>>,
    columns: HashMap<u32, Vec<&'a ColumnDef>>,
    warnings: Vec<Warning>,
}

impl<'a> MetadataContext<'a> {
    /// Normalize a snapshot.
    pub fn new(metadata: &'a GeneratorMetadata) -> Self {
        let mut warnings = Vec::new();

        let mut schemas = BTreeMap::new();
        for schema in &metadata.schemas {
            schemas.entry(schema.name.as_str()).or_insert(schema);
        }
        let mut undeclared = BTreeSet::new();

        let mut types_by_id: HashMap<u32, &TypeDef> = HashMap::new();
        for ty in &metadata.types {
            if types_by_id.contains_key(&ty.id) {
                warnings.push(Warning::DuplicateType {
                    id: ty.id,
                    name: ty.name.clone(),
                });
                continue;
            }
            if ty.is_ambiguous() {
                warnings.push(Warning::AmbiguousType {
                    id: ty.id,
                    name: ty.name.clone(),
                });
            }
            types_by_id.insert(ty.id, ty);
        }

        let mut types_by_name: HashMap<&str, Vec<&TypeDef>> = HashMap::new();
        let mut enums: BTreeMap<&str, Vec<&TypeDef>> = BTreeMap::new();
        let mut composites: BTreeMap<&str, Vec<&TypeDef>> = BTreeMap::new();
        for &ty in types_by_id.values() {
            types_by_name.entry(ty.name.as_str()).or_default().push(ty);
            let bucket = match ty.kind() {
                TypeKind::Scalar => continue,
                TypeKind::Enum(_) => &mut enums,
                TypeKind::Composite(_) => &mut composites,
            };
            if !schemas.contains_key(ty.schema.as_str()) {
                undeclared.insert(ty.schema.as_str());
            }
            bucket.entry(ty.schema.as_str()).or_default().push(ty);
        }
        for candidates in types_by_name.values_mut() {
            candidates.sort_by_key(|ty| ty.id);
        }
        for list in enums.values_mut().chain(composites.values_mut()) {
            list.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        }

        let mut relation_ids = HashMap::new();
        let mut relations: BTreeMap<&str, Vec<RelationEntry>> = BTreeMap::new();
        for (kind, relation) in metadata.relations() {
            if relation_ids.insert(relation.id, kind).is_some() {
                warnings.push(Warning::DuplicateRelation {
                    id: relation.id,
                    name: relation.name.clone(),
                });
                continue;
            }
            if !schemas.contains_key(relation.schema.as_str()) {
                undeclared.insert(relation.schema.as_str());
            }
            relations
                .entry(relation.schema.as_str())
                .or_default()
                .push(RelationEntry { kind, relation });
        }
        for list in relations.values_mut() {
            list.sort_by(|a, b| {
                a.relation
                    .name
                    .cmp(&b.relation.name)
                    .then(a.kind.cmp(&b.kind))
                    .then(a.relation.id.cmp(&b.relation.id))
            });
        }

        let mut columns: HashMap<u32, Vec<&ColumnDef>> = HashMap::new();
        for column in &metadata.columns {
            if !relation_ids.contains_key(&column.table_id) {
                warnings.push(Warning::OrphanColumn {
                    table_id: column.table_id,
                    column: column.name.clone(),
                });
                continue;
            }
            columns.entry(column.table_id).or_default().push(column);
        }
        for list in columns.values_mut() {
            list.sort_by(|a, b| {
                a.name
                    .cmp(&b.name)
                    .then(a.ordinal_position.cmp(&b.ordinal_position))
            });
        }

        warnings.extend(undeclared.into_iter().map(|schema| Warning::UndeclaredSchema {
            schema: schema.to_string(),
        }));

        Self {
            schemas,
            types_by_id,
            types_by_name,
            enums,
            composites,
            relations,
            columns,
            warnings,
        }
    }

    /// Declared schema names, ascending.
    pub fn schema_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.schemas.keys().copied()
    }

    /// Look up a schema by name.
    pub fn schema_by_name(&self, name: &str) -> Option<&'a SchemaDef> {
        self.schemas.get(name).copied()
    }

    /// Look up a type by id.
    pub fn type_by_id(&self, id: u32) -> Option<&'a TypeDef> {
        self.types_by_id.get(&id).copied()
    }

    /// Look up a type by name.
    ///
    /// `schema.name` selects that exact type. A bare name prefers the type in
    /// `preferred_schema`, then the lowest id.
    pub fn type_by_name(&self, name: &str, preferred_schema: Option<&str>) -> Option<&'a TypeDef> {
        if let Some((schema, bare)) = name.split_once('.') {
            let qualified = self
                .types_by_name
                .get(bare)
                .and_then(|candidates| candidates.iter().find(|ty| ty.schema == schema))
                .copied();
            if let Some(ty) = qualified {
                return Some(ty);
            }
        }
        let candidates = self.types_by_name.get(name)?;
        preferred_schema
            .and_then(|schema| candidates.iter().find(|ty| ty.schema == schema))
            .or_else(|| candidates.first())
            .copied()
    }

    /// Columns of a relation, sorted by name (byte-wise ascending).
    pub fn columns(&self, relation_id: u32) -> &[&'a ColumnDef] {
        self.columns
            .get(&relation_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Relations of a schema, sorted by name.
    pub fn relations(&self, schema: &str) -> &[RelationEntry<'a>] {
        self.relations.get(schema).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Enum types of a schema, sorted by name.
    pub fn enums(&self, schema: &str) -> &[&'a TypeDef] {
        self.enums.get(schema).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Composite types of a schema, sorted by name.
    pub fn composites(&self, schema: &str) -> &[&'a TypeDef] {
        self.composites.get(schema).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Warnings recorded while normalizing.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColumnDef, RelationDef, SchemaDef, TypeAttribute, TypeDef};

    fn sample() -> GeneratorMetadata {
        GeneratorMetadata::new()
            .with_schema(SchemaDef::new(2, "public"))
            .with_schema(SchemaDef::new(1, "auth"))
            .with_table(RelationDef::new(10, "public", "todos"))
            .with_view(RelationDef::new(11, "public", "active_todos"))
            .with_table(RelationDef::new(12, "auth", "users"))
            .with_columns([
                ColumnDef::new(10, "name", "text").at_position(2),
                ColumnDef::new(10, "id", "int8").at_position(1),
                ColumnDef::new(10, "Zeta", "text").at_position(3),
                ColumnDef::new(11, "id", "int8"),
                ColumnDef::new(99, "ghost", "text"),
            ])
            .with_type(TypeDef::enumeration(200, "public", "status", ["open", "done"]))
            .with_type(TypeDef::enumeration(201, "auth", "status", ["on", "off"]))
            .with_type(TypeDef::composite(
                202,
                "public",
                "address",
                [TypeAttribute::new("street", 25)],
            ))
            .with_type(TypeDef::scalar(25, "pg_catalog", "text"))
    }

    #[test]
    fn test_schema_names_sorted() {
        let metadata = sample();
        let ctx = MetadataContext::new(&metadata);
        let names: Vec<_> = ctx.schema_names().collect();
        assert_eq!(names, vec!["auth", "public"]);
        assert_eq!(ctx.schema_by_name("auth").map(|s| s.id), Some(1));
    }

    #[test]
    fn test_columns_sorted_by_name() {
        let metadata = sample();
        let ctx = MetadataContext::new(&metadata);
        let names: Vec<_> = ctx.columns(10).iter().map(|c| c.name.as_str()).collect();
        // Byte-wise ordering puts uppercase first.
        assert_eq!(names, vec!["Zeta", "id", "name"]);
        assert!(ctx.columns(12).is_empty());
    }

    #[test]
    fn test_orphan_column_is_dropped() {
        let metadata = sample();
        let ctx = MetadataContext::new(&metadata);
        assert!(ctx.warnings().contains(&Warning::OrphanColumn {
            table_id: 99,
            column: "ghost".into(),
        }));
    }

    #[test]
    fn test_relations_sorted_within_schema() {
        let metadata = sample();
        let ctx = MetadataContext::new(&metadata);
        let names: Vec<_> = ctx
            .relations("public")
            .iter()
            .map(|e| (e.relation.name.as_str(), e.kind))
            .collect();
        assert_eq!(
            names,
            vec![("active_todos", RelationKind::View), ("todos", RelationKind::Table)]
        );
    }

    #[test]
    fn test_type_by_name_prefers_schema() {
        let metadata = sample();
        let ctx = MetadataContext::new(&metadata);
        assert_eq!(ctx.type_by_name("status", Some("auth")).map(|t| t.id), Some(201));
        assert_eq!(ctx.type_by_name("status", Some("public")).map(|t| t.id), Some(200));
        assert_eq!(ctx.type_by_name("status", None).map(|t| t.id), Some(200));
        assert_eq!(ctx.type_by_name("auth.status", None).map(|t| t.id), Some(201));
        assert!(ctx.type_by_name("missing", None).is_none());
    }

    #[test]
    fn test_kind_buckets() {
        let metadata = sample();
        let ctx = MetadataContext::new(&metadata);
        assert_eq!(ctx.enums("public").len(), 1);
        assert_eq!(ctx.composites("public").len(), 1);
        assert!(ctx.composites("auth").is_empty());
        assert!(ctx.enums("pg_catalog").is_empty());
    }

    #[test]
    fn test_duplicate_relation_id_keeps_first() {
        let metadata = GeneratorMetadata::new()
            .with_schema(SchemaDef::new(1, "public"))
            .with_table(RelationDef::new(10, "public", "first"))
            .with_view(RelationDef::new(10, "public", "second"));
        let ctx = MetadataContext::new(&metadata);
        assert_eq!(ctx.relations("public").len(), 1);
        assert_eq!(ctx.relations("public")[0].relation.name, "first");
        assert!(matches!(
            ctx.warnings()[0],
            Warning::DuplicateRelation { id: 10, .. }
        ));
    }

    #[test]
    fn test_undeclared_schema_warning() {
        let metadata = GeneratorMetadata::new().with_table(RelationDef::new(1, "ghost", "t"));
        let ctx = MetadataContext::new(&metadata);
        assert!(ctx.warnings().contains(&Warning::UndeclaredSchema {
            schema: "ghost".into()
        }));
    }

    #[test]
    fn test_duplicate_type_id_keeps_first() {
        let metadata = GeneratorMetadata::new()
            .with_schema(SchemaDef::new(1, "public"))
            .with_type(TypeDef::enumeration(100, "public", "mood", ["happy", "sad"]))
            .with_type(TypeDef::enumeration(100, "public", "weather", ["sunny"]));
        let ctx = MetadataContext::new(&metadata);
        assert_eq!(ctx.type_by_id(100).map(|t| t.name.as_str()), Some("mood"));
        assert!(ctx.type_by_name("weather", None).is_none());
        assert_eq!(ctx.enums("public").len(), 1);
        assert_eq!(
            ctx.warnings(),
            &[Warning::DuplicateType {
                id: 100,
                name: "weather".into(),
            }]
        );
    }

    #[test]
    fn test_ambiguous_type_is_an_enum() {
        let mut ambiguous = TypeDef::enumeration(100, "public", "shape", ["round"]);
        ambiguous.attributes.push(TypeAttribute::new("radius", 25));
        let metadata = GeneratorMetadata::new()
            .with_schema(SchemaDef::new(1, "public"))
            .with_type(ambiguous);
        let ctx = MetadataContext::new(&metadata);
        assert_eq!(ctx.enums("public").len(), 1);
        assert!(ctx.composites("public").is_empty());
        assert_eq!(
            ctx.warnings(),
            &[Warning::AmbiguousType {
                id: 100,
                name: "shape".into(),
            }]
        );
    }
}
