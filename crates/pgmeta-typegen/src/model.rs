//! Declaration model produced by the builder and consumed by the emitters.
//!
//! Naming and nullability are decided here; emitters only deal with syntax.

use crate::catalog::{Operation, RelationKind};
use crate::resolve::TargetType;

/// Kind of a named type declaration that fields can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// Enum declaration.
    Enum,
    /// Composite declaration.
    Composite,
}

/// Raw and generated names locating one declaration.
#[derive(Debug, Clone, Copy)]
pub struct DeclPath<'a> {
    /// Raw schema name.
    pub schema_raw: &'a str,
    /// Generated schema namespace name.
    pub schema_name: &'a str,
    /// Raw declaration name.
    pub raw_name: &'a str,
    /// Generated declaration name.
    pub name: &'a str,
}

/// One enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    /// Generated identifier.
    pub name: String,
    /// Serialized value, always the raw catalog label.
    pub value: String,
}

/// An enum declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    /// Catalog type id.
    pub id: u32,
    /// Raw type name.
    pub raw_name: String,
    /// Generated type name.
    pub name: String,
    /// Variants in catalog order.
    pub variants: Vec<EnumVariant>,
}

/// A field of a struct-like declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Generated field name.
    pub name: String,
    /// Raw column or attribute name, used as the serialization name.
    pub raw_name: String,
    /// Resolved type; `Optional` when the underlying value is nullable.
    pub ty: TargetType,
    /// Whether the field may be omitted in this declaration.
    pub optional: bool,
}

/// Where a struct-like declaration comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclOrigin {
    /// One operation of a relation.
    Relation {
        /// Relation kind.
        kind: RelationKind,
        /// Operation.
        operation: Operation,
    },
    /// A composite type.
    Composite,
}

/// A struct-like declaration (relation operation or composite type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    /// Raw relation or type name.
    pub raw_name: String,
    /// Generated type name.
    pub name: String,
    /// Origin of the declaration.
    pub origin: DeclOrigin,
    /// Fields in emission order.
    pub fields: Vec<Field>,
}

/// All declarations generated for one relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDecls {
    /// Relation id.
    pub id: u32,
    /// Raw relation name.
    pub raw_name: String,
    /// Relation kind.
    pub kind: RelationKind,
    /// One declaration per operation, in `Select, Insert, Update` order.
    pub decls: Vec<StructDecl>,
}

/// All declarations of one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDecls {
    /// Raw schema name.
    pub raw_name: String,
    /// Generated namespace name.
    pub name: String,
    /// Enums, sorted by name.
    pub enums: Vec<EnumDecl>,
    /// Composite types, sorted by name.
    pub composites: Vec<StructDecl>,
    /// Relations, sorted by name.
    pub relations: Vec<RelationDecls>,
}

/// Everything one generation call emits, schemas sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Schemas in emission order.
    pub schemas: Vec<SchemaDecls>,
}

impl Field {
    /// The field type with operation optionality folded in.
    ///
    /// Backends without a separate "may be omitted" marker use this.
    pub fn effective_type(&self) -> TargetType {
        if self.optional {
            self.ty.clone().optional()
        } else {
            self.ty.clone()
        }
    }
}

impl StructDecl {
    /// Operation of a relation declaration.
    pub fn operation(&self) -> Option<Operation> {
        match self.origin {
            DeclOrigin::Relation { operation, .. } => Some(operation),
            DeclOrigin::Composite => None,
        }
    }

    /// Get a field by raw name.
    pub fn field(&self, raw_name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.raw_name == raw_name)
    }
}

impl RelationDecls {
    /// Get the declaration for an operation.
    pub fn decl(&self, operation: Operation) -> Option<&StructDecl> {
        self.decls
            .iter()
            .find(|d| d.operation() == Some(operation))
    }
}

impl SchemaDecls {
    /// Get an enum by raw name.
    pub fn enum_decl(&self, raw_name: &str) -> Option<&EnumDecl> {
        self.enums.iter().find(|e| e.raw_name == raw_name)
    }

    /// Get a composite by raw name.
    pub fn composite(&self, raw_name: &str) -> Option<&StructDecl> {
        self.composites.iter().find(|c| c.raw_name == raw_name)
    }

    /// Get a relation by raw name.
    pub fn relation(&self, raw_name: &str) -> Option<&RelationDecls> {
        self.relations.iter().find(|r| r.raw_name == raw_name)
    }

    /// Check if the schema has nothing to emit.
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.composites.is_empty() && self.relations.is_empty()
    }
}

impl GeneratedModule {
    /// Get a schema by raw name.
    pub fn schema(&self, raw_name: &str) -> Option<&SchemaDecls> {
        self.schemas.iter().find(|s| s.raw_name == raw_name)
    }

    /// Total number of emitted declarations.
    pub fn declaration_count(&self) -> usize {
        self.schemas
            .iter()
            .map(|s| {
                s.enums.len()
                    + s.composites.len()
                    + s.relations.iter().map(|r| r.decls.len()).sum::<usize>()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(optional: bool, ty: TargetType) -> Field {
        Field {
            name: "name".into(),
            raw_name: "name".into(),
            ty,
            optional,
        }
    }

    #[test]
    fn test_effective_type() {
        let text = TargetType::simple("string");
        assert_eq!(field(false, text.clone()).effective_type(), text);
        assert_eq!(
            field(true, text.clone()).effective_type(),
            text.clone().optional()
        );
        assert_eq!(
            field(true, text.clone().optional()).effective_type(),
            text.optional()
        );
    }

    #[test]
    fn test_relation_lookup_by_operation() {
        let decl = |operation: Operation| StructDecl {
            raw_name: "todos".into(),
            name: format!("Todos{}", operation.suffix()),
            origin: DeclOrigin::Relation {
                kind: RelationKind::Table,
                operation,
            },
            fields: Vec::new(),
        };
        let relation = RelationDecls {
            id: 1,
            raw_name: "todos".into(),
            kind: RelationKind::Table,
            decls: Operation::ALL.iter().copied().map(decl).collect(),
        };
        assert_eq!(relation.decl(Operation::Insert).unwrap().name, "TodosInsert");
        assert!(relation.decl(Operation::Update).is_some());
    }
}
