//! Catalog snapshot model.
//!
//! The catalog model is the immutable input of a generation call: schemas,
//! relations, columns and types exactly as the introspection layer reports them.

mod column;
mod metadata;
mod relation;
mod schema;
mod types;

pub use column::{ColumnDef, Operation};
pub use metadata::GeneratorMetadata;
pub use relation::{RelationDef, RelationKind};
pub use schema::SchemaDef;
pub use types::{TypeAttribute, TypeDef, TypeKind};
