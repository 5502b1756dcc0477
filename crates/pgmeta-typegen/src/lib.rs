//! Postgres Metadata Type Generator
//!
//! This crate compiles a snapshot of relational-database metadata (schemas,
//! tables, views, columns, enum and composite types) into type declarations
//! for several target languages.
//!
//! Generation is a pure function of its inputs: the same snapshot and options
//! always produce byte-identical output, and malformed entities degrade to the
//! backend's "any" type with a warning instead of failing the call.
//!
//! # Backends
//!
//! | Name | Output |
//! |---|---|
//! | `typescript` (`ts`) | one `Database` object type of type aliases and unions |
//! | `go` | `package database` with JSON-tagged structs |
//! | `swift` | `Codable` structs nested in per-schema namespaces |
//! | `python` (`py`) | Pydantic models and `TypedDict` write payloads |
//!
//! # Usage
//!
//! ```rust
//! use pgmeta_typegen::{generate, BackendKind, ColumnDef, GeneratorMetadata, GeneratorOptions,
//!     RelationDef, SchemaDef};
//!
//! let metadata = GeneratorMetadata::new()
//!     .with_schema(SchemaDef::new(1, "public"))
//!     .with_table(RelationDef::new(10, "public", "todos"))
//!     .with_column(ColumnDef::new(10, "id", "int8").identity())
//!     .with_column(ColumnDef::new(10, "name", "text").nullable());
//!
//! let source = generate(&metadata, &GeneratorOptions::new(BackendKind::Go));
//! assert!(source.contains("type PublicTodosInsert struct {"));
//! ```

pub mod backend;
pub mod builder;
pub mod catalog;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod naming;
pub mod options;
pub mod resolve;
pub mod scalar;

// Re-export main types
pub use backend::{create_backend, Backend, BackendKind};
pub use builder::ModuleBuilder;
pub use catalog::{
    ColumnDef, GeneratorMetadata, Operation, RelationDef, RelationKind, SchemaDef, TypeAttribute,
    TypeDef, TypeKind,
};
pub use context::MetadataContext;
pub use diagnostics::{Diagnostics, Warning};
pub use error::{Error, Result};
pub use model::GeneratedModule;
pub use options::{AccessControl, GeneratorOptions};
pub use resolve::TargetType;

use serde::Serialize;
use tracing::debug;

/// Output of one generation call together with its fallback decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generated {
    /// Generated source text.
    pub output: String,
    /// Warnings in order of first occurrence.
    pub warnings: Vec<Warning>,
}

/// Generate source text for `options.backend`.
///
/// # Example
///
/// ```rust
/// use pgmeta_typegen::{generate, GeneratorMetadata, GeneratorOptions};
///
/// let source = generate(&GeneratorMetadata::new(), &GeneratorOptions::default());
/// assert!(source.contains("export type Database = {}"));
/// ```
pub fn generate(metadata: &GeneratorMetadata, options: &GeneratorOptions) -> String {
    generate_with_diagnostics(metadata, options).output
}

/// Generate source text and report every fallback decision taken.
pub fn generate_with_diagnostics(
    metadata: &GeneratorMetadata,
    options: &GeneratorOptions,
) -> Generated {
    let ctx = MetadataContext::new(metadata);
    let mut diagnostics = Diagnostics::new();
    diagnostics.extend(ctx.warnings().iter().cloned());

    let backend = create_backend(options.backend);
    let module = ModuleBuilder::new(&ctx, backend.as_ref(), options).build(&mut diagnostics);
    let output = backend.render(&module, options);

    debug!(
        backend = %options.backend,
        schemas = module.schemas.len(),
        declarations = module.declaration_count(),
        warnings = diagnostics.warnings().len(),
        "generated types"
    );

    Generated {
        output,
        warnings: diagnostics.into_warnings(),
    }
}

/// Decode a JSON snapshot and generate source text from it.
pub fn generate_from_json(json: &str, options: &GeneratorOptions) -> Result<Generated> {
    let metadata = GeneratorMetadata::from_json(json)?;
    Ok(generate_with_diagnostics(&metadata, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_from_json() {
        let json = r#"{
            "schemas": [{"id": 1, "name": "public"}],
            "tables": [{"id": 10, "schema": "public", "name": "todos"}],
            "columns": [{"table_id": 10, "name": "tags", "format": "_citext", "is_nullable": true}]
        }"#;
        let generated =
            generate_from_json(json, &GeneratorOptions::new(BackendKind::Python)).unwrap();
        assert!(generated
            .output
            .contains("tags: Optional[List[str]] = Field(alias=\"tags\")"));
        assert!(generated.warnings.is_empty());
    }

    #[test]
    fn test_generate_from_invalid_json() {
        let result = generate_from_json("{\"schemas\": 3}", &GeneratorOptions::default());
        assert!(matches!(result, Err(Error::InvalidMetadata(_))));
    }

    #[test]
    fn test_unknown_type_is_reported() {
        let metadata = GeneratorMetadata::new()
            .with_schema(SchemaDef::new(1, "public"))
            .with_table(RelationDef::new(10, "public", "places"))
            .with_column(ColumnDef::new(10, "shape", "geometry"));

        let generated =
            generate_with_diagnostics(&metadata, &GeneratorOptions::new(BackendKind::Swift));
        assert!(generated.output.contains("public let shape: AnyJSON\n"));
        assert_eq!(
            generated.warnings,
            vec![Warning::UnknownBaseType {
                format: "geometry".into()
            }]
        );
    }
}
