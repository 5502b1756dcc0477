//! TypeScript emitter: one `Database` object type keyed by raw catalog names.

use super::{Backend, BackendKind, CodeWriter};
use crate::catalog::{Operation, RelationKind};
use crate::model::{DeclKind, DeclPath, Field, GeneratedModule, RelationDecls, SchemaDecls};
use crate::naming::{quote, FieldCase, KeywordEscape, NamingConvention};
use crate::options::GeneratorOptions;
use crate::resolve::TargetType;
use crate::scalar::ScalarType;

const NAMING: NamingConvention = NamingConvention {
    field_case: FieldCase::Preserve,
    keywords: &[],
    escape: KeywordEscape::Quote,
    digit_prefix: "",
    placeholder: "",
};

const JSON_TYPE: &[&str] = &[
    "| string",
    "| number",
    "| boolean",
    "| null",
    "| { [key: string]: Json | undefined }",
    "| Json[]",
];

/// Emits TypeScript type aliases.
#[derive(Debug, Clone, Copy)]
pub struct TypeScriptBackend {
    naming: NamingConvention,
}

impl TypeScriptBackend {
    /// Create the backend.
    pub fn new() -> Self {
        Self { naming: NAMING }
    }

    fn key(&self, raw: &str) -> String {
        self.naming.escape(raw)
    }

    fn group<T>(
        &self,
        w: &mut CodeWriter,
        name: &str,
        items: &[T],
        mut entry: impl FnMut(&mut CodeWriter, &T),
    ) {
        w.block(format!("{}: {{", name), "}", |w| {
            if items.is_empty() {
                w.line("[_ in never]: never");
            }
            for item in items {
                entry(w, item);
            }
        });
    }

    /// Row shapes express nullability through `| null` alone; `?` marks
    /// keys that may be omitted from a write payload.
    fn object(&self, w: &mut CodeWriter, key: &str, fields: &[Field], omittable: bool) {
        if fields.is_empty() {
            w.line(format!("{}: {{}}", key));
            return;
        }
        w.block(format!("{}: {{", key), "}", |w| {
            for field in fields {
                let marker = if omittable && field.optional { "?" } else { "" };
                w.line(format!("{}{}: {}", field.name, marker, self.render_type(&field.ty)));
            }
        });
    }

    fn relation(&self, w: &mut CodeWriter, relation: &RelationDecls) {
        w.block(format!("{}: {{", self.key(&relation.raw_name)), "}", |w| {
            for decl in &relation.decls {
                let (label, omittable) = match decl.operation() {
                    Some(Operation::Insert) => ("Insert", true),
                    Some(Operation::Update) => ("Update", true),
                    _ => ("Row", false),
                };
                self.object(w, label, &decl.fields, omittable);
            }
        });
    }

    fn schema(&self, w: &mut CodeWriter, schema: &SchemaDecls) {
        let (tables, views): (Vec<&RelationDecls>, Vec<&RelationDecls>) = schema
            .relations
            .iter()
            .partition(|r| matches!(r.kind, RelationKind::Table | RelationKind::ForeignTable));

        w.block(format!("{}: {{", schema.name), "}", |w| {
            self.group(w, "Enums", &schema.enums, |w, decl| {
                let labels: Vec<String> = decl.variants.iter().map(|v| quote(&v.value)).collect();
                let union = if labels.is_empty() {
                    "never".to_string()
                } else {
                    labels.join(" | ")
                };
                w.line(format!("{}: {}", decl.name, union));
            });
            self.group(w, "CompositeTypes", &schema.composites, |w, decl| {
                self.object(w, &decl.name, &decl.fields, false);
            });
            self.group(w, "Tables", &tables, |w, relation| self.relation(w, relation));
            self.group(w, "Views", &views, |w, relation| self.relation(w, relation));
        });
    }
}

impl Default for TypeScriptBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for TypeScriptBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::TypeScript
    }

    fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    fn base_type(&self, scalar: ScalarType) -> &'static str {
        match scalar {
            ScalarType::Bool => "boolean",
            s if s.is_numeric() => "number",
            ScalarType::Json => "Json",
            ScalarType::Void => "undefined",
            ScalarType::Record => "Record<string, unknown>",
            _ => "string",
        }
    }

    fn any_type(&self) -> &'static str {
        "unknown"
    }

    fn flat_namespace(&self) -> bool {
        false
    }

    fn dedupe_type_names(&self) -> bool {
        false
    }

    fn schema_name(&self, schema: &str) -> String {
        schema.to_string()
    }

    fn enum_type_name(&self, _schema: &str, name: &str) -> String {
        name.to_string()
    }

    fn composite_type_name(&self, _schema: &str, name: &str) -> String {
        name.to_string()
    }

    fn relation_type_name(&self, _schema: &str, relation: &str, _operation: Operation) -> String {
        relation.to_string()
    }

    fn variant_name(&self, _enum_name: &str, label: &str) -> String {
        label.to_string()
    }

    fn type_reference(&self, kind: DeclKind, path: &DeclPath<'_>) -> String {
        let group = match kind {
            DeclKind::Enum => "Enums",
            DeclKind::Composite => "CompositeTypes",
        };
        format!(
            "Database[{}][\"{}\"][{}]",
            quote(path.schema_raw),
            group,
            quote(path.raw_name)
        )
    }

    fn render_type(&self, ty: &TargetType) -> String {
        match ty {
            TargetType::Simple(name) => name.clone(),
            TargetType::Optional(inner) => format!("{} | null", self.render_type(inner)),
            TargetType::List(inner) if inner.is_optional() => {
                format!("({})[]", self.render_type(inner))
            }
            TargetType::List(inner) => format!("{}[]", self.render_type(inner)),
        }
    }

    fn render(&self, module: &GeneratedModule, _options: &GeneratorOptions) -> String {
        let mut w = CodeWriter::new("  ");
        w.line("export type Json =");
        w.indent();
        for line in JSON_TYPE {
            w.line(line);
        }
        w.dedent();
        w.blank();

        if module.schemas.is_empty() {
            w.line("export type Database = {}");
            return w.finish();
        }
        w.block("export type Database = {", "}", |w| {
            for schema in &module.schemas {
                self.schema(w, schema);
            }
        });
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColumnDef, GeneratorMetadata, RelationDef, SchemaDef, TypeDef};
    use crate::generate;
    use pretty_assertions::assert_eq;

    fn options() -> GeneratorOptions {
        GeneratorOptions::new(BackendKind::TypeScript)
    }

    #[test]
    fn test_render_types() {
        let backend = TypeScriptBackend::new();
        let nullable_list = TargetType::list(TargetType::simple("string").optional());
        assert_eq!(backend.render_type(&nullable_list), "(string | null)[]");
        let nested = TargetType::list(TargetType::list(TargetType::simple("number"))).optional();
        assert_eq!(backend.render_type(&nested), "number[][] | null");
    }

    #[test]
    fn test_render_todos() {
        let metadata = GeneratorMetadata::new()
            .with_schema(SchemaDef::new(1, "public"))
            .with_table(RelationDef::new(10, "public", "todos"))
            .with_column(ColumnDef::new(10, "id", "int8").identity())
            .with_column(ColumnDef::new(10, "name", "text").nullable())
            .with_type(TypeDef::enumeration(100, "public", "color", ["red", "green"]));

        let expected = r#"export type Json =
  | string
  | number
  | boolean
  | null
  | { [key: string]: Json | undefined }
  | Json[]

export type Database = {
  public: {
    Enums: {
      color: "red" | "green"
    }
    CompositeTypes: {
      [_ in never]: never
    }
    Tables: {
      todos: {
        Row: {
          id: number
          name: string | null
        }
        Insert: {
          id?: number
          name?: string | null
        }
        Update: {
          id?: number
          name?: string | null
        }
      }
    }
    Views: {
      [_ in never]: never
    }
  }
}
"#;
        assert_eq!(generate(&metadata, &options()), expected);
    }

    #[test]
    fn test_references_and_quoted_keys() {
        let metadata = GeneratorMetadata::new()
            .with_schema(SchemaDef::new(1, "public"))
            .with_view(RelationDef::new(10, "public", "open items"))
            .with_column(ColumnDef::new(10, "Status Code", "_color").nullable())
            .with_type(TypeDef::enumeration(100, "public", "color", ["red"]));

        let output = generate(&metadata, &options());
        assert!(output.contains("    Views: {\n      \"open items\": {\n        Row: {\n"));
        assert!(output.contains(
            "\"Status Code\": Database[\"public\"][\"Enums\"][\"color\"][] | null"
        ));
        assert!(!output.contains("Insert"));
    }

    #[test]
    fn test_empty_database() {
        let output = generate(&GeneratorMetadata::new(), &options());
        assert!(output.ends_with("\nexport type Database = {}\n"));
    }

    #[test]
    fn test_relation_kinds_grouped() {
        let metadata = GeneratorMetadata::new()
            .with_schema(SchemaDef::new(1, "public"))
            .with_table(RelationDef::new(10, "public", "local"))
            .with_foreign_table(RelationDef::new(11, "public", "remote"))
            .with_view(RelationDef::new(12, "public", "recent"))
            .with_materialized_view(RelationDef::new(13, "public", "totals"))
            .with_columns([
                ColumnDef::new(10, "id", "int8"),
                ColumnDef::new(11, "id", "int8"),
                ColumnDef::new(12, "id", "int8"),
                ColumnDef::new(13, "sum", "numeric").nullable(),
            ]);

        let expected = r#"    Tables: {
      local: {
        Row: {
          id: number
        }
        Insert: {
          id: number
        }
        Update: {
          id?: number
        }
      }
      remote: {
        Row: {
          id: number
        }
      }
    }
    Views: {
      recent: {
        Row: {
          id: number
        }
      }
      totals: {
        Row: {
          sum: number | null
        }
      }
    }
"#;
        let output = generate(&metadata, &options());
        assert!(output.contains(expected), "{}", output);
    }
}
