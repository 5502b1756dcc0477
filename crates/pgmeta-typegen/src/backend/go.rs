//! Go emitter: flat `package database` with tagged structs.

use super::{Backend, BackendKind, CodeWriter};
use crate::catalog::Operation;
use crate::model::{DeclKind, DeclPath, EnumDecl, GeneratedModule, StructDecl};
use crate::naming::{quote, to_type_name, FieldCase, KeywordEscape, NamingConvention, GO_KEYWORDS};
use crate::options::GeneratorOptions;
use crate::resolve::TargetType;
use crate::scalar::ScalarType;

const NAMING: NamingConvention = NamingConvention {
    field_case: FieldCase::Pascal,
    keywords: GO_KEYWORDS,
    escape: KeywordEscape::TrailingUnderscore,
    digit_prefix: "X",
    placeholder: "Field",
};

const ANY: &str = "interface{}";

/// Emits Go struct declarations.
#[derive(Debug, Clone, Copy)]
pub struct GoBackend {
    naming: NamingConvention,
}

impl GoBackend {
    /// Create the backend.
    pub fn new() -> Self {
        Self { naming: NAMING }
    }

    fn enum_decl(&self, w: &mut CodeWriter, decl: &EnumDecl) {
        w.line(format!("type {} string", decl.name));
        if decl.variants.is_empty() {
            return;
        }
        w.blank();
        let width = decl.variants.iter().map(|v| v.name.len()).max().unwrap_or(0);
        w.block("const (", ")", |w| {
            for variant in &decl.variants {
                w.line(format!(
                    "{:<width$} {} = {}",
                    variant.name,
                    decl.name,
                    quote(&variant.value),
                    width = width
                ));
            }
        });
    }

    fn struct_decl(&self, w: &mut CodeWriter, decl: &StructDecl) {
        let omit_empty = matches!(
            decl.operation(),
            Some(Operation::Insert) | Some(Operation::Update)
        );
        let rows: Vec<(String, String, String)> = decl
            .fields
            .iter()
            .map(|field| {
                let omit = omit_empty && field.optional;
                (
                    field.name.clone(),
                    self.render_type(&field.effective_type()),
                    json_tag(&field.raw_name, omit),
                )
            })
            .collect();
        let name_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(0);
        let type_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(0);

        w.block(format!("type {} struct {{", decl.name), "}", |w| {
            for (name, ty, tag) in &rows {
                w.line(format!(
                    "{:<nw$} {:<tw$} {}",
                    name,
                    ty,
                    tag,
                    nw = name_width,
                    tw = type_width
                ));
            }
        });
    }
}

impl Default for GoBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Struct tag mapping a field to its raw column name.
///
/// A bare `json:"-"` tag skips the field, so a column named `-` keeps an empty
/// option list.
fn json_tag(raw: &str, omit_empty: bool) -> String {
    let value = if omit_empty {
        format!("json:{}", quote(&format!("{},omitempty", raw)))
    } else if raw == "-" {
        format!("json:{}", quote("-,"))
    } else {
        format!("json:{}", quote(raw))
    };
    if value.contains('`') {
        quote(&value)
    } else {
        format!("`{}`", value)
    }
}

/// Whether a rendered Go type already admits `nil`.
fn is_nilable(rendered: &str) -> bool {
    rendered == ANY || rendered.starts_with("[]") || rendered.starts_with("map[")
}

impl Backend for GoBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Go
    }

    fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    fn base_type(&self, scalar: ScalarType) -> &'static str {
        match scalar {
            ScalarType::Bool => "bool",
            ScalarType::Int16 => "int16",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Float32 => "float32",
            ScalarType::Float64 | ScalarType::Numeric => "float64",
            ScalarType::Bytes => "[]byte",
            ScalarType::Json | ScalarType::Void => ANY,
            ScalarType::Record => "map[string]interface{}",
            _ => "string",
        }
    }

    fn any_type(&self) -> &'static str {
        ANY
    }

    fn flat_namespace(&self) -> bool {
        true
    }

    fn scoped_variants(&self) -> bool {
        false
    }

    fn schema_name(&self, schema: &str) -> String {
        to_type_name(schema)
    }

    fn enum_type_name(&self, schema: &str, name: &str) -> String {
        to_type_name(&format!("{}_{}", schema, name))
    }

    fn composite_type_name(&self, schema: &str, name: &str) -> String {
        to_type_name(&format!("{}_{}", schema, name))
    }

    fn relation_type_name(&self, schema: &str, relation: &str, operation: Operation) -> String {
        to_type_name(&format!("{}_{}_{}", schema, relation, operation))
    }

    fn variant_name(&self, enum_name: &str, label: &str) -> String {
        let label = FieldCase::Pascal.apply(label);
        if label.is_empty() {
            format!("{}Value", enum_name)
        } else {
            format!("{}{}", enum_name, label)
        }
    }

    fn type_reference(&self, _kind: DeclKind, path: &DeclPath<'_>) -> String {
        path.name.to_string()
    }

    fn render_type(&self, ty: &TargetType) -> String {
        match ty {
            TargetType::Simple(name) => name.clone(),
            TargetType::List(inner) => format!("[]{}", self.render_type(inner)),
            TargetType::Optional(inner) => {
                let rendered = self.render_type(inner);
                if is_nilable(&rendered) {
                    rendered
                } else {
                    format!("*{}", rendered)
                }
            }
        }
    }

    fn render(&self, module: &GeneratedModule, _options: &GeneratorOptions) -> String {
        let mut w = CodeWriter::new("\t");
        w.line("package database");
        for schema in &module.schemas {
            for decl in &schema.enums {
                w.blank();
                self.enum_decl(&mut w, decl);
            }
            for decl in &schema.composites {
                w.blank();
                self.struct_decl(&mut w, decl);
            }
            for decl in schema.relations.iter().flat_map(|r| &r.decls) {
                w.blank();
                self.struct_decl(&mut w, decl);
            }
        }
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        ColumnDef, GeneratorMetadata, RelationDef, SchemaDef, TypeAttribute, TypeDef,
    };
    use crate::generate;
    use pretty_assertions::assert_eq;

    fn options() -> GeneratorOptions {
        GeneratorOptions::new(BackendKind::Go)
    }

    #[test]
    fn test_optional_pointers() {
        let backend = GoBackend::new();
        let optional = |ty: TargetType| backend.render_type(&ty.optional());
        assert_eq!(optional(TargetType::simple("int64")), "*int64");
        assert_eq!(optional(TargetType::list(TargetType::simple("string"))), "[]string");
        assert_eq!(optional(TargetType::simple(ANY)), ANY);
        assert_eq!(
            backend.render_type(&TargetType::list(TargetType::simple("string").optional())),
            "[]*string"
        );
    }

    #[test]
    fn test_json_tags() {
        assert_eq!(json_tag("user_id", false), "`json:\"user_id\"`");
        assert_eq!(json_tag("user_id", true), "`json:\"user_id,omitempty\"`");
        assert_eq!(json_tag("a`b", false), r#""json:\"a`b\"""#);
        assert_eq!(json_tag("-", false), "`json:\"-,\"`");
        assert_eq!(json_tag("-", true), "`json:\"-,omitempty\"`");
    }

    #[test]
    fn test_punctuation_only_columns_stay_exported() {
        let metadata = GeneratorMetadata::new()
            .with_schema(SchemaDef::new(1, "public"))
            .with_view(RelationDef::new(10, "public", "marks"))
            .with_column(ColumnDef::new(10, "-", "text"))
            .with_column(ColumnDef::new(10, "__", "text"));

        let expected = "package database

type PublicMarksSelect struct {
\tField  string `json:\"-,\"`
\tField2 string `json:\"__\"`
}
";
        assert_eq!(generate(&metadata, &options()), expected);
    }

    #[test]
    fn test_render_todos() {
        let metadata = GeneratorMetadata::new()
            .with_schema(SchemaDef::new(1, "public"))
            .with_table(RelationDef::new(10, "public", "todos"))
            .with_column(ColumnDef::new(10, "id", "int8").identity())
            .with_column(ColumnDef::new(10, "name", "text").nullable())
            .with_type(TypeDef::enumeration(100, "public", "color", ["red", "green"]));

        let expected = "package database

type PublicColor string

const (
\tPublicColorRed   PublicColor = \"red\"
\tPublicColorGreen PublicColor = \"green\"
)

type PublicTodosSelect struct {
\tId   int64   `json:\"id\"`
\tName *string `json:\"name\"`
}

type PublicTodosInsert struct {
\tId   *int64  `json:\"id,omitempty\"`
\tName *string `json:\"name,omitempty\"`
}

type PublicTodosUpdate struct {
\tId   *int64  `json:\"id,omitempty\"`
\tName *string `json:\"name,omitempty\"`
}
";
        assert_eq!(generate(&metadata, &options()), expected);
    }

    #[test]
    fn test_cyclic_composite_is_referenced() {
        let metadata = GeneratorMetadata::new()
            .with_schema(SchemaDef::new(1, "public"))
            .with_type(TypeDef::scalar(25, "pg_catalog", "text"))
            .with_type(TypeDef::composite(
                101,
                "public",
                "node",
                [TypeAttribute::new("label", 25), TypeAttribute::new("next", 101)],
            ));

        let output = generate(&metadata, &options());
        assert!(output.contains("type PublicNode struct {\n\tLabel *string     `json:\"label\"`\n\tNext  *PublicNode `json:\"next\"`\n}\n"));
    }
}
