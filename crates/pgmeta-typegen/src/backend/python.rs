//! Python emitter: Pydantic models for rows, `TypedDict`s for write payloads.

use super::{Backend, BackendKind, CodeWriter};
use crate::catalog::Operation;
use crate::model::{DeclKind, DeclPath, EnumDecl, Field, GeneratedModule, StructDecl};
use crate::naming::{
    has_words, quote, to_type_name, FieldCase, KeywordEscape, NamingConvention, PYTHON_KEYWORDS,
};
use crate::options::GeneratorOptions;
use crate::resolve::TargetType;
use crate::scalar::ScalarType;

const NAMING: NamingConvention = NamingConvention {
    field_case: FieldCase::Snake,
    keywords: PYTHON_KEYWORDS,
    escape: KeywordEscape::TrailingUnderscore,
    digit_prefix: "field_",
    placeholder: "field",
};

const HEADER: &[&str] = &[
    "from __future__ import annotations",
    "",
    "import datetime",
    "import uuid",
    "from enum import Enum",
    "from typing import Annotated, Any, Dict, List, Optional",
    "",
    "from pydantic import BaseModel, Field",
    "from typing_extensions import NotRequired, TypedDict",
];

/// Emits Python class declarations.
#[derive(Debug, Clone, Copy)]
pub struct PythonBackend {
    naming: NamingConvention,
}

impl PythonBackend {
    /// Create the backend.
    pub fn new() -> Self {
        Self { naming: NAMING }
    }

    /// Write a top-level class, separated from what precedes it by two blank lines.
    fn class(
        &self,
        w: &mut CodeWriter,
        header: String,
        empty: bool,
        body: impl FnOnce(&mut CodeWriter),
    ) {
        w.blank();
        w.blank();
        w.line(header);
        w.indent();
        if empty {
            w.line("pass");
        }
        body(w);
        w.dedent();
    }

    fn enum_decl(&self, w: &mut CodeWriter, decl: &EnumDecl) {
        let header = format!("class {}(str, Enum):", decl.name);
        self.class(w, header, decl.variants.is_empty(), |w| {
            for variant in &decl.variants {
                w.line(format!("{} = {}", variant.name, quote(&variant.value)));
            }
        });
    }

    fn model(&self, w: &mut CodeWriter, decl: &StructDecl) {
        let header = format!("class {}(BaseModel):", decl.name);
        self.class(w, header, decl.fields.is_empty(), |w| {
            for field in &decl.fields {
                w.line(format!(
                    "{}: {} = Field(alias={})",
                    field.name,
                    self.render_type(&field.ty),
                    quote(&field.raw_name)
                ));
            }
        });
    }

    fn typed_dict(&self, w: &mut CodeWriter, decl: &StructDecl) {
        let header = format!("class {}(TypedDict):", decl.name);
        self.class(w, header, decl.fields.is_empty(), |w| {
            for field in &decl.fields {
                w.line(format!("{}: {}", field.name, self.payload_type(field)));
            }
        });
    }

    fn payload_type(&self, field: &Field) -> String {
        let annotated = format!(
            "Annotated[{}, Field(alias={})]",
            self.render_type(&field.ty),
            quote(&field.raw_name)
        );
        if field.optional {
            format!("NotRequired[{}]", annotated)
        } else {
            annotated
        }
    }
}

impl Default for PythonBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for PythonBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Python
    }

    fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    fn base_type(&self, scalar: ScalarType) -> &'static str {
        match scalar {
            ScalarType::Bool => "bool",
            ScalarType::Int16 | ScalarType::Int32 | ScalarType::Int64 => "int",
            s if s.is_numeric() => "float",
            ScalarType::Bytes => "bytes",
            ScalarType::Date => "datetime.date",
            ScalarType::Time => "datetime.time",
            ScalarType::Timestamp => "datetime.datetime",
            ScalarType::Uuid => "uuid.UUID",
            ScalarType::Json => "Any",
            ScalarType::Void => "None",
            ScalarType::Record => "Dict[str, Any]",
            _ => "str",
        }
    }

    fn any_type(&self) -> &'static str {
        "Any"
    }

    fn flat_namespace(&self) -> bool {
        true
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
        match operation {
            Operation::Select => to_type_name(&format!("{}_{}", schema, relation)),
            _ => to_type_name(&format!("{}_{}_{}", schema, relation, operation)),
        }
    }

    fn variant_name(&self, _enum_name: &str, label: &str) -> String {
        if !has_words(label) {
            return "VALUE".to_string();
        }
        let name = FieldCase::UpperSnake.apply(label);
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            format!("VALUE_{}", name)
        } else {
            name
        }
    }

    fn type_reference(&self, _kind: DeclKind, path: &DeclPath<'_>) -> String {
        path.name.to_string()
    }

    fn render_type(&self, ty: &TargetType) -> String {
        match ty {
            TargetType::Simple(name) => name.clone(),
            TargetType::List(inner) => format!("List[{}]", self.render_type(inner)),
            TargetType::Optional(inner) => format!("Optional[{}]", self.render_type(inner)),
        }
    }

    fn render(&self, module: &GeneratedModule, _options: &GeneratorOptions) -> String {
        let mut w = CodeWriter::new("    ");
        for line in HEADER {
            w.line(line);
        }
        for schema in &module.schemas {
            for decl in &schema.enums {
                self.enum_decl(&mut w, decl);
            }
            for decl in &schema.composites {
                self.model(&mut w, decl);
            }
            for decl in schema.relations.iter().flat_map(|r| &r.decls) {
                match decl.operation() {
                    Some(Operation::Insert) | Some(Operation::Update) => {
                        self.typed_dict(&mut w, decl)
                    }
                    _ => self.model(&mut w, decl),
                }
            }
        }
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColumnDef, GeneratorMetadata, RelationDef, SchemaDef, TypeDef};
    use crate::generate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_variant_names() {
        let backend = PythonBackend::new();
        assert_eq!(backend.variant_name("PublicColor", "in-progress"), "IN_PROGRESS");
        assert_eq!(backend.variant_name("PublicColor", "1st"), "VALUE_1ST");
        assert_eq!(backend.variant_name("PublicColor", "--"), "VALUE");
    }

    #[test]
    fn test_render_todos() {
        let metadata = GeneratorMetadata::new()
            .with_schema(SchemaDef::new(1, "public"))
            .with_table(RelationDef::new(10, "public", "todos"))
            .with_column(ColumnDef::new(10, "id", "int8").identity())
            .with_column(ColumnDef::new(10, "class", "text").nullable())
            .with_type(TypeDef::enumeration(100, "public", "color", ["red", "dark green"]));

        let expected = r#"from __future__ import annotations

import datetime
import uuid
from enum import Enum
from typing import Annotated, Any, Dict, List, Optional

from pydantic import BaseModel, Field
from typing_extensions import NotRequired, TypedDict


class PublicColor(str, Enum):
    RED = "red"
    DARK_GREEN = "dark green"


class PublicTodos(BaseModel):
    class_: Optional[str] = Field(alias="class")
    id: int = Field(alias="id")


class PublicTodosInsert(TypedDict):
    class_: NotRequired[Annotated[Optional[str], Field(alias="class")]]
    id: NotRequired[Annotated[int, Field(alias="id")]]


class PublicTodosUpdate(TypedDict):
    class_: NotRequired[Annotated[Optional[str], Field(alias="class")]]
    id: NotRequired[Annotated[int, Field(alias="id")]]
"#;
        assert_eq!(
            generate(&metadata, &GeneratorOptions::new(BackendKind::Python)),
            expected
        );
    }

    #[test]
    fn test_punctuation_only_columns_stay_public() {
        let metadata = GeneratorMetadata::new()
            .with_schema(SchemaDef::new(1, "public"))
            .with_table(RelationDef::new(10, "public", "marks"))
            .with_column(ColumnDef::new(10, "-", "text"))
            .with_column(ColumnDef::new(10, "__", "text"));

        let output = generate(&metadata, &GeneratorOptions::new(BackendKind::Python));
        assert!(output.contains(
            "class PublicMarks(BaseModel):\n    field: str = Field(alias=\"-\")\n    field2: str = Field(alias=\"__\")\n"
        ));
        assert!(output.contains("    field2: Annotated[str, Field(alias=\"__\")]\n"));
        assert!(!output.contains("\n    _"));
    }
}
