//! Swift emitter: `Codable` structs nested in one namespace enum per schema.

use std::collections::{HashMap, HashSet};

use super::{Backend, BackendKind, CodeWriter};
use crate::catalog::Operation;
use crate::model::{DeclKind, DeclPath, EnumDecl, GeneratedModule, SchemaDecls, StructDecl};
use crate::naming::{
    has_words, to_type_name, FieldCase, KeywordEscape, NamingConvention, SWIFT_KEYWORDS,
};
use crate::options::GeneratorOptions;
use crate::resolve::TargetType;
use crate::scalar::ScalarType;

const NAMING: NamingConvention = NamingConvention {
    field_case: FieldCase::LowerCamel,
    keywords: SWIFT_KEYWORDS,
    escape: KeywordEscape::Backticks,
    digit_prefix: "_",
    placeholder: "field",
};

const CONFORMANCES: &str = "Codable, Hashable, Sendable";

/// Emits Swift declarations.
#[derive(Debug, Clone, Copy)]
pub struct SwiftBackend {
    naming: NamingConvention,
}

impl SwiftBackend {
    /// Create the backend.
    pub fn new() -> Self {
        Self { naming: NAMING }
    }

    fn schema(
        &self,
        w: &mut CodeWriter,
        schema: &SchemaDecls,
        acl: &str,
        recursive: &HashSet<String>,
    ) {
        if schema.is_empty() {
            w.line(format!("{} enum {} {{}}", acl, schema.name));
            return;
        }
        w.block(format!("{} enum {} {{", acl, schema.name), "}", |w| {
            let structs = schema
                .composites
                .iter()
                .chain(schema.relations.iter().flat_map(|r| &r.decls));
            let mut first = true;
            for decl in &schema.enums {
                if !std::mem::take(&mut first) {
                    w.blank();
                }
                self.enum_decl(w, decl, acl);
            }
            for decl in structs {
                if !std::mem::take(&mut first) {
                    w.blank();
                }
                let is_class = recursive.contains(&format!("{}.{}", schema.name, decl.name));
                self.struct_decl(w, decl, acl, is_class);
            }
        });
    }

    fn enum_decl(&self, w: &mut CodeWriter, decl: &EnumDecl, acl: &str) {
        let open = format!("{} enum {}: String, {} {{", acl, decl.name, CONFORMANCES);
        w.block(open, "}", |w| {
            for variant in &decl.variants {
                w.line(format!("case {} = {}", variant.name, string_literal(&variant.value)));
            }
        });
    }

    fn struct_decl(&self, w: &mut CodeWriter, decl: &StructDecl, acl: &str, is_class: bool) {
        let identifiable = decl.fields.iter().any(|f| f.name == "id");
        let conformances = if identifiable {
            format!("{}, Identifiable", CONFORMANCES)
        } else {
            CONFORMANCES.to_string()
        };
        let keyword = if is_class { "final class" } else { "struct" };
        let open = format!("{} {} {}: {} {{", acl, keyword, decl.name, conformances);
        w.block(open, "}", |w| {
            for field in &decl.fields {
                w.line(format!(
                    "{} let {}: {}",
                    acl,
                    field.name,
                    self.render_type(&field.effective_type())
                ));
            }
            if is_class {
                self.class_members(w, decl, acl);
            }
            if decl.fields.is_empty() {
                return;
            }
            w.blank();
            w.block(format!("{} enum CodingKeys: String, CodingKey {{", acl), "}", |w| {
                for field in &decl.fields {
                    w.line(format!("case {} = {}", field.name, string_literal(&field.raw_name)));
                }
            });
        });
    }

    /// Members a class does not get synthesized: the memberwise init and `Hashable`.
    fn class_members(&self, w: &mut CodeWriter, decl: &StructDecl, acl: &str) {
        let params: Vec<String> = decl
            .fields
            .iter()
            .map(|f| format!("{}: {}", f.name, self.render_type(&f.effective_type())))
            .collect();
        w.blank();
        w.block(format!("{} init({}) {{", acl, params.join(", ")), "}", |w| {
            for field in &decl.fields {
                w.line(format!("self.{0} = {0}", field.name));
            }
        });

        let equal = if decl.fields.is_empty() {
            "true".to_string()
        } else {
            decl.fields
                .iter()
                .map(|f| format!("lhs.{0} == rhs.{0}", f.name))
                .collect::<Vec<_>>()
                .join(" && ")
        };
        w.blank();
        let open = format!("{0} static func == (lhs: {1}, rhs: {1}) -> Bool {{", acl, decl.name);
        w.block(open, "}", |w| {
            w.line(equal);
        });

        w.blank();
        w.block(format!("{} func hash(into hasher: inout Hasher) {{", acl), "}", |w| {
            for field in &decl.fields {
                w.line(format!("hasher.combine({})", field.name));
            }
        });
    }
}

/// Render `value` as a Swift string literal.
fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Reference names of composites that contain themselves through non-array fields.
///
/// Arrays are heap-allocated in Swift; optionals and plain members are stored
/// inline, so such a cycle cannot be a value type.
fn recursive_composites(module: &GeneratedModule, backend: &SwiftBackend) -> HashSet<String> {
    let mut edges: HashMap<String, Vec<&str>> = HashMap::new();
    for schema in &module.schemas {
        for decl in &schema.composites {
            let mut refs = Vec::new();
            for field in &decl.fields {
                inline_references(&field.ty, &mut refs);
            }
            let path = DeclPath {
                schema_raw: &schema.raw_name,
                schema_name: &schema.name,
                raw_name: &decl.raw_name,
                name: &decl.name,
            };
            edges.insert(backend.type_reference(DeclKind::Composite, &path), refs);
        }
    }
    edges
        .keys()
        .filter(|start| reaches_itself(&edges, start.as_str()))
        .cloned()
        .collect()
}

fn inline_references<'t>(ty: &'t TargetType, out: &mut Vec<&'t str>) {
    match ty {
        TargetType::Simple(name) => out.push(name),
        TargetType::Optional(inner) => inline_references(inner, out),
        TargetType::List(_) => {}
    }
}

fn reaches_itself(edges: &HashMap<String, Vec<&str>>, start: &str) -> bool {
    let mut seen = HashSet::new();
    let mut stack: Vec<&str> = edges.get(start).cloned().unwrap_or_default();
    while let Some(next) = stack.pop() {
        if next == start {
            return true;
        }
        if seen.insert(next) {
            if let Some(refs) = edges.get(next) {
                stack.extend(refs.iter().copied());
            }
        }
    }
    false
}

impl Default for SwiftBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SwiftBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Swift
    }

    fn naming(&self) -> &NamingConvention {
        &self.naming
    }

    fn base_type(&self, scalar: ScalarType) -> &'static str {
        match scalar {
            ScalarType::Bool => "Bool",
            ScalarType::Int16 => "Int16",
            ScalarType::Int32 => "Int32",
            ScalarType::Int64 => "Int64",
            ScalarType::Float32 => "Float",
            ScalarType::Float64 => "Double",
            ScalarType::Numeric => "Decimal",
            ScalarType::Uuid => "UUID",
            ScalarType::Json => "AnyJSON",
            ScalarType::Void => "Void",
            ScalarType::Record => "[String: AnyJSON]",
            _ => "String",
        }
    }

    fn any_type(&self) -> &'static str {
        "AnyJSON"
    }

    fn flat_namespace(&self) -> bool {
        false
    }

    fn schema_name(&self, schema: &str) -> String {
        format!("{}Schema", to_type_name(schema))
    }

    fn enum_type_name(&self, _schema: &str, name: &str) -> String {
        to_type_name(name)
    }

    fn composite_type_name(&self, _schema: &str, name: &str) -> String {
        to_type_name(name)
    }

    fn relation_type_name(&self, _schema: &str, relation: &str, operation: Operation) -> String {
        format!("{}{}", to_type_name(relation), operation.suffix())
    }

    fn variant_name(&self, _enum_name: &str, label: &str) -> String {
        if !has_words(label) {
            return "value".to_string();
        }
        self.naming.convert_field(label)
    }

    fn type_reference(&self, _kind: DeclKind, path: &DeclPath<'_>) -> String {
        format!("{}.{}", path.schema_name, path.name)
    }

    fn render_type(&self, ty: &TargetType) -> String {
        match ty {
            TargetType::Simple(name) => name.clone(),
            TargetType::List(inner) => format!("[{}]", self.render_type(inner)),
            TargetType::Optional(inner) => format!("{}?", self.render_type(inner)),
        }
    }

    fn render(&self, module: &GeneratedModule, options: &GeneratorOptions) -> String {
        let acl = options.access_control.keyword();
        let mut w = CodeWriter::new("  ");
        w.line("import Foundation");
        w.line("import Supabase");
        let recursive = recursive_composites(module, self);
        for schema in &module.schemas {
            w.blank();
            self.schema(&mut w, schema, acl, &recursive);
        }
        w.finish()
    }
}
