//! Target-language emitters.
//!
//! Every backend implements the same [`Backend`] trait; differences are
//! confined to the scalar type table, nullability syntax, declaration syntax
//! and naming convention.

mod go;
mod python;
mod swift;
mod typescript;
mod writer;

pub use go::GoBackend;
pub use python::PythonBackend;
pub use swift::SwiftBackend;
pub use typescript::TypeScriptBackend;
pub use writer::CodeWriter;

use crate::catalog::Operation;
use crate::error::Error;
use crate::model::{DeclKind, DeclPath, GeneratedModule};
use crate::naming::NamingConvention;
use crate::options::GeneratorOptions;
use crate::resolve::TargetType;
use crate::scalar::ScalarType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported target languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    /// TypeScript type aliases and unions.
    #[default]
    #[serde(rename = "typescript", alias = "ts")]
    TypeScript,
    /// Go structs with JSON tags.
    #[serde(rename = "go")]
    Go,
    /// Swift `Codable` structs.
    #[serde(rename = "swift")]
    Swift,
    /// Python Pydantic models.
    #[serde(rename = "python", alias = "py")]
    Python,
}

impl BackendKind {
    /// All backends.
    pub const ALL: [BackendKind; 4] = [
        BackendKind::TypeScript,
        BackendKind::Go,
        BackendKind::Swift,
        BackendKind::Python,
    ];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::TypeScript => "typescript",
            BackendKind::Go => "go",
            BackendKind::Swift => "swift",
            BackendKind::Python => "python",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(BackendKind::TypeScript),
            "go" | "golang" => Ok(BackendKind::Go),
            "swift" => Ok(BackendKind::Swift),
            "python" | "py" => Ok(BackendKind::Python),
            _ => Err(Error::UnknownBackend(s.to_string())),
        }
    }
}

/// A target-language emitter.
pub trait Backend: Send + Sync {
    /// Which backend this is.
    fn kind(&self) -> BackendKind;

    /// Naming rules for fields, types and reserved words.
    fn naming(&self) -> &NamingConvention;

    /// Backend type for a built-in scalar.
    fn base_type(&self, scalar: ScalarType) -> &'static str;

    /// Universal fallback type.
    fn any_type(&self) -> &'static str;

    /// Whether type names from all schemas share one namespace.
    fn flat_namespace(&self) -> bool;

    /// Whether generated type names must be made unique.
    ///
    /// Backends keyed by raw catalog names are collision-free already.
    fn dedupe_type_names(&self) -> bool {
        true
    }

    /// Whether enum variant names live inside their enum (or in the type namespace).
    fn scoped_variants(&self) -> bool {
        true
    }

    /// Candidate namespace name for a schema.
    fn schema_name(&self, schema: &str) -> String;

    /// Candidate type name for an enum.
    fn enum_type_name(&self, schema: &str, name: &str) -> String;

    /// Candidate type name for a composite type.
    fn composite_type_name(&self, schema: &str, name: &str) -> String;

    /// Candidate type name for one operation of a relation.
    fn relation_type_name(&self, schema: &str, relation: &str, operation: Operation) -> String;

    /// Candidate identifier for an enum variant.
    fn variant_name(&self, enum_name: &str, label: &str) -> String;

    /// Expression referencing a declared enum or composite from a field.
    fn type_reference(&self, kind: DeclKind, path: &DeclPath<'_>) -> String;

    /// Render a resolved type.
    fn render_type(&self, ty: &TargetType) -> String;

    /// Render the whole module.
    fn render(&self, module: &GeneratedModule, options: &GeneratorOptions) -> String;
}

/// Create the backend for a kind.
pub fn create_backend(kind: BackendKind) -> Box<dyn Backend> {
    match kind {
        BackendKind::TypeScript => Box::new(TypeScriptBackend::new()),
        BackendKind::Go => Box::new(GoBackend::new()),
        BackendKind::Swift => Box::new(SwiftBackend::new()),
        BackendKind::Python => Box::new(PythonBackend::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_names() {
        assert_eq!("typescript".parse::<BackendKind>().unwrap(), BackendKind::TypeScript);
        assert_eq!("TS".parse::<BackendKind>().unwrap(), BackendKind::TypeScript);
        assert_eq!("go".parse::<BackendKind>().unwrap(), BackendKind::Go);
        assert_eq!("py".parse::<BackendKind>().unwrap(), BackendKind::Python);
        assert!(matches!(
            "cobol".parse::<BackendKind>(),
            Err(Error::UnknownBackend(name)) if name == "cobol"
        ));
    }

    #[test]
    fn test_create_backend_matches_kind() {
        for kind in BackendKind::ALL {
            assert_eq!(create_backend(kind).kind(), kind);
            assert_eq!(kind.as_str().parse::<BackendKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&BackendKind::Swift).unwrap(), "\"swift\"");
        let kind: BackendKind = serde_json::from_str("\"ts\"").unwrap();
        assert_eq!(kind, BackendKind::TypeScript);
    }
}
