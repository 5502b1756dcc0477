//! Non-fatal findings recorded while generating.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

/// A fallback or skip decision taken during generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A scalar identifier is not present in the backend's type table.
    UnknownBaseType {
        /// The catalog type identifier.
        format: String,
    },
    /// A composite attribute references a type id absent from the snapshot.
    UnresolvedTypeReference {
        /// The missing type id.
        type_id: u32,
        /// Composite the attribute belongs to (`schema.name`).
        composite: String,
        /// Attribute name.
        attribute: String,
    },
    /// A referenced enum or composite lives in a schema that is not emitted.
    ExcludedTypeReference {
        /// Schema of the referenced type.
        schema: String,
        /// Name of the referenced type.
        name: String,
    },
    /// A column references a relation id absent from the snapshot.
    OrphanColumn {
        /// The unknown relation id.
        table_id: u32,
        /// Column name.
        column: String,
    },
    /// Two relations share an id; only the first is kept.
    DuplicateRelation {
        /// The duplicated id.
        id: u32,
        /// Name of the dropped relation.
        name: String,
    },
    /// Two types share an id; only the first is kept.
    DuplicateType {
        /// The duplicated id.
        id: u32,
        /// Name of the dropped type.
        name: String,
    },
    /// A type defines both enum labels and attributes; it is treated as an enum.
    AmbiguousType {
        /// Type id.
        id: u32,
        /// Type name.
        name: String,
    },
    /// A relation or type belongs to a schema missing from the schema list.
    UndeclaredSchema {
        /// The schema name.
        schema: String,
    },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnknownBaseType { format } => {
                write!(f, "unknown type '{}' mapped to the backend's any type", format)
            }
            Warning::UnresolvedTypeReference {
                type_id,
                composite,
                attribute,
            } => write!(
                f,
                "attribute '{}' of '{}' references missing type id {}",
                attribute, composite, type_id
            ),
            Warning::ExcludedTypeReference { schema, name } => write!(
                f,
                "type '{}.{}' is referenced but its schema is not emitted",
                schema, name
            ),
            Warning::OrphanColumn { table_id, column } => write!(
                f,
                "column '{}' references unknown relation id {}",
                column, table_id
            ),
            Warning::DuplicateRelation { id, name } => {
                write!(f, "relation '{}' reuses id {} and was skipped", name, id)
            }
            Warning::DuplicateType { id, name } => {
                write!(f, "type '{}' reuses id {} and was skipped", name, id)
            }
            Warning::AmbiguousType { id, name } => write!(
                f,
                "type '{}' ({}) has both enum labels and attributes; treated as enum",
                name, id
            ),
            Warning::UndeclaredSchema { schema } => {
                write!(f, "schema '{}' is not declared in the snapshot", schema)
            }
        }
    }
}

/// Per-call collector of warnings.
///
/// Repeated identical warnings are recorded once, in order of first occurrence.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
    seen: HashSet<Warning>,
}

impl Diagnostics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn push(&mut self, warning: Warning) {
        if !self.seen.insert(warning.clone()) {
            return;
        }
        match &warning {
            Warning::UnknownBaseType { .. } | Warning::ExcludedTypeReference { .. } => {
                debug!(%warning, "type fallback");
            }
            _ => warn!(%warning, "metadata skipped or degraded"),
        }
        self.warnings.push(warning);
    }

    /// Record several warnings.
    pub fn extend(&mut self, warnings: impl IntoIterator<Item = Warning>) {
        for warning in warnings {
            self.push(warning);
        }
    }

    /// Recorded warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Consume the collector.
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
