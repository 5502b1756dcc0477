//! Generation options.

use crate::backend::BackendKind;
use serde::{Deserialize, Serialize};

/// Visibility applied to emitted declarations, for backends that have one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessControl {
    /// Visible inside the defining module only.
    Internal,
    /// Visible everywhere.
    #[default]
    Public,
    /// Visible inside the enclosing declaration only.
    Private,
    /// Visible inside the defining package.
    Package,
}

impl AccessControl {
    /// The modifier keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            AccessControl::Internal => "internal",
            AccessControl::Public => "public",
            AccessControl::Private => "private",
            AccessControl::Package => "package",
        }
    }
}

/// Options for one generation call. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Target backend.
    pub backend: BackendKind,
    /// Only these schemas are emitted, when set.
    pub included_schemas: Option<Vec<String>>,
    /// These schemas are never emitted. Applied after inclusion.
    pub excluded_schemas: Option<Vec<String>>,
    /// Visibility of emitted declarations.
    pub access_control: AccessControl,
}

impl GeneratorOptions {
    /// Create options for a backend.
    pub fn new(backend: BackendKind) -> Self {
        Self {
            backend,
            ..Self::default()
        }
    }

    /// Restrict generation to the given schemas.
    pub fn with_included_schemas(
        mut self,
        schemas: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.included_schemas = Some(schemas.into_iter().map(Into::into).collect());
        self
    }

    /// Exclude the given schemas.
    pub fn with_excluded_schemas(
        mut self,
        schemas: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.excluded_schemas = Some(schemas.into_iter().map(Into::into).collect());
        self
    }

    /// Set the access control level.
    pub fn with_access_control(mut self, access_control: AccessControl) -> Self {
        self.access_control = access_control;
        self
    }

    /// Whether a schema is traversed.
    pub fn schema_filter(&self, schema: &str) -> bool {
        let included = self
            .included_schemas
            .as_ref()
            .map_or(true, |list| list.iter().any(|s| s == schema));
        let excluded = self
            .excluded_schemas
            .as_ref()
            .is_some_and(|list| list.iter().any(|s| s == schema));
        included && !excluded
    }
}
