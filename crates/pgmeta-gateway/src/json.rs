//! JSON request and response types for the HTTP gateway.

use pgmeta_typegen::{AccessControl, BackendKind, GeneratorMetadata, GeneratorOptions};
use serde::{Deserialize, Serialize};

use crate::config::GatewayConfig;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Gateway version.
    pub version: String,
}

/// Available generators.
#[derive(Debug, Serialize)]
pub struct GeneratorsResponse {
    /// Canonical backend names.
    pub generators: Vec<&'static str>,
}

/// Generation request body.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Metadata snapshot.
    pub metadata: GeneratorMetadata,
    /// Only these schemas are emitted, when set.
    #[serde(default)]
    pub included_schemas: Option<Vec<String>>,
    /// These schemas are never emitted.
    #[serde(default)]
    pub excluded_schemas: Option<Vec<String>>,
    /// Visibility of emitted declarations.
    #[serde(default)]
    pub access_control: Option<AccessControl>,
}

impl GenerateRequest {
    /// Split into the snapshot and the options for `backend`.
    ///
    /// The gateway's default excluded schemas apply only when the request
    /// names neither list.
    pub fn into_parts(
        self,
        backend: BackendKind,
        config: &GatewayConfig,
    ) -> (GeneratorMetadata, GeneratorOptions) {
        let excluded_schemas = match (&self.included_schemas, self.excluded_schemas) {
            (None, None) if !config.default_excluded_schemas.is_empty() => {
                Some(config.default_excluded_schemas.clone())
            }
            (_, excluded) => excluded,
        };
        let options = GeneratorOptions {
            backend,
            included_schemas: self.included_schemas,
            excluded_schemas,
            access_control: self.access_control.unwrap_or_default(),
        };
        (self.metadata, options)
    }
}

/// Generation result with warnings rendered as text.
#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    /// Generated source text.
    pub output: String,
    /// Fallback decisions taken during generation.
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> GenerateRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_default_exclusions_apply_without_filters() {
        let config = GatewayConfig::default().with_default_excluded_schemas(["auth"]);
        let (_, options) =
            request(r#"{"metadata": {}}"#).into_parts(BackendKind::Go, &config);
        assert_eq!(options.excluded_schemas, Some(vec!["auth".to_string()]));
        assert_eq!(options.backend, BackendKind::Go);
        assert_eq!(options.access_control, AccessControl::Public);
    }

    #[test]
    fn test_request_filters_win() {
        let config = GatewayConfig::default().with_default_excluded_schemas(["auth"]);
        let (_, options) = request(
            r#"{"metadata": {}, "included_schemas": ["public"], "access_control": "private"}"#,
        )
        .into_parts(BackendKind::Swift, &config);
        assert_eq!(options.included_schemas, Some(vec!["public".to_string()]));
        assert_eq!(options.excluded_schemas, None);
        assert_eq!(options.access_control, AccessControl::Private);
    }
}
