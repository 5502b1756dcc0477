//! Type generation endpoints.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use pgmeta_typegen::{generate_with_diagnostics, BackendKind, Generated};
use tracing::info;

use crate::error::AppError;
use crate::json::{DiagnosticsResponse, GenerateRequest, GeneratorsResponse};
use crate::AppState;

/// Generator routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generators", get(handle_list))
        .route("/generators/:backend", post(handle_generate))
        .route("/generators/:backend/diagnostics", post(handle_diagnostics))
}

/// List the available backends.
async fn handle_list() -> Json<GeneratorsResponse> {
    Json(GeneratorsResponse {
        generators: BackendKind::ALL.iter().map(BackendKind::as_str).collect(),
    })
}

/// Generate source text.
async fn handle_generate(
    State(state): State<AppState>,
    Path(backend): Path<String>,
    body: Bytes,
) -> Result<Response, AppError> {
    let generated = run(&state, &backend, &body).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        generated.output,
    )
        .into_response())
}

/// Generate source text and report fallback decisions.
async fn handle_diagnostics(
    State(state): State<AppState>,
    Path(backend): Path<String>,
    body: Bytes,
) -> Result<Json<DiagnosticsResponse>, AppError> {
    let generated = run(&state, &backend, &body).await?;
    Ok(Json(DiagnosticsResponse {
        output: generated.output,
        warnings: generated.warnings.iter().map(ToString::to_string).collect(),
    }))
}

async fn run(state: &AppState, backend: &str, body: &[u8]) -> Result<Generated, AppError> {
    let backend: BackendKind = backend.parse()?;
    let request: GenerateRequest = serde_json::from_slice(body)?;
    let (metadata, options) = request.into_parts(backend, &state.config);

    // Generation is CPU-bound.
    let generated =
        tokio::task::spawn_blocking(move || generate_with_diagnostics(&metadata, &options))
            .await?;

    info!(
        backend = %backend,
        bytes = generated.output.len(),
        warnings = generated.warnings.len(),
        "Generated types"
    );
    Ok(generated)
}
