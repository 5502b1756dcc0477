//! Error types.

use thiserror::Error;

/// Errors surfaced by the generator's public API.
///
/// Generation itself is fail-soft and never returns an error; these cover
/// contract violations at the edges (malformed snapshots, unknown backends).
#[derive(Debug, Error)]
pub enum Error {
    /// The metadata snapshot could not be decoded.
    #[error("invalid metadata: {0}")]
    InvalidMetadata(#[source] serde_json::Error),

    /// No backend is registered under the requested name.
    #[error("unknown backend '{0}'")]
    UnknownBackend(String),
}

/// Result alias for generator operations.
pub type Result<T> = std::result::Result<T, Error>;
