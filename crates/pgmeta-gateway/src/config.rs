//! Gateway configuration.

use clap::Parser;

/// Default request body limit (16 MiB); large catalogs produce large snapshots.
const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Type generator HTTP gateway command line arguments.
#[derive(Debug, Parser)]
#[command(name = "pgmeta-gateway")]
#[command(about = "HTTP gateway for the Postgres metadata type generator")]
pub struct Args {
    /// Address to listen on for HTTP requests.
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Maximum request body size in bytes.
    #[arg(long, default_value_t = DEFAULT_BODY_LIMIT)]
    pub body_limit: usize,

    /// Schemas excluded when a request names neither included nor excluded schemas.
    #[arg(long = "exclude-schema", value_delimiter = ',')]
    pub exclude_schemas: Vec<String>,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to listen on for HTTP requests.
    pub listen_addr: String,
    /// Maximum request body size in bytes.
    pub body_limit: usize,
    /// Schemas excluded by default.
    pub default_excluded_schemas: Vec<String>,
    /// Fallback log filter.
    pub log_level: String,
}

impl From<&Args> for GatewayConfig {
    fn from(args: &Args) -> Self {
        Self {
            listen_addr: args.listen.clone(),
            body_limit: args.body_limit,
            default_excluded_schemas: args.exclude_schemas.clone(),
            log_level: args.log_level.clone(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            body_limit: DEFAULT_BODY_LIMIT,
            default_excluded_schemas: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Set the default excluded schemas.
    pub fn with_default_excluded_schemas(
        mut self,
        schemas: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.default_excluded_schemas = schemas.into_iter().map(Into::into).collect();
        self
    }

    /// Set the request body limit.
    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }
}
