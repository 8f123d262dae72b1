//! API server setup and configuration.

use std::net::{IpAddr, SocketAddr};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{Dispatcher, ExtractionConfig, FlattextError, Result};

use super::{
    handlers::{convert_handler, health_handler, info_handler},
    types::{ApiSizeLimits, ApiState},
};

/// Environment variable holding the API key for `/convert`.
pub const API_KEY_ENV: &str = "FLATTEXT_API_KEY";

/// Parse size limits from environment variables.
///
/// Reads environment variables in the following order of preference:
/// 1. `FLATTEXT_MAX_REQUEST_BODY_BYTES` - maximum total request body size (in bytes)
/// 2. `FLATTEXT_MAX_MULTIPART_FIELD_BYTES` - maximum uploaded file size (in bytes)
/// 3. `FLATTEXT_MAX_UPLOAD_SIZE_MB` - legacy, in MB, applies to both limits
///
/// Falls back to 100 MB when nothing valid is set.
pub fn parse_size_limits_from_env() -> ApiSizeLimits {
    const DEFAULT_LIMIT_MB: usize = 100;

    if let Ok(value) = std::env::var("FLATTEXT_MAX_REQUEST_BODY_BYTES") {
        match value.parse::<usize>() {
            Ok(bytes) if bytes > 0 => {
                let multipart_bytes = std::env::var("FLATTEXT_MAX_MULTIPART_FIELD_BYTES")
                    .ok()
                    .and_then(|v| v.parse::<usize>().ok())
                    .filter(|v| *v > 0)
                    .unwrap_or(bytes);

                tracing::info!(
                    "Upload size limits configured from environment: request_body={} bytes, multipart_field={} bytes",
                    bytes,
                    multipart_bytes
                );
                return ApiSizeLimits::new(bytes, multipart_bytes);
            }
            _ => tracing::warn!(
                "Ignoring FLATTEXT_MAX_REQUEST_BODY_BYTES='{}', must be a positive integer",
                value
            ),
        }
    }

    if let Ok(value) = std::env::var("FLATTEXT_MAX_UPLOAD_SIZE_MB") {
        match value.parse::<usize>() {
            Ok(mb) if mb > 0 => {
                tracing::info!("Upload size limit configured from environment (legacy): {} MB", mb);
                return ApiSizeLimits::from_mb(mb, mb);
            }
            _ => tracing::warn!(
                "Ignoring FLATTEXT_MAX_UPLOAD_SIZE_MB='{}', must be a positive integer",
                value
            ),
        }
    }

    let limits = ApiSizeLimits::from_mb(DEFAULT_LIMIT_MB, DEFAULT_LIMIT_MB);
    tracing::info!(
        "Upload size limit: {} MB (default) - configure with FLATTEXT_MAX_REQUEST_BODY_BYTES or FLATTEXT_MAX_UPLOAD_SIZE_MB",
        DEFAULT_LIMIT_MB
    );
    limits
}

fn cors_layer_from_env() -> CorsLayer {
    if let Ok(origins_str) = std::env::var("FLATTEXT_CORS_ORIGINS") {
        let origins: Vec<_> = origins_str
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
            .collect();

        if !origins.is_empty() {
            tracing::info!("CORS configured with {} explicit allowed origin(s)", origins.len());
            return CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any);
        }

        tracing::warn!("FLATTEXT_CORS_ORIGINS set but empty or invalid, falling back to permissive CORS");
    } else {
        tracing::warn!(
            "CORS allows all origins (default). Set FLATTEXT_CORS_ORIGINS to a comma-separated \
             list of allowed origins for production"
        );
    }

    CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
}

/// Create the API router.
///
/// `api_key` is fixed for the router's lifetime. With `None` (or an empty
/// key) `/convert` is open to anyone.
///
/// # Examples
///
/// ```no_run
/// use flattext::{Dispatcher, api::create_router};
///
/// # fn main() -> flattext::Result<()> {
/// let dispatcher = Dispatcher::with_defaults()?;
/// let router = create_router(dispatcher, Some("s3cret".to_string()));
/// # Ok(())
/// # }
/// ```
pub fn create_router(dispatcher: Dispatcher, api_key: Option<String>) -> Router {
    create_router_with_limits(dispatcher, api_key, ApiSizeLimits::default())
}

/// Create the API router with custom size limits.
pub fn create_router_with_limits(dispatcher: Dispatcher, api_key: Option<String>, limits: ApiSizeLimits) -> Router {
    let state = ApiState::new(dispatcher, api_key);

    if state.api_key.is_none() {
        tracing::warn!("No API key configured, /convert accepts unauthenticated requests");
    }

    Router::new()
        .route("/convert", post(convert_handler))
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
        .layer(DefaultBodyLimit::max(limits.max_multipart_field_bytes))
        .layer(RequestBodyLimitLayer::new(limits.max_request_body_bytes))
        .layer(cors_layer_from_env())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server with config file discovery.
///
/// Looks for `flattext.toml` in the current and parent directories, reads
/// size limits from the environment and the API key from `FLATTEXT_API_KEY`.
///
/// ```no_run
/// use flattext::api::serve;
///
/// #[tokio::main]
/// async fn main() -> flattext::Result<()> {
///     serve("127.0.0.1", 8000).await
/// }
/// ```
pub async fn serve(host: impl AsRef<str>, port: u16) -> Result<()> {
    let config = match ExtractionConfig::discover()? {
        Some(config) => {
            tracing::info!("Loaded extraction config from discovered file");
            config
        }
        None => {
            tracing::info!("No config file found, using default configuration");
            ExtractionConfig::default()
        }
    };

    let api_key = std::env::var(API_KEY_ENV).ok();
    let limits = parse_size_limits_from_env();

    serve_with_config_and_limits(host, port, config, api_key, limits).await
}

/// Start the API server with explicit config and API key, default size limits.
pub async fn serve_with_config(
    host: impl AsRef<str>,
    port: u16,
    config: ExtractionConfig,
    api_key: Option<String>,
) -> Result<()> {
    serve_with_config_and_limits(host, port, config, api_key, ApiSizeLimits::default()).await
}

/// Start the API server with explicit config, API key and size limits.
pub async fn serve_with_config_and_limits(
    host: impl AsRef<str>,
    port: u16,
    config: ExtractionConfig,
    api_key: Option<String>,
    limits: ApiSizeLimits,
) -> Result<()> {
    let ip: IpAddr = host
        .as_ref()
        .parse()
        .map_err(|e| FlattextError::validation(format!("Invalid host address: {}", e)))?;

    let addr = SocketAddr::new(ip, port);
    let dispatcher = Dispatcher::with_config(config)?;
    let app = create_router_with_limits(dispatcher, api_key, limits);

    tracing::info!("Starting flattext API server on http://{}:{}", ip, port);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(FlattextError::Io)?;

    axum::serve(listener, app)
        .await
        .map_err(|e| FlattextError::Other(e.to_string()))?;

    Ok(())
}
