//! API request and response types.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::Dispatcher;

/// API server size limit configuration.
///
/// # Default Values
///
/// - `max_request_body_bytes`: 100 MB (104,857,600 bytes)
/// - `max_multipart_field_bytes`: 100 MB (104,857,600 bytes)
///
/// # Configuration via Environment Variables
///
/// ```bash
/// # In bytes:
/// export FLATTEXT_MAX_REQUEST_BODY_BYTES=104857600     # 100 MB
/// export FLATTEXT_MAX_MULTIPART_FIELD_BYTES=104857600  # 100 MB
///
/// # Legacy, in MB (applies to both limits):
/// export FLATTEXT_MAX_UPLOAD_SIZE_MB=100
/// ```
///
/// # Examples
///
/// ```
/// use flattext::api::ApiSizeLimits;
///
/// let limits = ApiSizeLimits::default();
/// assert_eq!(limits.max_request_body_bytes, 100 * 1024 * 1024);
///
/// let limits = ApiSizeLimits::from_mb(20, 10);
/// assert_eq!(limits.max_multipart_field_bytes, 10 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiSizeLimits {
    /// Maximum size of the entire request body in bytes.
    pub max_request_body_bytes: usize,

    /// Maximum size of a single multipart field (the uploaded file) in bytes.
    pub max_multipart_field_bytes: usize,
}

impl Default for ApiSizeLimits {
    fn default() -> Self {
        Self::from_mb(100, 100)
    }
}

impl ApiSizeLimits {
    pub fn new(max_request_body_bytes: usize, max_multipart_field_bytes: usize) -> Self {
        Self {
            max_request_body_bytes,
            max_multipart_field_bytes,
        }
    }

    /// Create size limits from MB values.
    pub fn from_mb(max_request_body_mb: usize, max_multipart_field_mb: usize) -> Self {
        Self {
            max_request_body_bytes: max_request_body_mb * 1024 * 1024,
            max_multipart_field_bytes: max_multipart_field_mb * 1024 * 1024,
        }
    }
}

/// Successful conversion response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub text: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// API version
    pub version: String,
}

/// Server information response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    /// API version
    pub version: String,
    /// Upload extensions accepted by `/convert`
    pub supported_formats: Vec<String>,
    /// Whether `/convert` requires an `x-api-key` header
    pub auth_required: bool,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure detail
    pub error: String,
    /// Failure category; absent for authentication failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// API server state.
///
/// The dispatcher and the API key are fixed when the router is built.
#[derive(Clone)]
pub struct ApiState {
    pub dispatcher: Dispatcher,
    /// Key required in the `x-api-key` header. `None` disables the check.
    pub api_key: Option<Arc<str>>,
}

impl ApiState {
    pub fn new(dispatcher: Dispatcher, api_key: Option<String>) -> Self {
        Self {
            dispatcher,
            api_key: api_key.filter(|key| !key.is_empty()).map(Arc::from),
        }
    }

    /// Whether the presented key satisfies the configured one.
    pub fn is_authorized(&self, presented: Option<&str>) -> bool {
        match &self.api_key {
            None => true,
            Some(expected) => presented.is_some_and(|key| key == expected.as_ref()),
        }
    }
}
