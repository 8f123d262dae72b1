//! Routing of extraction requests to their extractors.
//!
//! The dispatcher classifies a request, looks up the extractor registered for
//! the resulting format, runs it on its own task and folds every outcome
//! (text, error or panic) into an [`ExtractionResult`].

use crate::core::classify::classify;
use crate::core::config::ExtractionConfig;
use crate::core::resolver::{Submission, resolve};
use crate::plugins::{ExtractionInput, ExtractorRegistry};
use crate::types::{ErrorKind, ExtractionRequest, ExtractionResult, FormatTag};
use crate::Result;
use std::sync::Arc;
use std::time::Instant;

/// Detail reported when the classifier finds no strategy for a request.
pub const UNSUPPORTED_FILETYPE: &str = "Unsupported filetype";

/// Runs extractions against a fixed registry and configuration.
///
/// Cloning is cheap and clones share the registry. The dispatcher keeps no
/// per-request state, so one instance can serve concurrent requests.
///
/// # Example
///
/// ```rust
/// use flattext::{Dispatcher, ExtractionRequest};
///
/// # tokio_test::block_on(async {
/// let dispatcher = Dispatcher::with_defaults().unwrap();
///
/// let result = dispatcher
///     .dispatch(ExtractionRequest::local_file("data.csv", b"a,b\nc,d\n".to_vec()))
///     .await;
/// assert_eq!(result.text(), Some("a b c d"));
/// # });
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ExtractorRegistry>,
    config: Arc<ExtractionConfig>,
}

impl Dispatcher {
    pub fn new(registry: ExtractorRegistry, config: ExtractionConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }

    /// Dispatcher over the built-in extractors with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(
            ExtractorRegistry::with_builtin_extractors()?,
            ExtractionConfig::default(),
        ))
    }

    /// Dispatcher over the built-in extractors with the given configuration.
    pub fn with_config(config: ExtractionConfig) -> Result<Self> {
        Ok(Self::new(ExtractorRegistry::with_builtin_extractors()?, config))
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract text from one request.
    ///
    /// Never fails: every error, including a panicking extractor, becomes an
    /// `ExtractionResult::Failure`. Requests that classify as unsupported are
    /// rejected without running any extractor.
    pub async fn dispatch(&self, request: ExtractionRequest) -> ExtractionResult {
        let started = Instant::now();
        let format = classify(&request);
        let description = request.describe();

        tracing::debug!(format = %format, request = %description, "Dispatching extraction");

        let result = self.run(format, request).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            ExtractionResult::Success { text } => {
                tracing::info!(
                    format = %format,
                    request = %description,
                    text_len = text.len(),
                    elapsed_ms,
                    "Extraction succeeded"
                );
            }
            ExtractionResult::Failure { kind, detail } => {
                tracing::warn!(
                    format = %format,
                    request = %description,
                    kind = %kind,
                    detail = %detail,
                    elapsed_ms,
                    "Extraction failed"
                );
            }
        }

        result
    }

    /// Resolve a raw submission and dispatch it.
    ///
    /// Resolution errors come back as `InvalidInput` failures.
    pub async fn resolve_and_dispatch(&self, submission: Submission) -> ExtractionResult {
        match resolve(submission) {
            Ok(request) => self.dispatch(request).await,
            Err(e) => {
                tracing::warn!(detail = %e.detail(), "Rejected submission");
                e.into()
            }
        }
    }

    async fn run(&self, format: FormatTag, request: ExtractionRequest) -> ExtractionResult {
        if format == FormatTag::Unsupported {
            return ExtractionResult::failure(ErrorKind::UnsupportedFormat, UNSUPPORTED_FILETYPE);
        }

        let extractor = match self.registry.get(format) {
            Ok(extractor) => extractor,
            Err(e) => return e.into(),
        };

        let input = match request {
            ExtractionRequest::LocalFile { bytes, .. } => ExtractionInput::Bytes(bytes),
            ExtractionRequest::RemoteUrl(url) => ExtractionInput::Url(url),
        };

        let config = Arc::clone(&self.config);
        let task = tokio::spawn(async move { extractor.extract(input, &config).await });

        match task.await {
            Ok(Ok(text)) => ExtractionResult::success(text),
            Ok(Err(e)) => e.into(),
            Err(join_error) if join_error.is_panic() => {
                let payload = join_error.into_panic();
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                ExtractionResult::failure(ErrorKind::ExtractionError, format!("Extractor panicked: {}", message))
            }
            Err(join_error) => ExtractionResult::failure(
                ErrorKind::ExtractionError,
                format!("Extraction task failed: {}", join_error),
            ),
        }
    }
}
