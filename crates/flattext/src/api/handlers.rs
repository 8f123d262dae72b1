//! API request handlers.

use std::collections::HashMap;

use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request, State},
    http::{HeaderMap, header::CONTENT_TYPE},
};

use crate::{ExtractionResult, FlattextError, Submission, UploadedFile, supported_extensions};

use super::{
    error::ApiError,
    types::{ApiState, ConvertResponse, HealthResponse, InfoResponse},
};

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Conversion endpoint handler.
///
/// POST /convert
///
/// Accepts a form with either:
/// - `file`: an uploaded document (multipart, with a filename)
/// - `url`: an http(s) URL of a web page or a video watch link
///
/// When both are present the file wins. The form may be multipart or
/// URL-encoded; a URL-encoded form can only carry `url`.
///
/// # Responses
///
/// - 200 `{"text": ...}`
/// - 400 for a missing file/URL, an unnamed upload or a malformed URL
/// - 401 when an API key is configured and the header does not match
/// - 415 for unsupported file types
/// - 500 for extraction, network and transcript failures
pub async fn convert_handler(
    State(state): State<ApiState>,
    headers: HeaderMap,
    request: Request,
) -> Result<Json<ConvertResponse>, ApiError> {
    let presented = headers.get(API_KEY_HEADER).and_then(|value| value.to_str().ok());
    if !state.is_authorized(presented) {
        tracing::warn!("Rejected /convert request with invalid or missing API key");
        return Err(ApiError::unauthorized());
    }

    let submission = read_submission(&state, request).await?;

    match state.dispatcher.resolve_and_dispatch(submission).await {
        ExtractionResult::Success { text } => Ok(Json(ConvertResponse { text })),
        ExtractionResult::Failure { kind, detail } => Err(ApiError::from_failure(kind, detail)),
    }
}

/// Collect the `file` and `url` fields of the request form.
///
/// A body that is not a form at all yields an empty submission, which the
/// resolver then rejects.
async fn read_submission(state: &ApiState, request: Request) -> Result<Submission, ApiError> {
    let is_urlencoded = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("application/x-www-form-urlencoded"));

    if is_urlencoded {
        let Form(fields) = Form::<HashMap<String, String>>::from_request(request, state)
            .await
            .map_err(|e| ApiError::from(FlattextError::validation(format!("Invalid form body: {}", e))))?;
        return Ok(Submission {
            file: None,
            url: fields.get("url").cloned(),
        });
    }

    let Ok(mut multipart) = Multipart::from_request(request, state).await else {
        return Ok(Submission::default());
    };

    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::from(FlattextError::validation(e.body_text())))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::from(FlattextError::validation(e.body_text())))?;

                if submission.file.is_none() {
                    submission.file = Some(UploadedFile::new(file_name, data.to_vec()));
                }
            }
            "url" => {
                let url = field
                    .text()
                    .await
                    .map_err(|e| ApiError::from(FlattextError::validation(e.body_text())))?;
                submission.url = Some(url);
            }
            _ => {}
        }
    }

    Ok(submission)
}

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Server info endpoint handler.
///
/// GET /info
pub async fn info_handler(State(state): State<ApiState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        supported_formats: supported_extensions().into_iter().map(str::to_string).collect(),
        auth_required: state.api_key.is_some(),
    })
}
