// Static HTML responses.

use super::error::ApiError;
use axum::{
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::path::Path;

/// Serves a pre-authored static page with the given status code and any
/// extra headers. A missing page file propagates as an I/O error (500).
pub async fn send_html(
    static_dir: &Path,
    file: &str,
    code: StatusCode,
    extra_headers: HeaderMap,
) -> Result<Response, ApiError> {
    let body = tokio::fs::read(static_dir.join(file)).await?;

    let mut response = (code, body).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));
    response.headers_mut().extend(extra_headers);

    Ok(response)
}
