// Request handlers for the image hosting API.

use super::{
    ALLOWED_EXTENSIONS, AppState, MAX_FILE_SIZE_BYTES, NOT_FOUND_PAGE, PAGE_LIMIT,
    UPLOAD_FAILED_PAGE, UPLOAD_SUCCESS_PAGE,
    error::ApiError,
    headers::{Filename, Page},
    models::{DeleteResponse, ImageCountResponse, ImageInfo, ImageListResponse},
    pages::send_html,
};
use crate::storage::NewImage;
use axum::{
    Json,
    extract::{Path, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_extra::TypedHeader;
use headers::ContentLength;
use tracing::{info, warn};
use uuid::Uuid;

// --- GET /api/images/ ---
// Returns one page of image metadata, newest upload first.
pub async fn list_images(
    State(state): State<AppState>,
    TypedHeader(Page(page)): TypedHeader<Page>,
) -> Result<Json<ImageListResponse>, ApiError> {
    info!("Listing images, page {page}");

    let records = state.store.list_page(page, PAGE_LIMIT).await?;
    let images = records.into_iter().map(ImageInfo::from).collect();

    Ok(Json(ImageListResponse { images }))
}

// --- GET /api/images_count/ ---
pub async fn images_count(
    State(state): State<AppState>,
) -> Result<Json<ImageCountResponse>, ApiError> {
    let count = state.store.count().await?;
    info!("Image count: {count}");

    Ok(Json(ImageCountResponse { count }))
}

// --- POST /upload/ ---
// Validation order mirrors the original service: the size check rejects
// before the body is read, the extension check only after.
pub async fn upload(
    State(state): State<AppState>,
    TypedHeader(ContentLength(length)): TypedHeader<ContentLength>,
    TypedHeader(Filename(original_name)): TypedHeader<Filename>,
    request: Request,
) -> Result<Response, ApiError> {
    if length > MAX_FILE_SIZE_BYTES {
        warn!("Upload rejected: {length} bytes exceeds the {MAX_FILE_SIZE_BYTES} byte limit");
        return send_html(
            &state.static_dir,
            UPLOAD_FAILED_PAGE,
            StatusCode::PAYLOAD_TOO_LARGE,
            HeaderMap::new(),
        )
        .await;
    }

    let data = axum::body::to_bytes(request.into_body(), MAX_FILE_SIZE_BYTES as usize)
        .await
        .map_err(|err| ApiError::BadRequest(format!("Failed to read request body: {err}")))?;

    let Some(extension) = extension_of(&original_name)
        .filter(|extension| ALLOWED_EXTENSIONS.contains(&extension.as_str()))
    else {
        warn!("Upload rejected: file type of {original_name:?} is not allowed");
        return send_html(
            &state.static_dir,
            UPLOAD_FAILED_PAGE,
            StatusCode::BAD_REQUEST,
            HeaderMap::new(),
        )
        .await;
    };

    let image_id = Uuid::new_v4();
    let stored_name = format!("{image_id}{extension}");
    let image_path = state.images_dir.join(&stored_name);

    tokio::fs::write(&image_path, &data).await?;
    info!(
        "Stored {original_name:?} as {stored_name} ({} bytes)",
        data.len()
    );

    let record = NewImage {
        filename: image_id.to_string(),
        original_name,
        size: data.len() as i64,
        file_type: extension,
    };
    if let Err(err) = state.store.insert(record).await {
        // Keep disk and table consistent: a record that failed to insert
        // must not leave its file behind.
        if let Err(cleanup_err) = tokio::fs::remove_file(&image_path).await {
            warn!("Failed to remove {stored_name} after insert failure: {cleanup_err}");
        }
        return Err(err.into());
    }

    let mut extra_headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/images/{stored_name}")) {
        extra_headers.insert(header::LOCATION, location);
    }

    send_html(
        &state.static_dir,
        UPLOAD_SUCCESS_PAGE,
        StatusCode::OK,
        extra_headers,
    )
    .await
}

// --- DELETE /api/delete/{image_id} ---
// `image_id` is the full stored file name including extension.
pub async fn delete_image(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> Result<Response, ApiError> {
    // Reject anything that could escape the images directory.
    if image_id.is_empty() || image_id.contains(['/', '\\']) || image_id.contains("..") {
        warn!("Delete rejected: invalid target {image_id:?}");
        return send_html(
            &state.static_dir,
            UPLOAD_FAILED_PAGE,
            StatusCode::NOT_FOUND,
            HeaderMap::new(),
        )
        .await;
    }

    let image_path = state.images_dir.join(&image_id);
    match tokio::fs::remove_file(&image_path).await {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            // Also taken by the loser of a concurrent delete of the same name.
            warn!("Delete rejected: image {image_id} not found");
            return send_html(
                &state.static_dir,
                UPLOAD_FAILED_PAGE,
                StatusCode::NOT_FOUND,
                HeaderMap::new(),
            )
            .await;
        }
        Err(err) => return Err(err.into()),
    }

    let stem = image_id
        .rfind('.')
        .map_or(image_id.as_str(), |index| &image_id[..index]);
    state.store.delete_by_filename(stem).await?;
    info!("Deleted image {image_id}");

    Ok(Json(DeleteResponse {
        success: "Image deleted".to_owned(),
    })
    .into_response())
}

// Fallback for every unregistered method/path pair.
pub async fn not_found(State(state): State<AppState>) -> Result<Response, ApiError> {
    send_html(
        &state.static_dir,
        NOT_FOUND_PAGE,
        StatusCode::NOT_FOUND,
        HeaderMap::new(),
    )
    .await
}

/// Extracts the extension of a client-supplied file name: the substring from
/// the last dot, lower-cased. Returns `None` when the name has no dot.
fn extension_of(name: &str) -> Option<String> {
    name.rfind('.')
        .map(|index| name[index..].to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::extension_of;

    #[test]
    fn test_extension_lower_cased() {
        assert_eq!(extension_of("photo.PNG"), Some(".png".to_owned()));
        assert_eq!(extension_of("cat.gif"), Some(".gif".to_owned()));
    }

    #[test]
    fn test_extension_uses_last_dot() {
        assert_eq!(extension_of("archive.tar.gz"), Some(".gz".to_owned()));
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(extension_of("README"), None);
    }
}
