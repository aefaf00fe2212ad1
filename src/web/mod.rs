// HTTP layer for the image hosting server.
// Routing, request handlers, typed headers, and response helpers.

pub mod app;
mod error;
mod handlers;
mod headers;
mod models;
mod pages;


use crate::storage::ImageStore;
use std::path::PathBuf;
use std::sync::Arc;

/// Maximum accepted upload payload.
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024; // 5 MiB

/// Extensions accepted by the upload endpoint, compared lower-cased.
pub const ALLOWED_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

/// Number of records per listing page.
pub const PAGE_LIMIT: u32 = 10;

// Pre-authored outcome pages, looked up under the static directory.
pub const NOT_FOUND_PAGE: &str = "404.html";
pub const UPLOAD_SUCCESS_PAGE: &str = "upload_success.html";
pub const UPLOAD_FAILED_PAGE: &str = "upload_failed.html";

/// Shared request context: the injected storage client and the content roots.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ImageStore>,
    pub images_dir: PathBuf,
    pub static_dir: PathBuf,
}
