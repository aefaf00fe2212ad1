// Serialized response bodies for the API endpoints.

use crate::storage::ImageRecord;
use serde::Serialize;

/// One element of the listing response. `upload_time` is pre-formatted as
/// `YYYY-MM-DD HH:MM:SS`.
#[derive(Debug, Clone, Serialize)]
pub struct ImageInfo {
    pub filename: String,
    pub original_name: String,
    pub size: i64,
    pub upload_time: String,
    pub file_type: String,
}

impl From<ImageRecord> for ImageInfo {
    fn from(record: ImageRecord) -> Self {
        Self {
            filename: record.filename,
            original_name: record.original_name,
            size: record.size,
            upload_time: record.upload_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            file_type: record.file_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageListResponse {
    pub images: Vec<ImageInfo>,
}

#[derive(Debug, Serialize)]
pub struct ImageCountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    #[serde(rename = "Success")]
    pub success: String,
}
