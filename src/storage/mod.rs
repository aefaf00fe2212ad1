// Storage layer for image metadata.
// Handlers talk to an injected `ImageStore`; the production implementation
// is backed by PostgreSQL.

#[cfg(test)]
pub mod memory;
mod postgres;

pub use postgres::PgImageStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Metadata for a newly uploaded image. `upload_time` is assigned by the
/// store at insert.
#[derive(Debug, Clone)]
pub struct NewImage {
    /// Generated UUID stem; the on-disk name is `filename + file_type`.
    pub filename: String,
    /// Client-supplied original file name, stored as-is.
    pub original_name: String,
    /// Byte length of the uploaded payload.
    pub size: i64,
    /// Extension including the leading dot.
    pub file_type: String,
}

/// A persisted image row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ImageRecord {
    pub filename: String,
    pub original_name: String,
    pub size: i64,
    pub upload_time: DateTime<Utc>,
    pub file_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Inserts a metadata record.
    async fn insert(&self, image: NewImage) -> Result<(), StoreError>;

    /// Returns one page of records, newest upload first. `page` is 1-based;
    /// a page past the end of the data yields an empty vector.
    async fn list_page(&self, page: u32, limit: u32) -> Result<Vec<ImageRecord>, StoreError>;

    /// Total number of records.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Deletes the record with the given filename stem, returning the number
    /// of rows removed.
    async fn delete_by_filename(&self, filename: &str) -> Result<u64, StoreError>;
}
