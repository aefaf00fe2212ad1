use super::{ImageRecord, ImageStore, NewImage, StoreError};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// PostgreSQL-backed image store.
///
/// Connections are pooled, so concurrent requests are not serialized on a
/// single shared handle. All queries are parameterized.
#[derive(Clone)]
pub struct PgImageStore {
    pool: PgPool,
}

impl PgImageStore {
    /// Connects to the database and runs the bundled schema migrations.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database schema is up to date");
        Ok(Self { pool })
    }
}

#[async_trait]
impl ImageStore for PgImageStore {
    async fn insert(&self, image: NewImage) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO images (filename, original_name, size, file_type) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&image.filename)
        .bind(&image.original_name)
        .bind(image.size)
        .bind(&image.file_type)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_page(&self, page: u32, limit: u32) -> Result<Vec<ImageRecord>, StoreError> {
        let offset = i64::from(page.saturating_sub(1)) * i64::from(limit);
        let records = sqlx::query_as::<_, ImageRecord>(
            "SELECT filename, original_name, size, upload_time, file_type \
             FROM images ORDER BY upload_time DESC LIMIT $1 OFFSET $2",
        )
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM images")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn delete_by_filename(&self, filename: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM images WHERE filename = $1")
            .bind(filename)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
