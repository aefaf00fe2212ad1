// In-memory `ImageStore` used by the handler tests.

use super::{ImageRecord, ImageStore, NewImage, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Default)]
pub struct MemoryImageStore {
    records: Mutex<Vec<ImageRecord>>,
    fail_next_insert: AtomicBool,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<ImageRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Makes the next `insert` call fail, for exercising error paths.
    pub fn fail_next_insert(&self) {
        self.fail_next_insert.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn insert(&self, image: NewImage) -> Result<(), StoreError> {
        if self.fail_next_insert.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }

        let mut records = self.records.lock().unwrap();
        records.push(ImageRecord {
            filename: image.filename,
            original_name: image.original_name,
            size: image.size,
            upload_time: Utc::now(),
            file_type: image.file_type,
        });
        Ok(())
    }

    async fn list_page(&self, page: u32, limit: u32) -> Result<Vec<ImageRecord>, StoreError> {
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(|a, b| b.upload_time.cmp(&a.upload_time));
        let offset = page.saturating_sub(1) as usize * limit as usize;
        Ok(records
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.records.lock().unwrap().len() as i64)
    }

    async fn delete_by_filename(&self, filename: &str) -> Result<u64, StoreError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|record| record.filename != filename);
        Ok((before - records.len()) as u64)
    }
}
