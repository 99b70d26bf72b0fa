use chrono::Utc;
use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::ImageRecord;
use super::tables::IMAGES;

impl Database {
    // ========================================================================
    // Image operations
    // ========================================================================

    /// Record an uploaded image. Ids ascend within the live collection, so
    /// the highest key is always the most recent upload.
    pub fn insert_image(&self, filename: &str) -> Result<ImageRecord, DatabaseError> {
        let write_txn = self.begin_write()?;
        let image = {
            let mut images = write_txn.open_table(IMAGES)?;

            let id = images.last()?.map(|(k, _)| k.value() + 1).unwrap_or(1);
            let image = ImageRecord {
                id,
                filename: filename.to_string(),
                created_at: Utc::now(),
            };
            let data = rmp_serde::to_vec_named(&image)?;
            images.insert(id, data.as_slice())?;
            image
        };
        write_txn.commit()?;

        Ok(image)
    }

    /// Get the most recently uploaded image, if any
    pub fn latest_image(&self) -> Result<Option<ImageRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let images = read_txn.open_table(IMAGES)?;

        let latest = match images.last()? {
            Some((_, data)) => {
                let image: ImageRecord = rmp_serde::from_slice(data.value())?;
                Some(image)
            }
            None => None,
        };

        Ok(latest)
    }

    /// Remove every image row, returning how many were dropped
    pub fn clear_images(&self) -> Result<u64, DatabaseError> {
        let write_txn = self.begin_write()?;
        let removed = {
            let images = write_txn.open_table(IMAGES)?;
            let keys: Vec<u64> = images
                .iter()?
                .map(|entry| entry.map(|(key, _)| key.value()))
                .collect::<Result<Vec<_>, _>>()?;
            drop(images);

            let mut images = write_txn.open_table(IMAGES)?;
            for key in keys.iter() {
                images.remove(key)?;
            }
            keys.len() as u64
        };
        write_txn.commit()?;

        Ok(removed)
    }
}
