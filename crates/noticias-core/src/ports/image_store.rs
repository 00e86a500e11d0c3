//! Image store port - where uploaded images live.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ImageUpload;
use crate::error::StorageError;

/// Port for storing and serving uploaded images.
///
/// Stored names are `{epoch-millis}_{original-name}` so two uploads never share a file.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write the upload and return its public path (e.g. `/uploads/1700000000000_photo.jpg`).
    async fn store(&self, image: &ImageUpload, at: DateTime<Utc>) -> Result<String, StorageError>;

    /// Remove the file behind a public path previously returned by `store`.
    /// Removing a file that is already gone is not an error.
    async fn remove(&self, public_path: &str) -> Result<(), StorageError>;

    /// Read a stored file by its file name. `Ok(None)` when absent.
    async fn read(&self, file_name: &str) -> Result<Option<Vec<u8>>, StorageError>;
}
