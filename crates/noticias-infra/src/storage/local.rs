//! Local-disk image store. Files land in one directory and are served under a URL prefix.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use noticias_core::domain::ImageUpload;
use noticias_core::error::StorageError;
use noticias_core::ports::ImageStore;

/// How many successive millisecond prefixes are tried before giving up.
const MAX_NAME_ATTEMPTS: i64 = 32;

/// Upper bound for the sanitized part of a stored name. The millisecond
/// prefix adds 14 bytes and most filesystems allow 255 per component.
const MAX_NAME_BYTES: usize = 200;

/// Longest extension kept intact when a name is shortened.
const MAX_EXTENSION_BYTES: usize = 16;

/// Name used when the client sent nothing usable.
const FALLBACK_NAME: &str = "imagem";

/// Image store backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalImageStore {
    /// `root` is the directory files are written to, `public_prefix` the URL
    /// path they are served from (e.g. `/uploads`).
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        let public_prefix = public_prefix.into().trim_end_matches('/').to_string();
        Self {
            root: root.into(),
            public_prefix,
        }
    }

    fn public_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.public_prefix, file_name)
    }

    fn path_of(&self, file_name: &str) -> Result<PathBuf, StorageError> {
        if !is_plain_file_name(file_name) {
            return Err(StorageError::InvalidName(file_name.to_string()));
        }
        Ok(self.root.join(file_name))
    }

    fn io_error(path: &Path, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Stored name for an upload: `{epoch-millis}_{sanitized original name}`.
pub fn stored_file_name(original: &str, millis: i64) -> String {
    format!("{}_{}", millis, sanitize(original))
}

/// Keep the last path component, replace anything but letters, digits and
/// `._-`, then cap the length so the stored name fits in one path component.
fn sanitize(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        return FALLBACK_NAME.to_string();
    }

    truncate_keeping_extension(cleaned, MAX_NAME_BYTES)
}

/// Shorten `name` to at most `limit` bytes, cutting the stem and keeping a short extension.
fn truncate_keeping_extension(name: String, limit: usize) -> String {
    if name.len() <= limit {
        return name;
    }

    let (stem, ext) = match name.rfind('.') {
        Some(i) if i > 0 && name.len() - i <= MAX_EXTENSION_BYTES => name.split_at(i),
        _ => (name.as_str(), ""),
    };

    let mut end = limit - ext.len();
    while !stem.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{}", &stem[..end], ext)
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, image: &ImageUpload, at: DateTime<Utc>) -> Result<String, StorageError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Self::io_error(&self.root, e))?;

        let base_millis = at.timestamp_millis();
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = stored_file_name(&image.file_name, base_millis + attempt);
            let path = self.root.join(&file_name);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(Self::io_error(&path, e)),
            };

            let written = async {
                file.write_all(&image.bytes).await?;
                file.flush().await
            }
            .await;

            if let Err(e) = written {
                let _ = fs::remove_file(&path).await;
                return Err(Self::io_error(&path, e));
            }

            tracing::debug!(file = %file_name, bytes = image.bytes.len(), "Stored image");
            return Ok(self.public_path(&file_name));
        }

        Err(StorageError::InvalidName(format!(
            "no free name for {} after {} attempts",
            image.file_name, MAX_NAME_ATTEMPTS
        )))
    }

    async fn remove(&self, public_path: &str) -> Result<(), StorageError> {
        let file_name = public_path
            .strip_prefix(&self.public_prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| StorageError::InvalidName(public_path.to_string()))?;
        let path = self.path_of(file_name)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }

    async fn read(&self, file_name: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_of(file_name)?;

        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at_millis(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_stored_file_name() {
        assert_eq!(stored_file_name("photo.jpg", 1700), "1700_photo.jpg");
        assert_eq!(stored_file_name("../../etc/passwd", 1), "1_passwd");
        assert_eq!(stored_file_name("C:\\fotos\\praia 1.png", 1), "1_praia_1.png");
        assert_eq!(stored_file_name("notícia.jpg", 1), "1_notícia.jpg");
        assert_eq!(stored_file_name("foto\tnova\u{7}.png", 1), "1_foto_nova_.png");
        assert_eq!(stored_file_name("..", 1), "1_imagem");
        assert_eq!(stored_file_name("", 1), "1_imagem");
    }

    #[test]
    fn test_long_names_are_capped_keeping_extension() {
        let long = format!("{}.jpg", "a".repeat(250));
        let stored = stored_file_name(&long, 1_700_000_000_000);
        assert_eq!(stored.len(), "1700000000000_".len() + MAX_NAME_BYTES);
        assert!(stored.ends_with("aaaa.jpg"));

        // Cut lands inside a two-byte character.
        let accented = format!("a{}.png", "é".repeat(150));
        let stored = sanitize(&accented);
        assert!(stored.len() <= MAX_NAME_BYTES);
        assert!(stored.ends_with("é.png"));

        // No usable extension: plain cut.
        let no_ext = "b".repeat(300);
        assert_eq!(sanitize(&no_ext), "b".repeat(MAX_NAME_BYTES));
    }

    #[tokio::test]
    async fn test_store_accepts_very_long_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path(), "/uploads");
        let image = ImageUpload::new(format!("{}.jpg", "a".repeat(250)), vec![1u8; 4]);

        let path = store.store(&image, at_millis(1_700_000_000_000)).await.unwrap();

        assert!(path.ends_with(".jpg"));
        let file_name = path.trim_start_matches("/uploads/");
        assert_eq!(store.read(file_name).await.unwrap(), Some(vec![1u8; 4]));
    }

    #[tokio::test]
    async fn test_store_writes_bytes_and_returns_public_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path(), "/uploads/");
        let image = ImageUpload::new("photo.jpg", vec![7u8; 10]);

        let path = store.store(&image, at_millis(1_700_000_000_123)).await.unwrap();

        assert_eq!(path, "/uploads/1700000000123_photo.jpg");
        let on_disk = std::fs::read(dir.path().join("1700000000123_photo.jpg")).unwrap();
        assert_eq!(on_disk, vec![7u8; 10]);
    }

    #[tokio::test]
    async fn test_store_avoids_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path(), "/uploads");
        let image = ImageUpload::new("photo.jpg", b"one".to_vec());
        let at = at_millis(5_000);

        let first = store.store(&image, at).await.unwrap();
        let second = store.store(&image, at).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(second, "/uploads/5001_photo.jpg");
    }

    #[tokio::test]
    async fn test_read_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path().join("nested"), "/uploads");
        let image = ImageUpload::new("a.png", b"png".to_vec());

        let path = store.store(&image, at_millis(42)).await.unwrap();
        assert_eq!(
            store.read("42_a.png").await.unwrap(),
            Some(b"png".to_vec())
        );

        store.remove(&path).await.unwrap();
        assert_eq!(store.read("42_a.png").await.unwrap(), None);
        // Already gone is fine.
        store.remove(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_traversal_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path(), "/uploads");

        assert!(matches!(
            store.read("../secret").await,
            Err(StorageError::InvalidName(_))
        ));
        assert!(matches!(
            store.remove("/elsewhere/file.jpg").await,
            Err(StorageError::InvalidName(_))
        ));
        assert!(matches!(
            store.remove("/uploads/../x").await,
            Err(StorageError::InvalidName(_))
        ));
    }
}
