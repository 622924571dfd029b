//! Local filesystem image store.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::fs;

use crate::storage::{ImageStore, ImageStoreError, UPLOADS_URL_PREFIX};

/// Stores uploaded images in a single directory served under
/// [`UPLOADS_URL_PREFIX`].
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Unique on-disk name: millisecond timestamp, random suffix, and the
    /// original extension.
    fn unique_filename(original_name: &str) -> String {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|extension| extension.to_str())
            .map(|extension| format!(".{extension}"))
            .unwrap_or_default();

        format!(
            "{}-{}{}",
            Timestamp::now().as_millisecond(),
            rand::random::<u32>(),
            extension
        )
    }

    /// Resolve a managed URL back to its on-disk path. Rejects anything
    /// outside the managed prefix or that names more than a bare file.
    fn managed_path(&self, url: &str) -> Result<PathBuf, ImageStoreError> {
        let filename = url
            .strip_prefix(UPLOADS_URL_PREFIX)
            .ok_or(ImageStoreError::UnmanagedUrl)?;

        if filename.is_empty() || filename.contains('/') || filename.contains("..") {
            return Err(ImageStoreError::UnmanagedUrl);
        }

        Ok(self.root.join(filename))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, original_name: &str, source: &Path) -> Result<String, ImageStoreError> {
        fs::create_dir_all(&self.root).await?;

        let filename = Self::unique_filename(original_name);

        fs::copy(source, self.root.join(&filename)).await?;

        Ok(format!("{UPLOADS_URL_PREFIX}{filename}"))
    }

    async fn remove(&self, url: &str) -> Result<(), ImageStoreError> {
        let path = self.managed_path(url)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(ImageStoreError::Io(error)),
        }
    }

    fn is_managed(&self, url: &str) -> bool {
        url.starts_with(UPLOADS_URL_PREFIX)
    }
}
