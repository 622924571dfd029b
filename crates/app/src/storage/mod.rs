//! Image storage

mod local;

use std::path::Path;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

pub use local::LocalImageStore;

/// URL prefix identifying locally-managed image files.
pub const UPLOADS_URL_PREFIX: &str = "/uploads/";

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("image file io error")]
    Io(#[from] std::io::Error),

    #[error("url does not point into managed storage")]
    UnmanagedUrl,
}

#[automock]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist an uploaded file, returning its public URL.
    async fn save(&self, original_name: &str, source: &Path) -> Result<String, ImageStoreError>;

    /// Remove the file behind a managed URL. A missing file is not an
    /// error.
    async fn remove(&self, url: &str) -> Result<(), ImageStoreError>;

    /// Whether the URL points into storage managed by this store.
    fn is_managed(&self, url: &str) -> bool;
}
