//! Catalog service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::{
    catalog::{
        data::{CatalogFilter, ImageUpload, NewProduct},
        errors::CatalogServiceError,
        records::{ProductId, ProductRecord, ProductView},
        repository::CatalogRepository,
    },
    storage::ImageStore,
};

#[derive(Clone)]
pub struct PgCatalogService {
    repository: Arc<dyn CatalogRepository>,
    images: Arc<dyn ImageStore>,
}

impl std::fmt::Debug for PgCatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgCatalogService").finish_non_exhaustive()
    }
}

impl PgCatalogService {
    #[must_use]
    pub fn new(repository: Arc<dyn CatalogRepository>, images: Arc<dyn ImageStore>) -> Self {
        Self { repository, images }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_products(
        &self,
        filter: CatalogFilter,
    ) -> Result<Vec<ProductView>, CatalogServiceError> {
        self.repository.list_products(&filter).await
    }

    async fn create_product(
        &self,
        product: NewProduct,
        images: Vec<ImageUpload>,
    ) -> Result<ProductRecord, CatalogServiceError> {
        if product.name.trim().is_empty() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        if product.price.is_sign_negative() {
            return Err(CatalogServiceError::InvalidData);
        }

        let mut price = product.price.round_dp(2);
        price.rescale(2);

        let product = NewProduct { price, ..product };

        let created = self.repository.create_product(&product).await?;

        // The product exists from here on; image failures must not undo it.
        for image in images {
            let url = match self.images.save(&image.original_name, &image.source).await {
                Ok(url) => url,
                Err(error) => {
                    warn!(
                        product = %created.id,
                        file = %image.original_name,
                        "failed to store image: {error}"
                    );

                    continue;
                }
            };

            if let Err(error) = self.repository.insert_image(created.id, &url).await {
                warn!(product = %created.id, %url, "failed to record image: {error}");
            }
        }

        Ok(created)
    }

    async fn set_visibility(
        &self,
        product: ProductId,
        visible: bool,
    ) -> Result<u64, CatalogServiceError> {
        let rows_affected = self.repository.set_visibility(product, visible).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        Ok(rows_affected)
    }

    async fn delete_product(&self, product: ProductId) -> Result<u64, CatalogServiceError> {
        let urls = self.repository.list_image_urls(product).await?;

        for url in &urls {
            if !self.images.is_managed(url) {
                continue;
            }

            if let Err(error) = self.images.remove(url).await {
                warn!(product = %product, %url, "failed to delete image file: {error}");
            }
        }

        let rows_affected = self.repository.delete_product(product).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        Ok(rows_affected)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves the catalog, filtered by visibility and category.
    async fn list_products(
        &self,
        filter: CatalogFilter,
    ) -> Result<Vec<ProductView>, CatalogServiceError>;

    /// Creates a product and attaches the uploaded images best-effort.
    async fn create_product(
        &self,
        product: NewProduct,
        images: Vec<ImageUpload>,
    ) -> Result<ProductRecord, CatalogServiceError>;

    /// Updates only the visibility flag, returning affected rows.
    async fn set_visibility(
        &self,
        product: ProductId,
        visible: bool,
    ) -> Result<u64, CatalogServiceError>;

    /// Deletes a product, its image rows, and its managed image files.
    async fn delete_product(&self, product: ProductId) -> Result<u64, CatalogServiceError>;
}
