//! Catalog Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::catalog::{
    data::{CatalogFilter, NewProduct},
    errors::CatalogServiceError,
    records::{ProductId, ProductRecord, ProductView},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const INSERT_PRODUCT_IMAGE_SQL: &str = include_str!("sql/insert_product_image.sql");
const LIST_PRODUCT_IMAGES_SQL: &str = include_str!("sql/list_product_images.sql");
const SET_PRODUCT_VISIBILITY_SQL: &str = include_str!("sql/set_product_visibility.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_products(
        &self,
        filter: &CatalogFilter,
    ) -> Result<Vec<ProductView>, CatalogServiceError> {
        query_as::<Postgres, ProductView>(LIST_PRODUCTS_SQL)
            .bind(filter.public_only)
            .bind(filter.category.as_deref())
            .fetch_all(&self.pool)
            .await
            .map_err(CatalogServiceError::from)
    }

    async fn create_product(
        &self,
        product: &NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(&product.name)
            .bind(product.description.as_deref())
            .bind(product.price)
            .bind(product.category.as_deref())
            .bind(product.is_visible)
            .fetch_one(&self.pool)
            .await
            .map_err(CatalogServiceError::from)
    }

    async fn insert_image(
        &self,
        product: ProductId,
        image_url: &str,
    ) -> Result<(), CatalogServiceError> {
        query(INSERT_PRODUCT_IMAGE_SQL)
            .bind(product.into_inner())
            .bind(image_url)
            .execute(&self.pool)
            .await
            .map(|_result| ())
            .map_err(CatalogServiceError::from)
    }

    async fn list_image_urls(
        &self,
        product: ProductId,
    ) -> Result<Vec<String>, CatalogServiceError> {
        query_scalar::<Postgres, String>(LIST_PRODUCT_IMAGES_SQL)
            .bind(product.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(CatalogServiceError::from)
    }

    async fn set_visibility(
        &self,
        product: ProductId,
        visible: bool,
    ) -> Result<u64, CatalogServiceError> {
        query(SET_PRODUCT_VISIBILITY_SQL)
            .bind(visible)
            .bind(product.into_inner())
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected())
            .map_err(CatalogServiceError::from)
    }

    async fn delete_product(&self, product: ProductId) -> Result<u64, CatalogServiceError> {
        query(DELETE_PRODUCT_SQL)
            .bind(product.into_inner())
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected())
            .map_err(CatalogServiceError::from)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get::<Decimal, _>("price")?,
            category: row.try_get("category")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            is_visible: row.try_get("is_visible")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductView {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get::<Decimal, _>("price")?,
            category: row.try_get("category")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            is_visible: row.try_get("is_visible")?,
            images: row.try_get::<Vec<String>, _>("images")?,
        })
    }
}

#[automock]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Fetch the filtered listing, images resolved per product.
    async fn list_products(
        &self,
        filter: &CatalogFilter,
    ) -> Result<Vec<ProductView>, CatalogServiceError>;

    /// Insert a product row, returning the stored record.
    async fn create_product(
        &self,
        product: &NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError>;

    /// Attach an image URL to a product.
    async fn insert_image(
        &self,
        product: ProductId,
        image_url: &str,
    ) -> Result<(), CatalogServiceError>;

    /// All image URLs for a product, in insertion order.
    async fn list_image_urls(&self, product: ProductId)
    -> Result<Vec<String>, CatalogServiceError>;

    /// Update the visibility flag, reporting affected rows.
    async fn set_visibility(
        &self,
        product: ProductId,
        visible: bool,
    ) -> Result<u64, CatalogServiceError>;

    /// Delete a product row, reporting affected rows. Image rows go with
    /// it via the foreign-key cascade.
    async fn delete_product(&self, product: ProductId) -> Result<u64, CatalogServiceError>;
}
