//! Delete Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use vitrine_app::catalog::records::ProductId;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Product Deleted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDeletedResponse {
    pub message: String,
    /// Number of rows the delete removed
    pub changes: u64,
}

/// Delete Product Handler
///
/// Removes the product, its image rows, and its managed image files.
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<ProductDeletedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_identity_or_401()?;

    let changes = state
        .app
        .catalog
        .delete_product(ProductId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductDeletedResponse {
        message: "Product and associated files deleted".to_owned(),
        changes,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use vitrine_app::catalog::{CatalogServiceError, MockCatalogService};

    use crate::test_helpers::catalog_service;

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        catalog_service(catalog, Router::with_path("api/products/{id}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_product_success() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_delete_product()
            .once()
            .withf(|product| *product == ProductId::new(9))
            .return_once(|_product| Ok(1));

        let mut res = TestClient::delete("http://example.com/api/products/9")
            .send(&make_service(catalog))
            .await;

        let response: ProductDeletedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(response.message, "Product and associated files deleted");
        assert_eq!(response.changes, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_product_returns_404() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_delete_product()
            .once()
            .withf(|product| *product == ProductId::new(999_999))
            .return_once(|_product| Err(CatalogServiceError::NotFound));

        let res = TestClient::delete("http://example.com/api/products/999999")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_invalid_id_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_delete_product().never();

        let res = TestClient::delete("http://example.com/api/products/not-a-number")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
