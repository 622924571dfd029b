//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use vitrine_app::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        CatalogServiceError::InvalidReference
        | CatalogServiceError::MissingRequiredData
        | CatalogServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        CatalogServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        CatalogServiceError::Sql(source) => {
            error!("catalog storage error: {source}");

            StatusError::bad_request().brief(source.to_string())
        }
    }
}
