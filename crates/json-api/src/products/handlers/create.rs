//! Create Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

use vitrine_app::catalog::data::{ImageUpload, NewProduct};

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Maximum number of image files accepted per product.
const MAX_IMAGES: usize = 10;

/// Created product summary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatedProduct {
    /// The generated product identifier
    pub id: i64,
    pub name: String,
}

/// Product Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCreatedResponse {
    pub message: String,
    pub data: CreatedProduct,
}

/// Create Product Handler
///
/// Accepts a multipart form with product fields and up to ten image
/// files. Image files that fail to store are skipped; the product is
/// created regardless.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_identity_or_401()?.clone();

    let form = req
        .form_data()
        .await
        .map_err(|_error| StatusError::bad_request().brief("Expected multipart form data"))?;

    let name = form
        .fields
        .get("name")
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty());

    let price = form
        .fields
        .get("price")
        .and_then(|price| price.trim().parse::<Decimal>().ok());

    let (Some(name), Some(price)) = (name, price) else {
        return Err(StatusError::bad_request().brief("Name and price are required"));
    };

    let description = form
        .fields
        .get("description")
        .cloned()
        .filter(|description| !description.is_empty());

    let category = form
        .fields
        .get("category")
        .cloned()
        .filter(|category| !category.is_empty());

    // Visible unless explicitly turned off.
    let is_visible = form
        .fields
        .get("is_visible")
        .is_none_or(|value| matches!(value.as_str(), "true" | "1"));

    let images: Vec<ImageUpload> = form
        .files
        .get_vec("images")
        .map(|files| {
            files
                .iter()
                .map(|file| ImageUpload {
                    original_name: file.name().unwrap_or("upload").to_owned(),
                    source: file.path().to_path_buf(),
                })
                .collect()
        })
        .unwrap_or_default();

    if images.len() > MAX_IMAGES {
        return Err(StatusError::bad_request().brief("Too many image files"));
    }

    let product = NewProduct {
        name,
        description,
        price,
        category,
        is_visible,
    };

    let created = state
        .app
        .catalog
        .create_product(product, images)
        .await
        .map_err(into_status_error)?;

    info!(admin = %admin.username, product = %created.id, "product created");

    res.add_header(LOCATION, format!("/api/products/{}", created.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductCreatedResponse {
        message: "Product created".to_owned(),
        data: CreatedProduct {
            id: created.id.into_inner(),
            name: created.name,
        },
    }))
}
