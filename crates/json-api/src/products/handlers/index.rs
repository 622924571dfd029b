//! Product Index Handler

use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use vitrine_app::catalog::{data::CatalogFilter, records::ProductView};

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Product View Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The generated product identifier
    pub id: i64,

    pub name: String,

    pub description: Option<String>,

    /// Price with two-decimal monetary semantics
    pub price: f64,

    pub category: Option<String>,

    /// The date and time the product was created
    pub created_at: String,

    /// Whether the product appears in public listings
    pub is_visible: bool,

    /// Image URLs, ordered by insertion; empty when the product has none
    pub images: Vec<String>,
}

impl From<ProductView> for ProductResponse {
    fn from(view: ProductView) -> Self {
        Self {
            id: view.id.into_inner(),
            name: view.name,
            description: view.description,
            price: view.price.to_f64().unwrap_or_default(),
            category: view.category,
            created_at: view.created_at.to_string(),
            is_visible: view.is_visible,
            images: view.images,
        }
    }
}

/// Product Listing Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The filtered product listing
    pub data: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns the catalog, optionally restricted to visible products and a
/// single category.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let public_only = req.query::<String>("publicOnly").as_deref() == Some("true");
    let category = req.query::<String>("category");

    let products = state
        .app
        .catalog
        .list_products(CatalogFilter::new(public_only, category))
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        data: products.into_iter().map(Into::into).collect(),
    }))
}
