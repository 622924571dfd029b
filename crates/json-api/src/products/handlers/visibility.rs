//! Product Visibility Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use vitrine_app::catalog::records::ProductId;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Visibility Update Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VisibilityRequest {
    pub is_visible: bool,
}

/// Visibility Update Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VisibilityResponse {
    pub message: String,
    /// Number of rows the update touched
    pub changes: u64,
}

/// Product Visibility Handler
///
/// Toggles whether a product appears in public listings. Idempotent.
#[endpoint(
    tags("products"),
    summary = "Set Product Visibility",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Visibility updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<VisibilityRequest>,
    depot: &mut Depot,
) -> Result<Json<VisibilityResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_identity_or_401()?;

    let changes = state
        .app
        .catalog
        .set_visibility(ProductId::new(id.into_inner()), json.into_inner().is_visible)
        .await
        .map_err(into_status_error)?;

    Ok(Json(VisibilityResponse {
        message: "Visibility updated".to_owned(),
        changes,
    }))
}
