//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use vitrine_app::{
    auth::{AdminIdentity, MockAuthService},
    catalog::{
        MockCatalogService,
        records::{ProductId, ProductRecord, ProductView},
    },
    context::AppContext,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_ADMIN_USERNAME: &str = "Jessicabat";

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_admin_identity(AdminIdentity {
        username: TEST_ADMIN_USERNAME.to_owned(),
    });
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_list_products().never();
    catalog.expect_create_product().never();
    catalog.expect_set_visibility().never();
    catalog.expect_delete_product().never();

    catalog
}

pub(crate) fn state_with_catalog(catalog: MockCatalogService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        catalog: Arc::new(catalog),
        auth: Arc::new(strict_auth_mock()),
    }))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        catalog: Arc::new(strict_catalog_mock()),
        auth: Arc::new(auth),
    }))
}

pub(crate) fn catalog_service(catalog: MockCatalogService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_catalog(catalog)))
            .hoop(inject_admin)
            .push(route),
    )
}

pub(crate) fn login_service(auth: MockAuthService, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state_with_auth(auth))).push(route))
}

pub(crate) fn make_product(id: i64) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(id),
        name: "Colar Teste".to_owned(),
        description: None,
        price: Decimal::new(5000, 2),
        category: Some("Colares".to_owned()),
        created_at: Timestamp::UNIX_EPOCH,
        is_visible: true,
    }
}

pub(crate) fn make_view(id: i64, images: Vec<String>) -> ProductView {
    let product = make_product(id);

    ProductView {
        id: product.id,
        name: product.name,
        description: product.description,
        price: product.price,
        category: product.category,
        created_at: product.created_at,
        is_visible: product.is_visible,
        images,
    }
}
