//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use vitrine_app::auth::AdminIdentity;

const ADMIN_IDENTITY_KEY: &str = "vitrine.admin_identity";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_admin_identity(&mut self, identity: AdminIdentity);

    fn admin_identity_or_401(&self) -> Result<&AdminIdentity, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_admin_identity(&mut self, identity: AdminIdentity) {
        self.insert(ADMIN_IDENTITY_KEY, identity);
    }

    fn admin_identity_or_401(&self) -> Result<&AdminIdentity, StatusError> {
        self.get::<AdminIdentity>(ADMIN_IDENTITY_KEY)
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}
