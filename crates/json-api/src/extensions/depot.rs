//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use chairside_app::domain::identities::CustomerUuid;

const CUSTOMER_UUID_DEPOT_KEY: &str = "customer_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_customer_uuid(&mut self, customer: CustomerUuid);

    /// The customer established by the customer middleware, if any.
    fn customer_uuid(&self) -> Option<CustomerUuid>;

    fn customer_uuid_or_401(&self) -> Result<CustomerUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_customer_uuid(&mut self, customer: CustomerUuid) {
        self.insert(CUSTOMER_UUID_DEPOT_KEY, customer);
    }

    fn customer_uuid(&self) -> Option<CustomerUuid> {
        self.get::<CustomerUuid>(CUSTOMER_UUID_DEPOT_KEY).ok().copied()
    }

    fn customer_uuid_or_401(&self) -> Result<CustomerUuid, StatusError> {
        self.customer_uuid()
            .ok_or_else(|| StatusError::unauthorized().brief("Missing customer identity"))
    }
}
