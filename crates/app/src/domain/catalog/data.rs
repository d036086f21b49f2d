//! Catalog Data

use crate::domain::{catalog::records::ServiceUuid, identities::BarberUuid};

/// New Service Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewService {
    pub uuid: ServiceUuid,
    pub name: String,
    pub duration_minutes: u32,
    pub base_price: u64,
}

/// Offer a service by a barber, optionally at their own price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarberPrice {
    pub barber: BarberUuid,
    pub service: ServiceUuid,
    pub custom_price: Option<u64>,
}
