//! Catalog Records

use chairside::pricing::ServicePrice;
use jiff::{SignedDuration, Timestamp};

use crate::{domain::identities::BarberUuid, uuids::TypedUuid};

/// Service UUID
pub type ServiceUuid = TypedUuid<ServiceRecord>;

/// Service Record
#[derive(Debug, Clone)]
pub struct ServiceRecord {
    pub uuid: ServiceUuid,
    pub name: String,
    pub duration_minutes: u32,
    pub base_price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ServiceRecord {
    /// How long an appointment for this service lasts.
    #[must_use]
    pub fn duration(&self) -> SignedDuration {
        SignedDuration::from_mins(i64::from(self.duration_minutes))
    }
}

/// A barber's offer of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarberServiceRecord {
    pub barber: BarberUuid,
    pub service: ServiceUuid,
    pub custom_price: Option<u64>,
}

/// A service as offered by one barber.
#[derive(Debug, Clone)]
pub struct PricedService {
    pub service: ServiceRecord,
    pub price: ServicePrice,
}
