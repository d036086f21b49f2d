//! App Context

use std::sync::Arc;

use chairside::{slots::SlotGenerator, windows::WindowError};
use jiff::tz::TimeZone;
use thiserror::Error;

use crate::{
    clock::{ShopClock, SystemClock},
    database::{self, Db},
    domain::{
        bookings::{BookingsService, PgBookingsService},
        catalog::{CatalogService, PgCatalogService},
        discounts::{DiscountsService, PgDiscountsService},
        schedules::{PgSchedulesService, SchedulesService},
        slots::{PgSlotsService, SlotsService},
    },
    payments::PaymentGateway,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("invalid slot granularity")]
    Granularity(#[source] WindowError),
}

/// Shop-wide settings shared by every service.
#[derive(Debug, Clone)]
pub struct ShopSettings {
    /// Zone that appointment dates and times are expressed in.
    pub zone: TimeZone,

    /// Distance between candidate slot start times.
    pub slot_granularity_minutes: u16,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            zone: TimeZone::UTC,
            slot_granularity_minutes: 30,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub schedules: Arc<dyn SchedulesService>,
    pub catalog: Arc<dyn CatalogService>,
    pub slots: Arc<dyn SlotsService>,
    pub discounts: Arc<dyn DiscountsService>,
    pub bookings: Arc<dyn BookingsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or the settings are
    /// unusable.
    pub async fn from_database_url(
        url: &str,
        settings: ShopSettings,
        payments: Arc<dyn PaymentGateway>,
    ) -> Result<Self, AppInitError> {
        let generator = SlotGenerator::new(settings.slot_granularity_minutes)
            .map_err(AppInitError::Granularity)?;

        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);
        let clock = ShopClock::new(Arc::new(SystemClock), settings.zone);

        Ok(Self {
            schedules: Arc::new(PgSchedulesService::new(db.clone())),
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            slots: Arc::new(PgSlotsService::new(db.clone(), generator, clock.clone())),
            discounts: Arc::new(PgDiscountsService::new(db.clone(), clock.clone())),
            bookings: Arc::new(PgBookingsService::new(db, generator, clock, payments)),
        })
    }
}
