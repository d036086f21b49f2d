//! Slots service.

use async_trait::async_trait;
use chairside::slots::{Slot, SlotGenerator};
use jiff::civil::Date;
use mockall::automock;

use crate::{
    clock::ShopClock,
    database::Db,
    domain::{
        catalog::{records::ServiceUuid, repository::PgCatalogRepository},
        identities::BarberUuid,
        slots::{errors::SlotsServiceError, repository::PgDayPlanRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgSlotsService {
    db: Db,
    plans: PgDayPlanRepository,
    catalog: PgCatalogRepository,
    generator: SlotGenerator,
    clock: ShopClock,
}

impl PgSlotsService {
    #[must_use]
    pub fn new(db: Db, generator: SlotGenerator, clock: ShopClock) -> Self {
        Self {
            db,
            plans: PgDayPlanRepository::new(),
            catalog: PgCatalogRepository::new(),
            generator,
            clock,
        }
    }
}

#[async_trait]
impl SlotsService for PgSlotsService {
    #[tracing::instrument(
        name = "slots.service.generate_slots",
        skip(self),
        fields(barber_uuid = %barber, service_uuid = %service, date = %date),
        err
    )]
    async fn generate_slots(
        &self,
        barber: BarberUuid,
        date: Date,
        service: ServiceUuid,
    ) -> Result<Vec<Slot>, SlotsServiceError> {
        let mut tx = self.db.begin_snapshot().await?;

        let priced = self
            .catalog
            .get_priced_service(&mut tx, service, barber)
            .await?;

        let plan = self.plans.load_day_plan(&mut tx, barber, date).await?;

        tx.commit().await?;

        Ok(self
            .generator
            .generate(&plan, date, priced.service.duration(), self.clock.local_now()))
    }
}

#[automock]
#[async_trait]
pub trait SlotsService: Send + Sync {
    /// Lists candidate start times for a service with a barber on a date, ascending.
    ///
    /// An empty list means the barber is not working that date.
    async fn generate_slots(
        &self,
        barber: BarberUuid,
        date: Date,
        service: ServiceUuid,
    ) -> Result<Vec<Slot>, SlotsServiceError>;
}
