//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        catalog::{
            data::{BarberPrice, NewService},
            errors::CatalogServiceError,
            records::{BarberServiceRecord, PricedService, ServiceRecord, ServiceUuid},
            repository::PgCatalogRepository,
        },
        identities::BarberUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    #[tracing::instrument(
        name = "catalog.service.create_service",
        skip(self, service),
        fields(service_uuid = %service.uuid),
        err
    )]
    async fn create_service(&self, service: NewService) -> Result<ServiceRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_service(&mut tx, service).await?;

        tx.commit().await?;

        info!(duration_minutes = created.duration_minutes, "service created");

        Ok(created)
    }

    #[tracing::instrument(
        name = "catalog.service.set_barber_price",
        skip(self, price),
        fields(barber_uuid = %price.barber, service_uuid = %price.service),
        err
    )]
    async fn set_barber_price(
        &self,
        price: BarberPrice,
    ) -> Result<BarberServiceRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let offered = self.repository.upsert_barber_service(&mut tx, price).await?;

        tx.commit().await?;

        info!(custom_price = ?offered.custom_price, "barber price saved");

        Ok(offered)
    }

    async fn get_service_price(
        &self,
        service: ServiceUuid,
        barber: BarberUuid,
    ) -> Result<PricedService, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let priced = self
            .repository
            .get_priced_service(&mut tx, service, barber)
            .await?;

        tx.commit().await?;

        Ok(priced)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Creates a service with a duration in minutes and a base price.
    async fn create_service(&self, service: NewService) -> Result<ServiceRecord, CatalogServiceError>;

    /// Offers a service by a barber, replacing any previous custom price.
    async fn set_barber_price(
        &self,
        price: BarberPrice,
    ) -> Result<BarberServiceRecord, CatalogServiceError>;

    /// Resolves a service as offered by a barber.
    async fn get_service_price(
        &self,
        service: ServiceUuid,
        barber: BarberUuid,
    ) -> Result<PricedService, CatalogServiceError>;
}
