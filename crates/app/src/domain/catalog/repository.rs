//! Catalog Repository

use chairside::pricing::ServicePrice;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{amount_from_db, amount_to_db, count_from_db, count_to_db},
    domain::{
        catalog::{
            data::{BarberPrice, NewService},
            records::{BarberServiceRecord, PricedService, ServiceRecord, ServiceUuid},
        },
        identities::BarberUuid,
    },
};

const CREATE_SERVICE_SQL: &str = include_str!("sql/create_service.sql");
const UPSERT_BARBER_SERVICE_SQL: &str = include_str!("sql/upsert_barber_service.sql");
const GET_PRICED_SERVICE_SQL: &str = include_str!("sql/get_priced_service.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_service(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        service: NewService,
    ) -> Result<ServiceRecord, sqlx::Error> {
        query_as::<Postgres, ServiceRecord>(CREATE_SERVICE_SQL)
            .bind(service.uuid.into_uuid())
            .bind(service.name)
            .bind(count_to_db("duration_minutes", service.duration_minutes)?)
            .bind(amount_to_db("base_price", service.base_price)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_barber_service(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        price: BarberPrice,
    ) -> Result<BarberServiceRecord, sqlx::Error> {
        let custom_price = price
            .custom_price
            .map(|amount| amount_to_db("custom_price", amount))
            .transpose()?;

        query_as::<Postgres, BarberServiceRecord>(UPSERT_BARBER_SERVICE_SQL)
            .bind(price.barber.into_uuid())
            .bind(price.service.into_uuid())
            .bind(custom_price)
            .fetch_one(&mut **tx)
            .await
    }

    /// Fails with [`sqlx::Error::RowNotFound`] when the barber does not offer the service.
    pub(crate) async fn get_priced_service(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        service: ServiceUuid,
        barber: BarberUuid,
    ) -> Result<PricedService, sqlx::Error> {
        let row = sqlx::query(GET_PRICED_SERVICE_SQL)
            .bind(service.into_uuid())
            .bind(barber.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        let service = ServiceRecord::from_row(&row)?;

        let barber_override = row
            .try_get::<Option<i64>, _>("custom_price")?
            .map(|amount| amount_from_db("custom_price", amount))
            .transpose()?;

        Ok(PricedService {
            price: ServicePrice {
                base_price: service.base_price,
                barber_override,
            },
            service,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ServiceRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ServiceUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            duration_minutes: count_from_db("duration_minutes", row.try_get("duration_minutes")?)?,
            base_price: amount_from_db("base_price", row.try_get("base_price")?)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for BarberServiceRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            barber: BarberUuid::from_uuid(row.try_get("barber_uuid")?),
            service: ServiceUuid::from_uuid(row.try_get("service_uuid")?),
            custom_price: row
                .try_get::<Option<i64>, _>("custom_price")?
                .map(|amount| amount_from_db("custom_price", amount))
                .transpose()?,
        })
    }
}
