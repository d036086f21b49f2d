//! Discounts Repository

use chairside::discounts::{DiscountKind, DiscountRule, DiscountScope};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    database::{amount_from_db, amount_to_db, column_error, count_from_db, count_to_db},
    domain::{
        discounts::{
            data::{NewDiscount, NewRedemption},
            records::{DiscountRecord, DiscountUuid},
        },
        identities::CustomerUuid,
    },
};

const FIND_DISCOUNT_BY_CODE_SQL: &str = include_str!("sql/find_discount_by_code.sql");
const GET_DISCOUNT_SQL: &str = include_str!("sql/get_discount.sql");
const LIST_ACTIVE_DISCOUNTS_SQL: &str = include_str!("sql/list_active_discounts.sql");
const CREATE_DISCOUNT_SQL: &str = include_str!("sql/create_discount.sql");
const CREATE_DISCOUNT_BARBERS_SQL: &str = include_str!("sql/create_discount_barbers.sql");
const CREATE_DISCOUNT_SERVICES_SQL: &str = include_str!("sql/create_discount_services.sql");
const INCREMENT_USAGE_SQL: &str = include_str!("sql/increment_usage.sql");
const CREATE_REDEMPTION_SQL: &str = include_str!("sql/create_redemption.sql");
const COUNT_CUSTOMER_REDEMPTIONS_SQL: &str = include_str!("sql/count_customer_redemptions.sql");
const LIST_CUSTOMER_REDEMPTIONS_SQL: &str = include_str!("sql/list_customer_redemptions.sql");

#[derive(Debug, Error)]
#[error("unrecognised value {0:?}")]
struct UnknownValue(String);

#[derive(Debug, Clone, Default)]
pub(crate) struct PgDiscountsRepository;

impl PgDiscountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Case-insensitive lookup.
    pub(crate) async fn find_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<DiscountRecord>, sqlx::Error> {
        query_as::<Postgres, DiscountRecord>(FIND_DISCOUNT_BY_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_discount(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        discount: DiscountUuid,
    ) -> Result<DiscountRecord, sqlx::Error> {
        query_as::<Postgres, DiscountRecord>(GET_DISCOUNT_SQL)
            .bind(discount.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Active discounts ordered by code.
    pub(crate) async fn list_active_discounts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<DiscountRecord>, sqlx::Error> {
        query_as::<Postgres, DiscountRecord>(LIST_ACTIVE_DISCOUNTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_discount(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        discount: NewDiscount,
    ) -> Result<DiscountRecord, sqlx::Error> {
        let (value, cap) = match discount.kind {
            DiscountKind::Percentage { percent, cap } => (u64::from(percent), cap),
            DiscountKind::Fixed { amount } => (amount, None),
        };

        query(CREATE_DISCOUNT_SQL)
            .bind(discount.uuid.into_uuid())
            .bind(&discount.code)
            .bind(&discount.name)
            .bind(discount.kind.as_str())
            .bind(amount_to_db("discount_value", value)?)
            .bind(amount_to_db("min_order_amount", discount.min_order_amount)?)
            .bind(
                cap.map(|cap| amount_to_db("max_discount_amount", cap))
                    .transpose()?,
            )
            .bind(discount.valid_from.map(SqlxTimestamp::from))
            .bind(discount.valid_until.map(SqlxTimestamp::from))
            .bind(
                discount
                    .max_uses
                    .map(|max| count_to_db("max_uses", max))
                    .transpose()?,
            )
            .bind(
                discount
                    .max_uses_per_customer
                    .map(|max| count_to_db("max_uses_per_customer", max))
                    .transpose()?,
            )
            .bind(discount.is_active)
            .bind(discount.scope.as_str())
            .execute(&mut **tx)
            .await?;

        let members = match &discount.scope {
            DiscountScope::All => None,
            DiscountScope::Barbers(barbers) => Some((CREATE_DISCOUNT_BARBERS_SQL, barbers)),
            DiscountScope::Services(services) => Some((CREATE_DISCOUNT_SERVICES_SQL, services)),
        };

        if let Some((sql, uuids)) = members {
            query(sql)
                .bind(discount.uuid.into_uuid())
                .bind(uuids.iter().copied().collect::<Vec<Uuid>>())
                .execute(&mut **tx)
                .await?;
        }

        self.get_discount(tx, discount.uuid).await
    }

    /// Take one use if any remain. Returns the number of rows updated, zero when exhausted.
    pub(crate) async fn increment_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        discount: DiscountUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INCREMENT_USAGE_SQL)
            .bind(discount.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_redemption(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        redemption: NewRedemption,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_REDEMPTION_SQL)
            .bind(redemption.uuid.into_uuid())
            .bind(redemption.discount.into_uuid())
            .bind(redemption.customer.into_uuid())
            .bind(redemption.booking.into_uuid())
            .bind(amount_to_db("amount", redemption.amount)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn count_customer_redemptions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        discount: DiscountUuid,
        customer: CustomerUuid,
    ) -> Result<u32, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_CUSTOMER_REDEMPTIONS_SQL)
            .bind(discount.into_uuid())
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u32::try_from(count).map_err(|error| column_error("count", error))
    }

    /// Redemptions by one customer, keyed by discount.
    pub(crate) async fn list_customer_redemptions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<FxHashMap<DiscountUuid, u32>, sqlx::Error> {
        query(LIST_CUSTOMER_REDEMPTIONS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await?
            .iter()
            .map(|row| -> sqlx::Result<(DiscountUuid, u32)> {
                let redemptions: i64 = row.try_get("redemptions")?;

                Ok((
                    DiscountUuid::from_uuid(row.try_get("discount_uuid")?),
                    u32::try_from(redemptions).map_err(|error| column_error("redemptions", error))?,
                ))
            })
            .collect()
    }
}

fn kind_from_row(row: &PgRow) -> sqlx::Result<DiscountKind> {
    let value = amount_from_db("discount_value", row.try_get("discount_value")?)?;

    match row.try_get::<String, _>("discount_type")?.as_str() {
        "percentage" => Ok(DiscountKind::Percentage {
            percent: u8::try_from(value).map_err(|error| column_error("discount_value", error))?,
            cap: row
                .try_get::<Option<i64>, _>("max_discount_amount")?
                .map(|cap| amount_from_db("max_discount_amount", cap))
                .transpose()?,
        }),
        "fixed" => Ok(DiscountKind::Fixed { amount: value }),
        other => Err(column_error("discount_type", UnknownValue(other.to_string()))),
    }
}

fn scope_from_row(row: &PgRow) -> sqlx::Result<DiscountScope> {
    match row.try_get::<String, _>("applies_to")?.as_str() {
        "all" => Ok(DiscountScope::All),
        "barbers" => Ok(DiscountScope::Barbers(
            row.try_get::<Vec<Uuid>, _>("barber_uuids")?
                .into_iter()
                .collect(),
        )),
        "services" => Ok(DiscountScope::Services(
            row.try_get::<Vec<Uuid>, _>("service_uuids")?
                .into_iter()
                .collect(),
        )),
        other => Err(column_error("applies_to", UnknownValue(other.to_string()))),
    }
}

impl<'r> FromRow<'r, PgRow> for DiscountRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let limit = |column: &str| -> sqlx::Result<Option<u32>> {
            row.try_get::<Option<i32>, _>(column)?
                .map(|max| count_from_db(column, max))
                .transpose()
        };

        let rule = DiscountRule {
            kind: kind_from_row(row)?,
            min_order_amount: amount_from_db("min_order_amount", row.try_get("min_order_amount")?)?,
            valid_from: row
                .try_get::<Option<SqlxTimestamp>, _>("valid_from")?
                .map(SqlxTimestamp::to_jiff),
            valid_until: row
                .try_get::<Option<SqlxTimestamp>, _>("valid_until")?
                .map(SqlxTimestamp::to_jiff),
            max_uses: limit("max_uses")?,
            max_uses_per_customer: limit("max_uses_per_customer")?,
            usage_count: count_from_db("usage_count", row.try_get("usage_count")?)?,
            is_active: row.try_get("is_active")?,
            scope: scope_from_row(row)?,
        };

        Ok(Self {
            uuid: DiscountUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            name: row.try_get("name")?,
            rule,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
