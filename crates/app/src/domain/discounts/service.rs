//! Discounts service.

use async_trait::async_trait;
use chairside::discounts::{
    DiscountContext, DiscountError, DiscountKind, Evaluation, Ineligibility, recommend,
};
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    clock::ShopClock,
    database::Db,
    domain::discounts::{
        data::{DiscountRequest, NewDiscount, RecommendationRequest},
        errors::DiscountsServiceError,
        models::{AppliedDiscount, DiscountRecommendation},
        records::DiscountRecord,
        repository::PgDiscountsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgDiscountsService {
    db: Db,
    repository: PgDiscountsRepository,
    clock: ShopClock,
}

impl PgDiscountsService {
    #[must_use]
    pub fn new(db: Db, clock: ShopClock) -> Self {
        Self {
            db,
            repository: PgDiscountsRepository::new(),
            clock,
        }
    }
}

/// Look a code up and evaluate it against the request in the caller's transaction.
pub(crate) async fn evaluate_code(
    repository: &PgDiscountsRepository,
    tx: &mut Transaction<'_, Postgres>,
    request: &DiscountRequest,
    now: Timestamp,
) -> Result<AppliedDiscount, DiscountsServiceError> {
    let discount = repository
        .find_by_code(tx, request.code.trim())
        .await?
        .ok_or(DiscountsServiceError::Ineligible(Ineligibility::CodeNotFound))?;

    let customer_redemptions = match discount.rule.max_uses_per_customer {
        Some(_) => Some(
            repository
                .count_customer_redemptions(tx, discount.uuid, request.customer)
                .await?,
        ),
        None => None,
    };

    let context = DiscountContext {
        barber: request.barber.into_uuid(),
        service: request.service.into_uuid(),
        original_price: request.original_price,
        now,
        customer_redemptions,
    };

    match discount.rule.evaluate(&context)? {
        Evaluation::Eligible(quote) => Ok(AppliedDiscount { discount, quote }),
        Evaluation::Ineligible(reason) => Err(DiscountsServiceError::Ineligible(reason)),
    }
}

#[async_trait]
impl DiscountsService for PgDiscountsService {
    #[tracing::instrument(
        name = "discounts.service.validate_discount",
        skip(self, request),
        fields(
            barber_uuid = %request.barber,
            service_uuid = %request.service,
            customer_uuid = %request.customer,
        ),
        err
    )]
    async fn validate_discount(
        &self,
        request: DiscountRequest,
    ) -> Result<AppliedDiscount, DiscountsServiceError> {
        let mut tx = self.db.begin().await?;

        let applied = evaluate_code(&self.repository, &mut tx, &request, self.clock.now()).await?;

        tx.commit().await?;

        Ok(applied)
    }

    #[tracing::instrument(
        name = "discounts.service.recommend_discounts",
        skip(self, request),
        fields(barber_uuid = %request.barber, service_uuid = %request.service),
        err
    )]
    async fn recommend_discounts(
        &self,
        request: RecommendationRequest,
    ) -> Result<Vec<DiscountRecommendation>, DiscountsServiceError> {
        let mut tx = self.db.begin_snapshot().await?;

        let discounts = self.repository.list_active_discounts(&mut tx).await?;

        let redemptions = match request.customer {
            Some(customer) => Some(
                self.repository
                    .list_customer_redemptions(&mut tx, customer)
                    .await?,
            ),
            None => None,
        };

        tx.commit().await?;

        let context = DiscountContext {
            barber: request.barber.into_uuid(),
            service: request.service.into_uuid(),
            original_price: request.original_price,
            now: self.clock.now(),
            customer_redemptions: None,
        };

        let ranked = recommend(
            discounts,
            |discount| {
                let used = redemptions
                    .as_ref()
                    .map(|counts| counts.get(&discount.uuid).copied().unwrap_or(0));

                (&discount.rule, used)
            },
            &context,
        )?;

        Ok(ranked)
    }

    #[tracing::instrument(
        name = "discounts.service.create_discount",
        skip(self, discount),
        fields(discount_uuid = %discount.uuid, discount_kind = discount.kind.as_str()),
        err
    )]
    async fn create_discount(
        &self,
        discount: NewDiscount,
    ) -> Result<DiscountRecord, DiscountsServiceError> {
        if discount.code.trim().is_empty() || discount.code.trim() != discount.code {
            return Err(DiscountsServiceError::InvalidData);
        }

        if let DiscountKind::Percentage { percent, .. } = discount.kind
            && !(1..=100).contains(&percent)
        {
            return Err(DiscountError::PercentRange(percent).into());
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_discount(&mut tx, discount).await?;

        tx.commit().await?;

        info!(code = %created.code, "discount created");

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait DiscountsService: Send + Sync {
    /// Checks a code against a prospective booking without using it.
    ///
    /// Ineligible codes are reported as [`DiscountsServiceError::Ineligible`].
    async fn validate_discount(
        &self,
        request: DiscountRequest,
    ) -> Result<AppliedDiscount, DiscountsServiceError>;

    /// Evaluates every active discount covering the barber and service, largest saving first.
    async fn recommend_discounts(
        &self,
        request: RecommendationRequest,
    ) -> Result<Vec<DiscountRecommendation>, DiscountsServiceError>;

    /// Creates a discount.
    async fn create_discount(
        &self,
        discount: NewDiscount,
    ) -> Result<DiscountRecord, DiscountsServiceError>;
}
