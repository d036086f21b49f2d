//! Discount Recommendations Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chairside::discounts::Evaluation;
use chairside_app::domain::{
    catalog::records::ServiceUuid,
    discounts::{data::RecommendationRequest, models::DiscountRecommendation},
    identities::BarberUuid,
};

use crate::{
    discounts::{errors::into_status_error, models::DiscountResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RecommendationResponse {
    #[serde(flatten)]
    pub discount: DiscountResponse,

    pub is_eligible: bool,

    /// Amount taken off, when eligible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,

    /// Price after the discount, when eligible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_price: Option<u64>,

    /// Why the discount does not apply, when ineligible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<DiscountRecommendation> for RecommendationResponse {
    fn from(recommendation: DiscountRecommendation) -> Self {
        let discount = DiscountResponse::from(&recommendation.item);

        match recommendation.evaluation {
            Evaluation::Eligible(quote) => Self {
                discount,
                is_eligible: true,
                amount: Some(quote.discount_amount),
                final_price: Some(quote.total_price),
                reason: None,
            },
            Evaluation::Ineligible(reason) => Self {
                discount,
                is_eligible: false,
                amount: None,
                final_price: None,
                reason: Some(reason.as_str().to_string()),
            },
        }
    }
}

/// Discount Recommendations Handler
///
/// Evaluates every active discount covering the barber and service, largest saving first.
/// Per-customer limits are only checked when the request carries a customer identity.
#[endpoint(
    tags("discounts"),
    summary = "Recommend Discounts",
    responses(
        (status_code = StatusCode::OK, description = "Discounts ranked by amount off"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed query"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    service: QueryParam<Uuid, true>,
    barber: QueryParam<Uuid, true>,
    original_price: QueryParam<u64, true>,
    depot: &mut Depot,
) -> Result<Json<Vec<RecommendationResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let recommendations = state
        .app
        .discounts
        .recommend_discounts(RecommendationRequest {
            barber: BarberUuid::from_uuid(barber.into_inner()),
            service: ServiceUuid::from_uuid(service.into_inner()),
            original_price: original_price.into_inner(),
            customer: depot.customer_uuid(),
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(recommendations.into_iter().map(Into::into).collect()))
}
