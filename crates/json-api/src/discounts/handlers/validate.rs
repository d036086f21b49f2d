//! Validate Discount Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chairside_app::domain::{
    catalog::records::ServiceUuid,
    discounts::{DiscountsServiceError, data::DiscountRequest, models::AppliedDiscount},
    identities::{BarberUuid, CustomerUuid},
};

use crate::{
    discounts::{errors::into_status_error, models::DiscountResponse},
    extensions::*,
    state::State,
};

/// Validate Discount Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidateDiscountRequest {
    pub code: String,
    pub service: Uuid,
    pub barber: Uuid,

    /// Price before discount, in minor units
    pub original_price: u64,
}

impl ValidateDiscountRequest {
    fn for_customer(self, customer: CustomerUuid) -> DiscountRequest {
        DiscountRequest {
            code: self.code,
            barber: BarberUuid::from_uuid(self.barber),
            service: ServiceUuid::from_uuid(self.service),
            original_price: self.original_price,
            customer,
        }
    }
}

/// An applicable discount with the amounts it produces.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppliedDiscountResponse {
    #[serde(flatten)]
    pub discount: DiscountResponse,

    pub original_price: u64,
    pub discount_amount: u64,
    pub final_price: u64,
}

impl From<AppliedDiscount> for AppliedDiscountResponse {
    fn from(applied: AppliedDiscount) -> Self {
        Self {
            discount: DiscountResponse::from(&applied.discount),
            original_price: applied.quote.original_price,
            discount_amount: applied.quote.discount_amount,
            final_price: applied.quote.total_price,
        }
    }
}

/// Validate Discount Response
///
/// Ineligible codes are an answer, not a failure: `success` is false and `reason` says why.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidateDiscountResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<AppliedDiscountResponse>,

    /// Machine-readable ineligibility reason, e.g. `min-order-not-met`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Validate Discount Handler
#[endpoint(
    tags("discounts"),
    summary = "Validate Discount Code",
    responses(
        (status_code = StatusCode::OK, description = "Eligibility of the code"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing customer identity"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ValidateDiscountRequest>,
    depot: &mut Depot,
) -> Result<Json<ValidateDiscountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let response = match state
        .app
        .discounts
        .validate_discount(json.into_inner().for_customer(customer))
        .await
    {
        Ok(applied) => ValidateDiscountResponse {
            success: true,
            discount: Some(applied.into()),
            reason: None,
            message: None,
        },
        Err(DiscountsServiceError::Ineligible(reason)) => ValidateDiscountResponse {
            success: false,
            discount: None,
            reason: Some(reason.as_str().to_string()),
            message: Some(reason.to_string()),
        },
        Err(error) => return Err(into_status_error(error)),
    };

    Ok(Json(response))
}
