//! Discount Errors

use salvo::http::StatusError;
use tracing::error;

use chairside_app::domain::discounts::DiscountsServiceError;

pub(crate) fn into_status_error(error: DiscountsServiceError) -> StatusError {
    match error {
        DiscountsServiceError::Ineligible(reason) => StatusError::unprocessable_entity()
            .brief("discount_ineligible")
            .detail(reason.as_str()),
        DiscountsServiceError::NotFound => StatusError::not_found().brief("Discount not found"),
        DiscountsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Discount code already exists")
        }
        DiscountsServiceError::InvalidReference
        | DiscountsServiceError::MissingRequiredData
        | DiscountsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid discount payload")
        }
        DiscountsServiceError::Evaluation(source) => {
            error!("failed to calculate discount amount: {source}");

            StatusError::internal_server_error()
        }
        DiscountsServiceError::Sql(source) => {
            error!("failed to evaluate discount: {source}");

            StatusError::internal_server_error()
        }
    }
}
