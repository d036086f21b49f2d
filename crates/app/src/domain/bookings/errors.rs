//! Bookings service errors.

use chairside::{
    bookings::TransitionError,
    discounts::{DiscountError, Ineligibility},
};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{database::violated_constraint, domain::discounts::DiscountsServiceError};

#[derive(Debug, Error)]
pub enum BookingsServiceError {
    #[error("booking not found")]
    NotFound,

    #[error("booking already exists")]
    AlreadyExists,

    /// The service does not exist or the barber does not offer it.
    #[error("service not offered by this barber")]
    ServiceNotOffered,

    /// The requested time is taken or otherwise not bookable.
    #[error("requested slot is not available")]
    SlotUnavailable,

    #[error("discount cannot be applied: {0}")]
    DiscountIneligible(Ineligibility),

    #[error(transparent)]
    Lifecycle(#[from] TransitionError),

    /// Cancellation has its own operation with its own notice rules.
    #[error("bookings are cancelled through cancellation, not a status change")]
    CancellationRequired,

    /// Another request changed the booking between read and write.
    #[error("booking was modified concurrently")]
    StatusChanged,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("appointment time cannot be placed in the shop time zone")]
    InvalidTime(#[source] jiff::Error),

    #[error("discount amount could not be calculated")]
    Discount(#[source] DiscountError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for BookingsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match violated_constraint(&error) {
            Some("bookings_no_overlap") => return Self::SlotUnavailable,
            Some("discounts_usage_within_limit") => {
                return Self::DiscountIneligible(Ineligibility::UsageExhausted);
            }
            _ => {}
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

impl From<DiscountsServiceError> for BookingsServiceError {
    fn from(error: DiscountsServiceError) -> Self {
        match error {
            DiscountsServiceError::Ineligible(reason) => Self::DiscountIneligible(reason),
            DiscountsServiceError::NotFound => {
                Self::DiscountIneligible(Ineligibility::CodeNotFound)
            }
            DiscountsServiceError::Evaluation(error) => Self::Discount(error),
            DiscountsServiceError::Sql(error) => Self::Sql(error),
            DiscountsServiceError::InvalidReference => Self::InvalidReference,
            DiscountsServiceError::MissingRequiredData => Self::MissingRequiredData,
            DiscountsServiceError::AlreadyExists | DiscountsServiceError::InvalidData => {
                Self::InvalidData
            }
        }
    }
}
