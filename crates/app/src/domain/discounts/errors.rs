//! Discounts service errors.

use chairside::discounts::{DiscountError, Ineligibility};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::database::violated_constraint;

#[derive(Debug, Error)]
pub enum DiscountsServiceError {
    #[error("discount code already exists")]
    AlreadyExists,

    #[error("discount not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("discount cannot be applied: {0}")]
    Ineligible(Ineligibility),

    #[error("discount amount could not be calculated")]
    Evaluation(#[from] DiscountError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for DiscountsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if violated_constraint(&error) == Some("discounts_usage_within_limit") {
            return Self::Ineligible(Ineligibility::UsageExhausted);
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
