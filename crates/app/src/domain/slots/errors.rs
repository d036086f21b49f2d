//! Slots service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlotsServiceError {
    /// The service does not exist or the barber does not offer it.
    #[error("service not offered by this barber")]
    ServiceNotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for SlotsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::ServiceNotFound,
            error => Self::Sql(error),
        }
    }
}
