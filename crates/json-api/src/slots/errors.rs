//! Slot Errors

use salvo::http::StatusError;
use tracing::error;

use chairside_app::domain::slots::SlotsServiceError;

pub(crate) fn into_status_error(error: SlotsServiceError) -> StatusError {
    match error {
        SlotsServiceError::ServiceNotFound => {
            StatusError::not_found().brief("Service not offered by this barber")
        }
        SlotsServiceError::Sql(source) => {
            error!("failed to generate slots: {source}");

            StatusError::internal_server_error()
        }
    }
}
