//! Payment gateway errors.

use thiserror::Error;

/// Errors that can occur when communicating with the payment gateway.
#[derive(Debug, Error)]
pub enum PaymentGatewayError {
    /// The HTTP client could not be built.
    #[error("failed to build payment gateway client: {0}")]
    Client(#[source] reqwest::Error),

    /// No gateway URL was configured.
    #[error("payment gateway is not configured")]
    NotConfigured,

    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway returned a non-2xx response or unexpected body.
    #[error("unexpected response from payment gateway: {0}")]
    UnexpectedResponse(String),
}
