//! Payment collaborator
//!
//! Bookings are priced and reserved here; taking the money is someone else's job. After a
//! booking commits, the coordinator asks the gateway for an opaque payment reference and the
//! gateway later reports the outcome back through the payment-outcome operation.

use async_trait::async_trait;
use mockall::automock;

use crate::domain::bookings::records::BookingUuid;

mod errors;
mod http;

pub use errors::PaymentGatewayError;
pub use http::{HttpPaymentGateway, PaymentGatewayConfig};

/// Money owed for a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentRequest {
    pub booking: BookingUuid,
    pub amount: u64,
}

/// Opaque identifier the gateway uses for a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReference(pub String);

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opens a payment for a booking and returns its reference.
    async fn request_payment(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentReference, PaymentGatewayError>;
}

/// Gateway used when no payment provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPaymentGateway;

#[async_trait]
impl PaymentGateway for DisabledPaymentGateway {
    async fn request_payment(
        &self,
        _request: PaymentRequest,
    ) -> Result<PaymentReference, PaymentGatewayError> {
        Err(PaymentGatewayError::NotConfigured)
    }
}
