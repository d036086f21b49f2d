//! HTTP payment gateway client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::payments::{PaymentGateway, PaymentGatewayError, PaymentReference, PaymentRequest};

/// Configuration for reaching the payment gateway.
#[derive(Debug, Clone)]
pub struct PaymentGatewayConfig {
    /// Gateway base URL, e.g. `"https://payments.example.com"`.
    pub base_url: String,

    /// Bearer token sent with every request.
    pub token: String,

    /// Upper bound on a whole payment request, connect to last byte.
    pub timeout: Duration,
}

/// Payment gateway reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    config: PaymentGatewayConfig,
    http: Client,
}

impl HttpPaymentGateway {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentGatewayError::Client`] when the TLS backend cannot be initialised.
    pub fn new(config: PaymentGatewayConfig) -> Result<Self, PaymentGatewayError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(PaymentGatewayError::Client)?;

        Ok(Self { config, http })
    }

    fn payments_url(&self) -> String {
        format!("{}/payments", self.config.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct CreatePaymentBody {
    booking_uuid: Uuid,
    amount: u64,
}

#[derive(Debug, Deserialize)]
struct CreatePaymentResponse {
    reference: String,
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    #[tracing::instrument(
        name = "payments.http.request_payment",
        skip(self, request),
        fields(booking_uuid = %request.booking, amount = request.amount),
        err
    )]
    async fn request_payment(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentReference, PaymentGatewayError> {
        let response = self
            .http
            .post(self.payments_url())
            .bearer_auth(&self.config.token)
            .json(&CreatePaymentBody {
                booking_uuid: request.booking.into_uuid(),
                amount: request.amount,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentGatewayError::UnexpectedResponse(format!(
                "payment request failed with status {status}: {text}"
            )));
        }

        let parsed: CreatePaymentResponse = response.json().await?;

        if parsed.reference.trim().is_empty() {
            return Err(PaymentGatewayError::UnexpectedResponse(
                "payment reference was empty".to_string(),
            ));
        }

        Ok(PaymentReference(parsed.reference))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::bookings::records::BookingUuid;

    use super::*;

    fn gateway(base_url: &str, timeout: Duration) -> TestResult<HttpPaymentGateway> {
        Ok(HttpPaymentGateway::new(PaymentGatewayConfig {
            base_url: base_url.to_string(),
            token: "secret".to_string(),
            timeout,
        })?)
    }

    #[test]
    fn payments_url_ignores_trailing_slash() -> TestResult {
        let timeout = Duration::from_secs(5);

        assert_eq!(
            gateway("https://pay.example.com/", timeout)?.payments_url(),
            "https://pay.example.com/payments"
        );
        assert_eq!(
            gateway("https://pay.example.com", timeout)?.payments_url(),
            "https://pay.example.com/payments"
        );

        Ok(())
    }

    #[test]
    fn request_body_uses_gateway_field_names() -> TestResult {
        let booking = BookingUuid::new();

        let body = serde_json::to_value(CreatePaymentBody {
            booking_uuid: booking.into_uuid(),
            amount: 85_000,
        })?;

        assert_eq!(
            body,
            serde_json::json!({ "booking_uuid": booking.to_string(), "amount": 85_000 })
        );

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_gateway_is_an_http_error() -> TestResult {
        // Port 9 (discard) is not expected to accept connections on the test host.
        let result = gateway("http://127.0.0.1:9", Duration::from_secs(5))?
            .request_payment(PaymentRequest {
                booking: BookingUuid::new(),
                amount: 1_000,
            })
            .await;

        assert!(matches!(result, Err(PaymentGatewayError::Http(_))));

        Ok(())
    }

    #[tokio::test]
    async fn silent_gateway_times_out() -> TestResult {
        // Accepts the connection and never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;

        let hold = tokio::spawn(async move {
            let accepted = listener.accept().await;
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(accepted);
        });

        let result = gateway(&format!("http://{address}"), Duration::from_millis(200))?
            .request_payment(PaymentRequest {
                booking: BookingUuid::new(),
                amount: 1_000,
            })
            .await;

        hold.abort();

        assert!(
            matches!(&result, Err(PaymentGatewayError::Http(error)) if error.is_timeout()),
            "expected a timeout, got {result:?}"
        );

        Ok(())
    }
}
