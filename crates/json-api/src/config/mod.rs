//! Server configuration module

use clap::Parser;

use crate::{
    callers::CallerTokens,
    config::{
        access::AccessConfig,
        db::DatabaseConfig,
        observability::{LoggingConfig, ObservabilityConfig},
        payments::PaymentsConfig,
        server::ServerRuntimeConfig,
        shop::ShopConfig,
    },
};

pub(crate) mod access;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod payments;
pub(crate) mod server;
pub(crate) mod shop;

/// Chairside JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "chairside-json", about = "Chairside JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request logging settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Shop time zone and slot settings.
    #[command(flatten)]
    pub shop: ShopConfig,

    /// Payment gateway settings.
    #[command(flatten)]
    pub payments: PaymentsConfig,

    /// Staff credentials.
    #[command(flatten)]
    pub access: AccessConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Secrets accepted from staff tools and the payment gateway.
    ///
    /// The gateway authenticates its callbacks with the same token the API sends it.
    pub(crate) fn caller_tokens(&self) -> CallerTokens {
        CallerTokens::new(
            &self.access.staff_api_token,
            &self.payments.payment_gateway_token,
        )
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_apply_when_only_the_database_is_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "chairside-json",
            "--database-url",
            "postgresql://localhost/chairside",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.shop.slot_granularity_minutes, 30);
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);
        assert!(config.payments.gateway().is_none());
        assert_eq!(
            config.payments.gateway_timeout(),
            std::time::Duration::from_secs(10)
        );

        let callers = config.caller_tokens();

        assert_eq!(callers.staff, None);
        assert_eq!(callers.payment_gateway, None);

        Ok(())
    }

    #[test]
    fn gateway_token_also_authenticates_its_callbacks() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "chairside-json",
            "--database-url",
            "postgresql://localhost/chairside",
            "--payment-gateway-url",
            "https://pay.example.com",
            "--payment-gateway-token",
            "gateway-secret",
            "--payment-gateway-timeout-seconds",
            "3",
            "--staff-api-token",
            "staff-secret",
        ])?;

        let gateway = config.payments.gateway();

        assert_eq!(
            gateway.as_ref().map(|gateway| gateway.timeout),
            Some(std::time::Duration::from_secs(3))
        );

        let callers = config.caller_tokens();

        assert_eq!(callers.payment_gateway.as_deref(), Some("gateway-secret"));
        assert_eq!(callers.staff.as_deref(), Some("staff-secret"));

        Ok(())
    }
}
