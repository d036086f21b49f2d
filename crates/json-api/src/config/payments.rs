//! Payment Gateway Config

use std::time::Duration;

use chairside_app::payments::PaymentGatewayConfig;
use clap::Args;

/// Payment gateway settings.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// Base URL of the payment gateway; payments are disabled when unset
    #[arg(long, env = "PAYMENT_GATEWAY_URL")]
    pub payment_gateway_url: Option<String>,

    /// Bearer token for the payment gateway
    #[arg(long, env = "PAYMENT_GATEWAY_TOKEN", hide_env_values = true, default_value = "")]
    pub payment_gateway_token: String,

    /// Seconds to wait for the payment gateway before giving up on a payment reference
    #[arg(long, env = "PAYMENT_GATEWAY_TIMEOUT_SECONDS", default_value_t = 10)]
    pub payment_gateway_timeout_seconds: u64,
}

impl PaymentsConfig {
    /// Gateway settings, when a gateway URL is configured.
    #[must_use]
    pub fn gateway(&self) -> Option<PaymentGatewayConfig> {
        self.payment_gateway_url
            .as_ref()
            .filter(|url| !url.trim().is_empty())
            .map(|url| PaymentGatewayConfig {
                base_url: url.clone(),
                token: self.payment_gateway_token.clone(),
                timeout: self.gateway_timeout(),
            })
    }

    /// How long a payment reference request may take.
    #[must_use]
    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_secs(self.payment_gateway_timeout_seconds)
    }
}
