//! Access Config

use clap::Args;

/// Credentials for staff tooling.
#[derive(Debug, Args)]
pub struct AccessConfig {
    /// Bearer secret staff tools present to change booking status; status changes are refused when unset
    #[arg(long, env = "STAFF_API_TOKEN", hide_env_values = true, default_value = "")]
    pub staff_api_token: String,
}
