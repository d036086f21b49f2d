//! Shop Config

use chairside_app::context::ShopSettings;
use clap::Args;
use jiff::tz::TimeZone;

/// Time zone and slot settings shared by every service.
#[derive(Debug, Args)]
pub struct ShopConfig {
    /// IANA time zone appointment times are expressed in
    #[arg(long, env = "SHOP_TIMEZONE", default_value = "UTC")]
    pub shop_timezone: String,

    /// Minutes between candidate slot start times
    #[arg(long, env = "SLOT_GRANULARITY_MINUTES", default_value_t = 30_u16)]
    pub slot_granularity_minutes: u16,
}

impl ShopConfig {
    /// Resolve the configured zone.
    ///
    /// # Errors
    ///
    /// Returns an error when the zone is not in the time zone database.
    pub fn settings(&self) -> Result<ShopSettings, jiff::Error> {
        Ok(ShopSettings {
            zone: TimeZone::get(&self.shop_timezone)?,
            slot_granularity_minutes: self.slot_granularity_minutes,
        })
    }
}
