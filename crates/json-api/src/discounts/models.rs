//! Discount Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use chairside::discounts::DiscountKind;
use chairside_app::domain::discounts::records::DiscountRecord;

/// A discount as shown to customers.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountResponse {
    /// Code the customer enters
    pub code: String,

    /// Display name
    pub name: String,

    /// `percentage` or `fixed`
    #[serde(rename = "type")]
    pub kind: String,

    /// Percent off, or amount off in minor units
    pub value: u64,

    /// Largest amount a percentage discount takes off
    pub max_discount: Option<u64>,

    /// Smallest original price the discount applies to
    pub min_order_amount: u64,
}

impl From<&DiscountRecord> for DiscountResponse {
    fn from(discount: &DiscountRecord) -> Self {
        let (value, max_discount) = match discount.rule.kind {
            DiscountKind::Percentage { percent, cap } => (u64::from(percent), cap),
            DiscountKind::Fixed { amount } => (amount, None),
        };

        Self {
            code: discount.code.clone(),
            name: discount.name.clone(),
            kind: discount.rule.kind.as_str().to_string(),
            value,
            max_discount,
            min_order_amount: discount.rule.min_order_amount,
        }
    }
}
