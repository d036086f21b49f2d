//! Test Helpers

use chairside::discounts::{DiscountKind, DiscountScope};

use crate::domain::discounts::{data::NewDiscount, records::DiscountUuid};

/// An active, unlimited, unscoped discount.
pub(crate) fn discount(code: &str, kind: DiscountKind) -> NewDiscount {
    NewDiscount {
        uuid: DiscountUuid::new(),
        code: code.to_string(),
        name: format!("{code} discount"),
        kind,
        min_order_amount: 0,
        valid_from: None,
        valid_until: None,
        max_uses: None,
        max_uses_per_customer: None,
        is_active: true,
        scope: DiscountScope::All,
    }
}
