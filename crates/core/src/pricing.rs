//! Service pricing.

/// Price of a service for a particular barber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServicePrice {
    /// Catalogue price.
    pub base_price: u64,

    /// Barber-specific price, when the barber sets one.
    pub barber_override: Option<u64>,
}

impl ServicePrice {
    /// Override if present, otherwise the base price.
    pub fn resolve(&self) -> u64 {
        self.barber_override.unwrap_or(self.base_price)
    }
}

/// A priced booking: what it would have cost, what was taken off and what is owed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Price before any discount.
    pub original_price: u64,

    /// Amount taken off.
    pub discount_amount: u64,

    /// `original_price - discount_amount`, never below zero.
    pub total_price: u64,
}

impl Quote {
    /// A quote with no discount applied.
    pub const fn undiscounted(original_price: u64) -> Self {
        Self {
            original_price,
            discount_amount: 0,
            total_price: original_price,
        }
    }

    /// A quote with `discount_amount` taken off, clamped to the original price.
    pub fn discounted(original_price: u64, discount_amount: u64) -> Self {
        let discount_amount = discount_amount.min(original_price);

        Self {
            original_price,
            discount_amount,
            total_price: original_price - discount_amount,
        }
    }
}
