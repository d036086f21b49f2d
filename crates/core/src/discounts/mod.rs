//! Discount evaluation
//!
//! A discount is checked against a priced context in a fixed order and the first failing
//! check is reported. Eligible discounts produce a [`Quote`].

use std::fmt;

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rustc_hash::FxHashSet;
use thiserror::Error;
use uuid::Uuid;

use crate::pricing::Quote;

/// Errors specific to discount calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed")]
    PercentConversion,

    /// Percentage outside `1..=100`.
    #[error("percentage {0} is out of range")]
    PercentRange(u8),
}

/// How much a discount takes off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    /// Whole-number percentage off, optionally capped.
    Percentage {
        /// Percent off, `1..=100`.
        percent: u8,

        /// Maximum amount taken off.
        cap: Option<u64>,
    },

    /// Fixed amount off, never more than the price.
    Fixed {
        /// Amount off in minor units.
        amount: u64,
    },
}

impl DiscountKind {
    /// Stored type name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage { .. } => "percentage",
            Self::Fixed { .. } => "fixed",
        }
    }

    /// Amount taken off `original_price`.
    ///
    /// # Errors
    ///
    /// Returns an error when the percentage is out of range or the calculation overflows.
    pub fn amount_off(&self, original_price: u64) -> Result<u64, DiscountError> {
        let amount = match *self {
            Self::Percentage { percent, cap } => {
                if !(1..=100).contains(&percent) {
                    return Err(DiscountError::PercentRange(percent));
                }

                let amount = percent_of_minor(percent, original_price)?;

                cap.map_or(amount, |cap| amount.min(cap))
            }
            Self::Fixed { amount } => amount,
        };

        Ok(amount.min(original_price))
    }
}

/// Which bookings a discount applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DiscountScope {
    /// Every barber and service.
    #[default]
    All,

    /// Only bookings with one of these barbers.
    Barbers(FxHashSet<Uuid>),

    /// Only bookings of one of these services.
    Services(FxHashSet<Uuid>),
}

impl DiscountScope {
    /// Stored scope name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Barbers(_) => "barbers",
            Self::Services(_) => "services",
        }
    }

    /// Whether the scope covers `barber` and `service`.
    pub fn includes(&self, barber: Uuid, service: Uuid) -> bool {
        match self {
            Self::All => true,
            Self::Barbers(barbers) => barbers.contains(&barber),
            Self::Services(services) => services.contains(&service),
        }
    }
}

/// Why a discount cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Ineligibility {
    /// No discount has that code.
    #[error("discount code not found")]
    CodeNotFound,

    /// The discount has been switched off.
    #[error("discount is not active")]
    Inactive,

    /// The validity window has not opened yet.
    #[error("discount is not valid yet")]
    NotYetValid,

    /// The validity window has closed.
    #[error("discount has expired")]
    Expired,

    /// The global usage limit has been reached.
    #[error("discount usage limit reached")]
    UsageExhausted,

    /// This customer has used the discount as often as allowed.
    #[error("discount already used the maximum number of times by this customer")]
    CustomerLimitReached,

    /// The discount does not cover this barber or service.
    #[error("discount does not apply to this barber or service")]
    OutOfScope,

    /// The price is below the discount's minimum order amount.
    #[error("order amount is below the discount minimum")]
    MinOrderNotMet,
}

impl Ineligibility {
    /// Stable machine-readable reason.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CodeNotFound => "code-not-found",
            Self::Inactive => "inactive",
            Self::NotYetValid => "not-yet-valid",
            Self::Expired => "expired",
            Self::UsageExhausted => "usage-exhausted",
            Self::CustomerLimitReached => "customer-limit-reached",
            Self::OutOfScope => "out-of-scope",
            Self::MinOrderNotMet => "min-order-not-met",
        }
    }
}

/// The terms of a discount that decide eligibility and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountRule {
    /// Amount calculation.
    pub kind: DiscountKind,

    /// Minimum original price.
    pub min_order_amount: u64,

    /// Start of validity, inclusive.
    pub valid_from: Option<Timestamp>,

    /// End of validity, inclusive.
    pub valid_until: Option<Timestamp>,

    /// Global redemption limit.
    pub max_uses: Option<u32>,

    /// Per-customer redemption limit.
    pub max_uses_per_customer: Option<u32>,

    /// Redemptions so far.
    pub usage_count: u32,

    /// Switched on by admin tooling.
    pub is_active: bool,

    /// Barbers or services covered.
    pub scope: DiscountScope,
}

/// The booking a discount is being evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountContext {
    /// Barber being booked.
    pub barber: Uuid,

    /// Service being booked.
    pub service: Uuid,

    /// Price before discount.
    pub original_price: u64,

    /// Evaluation instant.
    pub now: Timestamp,

    /// Previous redemptions by the customer, when the customer is known.
    pub customer_redemptions: Option<u32>,
}

/// Outcome of evaluating a discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// The discount applies.
    Eligible(Quote),

    /// The discount does not apply.
    Ineligible(Ineligibility),
}

impl Evaluation {
    /// Whether the discount applies.
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible(_))
    }

    /// Amount taken off, zero when ineligible.
    pub const fn amount(&self) -> u64 {
        match self {
            Self::Eligible(quote) => quote.discount_amount,
            Self::Ineligible(_) => 0,
        }
    }
}

impl DiscountRule {
    /// Run every eligibility check in order and price the discount.
    ///
    /// # Errors
    ///
    /// Returns an error only when the amount cannot be calculated; ineligibility is reported
    /// through [`Evaluation::Ineligible`].
    pub fn evaluate(&self, context: &DiscountContext) -> Result<Evaluation, DiscountError> {
        if let Some(reason) = self.first_failed_check(context) {
            return Ok(Evaluation::Ineligible(reason));
        }

        let amount = self.kind.amount_off(context.original_price)?;

        Ok(Evaluation::Eligible(Quote::discounted(
            context.original_price,
            amount,
        )))
    }

    fn first_failed_check(&self, context: &DiscountContext) -> Option<Ineligibility> {
        if !self.is_active {
            return Some(Ineligibility::Inactive);
        }

        if self.valid_from.is_some_and(|from| context.now < from) {
            return Some(Ineligibility::NotYetValid);
        }

        if self.valid_until.is_some_and(|until| context.now > until) {
            return Some(Ineligibility::Expired);
        }

        if self.max_uses.is_some_and(|max| self.usage_count >= max) {
            return Some(Ineligibility::UsageExhausted);
        }

        if let (Some(max), Some(used)) = (self.max_uses_per_customer, context.customer_redemptions)
            && used >= max
        {
            return Some(Ineligibility::CustomerLimitReached);
        }

        if !self.scope.includes(context.barber, context.service) {
            return Some(Ineligibility::OutOfScope);
        }

        if context.original_price < self.min_order_amount {
            return Some(Ineligibility::MinOrderNotMet);
        }

        None
    }
}

/// A discount evaluated for a context but not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation<T> {
    /// The discount being recommended.
    pub item: T,

    /// Eligibility and value.
    pub evaluation: Evaluation,
}

/// Evaluate each discount in scope and rank them by amount off, largest first.
///
/// `terms_of` yields each item's rule and how often the customer has already redeemed it.
/// Discounts whose scope excludes the context's barber and service are left out. The sort is
/// stable, so ties keep the order of `items`.
///
/// # Errors
///
/// Returns an error when any eligible discount's amount cannot be calculated.
pub fn recommend<T, F>(
    items: Vec<T>,
    terms_of: F,
    context: &DiscountContext,
) -> Result<Vec<Recommendation<T>>, DiscountError>
where
    F: Fn(&T) -> (&DiscountRule, Option<u32>),
{
    let mut recommendations = Vec::with_capacity(items.len());

    for item in items {
        let (rule, customer_redemptions) = terms_of(&item);

        if !rule.scope.includes(context.barber, context.service) {
            continue;
        }

        let evaluation = rule.evaluate(&DiscountContext {
            customer_redemptions,
            ..*context
        })?;

        recommendations.push(Recommendation { item, evaluation });
    }

    recommendations.sort_by(|a, b| b.evaluation.amount().cmp(&a.evaluation.amount()));

    Ok(recommendations)
}

/// Calculate `percent`% of a minor unit amount, rounding half away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the result cannot be represented.
pub fn percent_of_minor(percent: u8, minor: u64) -> Result<u64, DiscountError> {
    (Decimal::from(minor) * Decimal::from(percent))
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(DiscountError::PercentConversion)
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentage { percent, .. } => write!(f, "{percent}% off"),
            Self::Fixed { amount } => write!(f, "{amount} off"),
        }
    }
}
