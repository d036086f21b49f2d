//! Booking lifecycle
//!
//! Bookings move `pending → confirmed → in_progress → completed`. Pending and confirmed
//! bookings may be cancelled up to [`CANCELLATION_NOTICE`] before they start. Payment
//! outcomes arrive separately and are folded in by [`settle_payment`].

use std::{fmt, str::FromStr};

use jiff::{SignedDuration, Timestamp};
use thiserror::Error;

/// Minimum notice required to cancel a booking.
pub const CANCELLATION_NOTICE: SignedDuration = SignedDuration::from_mins(30);

/// Errors raised by lifecycle transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The lifecycle does not allow moving between these statuses.
    #[error("cannot move booking from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: BookingStatus,

        /// Requested status.
        to: BookingStatus,
    },

    /// Too close to the start time to cancel.
    #[error("cancellation window has closed")]
    CancellationWindowClosed,

    /// A different payment outcome has already been recorded.
    #[error("payment already settled as {0}")]
    PaymentAlreadySettled(PaymentStatus),
}

/// Error parsing a stored status name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status {0:?}")]
pub struct UnknownStatus(pub String);

/// Booking status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    /// Reserved, awaiting confirmation.
    Pending,

    /// Confirmed by payment or by the shop.
    Confirmed,

    /// The appointment is under way.
    InProgress,

    /// Done. Terminal.
    Completed,

    /// Called off. Terminal.
    Cancelled,
}

impl BookingStatus {
    /// Stored status name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the lifecycle allows moving to `next`.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::InProgress | Self::Cancelled)
                | (Self::InProgress, Self::Completed)
        )
    }

    /// Move to `next` if the lifecycle allows it.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::InvalidTransition`] otherwise.
    pub const fn transition(self, next: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Cancel a booking starting at `start`, given the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::InvalidTransition`] from terminal or in-progress statuses
    /// and [`TransitionError::CancellationWindowClosed`] when `now` is not more than
    /// [`CANCELLATION_NOTICE`] before `start`.
    pub fn cancel(self, start: Timestamp, now: Timestamp) -> Result<Self, TransitionError> {
        let cancelled = self.transition(Self::Cancelled)?;

        if now.duration_until(start) <= CANCELLATION_NOTICE {
            return Err(TransitionError::CancellationWindowClosed);
        }

        Ok(cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Payment status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    /// No outcome yet.
    Pending,

    /// Paid.
    Paid,

    /// Payment failed.
    Failed,
}

impl PaymentStatus {
    /// Stored status name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Outcome reported by the payment collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The customer paid.
    Success,

    /// Still waiting on the customer or provider.
    Pending,

    /// The payment failed or was abandoned.
    Failure,
}

/// New statuses after a payment outcome is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// New payment status.
    pub payment: PaymentStatus,

    /// New booking status.
    pub booking: BookingStatus,
}

/// Fold a payment outcome into the current statuses.
///
/// A failed payment cancels a pending booking; bookings in any other status keep it.
///
/// Returns `Ok(None)` when nothing changes: a pending outcome, or a repeat of the outcome that
/// produced the current state.
///
/// # Errors
///
/// Returns [`TransitionError::PaymentAlreadySettled`] when a conflicting outcome was already
/// recorded.
pub fn settle_payment(
    payment: PaymentStatus,
    booking: BookingStatus,
    outcome: PaymentOutcome,
) -> Result<Option<Settlement>, TransitionError> {
    match (payment, outcome) {
        (_, PaymentOutcome::Pending)
        | (PaymentStatus::Paid, PaymentOutcome::Success)
        | (PaymentStatus::Failed, PaymentOutcome::Failure) => Ok(None),
        (PaymentStatus::Paid | PaymentStatus::Failed, _) => {
            Err(TransitionError::PaymentAlreadySettled(payment))
        }
        (PaymentStatus::Pending, PaymentOutcome::Success) => Ok(Some(Settlement {
            payment: PaymentStatus::Paid,
            booking: booking
                .transition(BookingStatus::Confirmed)
                .unwrap_or(booking),
        })),
        // Confirmed bookings are only ever cancelled through `cancel`.
        (PaymentStatus::Pending, PaymentOutcome::Failure) => Ok(Some(Settlement {
            payment: PaymentStatus::Failed,
            booking: match booking {
                BookingStatus::Pending => BookingStatus::Cancelled,
                other => other,
            },
        })),
    }
}
