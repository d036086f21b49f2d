//! Booking Handlers

pub(crate) mod cancel;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod payment_outcome;
pub(crate) mod status;
