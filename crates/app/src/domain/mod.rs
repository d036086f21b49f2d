//! Chairside Domain Concerns

pub mod bookings;
pub mod catalog;
pub mod discounts;
pub mod identities;
pub mod schedules;
pub mod slots;
