//! Chairside
//!
//! Chairside is the availability, pricing and booking-rule engine behind the barbershop
//! booking flow. Everything in this crate is pure: callers load schedules, bookings and
//! discounts from storage and ask the engine what is bookable, what a discount is worth and
//! which status transitions are allowed.

pub mod bookings;
pub mod discounts;
pub mod pricing;
pub mod schedule;
pub mod slots;
pub mod windows;
