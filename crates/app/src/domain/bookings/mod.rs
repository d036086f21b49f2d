//! Bookings
//!
//! The booking coordinator is the only writer of bookings and of discount usage. Every booking
//! is re-validated against committed state inside one transaction, and the database's
//! `bookings_no_overlap` exclusion constraint settles races between concurrent requests.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::BookingsServiceError;
pub use service::*;
