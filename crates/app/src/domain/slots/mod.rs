//! Slots

pub mod errors;
pub(crate) mod repository;
pub mod service;

pub use errors::SlotsServiceError;
pub use service::*;
