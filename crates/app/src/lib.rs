//! Persistence and transactional services for the booking engine.

pub mod clock;
pub mod context;
pub mod database;
pub mod domain;
pub mod payments;

#[cfg(test)]
mod test;

mod uuids;
