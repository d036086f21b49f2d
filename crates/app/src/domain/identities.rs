//! Identities established upstream.
//!
//! Barbers and customers are accounts in the surrounding product; the engine only stores their
//! identifiers.

use crate::uuids::TypedUuid;

/// Barber marker.
#[derive(Debug)]
pub struct Barber;

/// Customer marker.
#[derive(Debug)]
pub struct Customer;

/// Barber UUID
pub type BarberUuid = TypedUuid<Barber>;

/// Customer UUID
pub type CustomerUuid = TypedUuid<Customer>;
