//! Customers
//!
//! Customers are authenticated upstream; the API trusts the identity passed in the
//! `X-Customer-Uuid` header.

pub(crate) mod middleware;
