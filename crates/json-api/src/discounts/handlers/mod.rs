//! Discount Handlers

pub(crate) mod recommendations;
pub(crate) mod validate;
