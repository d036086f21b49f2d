//! Shared test infrastructure

mod db;
mod helpers;

use jiff::civil::{Date, date};

pub(crate) use context::TestContext;
pub(crate) use db::TestDb;
pub(crate) use helpers::discount;

/// 2030-01-07 is a Monday, after the fixed test clock's instant.
pub(crate) const MONDAY: Date = date(2030, 1, 7);
