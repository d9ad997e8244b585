//! Data models
//!
//! Shared between the ledger and its presentation layer.
//! Tables are keyed by their short string id (`A1`); bookings by snowflake `i64`.

pub mod availability;
pub mod booking;
pub mod dining_table;

// Re-exports
pub use availability::*;
pub use booking::*;
pub use dining_table::*;
