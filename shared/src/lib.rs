//! Shared types for the booking workspace
//!
//! Domain models (tables, bookings, availability views) and the unified
//! error-code system used by `booking-ledger` and its consumers.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
