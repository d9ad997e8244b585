//! Booking errors and their mapping to workspace error codes

use chrono::{NaiveDate, NaiveTime};
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Booking rejections
///
/// All variants are recoverable and meant for the operator. Only
/// `UnderCapacity` can be bypassed, by resubmitting the draft with
/// `confirm_under_capacity` set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{field} is too long (max {max} chars)")]
    TextTooLong { field: &'static str, max: usize },

    #[error("No table selected")]
    NoTableSelected,

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Cannot book a past date: {date} (today is {today})")]
    PastDate { date: NaiveDate, today: NaiveDate },

    #[error("Restaurant is closed on {date}")]
    ClosedDay { date: NaiveDate },

    #[error("Cannot book a time that has already passed: {date} {time}")]
    PastTime { date: NaiveDate, time: NaiveTime },

    #[error("Selected tables seat {capacity}, fewer than the party of {party_size}")]
    UnderCapacity { capacity: u32, party_size: u32 },

    #[error("Table {table_id} is already booked at this time (booking {booking_id})")]
    Conflict { table_id: String, booking_id: i64 },

    #[error("Booking not found: {0}")]
    BookingNotFound(i64),
}

impl BookingError {
    /// Error code for the presentation layer (前端负责本地化)
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::MissingFields(_) => ErrorCode::RequiredField,
            BookingError::TextTooLong { .. } => ErrorCode::ValueOutOfRange,
            BookingError::NoTableSelected => ErrorCode::BookingNoTable,
            BookingError::TableNotFound(_) => ErrorCode::TableNotFound,
            BookingError::PastDate { .. } => ErrorCode::BookingPastDate,
            BookingError::ClosedDay { .. } => ErrorCode::BookingClosedDay,
            BookingError::PastTime { .. } => ErrorCode::BookingPastTime,
            BookingError::UnderCapacity { .. } => ErrorCode::BookingUnderCapacity,
            BookingError::Conflict { .. } => ErrorCode::BookingConflict,
            BookingError::BookingNotFound(_) => ErrorCode::BookingNotFound,
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let base = AppError::with_message(err.code(), err.to_string());
        match err {
            BookingError::MissingFields(fields) => base.with_detail("fields", fields),
            BookingError::TextTooLong { field, max } => {
                base.with_detail("field", field).with_detail("max", max)
            }
            BookingError::NoTableSelected => base,
            BookingError::TableNotFound(id) => base.with_detail("table_id", id),
            BookingError::PastDate { date, today } => base
                .with_detail("date", date.to_string())
                .with_detail("today", today.to_string()),
            BookingError::ClosedDay { date } => base.with_detail("date", date.to_string()),
            BookingError::PastTime { date, time } => base
                .with_detail("date", date.to_string())
                .with_detail("time", time.format("%H:%M").to_string()),
            BookingError::UnderCapacity {
                capacity,
                party_size,
            } => base
                .with_detail("capacity", capacity)
                .with_detail("party_size", party_size),
            BookingError::Conflict {
                table_id,
                booking_id,
            } => base
                .with_detail("table_id", table_id)
                .with_detail("booking_id", booking_id),
            BookingError::BookingNotFound(id) => base.with_detail("booking_id", id),
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
