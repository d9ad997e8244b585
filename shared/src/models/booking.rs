//! Booking Model

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Booking lifecycle status
///
/// `Active → Finished` only, never back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[default]
    Active,
    Finished,
}

impl BookingStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Active)
    }
}

/// Booking entity (訂位)
///
/// Stored by the ledger; callers only ever see clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub customer_name: String,
    pub phone: String,
    pub party_size: u32,
    pub date: NaiveDate,
    /// Start time, minute resolution
    pub time: NaiveTime,
    /// Referenced tables, in selection order
    pub table_ids: Vec<String>,
    /// Combined display name of the referenced tables (`A1桌 (2人) + A2桌 (2人)`)
    pub table_name: String,
    pub notes: Option<String>,
    pub status: BookingStatus,
    /// Unix millis, set when the booking is finished
    pub finished_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Booking {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Whether this booking references the given table
    pub fn uses_table(&self, table_id: &str) -> bool {
        self.table_ids.iter().any(|id| id == table_id)
    }
}

/// Create / update booking payload (訂位表單)
///
/// Mirrors the booking form: fields may be missing or blank and are checked
/// by the ledger's validation pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub customer_name: String,
    pub phone: String,
    /// 0 means "not filled in"
    pub party_size: u32,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub table_ids: Vec<String>,
    pub notes: Option<String>,
    /// Operator confirmed proceeding although the tables seat fewer guests
    #[serde(default)]
    pub confirm_under_capacity: bool,
}

impl BookingDraft {
    /// Prefill a draft from an existing booking (edit form)
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            customer_name: booking.customer_name.clone(),
            phone: booking.phone.clone(),
            party_size: booking.party_size,
            date: Some(booking.date),
            time: Some(booking.time),
            table_ids: booking.table_ids.clone(),
            notes: booking.notes.clone(),
            confirm_under_capacity: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Booking {
        Booking {
            id: 1,
            customer_name: "王小明".to_string(),
            phone: "0912345678".to_string(),
            party_size: 4,
            date: NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
            time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            table_ids: vec!["A1".to_string(), "A2".to_string()],
            table_name: "A1桌 (2人) + A2桌 (2人)".to_string(),
            notes: None,
            status: BookingStatus::Active,
            finished_at: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_uses_table() {
        let booking = sample();
        assert!(booking.uses_table("A2"));
        assert!(!booking.uses_table("B1"));
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&BookingStatus::Finished).unwrap();
        assert_eq!(json, "\"FINISHED\"");
        assert_eq!(BookingStatus::default(), BookingStatus::Active);
    }

    #[test]
    fn test_draft_from_booking_resets_confirmation() {
        let booking = sample();
        let draft = BookingDraft::from_booking(&booking);
        assert_eq!(draft.table_ids, booking.table_ids);
        assert_eq!(draft.date, Some(booking.date));
        assert!(!draft.confirm_under_capacity);
    }

    #[test]
    fn test_booking_serializes_iso_date_and_time() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["date"], "2025-06-12");
        assert_eq!(json["time"], "18:00:00");
        assert_eq!(json["status"], "ACTIVE");
    }
}
