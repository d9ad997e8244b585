//! Availability views
//!
//! Derived on every read from the booking store; never persisted.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::booking::Booking;

/// Capacity advisory level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    #[default]
    None,
    /// Tables seat fewer guests than the party (needs operator confirmation)
    Warning,
    /// Tables seat noticeably more guests than the party (never blocks)
    Info,
}

/// Result of comparing selected table capacity with party size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CapacityAdvisory {
    pub kind: AdvisoryKind,
    /// Total seats of the selected tables
    pub capacity: u32,
    pub party_size: u32,
    pub message: String,
}

impl CapacityAdvisory {
    pub fn none(capacity: u32, party_size: u32) -> Self {
        Self {
            kind: AdvisoryKind::None,
            capacity,
            party_size,
            message: String::new(),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.kind == AdvisoryKind::Warning
    }
}

/// Next free slot of a table on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "time", rename_all = "snake_case")]
pub enum NextAvailable {
    /// No active booking that day
    Immediately,
    /// Free after the latest booking ends
    After(NaiveTime),
}

impl fmt::Display for NextAvailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextAvailable::Immediately => write!(f, "立即可安排"),
            NextAvailable::After(time) => write!(f, "{} 後可安排", time.format("%H:%M")),
        }
    }
}

/// One card of the table status overview (桌位狀態總覽)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStatus {
    pub table_id: String,
    pub table_name: String,
    pub capacity: u32,
    /// Active bookings of the day, by time
    pub bookings: Vec<Booking>,
    pub next_available: NextAvailable,
}

/// Bookings of one day split by status, each sorted by time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBookings {
    pub active: Vec<Booking>,
    pub finished: Vec<Booking>,
}

impl DayBookings {
    pub fn len(&self) -> usize {
        self.active.len() + self.finished.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.finished.is_empty()
    }
}
