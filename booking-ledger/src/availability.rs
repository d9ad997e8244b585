//! Availability Engine
//!
//! Read-only queries over the booking store and table catalog. Everything is
//! recomputed on each call; there is no secondary index to keep in sync.
//!
//! Occupancy of a booking is `[time, time + dining_minutes)` on its date.
//! Finished bookings free their tables and are ignored by every query here.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use shared::models::{
    AdvisoryKind, Booking, CapacityAdvisory, NextAvailable, TableStatus,
};

use crate::catalog::TableCatalog;
use crate::config::LedgerConfig;
use crate::utils::time::{add_minutes_wrapping, dining_interval, intervals_overlap};

/// First overlapping booking found for a candidate slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub table_id: String,
    pub booking_id: i64,
    pub booking_time: NaiveTime,
}

/// Borrowed view used to answer availability questions
#[derive(Debug, Clone, Copy)]
pub struct Availability<'a> {
    bookings: &'a [Booking],
    catalog: &'a TableCatalog,
    dining_minutes: i64,
    over_capacity_slack: u32,
}

impl<'a> Availability<'a> {
    pub fn new(bookings: &'a [Booking], catalog: &'a TableCatalog, config: &LedgerConfig) -> Self {
        Self {
            bookings,
            catalog,
            dining_minutes: config.dining_minutes,
            over_capacity_slack: config.over_capacity_slack,
        }
    }

    /// Active bookings of a table on a date, by start time
    pub fn bookings_for_table(&self, table_id: &str, date: NaiveDate) -> Vec<&'a Booking> {
        let mut bookings: Vec<&'a Booking> = self
            .bookings
            .iter()
            .filter(|b| b.is_active() && b.date == date && b.uses_table(table_id))
            .collect();
        bookings.sort_by_key(|b| b.time);
        bookings
    }

    /// Next free slot of a table
    ///
    /// Only the latest booking of the day is considered; gaps between earlier
    /// bookings are not searched and closing hours are not applied.
    pub fn next_available_slot(&self, table_id: &str, date: NaiveDate) -> NextAvailable {
        match self.bookings_for_table(table_id, date).last() {
            Some(last) => NextAvailable::After(add_minutes_wrapping(last.time, self.dining_minutes)),
            None => NextAvailable::Immediately,
        }
    }

    /// First booking that overlaps the candidate slot on any of the tables
    ///
    /// `exclude_booking_id` skips the booking being edited so it does not
    /// conflict with itself.
    pub fn find_conflict<S: AsRef<str>>(
        &self,
        table_ids: &[S],
        date: NaiveDate,
        time: NaiveTime,
        exclude_booking_id: Option<i64>,
    ) -> Option<Conflict> {
        let candidate = dining_interval(time, self.dining_minutes);

        table_ids.iter().find_map(|table_id| {
            let table_id = table_id.as_ref();
            self.bookings_for_table(table_id, date)
                .into_iter()
                .filter(|b| Some(b.id) != exclude_booking_id)
                .find(|b| {
                    intervals_overlap(candidate, dining_interval(b.time, self.dining_minutes))
                })
                .map(|b| Conflict {
                    table_id: table_id.to_string(),
                    booking_id: b.id,
                    booking_time: b.time,
                })
        })
    }

    pub fn has_conflict<S: AsRef<str>>(
        &self,
        table_ids: &[S],
        date: NaiveDate,
        time: NaiveTime,
        exclude_booking_id: Option<i64>,
    ) -> bool {
        self.find_conflict(table_ids, date, time, exclude_booking_id)
            .is_some()
    }

    /// Compare the seats of the selected tables with the party size
    ///
    /// - `Warning`: fewer seats than guests (needs operator confirmation)
    /// - `Info`: more than `party_size + slack` seats (advisory only)
    pub fn capacity_advisory<S: AsRef<str>>(&self, table_ids: &[S], party_size: u32) -> CapacityAdvisory {
        let capacity = self.catalog.total_capacity(table_ids);

        if table_ids.is_empty() || party_size == 0 {
            return CapacityAdvisory::none(capacity, party_size);
        }

        if capacity < party_size {
            return CapacityAdvisory {
                kind: AdvisoryKind::Warning,
                capacity,
                party_size,
                message: format!(
                    "注意：所選桌位總容量 {} 人，少於用餐人數 {} 人",
                    capacity, party_size
                ),
            };
        }

        if capacity > party_size.saturating_add(self.over_capacity_slack) {
            return CapacityAdvisory {
                kind: AdvisoryKind::Info,
                capacity,
                party_size,
                message: format!("提醒：所選桌位總容量 {} 人，可能會有座位浪費", capacity),
            };
        }

        CapacityAdvisory::none(capacity, party_size)
    }

    /// Status card of every table for a date, in catalog order
    pub fn table_overview(&self, date: NaiveDate) -> Vec<TableStatus> {
        self.catalog
            .list()
            .iter()
            .map(|table| TableStatus {
                table_id: table.id.clone(),
                table_name: table.name.clone(),
                capacity: table.capacity,
                bookings: self
                    .bookings_for_table(&table.id, date)
                    .into_iter()
                    .cloned()
                    .collect(),
                next_available: self.next_available_slot(&table.id, date),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::BookingStatus;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 12).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn booking(id: i64, tables: &[&str], time: NaiveTime) -> Booking {
        Booking {
            id,
            customer_name: format!("客人{id}"),
            phone: "0912345678".to_string(),
            party_size: 2,
            date: date(),
            time,
            table_ids: tables.iter().map(|s| s.to_string()).collect(),
            table_name: String::new(),
            notes: None,
            status: BookingStatus::Active,
            finished_at: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn with_view<R>(bookings: &[Booking], f: impl FnOnce(Availability<'_>) -> R) -> R {
        let catalog = TableCatalog::house_layout();
        let config = LedgerConfig::default();
        f(Availability::new(bookings, &catalog, &config))
    }

    #[test]
    fn test_bookings_for_table_sorted_and_active_only() {
        let mut finished = booking(3, &["A1"], t(12, 0));
        finished.status = BookingStatus::Finished;
        let mut other_day = booking(4, &["A1"], t(11, 0));
        other_day.date = date().succ_opt().unwrap();

        let bookings = vec![
            booking(1, &["A1"], t(20, 0)),
            booking(2, &["A1", "A2"], t(17, 0)),
            finished,
            other_day,
            booking(5, &["B1"], t(18, 0)),
        ];

        with_view(&bookings, |view| {
            let ids: Vec<i64> = view
                .bookings_for_table("A1", date())
                .iter()
                .map(|b| b.id)
                .collect();
            assert_eq!(ids, vec![2, 1]);
        });
    }

    #[test]
    fn test_next_available_slot() {
        let bookings = vec![
            booking(1, &["A1"], t(18, 0)),
            booking(2, &["A1"], t(12, 0)),
            booking(3, &["C3"], t(23, 0)),
        ];

        with_view(&bookings, |view| {
            assert_eq!(
                view.next_available_slot("A1", date()),
                NextAvailable::After(t(19, 30))
            );
            assert_eq!(
                view.next_available_slot("C3", date()),
                NextAvailable::After(t(0, 30))
            );
            assert_eq!(
                view.next_available_slot("B1", date()),
                NextAvailable::Immediately
            );
        });
    }

    #[test]
    fn test_next_available_ignores_earlier_gaps() {
        // 12:00-13:30 and 18:00-19:30 leave a gap, only the last one counts
        let bookings = vec![booking(1, &["A1"], t(12, 0)), booking(2, &["A1"], t(18, 0))];

        with_view(&bookings, |view| {
            assert_eq!(
                view.next_available_slot("A1", date()),
                NextAvailable::After(t(19, 30))
            );
        });
    }

    #[test]
    fn test_conflict_half_open_boundary() {
        let bookings = vec![booking(1, &["A1"], t(18, 0))];

        with_view(&bookings, |view| {
            assert!(view.has_conflict(&["A1"], date(), t(19, 0), None));
            assert!(view.has_conflict(&["A1"], date(), t(17, 0), None));
            assert!(!view.has_conflict(&["A1"], date(), t(19, 30), None));
            assert!(!view.has_conflict(&["A1"], date(), t(16, 30), None));
            assert!(!view.has_conflict(&["A2"], date(), t(18, 0), None));
        });
    }

    #[test]
    fn test_conflict_any_selected_table() {
        let bookings = vec![booking(7, &["B2"], t(18, 30))];

        with_view(&bookings, |view| {
            let conflict = view
                .find_conflict(&["B1", "B2"], date(), t(18, 0), None)
                .unwrap();
            assert_eq!(conflict.table_id, "B2");
            assert_eq!(conflict.booking_id, 7);
            assert_eq!(conflict.booking_time, t(18, 30));
        });
    }

    #[test]
    fn test_conflict_excludes_edited_booking() {
        let bookings = vec![booking(1, &["A1"], t(18, 0))];

        with_view(&bookings, |view| {
            assert!(!view.has_conflict(&["A1"], date(), t(18, 30), Some(1)));
            assert!(view.has_conflict(&["A1"], date(), t(18, 30), Some(2)));
        });
    }

    #[test]
    fn test_conflict_ignores_finished() {
        let mut done = booking(1, &["A1"], t(18, 0));
        done.status = BookingStatus::Finished;
        let bookings = vec![done];

        with_view(&bookings, |view| {
            assert!(!view.has_conflict(&["A1"], date(), t(18, 0), None));
        });
    }

    #[test]
    fn test_capacity_advisory() {
        with_view(&[], |view| {
            let warning = view.capacity_advisory(&["A1"], 5);
            assert_eq!(warning.kind, AdvisoryKind::Warning);
            assert_eq!(warning.capacity, 2);
            assert!(warning.message.contains("少於用餐人數 5 人"));

            // 2 + 2 seats for 2 guests is exactly the slack, no advisory
            assert_eq!(view.capacity_advisory(&["A1", "A2"], 2).kind, AdvisoryKind::None);

            let info = view.capacity_advisory(&["B1", "B2"], 3);
            assert_eq!(info.kind, AdvisoryKind::Info);
            assert_eq!(info.capacity, 8);

            assert_eq!(view.capacity_advisory::<&str>(&[], 4).kind, AdvisoryKind::None);
            assert_eq!(view.capacity_advisory(&["A1"], 0).kind, AdvisoryKind::None);
        });
    }

    #[test]
    fn test_table_overview() {
        let bookings = vec![booking(1, &["A1", "A2"], t(18, 0))];

        with_view(&bookings, |view| {
            let overview = view.table_overview(date());
            assert_eq!(overview.len(), 10);
            assert_eq!(overview[0].table_id, "A1");
            assert_eq!(overview[0].bookings.len(), 1);
            assert_eq!(overview[1].next_available, NextAvailable::After(t(19, 30)));
            assert_eq!(overview[2].next_available, NextAvailable::Immediately);
            assert!(overview[9].bookings.is_empty());
        });
    }
}
