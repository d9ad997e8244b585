use super::*;
use crate::utils::FixedClock;

// ========================================================================
// Helpers
// ========================================================================

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// 2025-06-12, a Thursday
fn thursday() -> NaiveDate {
    d(2025, 6, 12)
}

/// 2025-06-11, a Wednesday (公休)
fn wednesday() -> NaiveDate {
    d(2025, 6, 11)
}

fn clock_at(date: NaiveDate, time: NaiveTime) -> Arc<dyn Clock> {
    Arc::new(FixedClock::at_local(
        date,
        time,
        LedgerConfig::default().timezone,
    ))
}

/// Ledger with the house tables, frozen at Tuesday 2025-06-10 12:00 Taipei
fn create_test_ledger() -> ReservationLedger {
    create_test_ledger_with(LedgerConfig::default())
}

fn create_test_ledger_with(config: LedgerConfig) -> ReservationLedger {
    ReservationLedger::with_clock(
        TableCatalog::house_layout(),
        config,
        clock_at(d(2025, 6, 10), t(12, 0)),
    )
}

fn draft(tables: &[&str], date: NaiveDate, time: NaiveTime, party_size: u32) -> BookingDraft {
    BookingDraft {
        customer_name: "王小明".to_string(),
        phone: "0912345678".to_string(),
        party_size,
        date: Some(date),
        time: Some(time),
        table_ids: tables.iter().map(|s| s.to_string()).collect(),
        notes: None,
        confirm_under_capacity: false,
    }
}

/// Create a party of 2 on Thursday and assert success
fn book(ledger: &mut ReservationLedger, tables: &[&str], time: NaiveTime) -> Booking {
    ledger
        .create_booking(draft(tables, thursday(), time, 2))
        .expect("booking should be accepted")
}

/// No two active bookings sharing a table on the same date overlap
fn assert_no_overlaps(ledger: &ReservationLedger) {
    let minutes = ledger.config().dining_minutes;
    let active: Vec<&Booking> = ledger.bookings().iter().filter(|b| b.is_active()).collect();

    for (i, a) in active.iter().enumerate() {
        for b in active.iter().skip(i + 1) {
            let shares_table = a.table_ids.iter().any(|id| b.uses_table(id));
            if a.date != b.date || !shares_table {
                continue;
            }
            let overlap = crate::utils::time::intervals_overlap(
                crate::utils::time::dining_interval(a.time, minutes),
                crate::utils::time::dining_interval(b.time, minutes),
            );
            assert!(!overlap, "bookings {} and {} overlap", a.id, b.id);
        }
    }
}
