//! ReservationLedger - table catalog, booking store and the operations on them
//!
//! # Command Flow
//!
//! ```text
//! create_booking(draft) / update_booking(id, draft)
//!     ├─ 1. (update) look up the booking being edited
//!     ├─ 2. Run the validation pipeline against the current store
//!     ├─ 3. Assign (create) or retain (update) id and status
//!     ├─ 4. Insert / replace in the store
//!     ├─ 5. Audit log
//!     └─ 6. Return a clone of the stored booking
//! ```
//!
//! Mutations take `&mut self`, so each action completes before the next one
//! starts. Queries recompute their answer from the store on every call.

mod error;
mod pipeline;
mod store;

#[cfg(test)]
mod tests;

pub use error::{BookingError, BookingResult};
pub use pipeline::{ValidatedBooking, ValidationPipeline, is_closed_day};
pub use store::BookingStore;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use shared::models::{
    Booking, BookingDraft, BookingStatus, CapacityAdvisory, DayBookings, DiningTable,
    NextAvailable, TableStatus,
};
use shared::util::snowflake_id_at;
use tracing::{info, warn};

use crate::audit_log;
use crate::availability::Availability;
use crate::catalog::TableCatalog;
use crate::config::LedgerConfig;
use crate::utils::time::local_now;
use crate::utils::{Clock, SystemClock};

/// In-memory reservation ledger for one restaurant
pub struct ReservationLedger {
    catalog: TableCatalog,
    store: BookingStore,
    config: LedgerConfig,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ReservationLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationLedger")
            .field("tables", &self.catalog.list().len())
            .field("bookings", &self.store.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for ReservationLedger {
    fn default() -> Self {
        Self::new(TableCatalog::house_layout(), LedgerConfig::default())
    }
}

impl ReservationLedger {
    /// Create a ledger reading the system clock
    pub fn new(catalog: TableCatalog, config: LedgerConfig) -> Self {
        Self::with_clock(catalog, config, Arc::new(SystemClock))
    }

    /// Create a ledger with an explicit clock
    pub fn with_clock(catalog: TableCatalog, config: LedgerConfig, clock: Arc<dyn Clock>) -> Self {
        info!(
            tables = catalog.list().len(),
            timezone = %config.timezone,
            closed_weekday = %config.closed_weekday,
            "ReservationLedger started"
        );
        Self {
            catalog,
            store: BookingStore::new(),
            config,
            clock,
        }
    }

    /// Replace the clock (e.g. to advance time in tests)
    pub fn set_clock(&mut self, clock: Arc<dyn Clock>) {
        self.clock = clock;
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &TableCatalog {
        &self.catalog
    }

    // ========== Time ==========

    /// Current instant in the business timezone
    pub fn now(&self) -> DateTime<Tz> {
        local_now(self.clock.now(), self.config.timezone)
    }

    /// Today's date in the business timezone
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    pub fn is_closed_day(&self, date: NaiveDate) -> bool {
        is_closed_day(date, self.config.closed_weekday)
    }

    // ========== Queries ==========

    /// All tables in catalog order
    pub fn list_tables(&self) -> &[DiningTable] {
        self.catalog.list()
    }

    pub fn get_table(&self, table_id: &str) -> Option<&DiningTable> {
        self.catalog.get(table_id)
    }

    pub fn get_booking(&self, id: i64) -> Option<&Booking> {
        self.store.get(id)
    }

    /// Every booking ever created (insertion order)
    pub fn bookings(&self) -> &[Booking] {
        self.store.all()
    }

    /// Bookings of a date split into active / finished, each by time
    pub fn bookings_on_date(&self, date: NaiveDate) -> DayBookings {
        self.store.on_date(date)
    }

    /// Read-only availability view over the current store
    pub fn availability(&self) -> Availability<'_> {
        Availability::new(self.store.all(), &self.catalog, &self.config)
    }

    pub fn bookings_for_table(&self, table_id: &str, date: NaiveDate) -> Vec<Booking> {
        self.availability()
            .bookings_for_table(table_id, date)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn next_available_slot(&self, table_id: &str, date: NaiveDate) -> NextAvailable {
        self.availability().next_available_slot(table_id, date)
    }

    pub fn has_conflict<S: AsRef<str>>(
        &self,
        table_ids: &[S],
        date: NaiveDate,
        time: NaiveTime,
        exclude_booking_id: Option<i64>,
    ) -> bool {
        self.availability()
            .has_conflict(table_ids, date, time, exclude_booking_id)
    }

    pub fn capacity_advisory<S: AsRef<str>>(&self, table_ids: &[S], party_size: u32) -> CapacityAdvisory {
        self.availability().capacity_advisory(table_ids, party_size)
    }

    /// 桌位状态总览
    pub fn table_overview(&self, date: NaiveDate) -> Vec<TableStatus> {
        self.availability().table_overview(date)
    }

    // ========== Commands ==========

    fn validate(&self, draft: &BookingDraft, editing: Option<i64>) -> BookingResult<ValidatedBooking> {
        ValidationPipeline::new(&self.catalog, self.availability(), &self.config, self.now())
            .run(draft, editing)
    }

    /// Draw a snowflake id not used by any stored booking
    fn next_booking_id(&self, now_millis: i64) -> i64 {
        loop {
            let id = snowflake_id_at(now_millis);
            if !self.store.contains(id) {
                return id;
            }
        }
    }

    /// Validate a draft and store it as a new active booking
    pub fn create_booking(&mut self, draft: BookingDraft) -> BookingResult<Booking> {
        let validated = self.validate(&draft, None).inspect_err(|e| {
            warn!(error = %e, code = %e.code(), "Booking rejected");
        })?;

        let now_millis = self.clock.now().timestamp_millis();
        let booking = Booking {
            id: self.next_booking_id(now_millis),
            customer_name: validated.customer_name,
            phone: validated.phone,
            party_size: validated.party_size,
            date: validated.date,
            time: validated.time,
            table_ids: validated.table_ids,
            table_name: validated.table_name,
            notes: validated.notes,
            status: BookingStatus::Active,
            finished_at: None,
            created_at: now_millis,
            updated_at: now_millis,
        };

        self.store.insert(booking.clone());

        info!(
            booking_id = booking.id,
            date = %booking.date,
            time = %booking.time.format("%H:%M"),
            tables = %booking.table_name,
            party_size = booking.party_size,
            "Booking created"
        );
        audit_log!("create", booking.id);

        Ok(booking)
    }

    /// Validate a draft and replace the booking with the given id
    ///
    /// Id, status, `finished_at` and `created_at` are preserved.
    pub fn update_booking(&mut self, id: i64, draft: BookingDraft) -> BookingResult<Booking> {
        let Some(existing) = self.store.get(id) else {
            warn!(booking_id = id, "Update of unknown booking");
            return Err(BookingError::BookingNotFound(id));
        };
        let (status, finished_at, created_at) =
            (existing.status, existing.finished_at, existing.created_at);

        let validated = self.validate(&draft, Some(id)).inspect_err(|e| {
            warn!(booking_id = id, error = %e, code = %e.code(), "Booking update rejected");
        })?;

        let booking = Booking {
            id,
            customer_name: validated.customer_name,
            phone: validated.phone,
            party_size: validated.party_size,
            date: validated.date,
            time: validated.time,
            table_ids: validated.table_ids,
            table_name: validated.table_name,
            notes: validated.notes,
            status,
            finished_at,
            created_at,
            updated_at: self.clock.now().timestamp_millis(),
        };

        if self.store.replace(booking.clone()).is_none() {
            return Err(BookingError::BookingNotFound(id));
        }

        info!(
            booking_id = id,
            date = %booking.date,
            time = %booking.time.format("%H:%M"),
            tables = %booking.table_name,
            "Booking updated"
        );
        audit_log!("update", id);

        Ok(booking)
    }

    /// 结束用餐: mark a booking finished, freeing its tables
    ///
    /// Finishing twice keeps the first `finished_at`.
    pub fn finish_booking(&mut self, id: i64) -> BookingResult<Booking> {
        let now_millis = self.clock.now().timestamp_millis();
        let Some(booking) = self.store.get_mut(id) else {
            warn!(booking_id = id, "Finish of unknown booking");
            return Err(BookingError::BookingNotFound(id));
        };

        if booking.status == BookingStatus::Finished {
            info!(booking_id = id, "Booking already finished");
            return Ok(booking.clone());
        }

        booking.status = BookingStatus::Finished;
        booking.finished_at = Some(now_millis);
        booking.updated_at = now_millis;

        info!(booking_id = id, tables = %booking.table_name, "Booking finished");
        audit_log!("finish", id);

        Ok(booking.clone())
    }

    /// Remove a booking regardless of status; no-op for unknown ids
    ///
    /// Returns whether a booking was removed.
    pub fn delete_booking(&mut self, id: i64) -> bool {
        match self.store.remove(id) {
            Some(removed) => {
                info!(booking_id = id, status = ?removed.status, "Booking deleted");
                audit_log!("delete", id, format!("{:?}", removed.status));
                true
            }
            None => false,
        }
    }
}
