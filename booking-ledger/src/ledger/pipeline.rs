//! Validation Pipeline
//!
//! Every create / update attempt runs the same ordered checks. The first
//! failure aborts with its specific reason and nothing is written.
//!
//! ```text
//! run(draft)
//!     ├─ 1. Required fields (name, phone, time, party size) + length limits
//!     ├─ 2. Table selection (at least one, every id known)
//!     ├─ 3. Date not in the past (business timezone)
//!     ├─ 4. Not the weekly closed day (no override)
//!     ├─ 5. Time still ahead when booking for today
//!     ├─ 6. Capacity advisory (warning needs operator confirmation)
//!     └─ 7. Conflict check (no override)
//! ```

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Weekday};
use chrono_tz::Tz;
use shared::models::{AdvisoryKind, BookingDraft, CapacityAdvisory};
use tracing::{debug, info};

use super::error::{BookingError, BookingResult};
use crate::availability::Availability;
use crate::catalog::TableCatalog;
use crate::config::LedgerConfig;
use crate::utils::time::truncate_to_minute;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_PHONE_LEN, exceeds, is_blank, normalize_note,
};

/// Whether `date` falls on the weekly closed day
pub fn is_closed_day(date: NaiveDate, closed_weekday: Weekday) -> bool {
    date.weekday() == closed_weekday
}

/// Draft that passed every check, normalised and ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub customer_name: String,
    pub phone: String,
    pub party_size: u32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub table_ids: Vec<String>,
    pub table_name: String,
    pub notes: Option<String>,
    pub advisory: CapacityAdvisory,
}

struct RequiredFields {
    customer_name: String,
    phone: String,
    party_size: u32,
    time: NaiveTime,
}

pub struct ValidationPipeline<'a> {
    catalog: &'a TableCatalog,
    availability: Availability<'a>,
    config: &'a LedgerConfig,
    /// Current instant in the business timezone
    now: DateTime<Tz>,
}

impl<'a> ValidationPipeline<'a> {
    pub fn new(
        catalog: &'a TableCatalog,
        availability: Availability<'a>,
        config: &'a LedgerConfig,
        now: DateTime<Tz>,
    ) -> Self {
        Self {
            catalog,
            availability,
            config,
            now,
        }
    }

    /// Run all checks in order
    ///
    /// `editing` is the id of the booking being updated, excluded from the
    /// conflict check. A draft without a date books for today.
    pub fn run(&self, draft: &BookingDraft, editing: Option<i64>) -> BookingResult<ValidatedBooking> {
        let today = self.now.date_naive();

        let fields = check_required_fields(draft)?;
        let table_ids = self.check_tables(&draft.table_ids)?;

        let date = draft.date.unwrap_or(today);
        check_not_past_date(date, today)?;
        check_not_closed(date, self.config.closed_weekday)?;
        self.check_not_past_time(date, fields.time)?;

        let advisory =
            self.check_capacity(&table_ids, fields.party_size, draft.confirm_under_capacity)?;
        self.check_conflict(&table_ids, date, fields.time, editing)?;

        debug!(%date, time = %fields.time, tables = ?table_ids, "Booking draft passed validation");

        Ok(ValidatedBooking {
            table_name: self
                .catalog
                .combined_name(&table_ids, &self.config.table_name_separator),
            customer_name: fields.customer_name,
            phone: fields.phone,
            party_size: fields.party_size,
            date,
            time: fields.time,
            table_ids,
            notes: normalize_note(&draft.notes),
            advisory,
        })
    }

    /// 2. At least one table, all known; duplicates collapse to the first one
    fn check_tables(&self, table_ids: &[String]) -> BookingResult<Vec<String>> {
        if table_ids.is_empty() {
            return Err(BookingError::NoTableSelected);
        }

        let mut unique: Vec<String> = Vec::with_capacity(table_ids.len());
        for id in table_ids {
            let id = id.trim();
            if !self.catalog.contains(id) {
                return Err(BookingError::TableNotFound(id.to_string()));
            }
            if !unique.iter().any(|u| u == id) {
                unique.push(id.to_string());
            }
        }
        Ok(unique)
    }

    /// 5. 今天的订位，时间必须晚于现在
    fn check_not_past_time(&self, date: NaiveDate, time: NaiveTime) -> BookingResult<()> {
        if date == self.now.date_naive() && time <= self.now.time() {
            return Err(BookingError::PastTime { date, time });
        }
        Ok(())
    }

    /// 6. Under-capacity needs confirmation; over-capacity only informs
    fn check_capacity(
        &self,
        table_ids: &[String],
        party_size: u32,
        confirmed: bool,
    ) -> BookingResult<CapacityAdvisory> {
        let advisory = self.availability.capacity_advisory(table_ids, party_size);
        match advisory.kind {
            AdvisoryKind::Warning if !confirmed => Err(BookingError::UnderCapacity {
                capacity: advisory.capacity,
                party_size,
            }),
            AdvisoryKind::Warning => {
                info!(
                    capacity = advisory.capacity,
                    party_size, "Under-capacity booking confirmed by operator"
                );
                Ok(advisory)
            }
            AdvisoryKind::Info => {
                info!(capacity = advisory.capacity, party_size, "{}", advisory.message);
                Ok(advisory)
            }
            AdvisoryKind::None => Ok(advisory),
        }
    }

    /// 7. Any overlap on any selected table aborts
    fn check_conflict(
        &self,
        table_ids: &[String],
        date: NaiveDate,
        time: NaiveTime,
        editing: Option<i64>,
    ) -> BookingResult<()> {
        match self.availability.find_conflict(table_ids, date, time, editing) {
            Some(conflict) => Err(BookingError::Conflict {
                table_id: conflict.table_id,
                booking_id: conflict.booking_id,
            }),
            None => Ok(()),
        }
    }
}

/// 1. All missing fields are reported at once, then length limits
fn check_required_fields(draft: &BookingDraft) -> BookingResult<RequiredFields> {
    let mut missing = Vec::new();
    if is_blank(&draft.customer_name) {
        missing.push("customer_name");
    }
    if is_blank(&draft.phone) {
        missing.push("phone");
    }
    if draft.time.is_none() {
        missing.push("time");
    }
    if draft.party_size == 0 {
        missing.push("party_size");
    }

    let Some(time) = draft.time else {
        return Err(BookingError::MissingFields(missing));
    };
    if !missing.is_empty() {
        return Err(BookingError::MissingFields(missing));
    }

    let customer_name = draft.customer_name.trim();
    let phone = draft.phone.trim();
    if exceeds(customer_name, MAX_NAME_LEN) {
        return Err(BookingError::TextTooLong {
            field: "customer_name",
            max: MAX_NAME_LEN,
        });
    }
    if exceeds(phone, MAX_PHONE_LEN) {
        return Err(BookingError::TextTooLong {
            field: "phone",
            max: MAX_PHONE_LEN,
        });
    }
    if let Some(notes) = &draft.notes
        && exceeds(notes.trim(), MAX_NOTE_LEN)
    {
        return Err(BookingError::TextTooLong {
            field: "notes",
            max: MAX_NOTE_LEN,
        });
    }

    Ok(RequiredFields {
        customer_name: customer_name.to_string(),
        phone: phone.to_string(),
        party_size: draft.party_size,
        time: truncate_to_minute(time),
    })
}

/// 3. 不能预订过去的日期
fn check_not_past_date(date: NaiveDate, today: NaiveDate) -> BookingResult<()> {
    if date < today {
        return Err(BookingError::PastDate { date, today });
    }
    Ok(())
}

/// 4. 公休日不接受订位
fn check_not_closed(date: NaiveDate, closed_weekday: Weekday) -> BookingResult<()> {
    if is_closed_day(date, closed_weekday) {
        return Err(BookingError::ClosedDay { date });
    }
    Ok(())
}
