//! Booking Store
//!
//! Flat, insertion-ordered list of every booking ever created. Only the
//! ledger writes to it; reads are plain scans.

use chrono::NaiveDate;
use shared::models::{Booking, DayBookings};

#[derive(Debug, Clone, Default)]
pub struct BookingStore {
    bookings: Vec<Booking>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: i64) -> Option<&mut Booking> {
        self.bookings.iter_mut().find(|b| b.id == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn insert(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    /// Replace the booking with the same id in place; returns the old record
    pub(crate) fn replace(&mut self, booking: Booking) -> Option<Booking> {
        let slot = self.get_mut(booking.id)?;
        Some(std::mem::replace(slot, booking))
    }

    pub(crate) fn remove(&mut self, id: i64) -> Option<Booking> {
        let index = self.bookings.iter().position(|b| b.id == id)?;
        Some(self.bookings.remove(index))
    }

    /// Bookings of a date split by status, each sorted by time
    pub fn on_date(&self, date: NaiveDate) -> DayBookings {
        let mut day: Vec<&Booking> = self.bookings.iter().filter(|b| b.date == date).collect();
        day.sort_by_key(|b| b.time);

        let (active, finished): (Vec<&Booking>, Vec<&Booking>) =
            day.into_iter().partition(|b| b.is_active());

        DayBookings {
            active: active.into_iter().cloned().collect(),
            finished: finished.into_iter().cloned().collect(),
        }
    }
}
