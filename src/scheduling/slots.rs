//! Bookable start times for one doctor on one date.
//!
//! Both the patient booking view and the doctor's own schedule derive their
//! options from here so the two never drift apart. The computation is a
//! convenience for the UI only: the backend still rejects a start time that
//! another client booked after our fetch.

use std::collections::HashSet;

use serde::Serialize;

use super::time_of_day::TimeOfDay;
use crate::models::{Booking, TimeSlot};

pub const SLOT_GRANULARITY_MINUTES: u16 = 30;

/// Daily range `[start, end)` during which a doctor accepts appointments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// Backend time slot this window came from, echoed into bookings.
    pub timeslot_id: Option<String>,
}

/// One offerable start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotOption {
    /// `9:30 AM`
    pub label: String,
    /// `09:30`
    pub value: String,
    pub timeslot_id: Option<String>,
}

/// Start times (`HH:MM`) already reserved for a (doctor, date) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedTimes(HashSet<String>);

impl AvailabilityWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            start,
            end,
            timeslot_id: None,
        }
    }

    /// Available backend slots with both ends set; anything else is skipped.
    pub fn from_timeslot(slot: &TimeSlot) -> Option<Self> {
        if !slot.is_available() {
            return None;
        }
        let start = TimeOfDay::parse_24h(slot.start_time.as_deref()?).ok()?;
        let end = TimeOfDay::parse_24h(slot.end_time.as_deref()?).ok()?;
        Some(Self {
            start,
            end,
            timeslot_id: Some(slot.timeslot_id.clone()),
        })
    }

    /// Every start time from `start` in fixed steps, strictly before `end`.
    /// Empty when `start >= end`.
    pub fn intervals(&self) -> impl Iterator<Item = TimeOfDay> + '_ {
        std::iter::successors(Some(self.start), |t| {
            t.checked_add_minutes(SLOT_GRANULARITY_MINUTES)
        })
        .take_while(move |t| *t < self.end)
    }
}

impl SlotOption {
    pub fn new(time: TimeOfDay, timeslot_id: Option<String>) -> Self {
        Self {
            label: time.to_12h(),
            value: time.to_24h(),
            timeslot_id,
        }
    }

    pub fn time(&self) -> Option<TimeOfDay> {
        TimeOfDay::parse_24h(&self.value).ok()
    }
}

impl BookedTimes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        self.0.insert(value.into())
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.contains(value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for BookedTimes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        BookedTimes(iter.into_iter().map(Into::into).collect())
    }
}

/// Concatenate the intervals of every window in window order. Overlapping
/// windows are not merged or de-duplicated.
pub fn generate_slot_options(windows: &[AvailabilityWindow]) -> Vec<SlotOption> {
    windows
        .iter()
        .flat_map(|window| {
            window
                .intervals()
                .map(move |t| SlotOption::new(t, window.timeslot_id.clone()))
        })
        .collect()
}

/// Drop options whose `value` is already booked, keeping order.
pub fn filter_booked(options: Vec<SlotOption>, booked: &BookedTimes) -> Vec<SlotOption> {
    options
        .into_iter()
        .filter(|option| !booked.contains(&option.value))
        .collect()
}

pub fn available_slot_options(
    windows: &[AvailabilityWindow],
    booked: &BookedTimes,
) -> Vec<SlotOption> {
    filter_booked(generate_slot_options(windows), booked)
}

/// Start times of the confirmed bookings; cancelled and completed ones
/// free their slot.
pub fn booked_times(bookings: &[Booking]) -> BookedTimes {
    bookings
        .iter()
        .filter(|b| b.is_confirmed())
        .filter_map(|b| b.start_clock())
        .collect()
}

pub fn windows_from_timeslots(slots: &[TimeSlot]) -> Vec<AvailabilityWindow> {
    slots.iter().filter_map(AvailabilityWindow::from_timeslot).collect()
}
