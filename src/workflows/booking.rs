use time::Date;
use tracing::{info, warn};

use crate::api::{BookingRepository, TimeSlotRepository};
use crate::error::{AppError, AppResult};
use crate::http::ApiClient;
use crate::models::validation::parse_iso_date;
use crate::models::{Booking, BookingQuery, NewBooking};
use crate::scheduling::{available_slot_options, booked_times, windows_from_timeslots, SlotOption};

/// Pick a day, see the free half-hour starts, book one.
pub struct BookingFlow<'a> {
    api: &'a ApiClient,
}

impl<'a> BookingFlow<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Free start times for `doctor_id` on `date`, in window order.
    pub async fn load_options(&self, doctor_id: &str, date: &str) -> AppResult<Vec<SlotOption>> {
        parse_date(date)?;
        let query = BookingQuery::for_doctor(doctor_id).on(date);
        let (slots, bookings) = tokio::try_join!(
            TimeSlotRepository::list_for_doctor(self.api, doctor_id),
            BookingRepository::list(self.api, &query),
        )?;

        let windows = windows_from_timeslots(&slots);
        let booked = booked_times(&bookings);
        let options = available_slot_options(&windows, &booked);
        info!(
            %doctor_id,
            %date,
            windows = windows.len(),
            booked = booked.len(),
            options = options.len(),
            "Loaded slot options"
        );
        Ok(options)
    }

    /// Book `option` on `date`. Dates before `today` are rejected without
    /// contacting the backend. A slot taken in the meantime comes back as
    /// [`AppError::Conflict`]; it is not retried.
    pub async fn book(
        &self,
        patient_id: &str,
        doctor_id: &str,
        date: &str,
        option: &SlotOption,
        today: Date,
    ) -> AppResult<Booking> {
        let day = parse_date(date)?;
        if day < today {
            return Err(AppError::validation("date", "Please select a future date."));
        }
        let timeslot_id = option
            .timeslot_id
            .clone()
            .ok_or_else(|| AppError::validation("time", "Please select a time slot."))?;

        let booking = NewBooking {
            patient_id: patient_id.to_string(),
            doctor_id: doctor_id.to_string(),
            timeslot_id,
            date: date.to_string(),
            start_time: format!("{}T{}:00", date, option.value),
        };

        match BookingRepository::create(self.api, &booking).await {
            Ok(created) => {
                info!(booking_id = %created.booking_id, %doctor_id, %date, time = %option.value, "Appointment booked");
                Ok(created)
            }
            Err(e) => {
                if e.is_conflict() {
                    warn!(%doctor_id, %date, time = %option.value, "Slot was taken before submit");
                }
                Err(e)
            }
        }
    }
}

fn parse_date(date: &str) -> AppResult<Date> {
    parse_iso_date(date).ok_or_else(|| AppError::validation("date", "Use the YYYY-MM-DD format."))
}
