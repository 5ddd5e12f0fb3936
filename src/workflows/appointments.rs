use std::collections::{BTreeMap, HashMap};

use futures_util::future::join_all;
use serde::Serialize;
use time::{PrimitiveDateTime, Time};
use tracing::{info, warn};

use crate::api::{BookingRepository, DoctorRepository, PatientRepository};
use crate::error::AppResult;
use crate::http::ApiClient;
use crate::models::validation::parse_iso_date;
use crate::models::{AppointmentStatus, Booking, BookingQuery};
use crate::scheduling::TimeOfDay;

pub const UNKNOWN_PATIENT: &str = "Unknown Patient";
pub const UNKNOWN_DOCTOR: &str = "Unknown Doctor";

#[derive(Debug, Clone, Serialize)]
pub struct DoctorAppointment {
    pub booking: Booking,
    pub patient_name: String,
}

/// One calendar day of a doctor's appointments, earliest first.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentDay {
    pub date: String,
    pub appointments: Vec<DoctorAppointment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientAppointment {
    pub booking: Booking,
    pub doctor_name: String,
}

/// Confirmed bookings for the doctor grouped by date. Each patient's name is
/// fetched once; lookups that fail show as [`UNKNOWN_PATIENT`].
pub async fn doctor_appointments(api: &ApiClient, doctor_id: &str) -> AppResult<Vec<AppointmentDay>> {
    let bookings: Vec<Booking> = BookingRepository::list(api, &BookingQuery::for_doctor(doctor_id))
        .await?
        .into_iter()
        .filter(Booking::is_confirmed)
        .collect();

    let names = resolve_names(
        bookings.iter().map(|b| b.patient_id.as_str()),
        |id| async move { PatientRepository::get(api, &id).await.map(|p| p.full_name()) },
        UNKNOWN_PATIENT,
    )
    .await;

    let mut days: BTreeMap<String, Vec<DoctorAppointment>> = BTreeMap::new();
    for booking in bookings {
        let date = booking.day().unwrap_or_default().to_string();
        let patient_name = names
            .get(&booking.patient_id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_PATIENT.to_string());
        days.entry(date).or_default().push(DoctorAppointment {
            booking,
            patient_name,
        });
    }

    let grouped: Vec<AppointmentDay> = days
        .into_iter()
        .map(|(date, mut appointments)| {
            appointments.sort_by(|a, b| a.booking.start_time.cmp(&b.booking.start_time));
            AppointmentDay { date, appointments }
        })
        .collect();
    info!(%doctor_id, days = grouped.len(), "Loaded doctor appointments");
    Ok(grouped)
}

/// Doctor-side cancel: the booking is deleted.
pub async fn cancel_appointment(api: &ApiClient, booking_id: &str) -> AppResult<()> {
    BookingRepository::delete(api, booking_id).await?;
    info!(%booking_id, "Appointment cancelled");
    Ok(())
}

/// Patient-side cancel: the booking is kept with status `cancelled`, which
/// frees its slot.
pub async fn cancel_booking_as_patient(api: &ApiClient, booking_id: &str) -> AppResult<Booking> {
    let booking =
        BookingRepository::update_status(api, booking_id, AppointmentStatus::Cancelled).await?;
    info!(%booking_id, "Appointment cancelled by patient");
    Ok(booking)
}

/// The patient's bookings that are not cancelled, with the doctor's display
/// name.
pub async fn patient_appointments(
    api: &ApiClient,
    patient_id: &str,
) -> AppResult<Vec<PatientAppointment>> {
    let bookings: Vec<Booking> =
        BookingRepository::list(api, &BookingQuery::for_patient(patient_id))
            .await?
            .into_iter()
            .filter(|b| b.appointment_status != AppointmentStatus::Cancelled)
            .collect();

    let names = resolve_names(
        bookings.iter().map(|b| b.doctor_id.as_str()),
        |id| async move {
            DoctorRepository::summary(api, &id)
                .await
                .map(|d| format!("Dr. {} {}", d.first_name, d.last_name))
        },
        UNKNOWN_DOCTOR,
    )
    .await;

    Ok(bookings
        .into_iter()
        .map(|booking| {
            let doctor_name = names
                .get(&booking.doctor_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_DOCTOR.to_string());
            PatientAppointment {
                booking,
                doctor_name,
            }
        })
        .collect())
}

/// Confirmed appointments that have not ended by `now`.
pub fn upcoming(appointments: &[PatientAppointment], now: PrimitiveDateTime) -> Vec<&PatientAppointment> {
    appointments
        .iter()
        .filter(|a| a.booking.is_confirmed())
        .filter(|a| ends_at(&a.booking).is_some_and(|end| end > now))
        .collect()
}

fn ends_at(booking: &Booking) -> Option<PrimitiveDateTime> {
    let date = parse_iso_date(booking.day()?)?;
    let end = TimeOfDay::parse_24h(booking.end_clock()?).ok()?;
    let time = Time::from_hms(end.hour(), end.minute(), 0).ok()?;
    Some(PrimitiveDateTime::new(date, time))
}

/// Look each distinct id up once, concurrently.
async fn resolve_names<'a, F, Fut>(
    ids: impl Iterator<Item = &'a str>,
    lookup: F,
    fallback: &str,
) -> HashMap<String, String>
where
    F: Fn(String) -> Fut,
    Fut: std::future::Future<Output = AppResult<String>>,
{
    let mut unique: Vec<String> = ids.map(str::to_string).collect();
    unique.sort();
    unique.dedup();

    let results = join_all(unique.iter().cloned().map(&lookup)).await;
    unique
        .into_iter()
        .zip(results)
        .map(|(id, result)| {
            let name = result.unwrap_or_else(|e| {
                warn!(error = %e, %id, "Name lookup failed");
                fallback.to_string()
            });
            (id, name)
        })
        .collect()
}
