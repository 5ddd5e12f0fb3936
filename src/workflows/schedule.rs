use tracing::info;

use crate::api::{DoctorRepository, TimeSlotRepository};
use crate::error::{AppError, AppResult, FieldErrors};
use crate::http::ApiClient;
use crate::models::{AvailabilityStatus, Doctor, DoctorUpdate, NewTimeSlot, TimeSlot};
use crate::scheduling::TimeOfDay;

/// Hospital id sent with every new time slot; the backend does not link
/// slots to hospitals yet.
const NO_HOSPITAL: &str = "NA";

/// A daily availability window as entered by the doctor.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleEntry {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub fee: f64,
}

impl ScheduleEntry {
    fn validate(&self) -> AppResult<()> {
        let mut errors = FieldErrors::default();
        if self.start >= self.end {
            errors.push("end_time", "End time must be after start time.");
        }
        if !self.fee.is_finite() || self.fee < 0.0 {
            errors.push("fee", "Fee must be zero or more.");
        }
        errors.into_result()
    }
}

pub async fn list_schedule(api: &ApiClient, doctor_id: &str) -> AppResult<Vec<TimeSlot>> {
    TimeSlotRepository::list_for_doctor(api, doctor_id).await
}

pub async fn add_time_slot(
    api: &ApiClient,
    doctor_id: &str,
    entry: &ScheduleEntry,
) -> AppResult<TimeSlot> {
    entry.validate()?;
    let slot = NewTimeSlot {
        doctor_id: doctor_id.to_string(),
        hospital_id: NO_HOSPITAL.to_string(),
        start_time: format!("{}:00", entry.start.to_24h()),
        end_time: format!("{}:00", entry.end.to_24h()),
        fee: entry.fee,
        availability_status: AvailabilityStatus::Available,
    };
    let created = TimeSlotRepository::create(api, &slot).await?;
    info!(%doctor_id, timeslot_id = %created.timeslot_id, "Time slot added");
    Ok(created)
}

pub async fn remove_time_slot(api: &ApiClient, timeslot_id: &str) -> AppResult<()> {
    TimeSlotRepository::delete(api, timeslot_id).await?;
    info!(%timeslot_id, "Time slot removed");
    Ok(())
}

pub async fn update_hospital(api: &ApiClient, doctor_id: &str, hospital_name: &str) -> AppResult<Doctor> {
    let hospital_name = hospital_name.trim();
    if hospital_name.chars().count() < 2 {
        return Err(AppError::validation(
            "hospital_name",
            "Valid hospital name required.",
        ));
    }
    let update = DoctorUpdate {
        hospital_name: Some(hospital_name.to_string()),
        ..DoctorUpdate::default()
    };
    DoctorRepository::update(api, doctor_id, &update).await
}
