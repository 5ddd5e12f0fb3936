use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub timeslot_id: String,
    #[serde(default)]
    pub date: Option<String>,
    /// ISO local date-time, `YYYY-MM-DDTHH:MM:SS`.
    pub start_time: String,
    pub end_time: String,
    pub appointment_status: AppointmentStatus,
}

impl Booking {
    pub fn is_confirmed(&self) -> bool {
        self.appointment_status == AppointmentStatus::Confirmed
    }

    /// `HH:MM` part of the start time.
    pub fn start_clock(&self) -> Option<&str> {
        clock_part(&self.start_time)
    }

    pub fn end_clock(&self) -> Option<&str> {
        clock_part(&self.end_time)
    }

    /// Calendar date, from `date` or else the start time's date part.
    pub fn day(&self) -> Option<&str> {
        self.date
            .as_deref()
            .or_else(|| self.start_time.split_once('T').map(|(day, _)| day))
    }
}

fn clock_part(stamp: &str) -> Option<&str> {
    let time = stamp.split_once('T').map(|(_, t)| t).unwrap_or(stamp);
    time.get(..5)
}

/// Body of `POST bookings/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewBooking {
    pub patient_id: String,
    pub doctor_id: String,
    pub timeslot_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `YYYY-MM-DDTHH:MM:00`
    pub start_time: String,
}

/// Body of `PUT bookings/{id}/` when only the status changes.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BookingStatusUpdate {
    pub appointment_status: AppointmentStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BookingQuery {
    pub doctor_id: Option<String>,
    pub patient_id: Option<String>,
    pub date: Option<String>,
}

impl BookingQuery {
    pub fn for_doctor(doctor_id: &str) -> Self {
        Self {
            doctor_id: Some(doctor_id.to_string()),
            ..Self::default()
        }
    }

    pub fn for_patient(patient_id: &str) -> Self {
        Self {
            patient_id: Some(patient_id.to_string()),
            ..Self::default()
        }
    }

    pub fn on(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        if let Some(doctor_id) = &self.doctor_id {
            pairs.push(("doctor_id", doctor_id.as_str()));
        }
        if let Some(patient_id) = &self.patient_id {
            pairs.push(("patient_id", patient_id.as_str()));
        }
        if let Some(date) = &self.date {
            pairs.push(("date", date.as_str()));
        }
        pairs
    }
}
