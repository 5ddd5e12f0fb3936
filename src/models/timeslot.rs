use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Unavailable,
}

/// A doctor's recurring daily availability window as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub timeslot_id: String,
    pub doctor_id: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_fee")]
    pub fee: Option<f64>,
    #[serde(default)]
    pub availability_status: AvailabilityStatus,
}

impl TimeSlot {
    pub fn is_available(&self) -> bool {
        self.availability_status == AvailabilityStatus::Available
    }
}

/// Body of `POST timeslots/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTimeSlot {
    pub doctor_id: String,
    pub hospital_id: String,
    /// `HH:MM:SS`
    pub start_time: String,
    /// `HH:MM:SS`
    pub end_time: String,
    pub fee: f64,
    pub availability_status: AvailabilityStatus,
}

// Decimal fields come back as strings ("500.00").
fn lenient_fee<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
