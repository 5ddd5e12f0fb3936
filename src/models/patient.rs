use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::{validate_cnic, validate_iso_date, validate_mobile, validate_person_name};
use super::Gender;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub cnic: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub medical_history: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body of `POST patients/`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewPatient {
    #[validate(
        length(min = 2, max = 50, message = "Must be between 2 and 50 characters."),
        custom(function = "validate_person_name")
    )]
    pub first_name: String,
    #[validate(
        length(min = 2, max = 50, message = "Must be between 2 and 50 characters."),
        custom(function = "validate_person_name")
    )]
    pub last_name: String,
    pub gender: Gender,
    #[validate(custom(function = "validate_iso_date"))]
    pub date_of_birth: String,
    #[validate(custom(function = "validate_cnic"))]
    pub cnic: String,
    #[validate(length(min = 1, message = "Address is required."))]
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 3, message = "Blood type is at most 3 characters."))]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_mobile"))]
    pub emergency_contact: Option<String>,
}

/// The backend answers a patient POST with a short confirmation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPatient {
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Partial `PUT patients/{id}/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
}
