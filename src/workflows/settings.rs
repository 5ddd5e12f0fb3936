use serde::Serialize;

use crate::api::{AuthenticationRepository, PatientRepository};
use crate::error::AppResult;
use crate::http::ApiClient;

/// What the patient settings screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientProfile {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
}

pub async fn load_patient_profile(api: &ApiClient, patient_id: &str) -> AppResult<PatientProfile> {
    let (patient, account) = tokio::try_join!(
        PatientRepository::get(api, patient_id),
        AuthenticationRepository::get(api, patient_id),
    )?;
    Ok(PatientProfile {
        full_name: patient.full_name(),
        phone_number: account.phone_number,
        email: account.email,
    })
}
