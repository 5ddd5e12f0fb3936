use serde::Serialize;
use tracing::info;

use crate::api::PatientRepository;
use crate::error::{AppError, AppResult};
use crate::http::ApiClient;
use crate::models::PatientUpdate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MedicalHistory {
    pub blood_type: Option<String>,
    pub medical_history: Option<String>,
}

pub async fn load_medical_history(api: &ApiClient, patient_id: &str) -> AppResult<MedicalHistory> {
    let patient = PatientRepository::get(api, patient_id).await?;
    Ok(MedicalHistory {
        blood_type: patient.blood_type,
        medical_history: patient.medical_history,
    })
}

/// Values are trimmed before saving; an empty field is sent as empty text so
/// it clears the stored value.
pub async fn save_medical_history(
    api: &ApiClient,
    patient_id: &str,
    blood_type: &str,
    history: &str,
) -> AppResult<MedicalHistory> {
    let blood_type = blood_type.trim();
    if blood_type.chars().count() > 3 {
        return Err(AppError::validation(
            "blood_type",
            "Blood type is at most 3 characters.",
        ));
    }
    let update = PatientUpdate {
        blood_type: Some(blood_type.to_string()),
        medical_history: Some(history.trim().to_string()),
        ..PatientUpdate::default()
    };
    let patient = PatientRepository::update(api, patient_id, &update).await?;
    info!(%patient_id, "Medical history saved");
    Ok(MedicalHistory {
        blood_type: patient.blood_type,
        medical_history: patient.medical_history,
    })
}
