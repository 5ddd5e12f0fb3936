use crate::error::AppResult;
use crate::http::ApiClient;
use crate::models::{CreatedPatient, NewPatient, Patient, PatientUpdate};

pub struct PatientRepository;

impl PatientRepository {
    pub async fn list(client: &ApiClient) -> AppResult<Vec<Patient>> {
        let url = client.endpoint(&["api", "patients"])?;
        client.get_json("/api/patients/", url, &[]).await
    }

    pub async fn get(client: &ApiClient, patient_id: &str) -> AppResult<Patient> {
        let url = client.endpoint(&["api", "patients", patient_id])?;
        client.get_json("/api/patients/{id}/", url, &[]).await
    }

    pub async fn create(client: &ApiClient, patient: &NewPatient) -> AppResult<CreatedPatient> {
        let url = client.endpoint(&["api", "patients"])?;
        client.post_json("/api/patients/", url, patient).await
    }

    pub async fn update(
        client: &ApiClient,
        patient_id: &str,
        update: &PatientUpdate,
    ) -> AppResult<Patient> {
        let url = client.endpoint(&["api", "patients", patient_id])?;
        client.put_json("/api/patients/{id}/", url, update).await
    }

    pub async fn delete(client: &ApiClient, patient_id: &str) -> AppResult<()> {
        let url = client.endpoint(&["api", "patients", patient_id])?;
        client.delete("/api/patients/{id}/", url).await
    }
}
