use crate::error::AppResult;
use crate::http::ApiClient;
use crate::models::{Doctor, DoctorSummary, DoctorUpdate, NewDoctor};

pub struct DoctorRepository;

impl DoctorRepository {
    pub async fn list(client: &ApiClient) -> AppResult<Vec<Doctor>> {
        let url = client.endpoint(&["api", "doctors"])?;
        client.get_json("/api/doctors/", url, &[]).await
    }

    pub async fn get(client: &ApiClient, doctor_id: &str) -> AppResult<Doctor> {
        let url = client.endpoint(&["api", "doctors", doctor_id])?;
        client.get_json("/api/doctors/{id}/", url, &[]).await
    }

    pub async fn summary(client: &ApiClient, doctor_id: &str) -> AppResult<DoctorSummary> {
        let url = client.endpoint(&["api", "doctors", doctor_id, "summary"])?;
        client.get_json("/api/doctors/{id}/summary/", url, &[]).await
    }

    pub async fn create(client: &ApiClient, doctor: &NewDoctor) -> AppResult<Doctor> {
        let url = client.endpoint(&["api", "doctors"])?;
        client.post_json("/api/doctors/", url, doctor).await
    }

    pub async fn update(
        client: &ApiClient,
        doctor_id: &str,
        update: &DoctorUpdate,
    ) -> AppResult<Doctor> {
        let url = client.endpoint(&["api", "doctors", doctor_id])?;
        client.put_json("/api/doctors/{id}/", url, update).await
    }

    pub async fn delete(client: &ApiClient, doctor_id: &str) -> AppResult<()> {
        let url = client.endpoint(&["api", "doctors", doctor_id])?;
        client.delete("/api/doctors/{id}/", url).await
    }
}
