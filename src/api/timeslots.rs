use crate::error::AppResult;
use crate::http::ApiClient;
use crate::models::{NewTimeSlot, TimeSlot};

pub struct TimeSlotRepository;

impl TimeSlotRepository {
    pub async fn list_for_doctor(client: &ApiClient, doctor_id: &str) -> AppResult<Vec<TimeSlot>> {
        let url = client.endpoint(&["api", "timeslots"])?;
        client
            .get_json("/api/timeslots/", url, &[("doctor_id", doctor_id)])
            .await
    }

    pub async fn create(client: &ApiClient, slot: &NewTimeSlot) -> AppResult<TimeSlot> {
        let url = client.endpoint(&["api", "timeslots"])?;
        client.post_json("/api/timeslots/", url, slot).await
    }

    pub async fn delete(client: &ApiClient, timeslot_id: &str) -> AppResult<()> {
        let url = client.endpoint(&["api", "timeslots", timeslot_id])?;
        client.delete("/api/timeslots/{id}/", url).await
    }
}
