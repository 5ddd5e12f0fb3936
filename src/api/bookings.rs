use crate::error::AppResult;
use crate::http::ApiClient;
use crate::models::{AppointmentStatus, Booking, BookingQuery, BookingStatusUpdate, NewBooking};

pub struct BookingRepository;

impl BookingRepository {
    pub async fn list(client: &ApiClient, query: &BookingQuery) -> AppResult<Vec<Booking>> {
        let url = client.endpoint(&["api", "bookings"])?;
        client.get_json("/api/bookings/", url, &query.pairs()).await
    }

    /// A 409 means the doctor was booked in that slot between our fetch and
    /// this submit; it is surfaced as-is.
    pub async fn create(client: &ApiClient, booking: &NewBooking) -> AppResult<Booking> {
        let url = client.endpoint(&["api", "bookings"])?;
        client.post_json("/api/bookings/", url, booking).await
    }

    /// Status-only update; the booking stays on the backend.
    pub async fn update_status(
        client: &ApiClient,
        booking_id: &str,
        status: AppointmentStatus,
    ) -> AppResult<Booking> {
        let url = client.endpoint(&["api", "bookings", booking_id])?;
        let body = BookingStatusUpdate {
            appointment_status: status,
        };
        client.put_json("/api/bookings/{id}/", url, &body).await
    }

    pub async fn delete(client: &ApiClient, booking_id: &str) -> AppResult<()> {
        let url = client.endpoint(&["api", "bookings", booking_id])?;
        client.delete("/api/bookings/{id}/", url).await
    }
}
