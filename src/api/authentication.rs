use crate::error::AppResult;
use crate::http::ApiClient;
use crate::models::{AuthRecord, Credentials, LoginResponse, NewAuthRecord, PasswordUpdate};

/// Backend-side account records linking an email to a patient or doctor id.
pub struct AuthenticationRepository;

impl AuthenticationRepository {
    pub async fn create(client: &ApiClient, record: &NewAuthRecord) -> AppResult<AuthRecord> {
        let url = client.endpoint(&["api", "authentication"])?;
        client.post_json("/api/authentication/", url, record).await
    }

    pub async fn get(client: &ApiClient, user_id: &str) -> AppResult<AuthRecord> {
        let url = client.endpoint(&["api", "authentication", user_id])?;
        client.get_json("/api/authentication/{user_id}/", url, &[]).await
    }

    pub async fn login(client: &ApiClient, credentials: &Credentials) -> AppResult<LoginResponse> {
        let url = client.endpoint(&["api", "authentication", "login"])?;
        client
            .post_json("/api/authentication/login/", url, credentials)
            .await
    }

    pub async fn update_password(
        client: &ApiClient,
        user_id: &str,
        update: &PasswordUpdate,
    ) -> AppResult<AuthRecord> {
        let url = client.endpoint(&["api", "authentication", user_id])?;
        client
            .put_json("/api/authentication/{user_id}/", url, update)
            .await
    }

    pub async fn delete(client: &ApiClient, user_id: &str) -> AppResult<()> {
        let url = client.endpoint(&["api", "authentication", user_id])?;
        client.delete("/api/authentication/{user_id}/", url).await
    }
}
