use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use crate::api::AuthenticationRepository;
use crate::app_state::AppState;
use crate::chat::ChatTransport;
use crate::error::{AppError, AppResult, FieldErrors};
use crate::identity::{IdentityFailure, IdentityProvider, Session};
use crate::models::{Credentials, UserType};

#[derive(Debug, Clone)]
pub struct LoggedIn {
    pub user_id: String,
    pub user_type: UserType,
    pub session: Session,
}

/// Sign in through the identity provider, then confirm with the backend that
/// the account belongs to the expected kind of user.
pub async fn login<I, C>(
    state: &AppState<I, C>,
    email: &str,
    password: &SecretString,
    expected: UserType,
) -> AppResult<LoggedIn>
where
    I: IdentityProvider,
    C: ChatTransport,
{
    let mut errors = FieldErrors::default();
    if email.trim().is_empty() {
        errors.push("email", "* Email is required.");
    }
    if password.expose_secret().is_empty() {
        errors.push("password", "* Password is required.");
    }
    errors.into_result()?;

    let session = state.identity.sign_in(email, password).await?;

    let credentials = Credentials::new(email, password.clone());
    let response = AuthenticationRepository::login(&state.api, &credentials)
        .await
        .map_err(backend_login_error)?;

    if response.user_type != expected {
        warn!(user_id = %response.user_id, "Login with the wrong account type");
        return Err(AppError::Authentication(format!(
            "This account is not registered as a {}.",
            expected.as_str()
        )));
    }

    info!(user_id = %response.user_id, user_type = expected.as_str(), "Logged in");
    Ok(LoggedIn {
        user_id: response.user_id,
        user_type: response.user_type,
        session,
    })
}

fn backend_login_error(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => IdentityFailure::UserNotFound.into(),
        AppError::Backend { status, .. }
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST =>
        {
            IdentityFailure::WrongPassword.into()
        }
        other => other,
    }
}
