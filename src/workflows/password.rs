use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::api::AuthenticationRepository;
use crate::app_state::AppState;
use crate::chat::ChatTransport;
use crate::error::{AppError, AppResult, FieldErrors};
use crate::identity::{IdentityProvider, Session};
use crate::models::validation::is_strong_password;
use crate::models::PasswordUpdate;

pub struct PasswordChange {
    pub current: SecretString,
    pub new: SecretString,
    pub confirm: SecretString,
}

impl PasswordChange {
    pub fn validate(&self) -> AppResult<()> {
        let current = self.current.expose_secret();
        let new = self.new.expose_secret();
        let confirm = self.confirm.expose_secret();

        let mut errors = FieldErrors::default();
        if current.is_empty() {
            errors.push("current_password", "* Current password is required.");
        }
        if new.is_empty() {
            errors.push("new_password", "* New password is required.");
        } else if new == current {
            errors.push("new_password", "New password must differ from the current one.");
        } else if !is_strong_password(new) {
            errors.push(
                "new_password",
                "Password must be at least 8 characters with an uppercase letter, a number and a special character.",
            );
        }
        if confirm.is_empty() {
            errors.push("confirm_password", "* Please confirm the new password.");
        } else if confirm != new {
            errors.push("confirm_password", "Passwords do not match.");
        }
        errors.into_result()
    }
}

/// Rotate the password with the identity provider first, then mirror it on
/// the backend authentication record.
pub async fn change_password<I, C>(
    state: &AppState<I, C>,
    session: &Session,
    user_id: &str,
    change: &PasswordChange,
) -> AppResult<()>
where
    I: IdentityProvider,
    C: ChatTransport,
{
    change.validate()?;
    state.identity.reauthenticate(session, &change.current).await?;
    state.identity.update_password(session, &change.new).await?;

    let update = PasswordUpdate {
        password: change.new.clone(),
    };
    AuthenticationRepository::update_password(&state.api, user_id, &update).await?;
    info!(%user_id, "Password changed");
    Ok(())
}

pub async fn forgot_password<I, C>(state: &AppState<I, C>, email: &str) -> AppResult<()>
where
    I: IdentityProvider,
    C: ChatTransport,
{
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::validation("email", "* Email is required."));
    }
    state.identity.send_password_reset(email).await?;
    info!("Password reset email requested");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(current: &str, new: &str, confirm: &str) -> PasswordChange {
        PasswordChange {
            current: SecretString::from(current.to_string()),
            new: SecretString::from(new.to_string()),
            confirm: SecretString::from(confirm.to_string()),
        }
    }

    fn fields(result: AppResult<()>) -> FieldErrors {
        match result {
            Err(AppError::Validation(fields)) => fields,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_a_strong_distinct_password() {
        assert!(change("Old#pass1", "New#pass2", "New#pass2").validate().is_ok());
    }

    #[test]
    fn rejects_reuse_mismatch_and_weakness() {
        let errors = fields(change("Same#pass1", "Same#pass1", "Same#pass1").validate());
        assert!(errors.get("new_password").is_some());

        let errors = fields(change("Old#pass1", "New#pass2", "New#pass3").validate());
        assert!(errors.get("confirm_password").is_some());

        let errors = fields(change("Old#pass1", "newpass", "newpass").validate());
        assert!(errors.get("new_password").is_some());

        let errors = fields(change("", "", "").validate());
        assert_eq!(errors.0.len(), 3);
    }
}
