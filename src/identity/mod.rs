//! External identity provider seam.
//!
//! Sign-in and account management are delegated; the client only needs the
//! operations below and treats the returned session as opaque.

mod memory;

pub use memory::InMemoryIdentityProvider;

use std::future::Future;

use secrecy::SecretString;

use crate::error::{AppError, AppResult};

/// Opaque signed-in user handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uid: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityFailure {
    EmailInUse,
    UserNotFound,
    WrongPassword,
    WeakPassword,
    SessionExpired,
}

impl IdentityFailure {
    pub fn code(&self) -> &'static str {
        match self {
            IdentityFailure::EmailInUse => "auth/email-already-in-use",
            IdentityFailure::UserNotFound => "auth/user-not-found",
            IdentityFailure::WrongPassword => "auth/wrong-password",
            IdentityFailure::WeakPassword => "auth/weak-password",
            IdentityFailure::SessionExpired => "auth/requires-recent-login",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        [
            IdentityFailure::EmailInUse,
            IdentityFailure::UserNotFound,
            IdentityFailure::WrongPassword,
            IdentityFailure::WeakPassword,
            IdentityFailure::SessionExpired,
        ]
        .into_iter()
        .find(|f| f.code() == code)
    }

    /// Recover the failure kind from an error raised by a provider.
    pub fn of(error: &AppError) -> Option<Self> {
        match error {
            AppError::Authentication(code) => Self::from_code(code),
            _ => None,
        }
    }
}

impl From<IdentityFailure> for AppError {
    fn from(failure: IdentityFailure) -> Self {
        AppError::Authentication(failure.code().to_string())
    }
}

pub trait IdentityProvider: Send + Sync {
    fn sign_up(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = AppResult<Session>> + Send;

    fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = AppResult<Session>> + Send;

    fn send_password_reset(&self, email: &str) -> impl Future<Output = AppResult<()>> + Send;

    /// Confirm the current password before a sensitive change.
    fn reauthenticate(
        &self,
        session: &Session,
        password: &SecretString,
    ) -> impl Future<Output = AppResult<()>> + Send;

    fn update_password(
        &self,
        session: &Session,
        new_password: &SecretString,
    ) -> impl Future<Output = AppResult<()>> + Send;

    fn delete_user(&self, session: &Session) -> impl Future<Output = AppResult<()>> + Send;
}
