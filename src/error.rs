use std::collections::BTreeMap;
use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;
use validator::ValidationErrors;

/// Generic alert shown for any transport or backend failure.
pub const NETWORK_ALERT: &str = "Something went wrong. Please check your connection and try again.";

/// Generic alert shown for any identity failure.
pub const CREDENTIAL_ALERT: &str = "Login failed. Please check your credentials.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend error ({status}): {message}")]
    Backend { status: StatusCode, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// The three ways a failure is surfaced to the person using the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFacing {
    /// One alert, no retry.
    Alert(String),
    /// Inline messages keyed by form field.
    Inline(BTreeMap<String, Vec<String>>),
    /// Generic credential error.
    Credentials(String),
}

impl AppError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation(FieldErrors::single(field, message))
    }

    /// Map a non-success HTTP response onto the taxonomy.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            StatusCode::CONFLICT => AppError::Conflict(message),
            _ => AppError::Backend { status, message },
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }

    pub fn user_message(&self) -> UserFacing {
        match self {
            AppError::Validation(fields) => UserFacing::Inline(fields.0.clone()),
            AppError::Authentication(_) => UserFacing::Credentials(CREDENTIAL_ALERT.to_string()),
            AppError::Conflict(message) | AppError::InvalidInput(message) => {
                UserFacing::Alert(message.clone())
            }
            AppError::Network(_)
            | AppError::Backend { .. }
            | AppError::NotFound(_)
            | AppError::Decode(_)
            | AppError::Chat(_) => UserFacing::Alert(NETWORK_ALERT.to_string()),
        }
    }
}

/// Per-field validation messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Collect the errors of a `validator` run; empty when it passed.
    pub fn from_validation(result: Result<(), ValidationErrors>) -> Self {
        result.err().map(Into::into).unwrap_or_default()
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::default();
        for (field, errs) in errors.field_errors() {
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid {}", err.code));
                fields.push(&field.to_string(), message);
            }
        }
        fields
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
