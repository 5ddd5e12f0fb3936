//! Account creation for patients and doctors.
//!
//! A registration touches four systems in order: the profile resource, the
//! identity provider, the backend authentication record and the chat
//! service. If any step fails, whatever was already created is removed
//! again and the original error is returned.

use secrecy::{ExposeSecret, SecretString};
use tracing::{error, info, warn};
use validator::Validate;

use crate::api::{AuthenticationRepository, DoctorRepository, PatientRepository};
use crate::app_state::AppState;
use crate::chat::{ChatTransport, ChatUser};
use crate::error::{AppResult, FieldErrors};
use crate::identity::{IdentityProvider, Session};
use crate::models::validation::{is_strong_password, validate_mobile};
use crate::models::{NewAuthRecord, NewDoctor, NewPatient, UserType};

/// Login details entered alongside the profile.
#[derive(Debug, Validate)]
pub struct AccountDetails {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(custom(function = "validate_mobile"))]
    pub phone_number: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl AccountDetails {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::from_validation(self.validate());
        let password = self.password.expose_secret();
        if !is_strong_password(password) {
            errors.push(
                "password",
                "Password must be at least 8 characters with an uppercase letter, a number and a special character.",
            );
        }
        if password != self.confirm_password.expose_secret() {
            errors.push("confirm_password", "Passwords do not match.");
        }
        errors
    }

    fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

#[derive(Debug)]
pub struct PatientRegistration {
    pub patient: NewPatient,
    pub account: AccountDetails,
}

#[derive(Debug)]
pub struct DoctorRegistration {
    pub doctor: NewDoctor,
    pub account: AccountDetails,
}

#[derive(Debug, Clone)]
pub struct Registered {
    pub user_id: String,
    pub user_type: UserType,
    pub session: Session,
}

enum Profile {
    Patient(String),
    Doctor(String),
}

/// What has been created so far.
struct Created {
    profile: Profile,
    identity: Option<Session>,
    auth_record: Option<String>,
}

impl Created {
    fn new(profile: Profile) -> Self {
        Self {
            profile,
            identity: None,
            auth_record: None,
        }
    }

    /// Remove the identity user, then the auth record, then the profile.
    /// Failures here are logged; the caller keeps the original error.
    async fn roll_back<I, C>(self, state: &AppState<I, C>)
    where
        I: IdentityProvider,
        C: ChatTransport,
    {
        if let Some(session) = &self.identity {
            if let Err(e) = state.identity.delete_user(session).await {
                warn!(error = %e, uid = %session.uid, "Rollback: failed to delete identity user");
            }
        }
        if let Some(user_id) = &self.auth_record {
            if let Err(e) = AuthenticationRepository::delete(&state.api, user_id).await {
                warn!(error = %e, %user_id, "Rollback: failed to delete auth record");
            }
        }
        let removed = match &self.profile {
            Profile::Patient(id) => PatientRepository::delete(&state.api, id).await,
            Profile::Doctor(id) => DoctorRepository::delete(&state.api, id).await,
        };
        if let Err(e) = removed {
            warn!(error = %e, "Rollback: failed to delete profile");
        }
    }
}

pub async fn register_patient<I, C>(
    state: &AppState<I, C>,
    form: &PatientRegistration,
) -> AppResult<Registered>
where
    I: IdentityProvider,
    C: ChatTransport,
{
    let mut errors = FieldErrors::from_validation(form.patient.validate());
    errors.merge(form.account.field_errors());
    errors.into_result()?;

    let created = PatientRepository::create(&state.api, &form.patient).await?;
    let name = format!("{} {}", created.first_name, created.last_name);
    info!(patient_id = %created.patient_id, "Patient profile created");

    let progress = Created::new(Profile::Patient(created.patient_id.clone()));
    finish_account(state, &form.account, UserType::Patient, created.patient_id, name, progress).await
}

pub async fn register_doctor<I, C>(
    state: &AppState<I, C>,
    form: &DoctorRegistration,
) -> AppResult<Registered>
where
    I: IdentityProvider,
    C: ChatTransport,
{
    let mut errors = FieldErrors::from_validation(form.doctor.validate());
    errors.merge(form.account.field_errors());
    errors.into_result()?;

    let created = DoctorRepository::create(&state.api, &form.doctor).await?;
    let name = created.display_name();
    info!(doctor_id = %created.doctor_id, "Doctor profile created");

    let progress = Created::new(Profile::Doctor(created.doctor_id.clone()));
    finish_account(state, &form.account, UserType::Doctor, created.doctor_id, name, progress).await
}

async fn finish_account<I, C>(
    state: &AppState<I, C>,
    account: &AccountDetails,
    user_type: UserType,
    user_id: String,
    name: String,
    mut progress: Created,
) -> AppResult<Registered>
where
    I: IdentityProvider,
    C: ChatTransport,
{
    let email = account.normalized_email();
    let outcome: AppResult<Session> = async {
        let session = state.identity.sign_up(&email, &account.password).await?;
        progress.identity = Some(session.clone());

        let record = NewAuthRecord {
            user_id: user_id.clone(),
            user_type,
            phone_number: account.phone_number.clone(),
            email: email.clone(),
            password: account.password.clone(),
        };
        AuthenticationRepository::create(&state.api, &record).await?;
        progress.auth_record = Some(user_id.clone());

        state.chat.connect_user(&ChatUser::new(user_id.clone(), name.clone())).await?;
        state.chat.disconnect_user(&user_id).await?;
        Ok(session)
    }
    .await;

    match outcome {
        Ok(session) => {
            info!(%user_id, user_type = user_type.as_str(), "Registration complete");
            Ok(Registered {
                user_id,
                user_type,
                session,
            })
        }
        Err(e) => {
            error!(error = %e, %user_id, "Registration failed, rolling back");
            progress.roll_back(state).await;
            Err(e)
        }
    }
}
