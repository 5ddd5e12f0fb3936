mod common;

use common::{MockBackend, TestState};
use healthsync::error::UserFacing;
use healthsync::identity::{IdentityFailure, IdentityProvider, Session};
use healthsync::models::UserType;
use healthsync::workflows::{
    change_password, forgot_password, load_medical_history, load_patient_profile, login,
    save_medical_history, PasswordChange, PatientProfile,
};
use healthsync::AppError;
use secrecy::SecretString;

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_string())
}

async fn seeded_user(backend: &MockBackend, state: &TestState) -> Session {
    backend.add_auth("P1", "patient", "ali@mail.com", "Secret#123");
    state
        .identity
        .sign_up("ali@mail.com", &secret("Secret#123"))
        .await
        .unwrap()
}

#[tokio::test]
async fn login_returns_the_backend_user() {
    let backend = MockBackend::start().await;
    let state = backend.state();
    seeded_user(&backend, &state).await;

    let logged_in = login(&state, " Ali@Mail.com", &secret("Secret#123"), UserType::Patient)
        .await
        .unwrap();
    assert_eq!(logged_in.user_id, "P1");
    assert_eq!(logged_in.user_type, UserType::Patient);
}

#[tokio::test]
async fn login_as_the_wrong_kind_of_user_fails() {
    let backend = MockBackend::start().await;
    let state = backend.state();
    seeded_user(&backend, &state).await;

    let err = login(&state, "ali@mail.com", &secret("Secret#123"), UserType::Doctor)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authentication(_)));
    assert!(matches!(err.user_message(), UserFacing::Credentials(_)));
}

#[tokio::test]
async fn unknown_email_and_wrong_password_are_credential_errors() {
    let backend = MockBackend::start().await;
    let state = backend.state();
    seeded_user(&backend, &state).await;

    let err = login(&state, "ali@mail.com", &secret("Wrong#123"), UserType::Patient)
        .await
        .unwrap_err();
    assert_eq!(IdentityFailure::of(&err), Some(IdentityFailure::WrongPassword));

    // Known to the identity provider but missing on the backend.
    state
        .identity
        .sign_up("ghost@mail.com", &secret("Secret#123"))
        .await
        .unwrap();
    let err = login(&state, "ghost@mail.com", &secret("Secret#123"), UserType::Patient)
        .await
        .unwrap_err();
    assert_eq!(IdentityFailure::of(&err), Some(IdentityFailure::UserNotFound));
}

#[tokio::test]
async fn blank_login_fields_are_reported_inline() {
    let backend = MockBackend::start().await;
    let state = backend.state();
    match login(&state, " ", &secret(""), UserType::Patient).await {
        Err(AppError::Validation(fields)) => {
            assert!(fields.get("email").is_some());
            assert!(fields.get("password").is_some());
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn change_password_updates_identity_and_backend() {
    let backend = MockBackend::start().await;
    let state = backend.state();
    let session = seeded_user(&backend, &state).await;

    let change = PasswordChange {
        current: secret("Secret#123"),
        new: secret("Better#456"),
        confirm: secret("Better#456"),
    };
    change_password(&state, &session, "P1", &change).await.unwrap();

    assert!(state
        .identity
        .sign_in("ali@mail.com", &secret("Better#456"))
        .await
        .is_ok());
    assert_eq!(backend.store().auth["P1"]["password"], "Better#456");
}

#[tokio::test]
async fn change_password_with_wrong_current_password_changes_nothing() {
    let backend = MockBackend::start().await;
    let state = backend.state();
    let session = seeded_user(&backend, &state).await;

    let change = PasswordChange {
        current: secret("Guess#000"),
        new: secret("Better#456"),
        confirm: secret("Better#456"),
    };
    let err = change_password(&state, &session, "P1", &change)
        .await
        .unwrap_err();
    assert_eq!(IdentityFailure::of(&err), Some(IdentityFailure::WrongPassword));
    assert_eq!(backend.store().auth["P1"]["password"], "Secret#123");
    assert!(!backend.requests().iter().any(|r| r.starts_with("PUT")));
}

#[tokio::test]
async fn forgot_password_goes_to_the_identity_provider() {
    let backend = MockBackend::start().await;
    let state = backend.state();
    seeded_user(&backend, &state).await;

    forgot_password(&state, " ali@mail.com ").await.unwrap();
    assert_eq!(state.identity.reset_requests(), vec!["ali@mail.com"]);
    assert!(forgot_password(&state, "").await.is_err());
}

#[tokio::test]
async fn medical_history_is_loaded_and_saved_trimmed() {
    let backend = MockBackend::start().await;
    backend.add_patient("P1", "Ali", "Khan");

    let history = load_medical_history(&backend.client, "P1").await.unwrap();
    assert_eq!(history.blood_type.as_deref(), Some("B+"));
    assert_eq!(history.medical_history.as_deref(), Some("Asthma"));

    let saved = save_medical_history(&backend.client, "P1", " O- ", "  Asthma, penicillin allergy \n")
        .await
        .unwrap();
    assert_eq!(saved.blood_type.as_deref(), Some("O-"));
    assert_eq!(saved.medical_history.as_deref(), Some("Asthma, penicillin allergy"));

    assert!(save_medical_history(&backend.client, "P1", "AB+-", "")
        .await
        .is_err());
}

#[tokio::test]
async fn settings_profile_combines_patient_and_account() {
    let backend = MockBackend::start().await;
    backend.add_patient("P1", "Ali", "Khan");
    backend.add_auth("P1", "patient", "ali@mail.com", "Secret#123");

    let profile = load_patient_profile(&backend.client, "P1").await.unwrap();
    assert_eq!(
        profile,
        PatientProfile {
            full_name: "Ali Khan".into(),
            phone_number: "03001234567".into(),
            email: "ali@mail.com".into(),
        }
    );

    let requests = backend.requests();
    assert!(requests.contains(&"GET /api/patients/P1/".to_string()));
    assert!(requests.contains(&"GET /api/authentication/P1/".to_string()));
}

#[tokio::test]
async fn settings_profile_fails_when_the_account_is_missing() {
    let backend = MockBackend::start().await;
    backend.add_patient("P1", "Ali", "Khan");

    let err = load_patient_profile(&backend.client, "P1").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
