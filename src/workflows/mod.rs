//! The client's screens, as plain async operations over [`AppState`].
//!
//! [`AppState`]: crate::app_state::AppState

pub mod appointments;
pub mod booking;
pub mod doctors;
pub mod login;
pub mod medical_history;
pub mod messaging;
pub mod password;
pub mod registration;
pub mod schedule;
pub mod settings;

pub use appointments::{
    cancel_appointment, cancel_booking_as_patient, doctor_appointments, patient_appointments,
    upcoming, AppointmentDay, DoctorAppointment, PatientAppointment, UNKNOWN_DOCTOR,
    UNKNOWN_PATIENT,
};
pub use booking::BookingFlow;
pub use doctors::{filter_doctors, load_doctors};
pub use login::{login, LoggedIn};
pub use medical_history::{load_medical_history, save_medical_history, MedicalHistory};
pub use messaging::{doctor_chat_contacts, open_conversation, patient_chat_contacts, ChatContact};
pub use password::{change_password, forgot_password, PasswordChange};
pub use registration::{
    register_doctor, register_patient, AccountDetails, DoctorRegistration, PatientRegistration,
    Registered,
};
pub use schedule::{add_time_slot, list_schedule, remove_time_slot, update_hospital, ScheduleEntry};
pub use settings::{load_patient_profile, PatientProfile};
