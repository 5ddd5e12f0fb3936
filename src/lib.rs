//! HealthSync client: doctor search, appointment booking over half-hour
//! slots, account management and doctor-patient messaging, all backed by a
//! remote REST service.

pub mod api;
pub mod app_state;
pub mod chat;
pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod models;
pub mod scheduling;
pub mod telemetry;
pub mod workflows;

pub use app_state::AppState;
pub use error::{AppError, AppResult};
