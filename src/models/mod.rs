mod auth;
mod booking;
mod doctor;
mod patient;
mod timeslot;
pub mod validation;

pub use auth::*;
pub use booking::*;
pub use doctor::*;
pub use patient::*;
pub use timeslot::*;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}
