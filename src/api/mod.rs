//! One stateless repository per backend resource.

mod authentication;
mod bookings;
mod doctors;
mod patients;
mod timeslots;

pub use authentication::AuthenticationRepository;
pub use bookings::BookingRepository;
pub use doctors::DoctorRepository;
pub use patients::PatientRepository;
pub use timeslots::TimeSlotRepository;
