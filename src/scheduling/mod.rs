mod slots;
mod time_of_day;

pub use slots::{
    available_slot_options, booked_times, filter_booked, generate_slot_options,
    windows_from_timeslots, AvailabilityWindow, BookedTimes, SlotOption,
    SLOT_GRANULARITY_MINUTES,
};
pub use time_of_day::{ParseTimeError, TimeOfDay};
