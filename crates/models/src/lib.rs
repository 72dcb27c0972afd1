pub mod availability;
pub mod booking_status;
pub mod day_set;
pub mod roster;
pub mod time_slot;
