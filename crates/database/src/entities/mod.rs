pub mod booking;
pub mod business;
pub mod dining_table;
pub mod employee;
pub mod schedule_slot;
pub mod vacation;

pub use self::booking as bookings;
pub use self::business as businesses;
pub use self::dining_table as dining_tables;
pub use self::employee as employees;
pub use self::schedule_slot as schedule_slots;
pub use self::vacation as vacations;
