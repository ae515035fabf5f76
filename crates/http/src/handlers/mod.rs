pub mod events;
pub mod hospitals;
pub mod progress;
pub mod uploads;
