pub mod cancellation;
pub mod id;
pub mod list;
pub mod reservation;
pub mod theme;
pub mod time_slot;
