pub mod cancellation;
pub mod reservation;
pub mod theme;
pub mod time_slot;
