pub mod cancellation;
pub mod health;
pub mod reservation;
pub mod theme;
pub mod time_slot;
