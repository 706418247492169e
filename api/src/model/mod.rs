pub mod admin;
pub mod reservation;
pub mod theme;
