pub mod captcha;
pub mod database;
pub mod repository;
pub mod sms;
