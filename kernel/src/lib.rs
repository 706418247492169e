pub mod auth;
pub mod captcha;
pub mod model;
pub mod repository;
pub mod sms;
