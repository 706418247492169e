use anyhow::Result;
use std::env;

/// アプリケーション全体の設定。起動時に環境変数から組み立てる。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    pub sms: SmsConfig,
    pub captcha: CaptchaConfig,
    pub booking: BookingConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn new() -> Result<AppConfig> {
        let database = DatabaseConfig {
            host: env_or("DATABASE_HOST", "localhost"),
            port: env_or("DATABASE_PORT", "5432").parse()?,
            username: env_or("DATABASE_USERNAME", "app"),
            password: env_or("DATABASE_PASSWORD", "passwd"),
            database: env_or("DATABASE_NAME", "app"),
        };
        // 開発環境では ADMIN_MODE=true を指定しない限り管理者認証をスキップする。
        // 本番環境では常に認証する。
        let bypass = crate::env::which() == crate::env::Environment::Development
            && env_or("ADMIN_MODE", "false") != "true";
        let admin = AdminConfig {
            api_key: env_or("ADMIN_KEY", "keystone-admin-secret-123"),
            bypass,
        };
        let sms = SmsConfig {
            endpoint: env_or("SMS_ENDPOINT", "https://api.coolsms.co.kr"),
            api_key: env_or("SMS_API_KEY", ""),
            from_number: env_or("SMS_FROM_NUMBER", ""),
            enabled: env_or("SMS_ENABLED", "false") == "true",
        };
        let captcha = CaptchaConfig {
            secret: env_or("RECAPTCHA_SECRET", ""),
            enabled: env_or("RECAPTCHA_ENABLED", "false") == "true",
        };
        let booking = BookingConfig {
            // true の場合、予約は作成時点で CONFIRMED になる（入金確認を待たない運用）
            auto_confirm: env_or("BOOKING_AUTO_CONFIRM", "false") == "true",
        };
        let cors = CorsConfig {
            allowed_origin: env_or("CORS_ALLOWED_ORIGIN", "http://localhost:5173"),
        };
        Ok(AppConfig {
            database,
            admin,
            sms,
            captcha,
            booking,
            cors,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub api_key: String,
    pub bypass: bool,
}

#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub endpoint: String,
    pub api_key: String,
    pub from_number: String,
    pub enabled: bool,
}

#[derive(Debug, Clone)]
pub struct CaptchaConfig {
    pub secret: String,
    pub enabled: bool,
}

#[derive(Debug, Clone)]
pub struct BookingConfig {
    pub auto_confirm: bool,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origin: String,
}
