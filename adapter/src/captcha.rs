use async_trait::async_trait;
use kernel::captcha::CaptchaVerifier;
use serde::Deserialize;
use shared::{config::CaptchaConfig, error::AppResult};

const SITE_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Google reCAPTCHA の siteverify API を呼ぶ実装。
pub struct RecaptchaVerifierImpl {
    client: reqwest::Client,
    config: CaptchaConfig,
}

impl RecaptchaVerifierImpl {
    pub fn new(config: CaptchaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[derive(Deserialize)]
struct SiteVerifyResponse {
    success: bool,
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifierImpl {
    async fn verify(&self, token: &str) -> AppResult<bool> {
        if !self.config.enabled {
            return Ok(true);
        }

        // 通信エラーは検証失敗として扱う（予約を通さない）
        let res = self
            .client
            .post(SITE_VERIFY_URL)
            .form(&[
                ("secret", self.config.secret.as_str()),
                ("response", token),
            ])
            .send()
            .await;

        match res {
            Ok(res) => Ok(res
                .json::<SiteVerifyResponse>()
                .await
                .map(|v| v.success)
                .unwrap_or(false)),
            Err(e) => {
                tracing::warn!("reCAPTCHA の検証リクエストに失敗しました: {e}");
                Ok(false)
            }
        }
    }
}
