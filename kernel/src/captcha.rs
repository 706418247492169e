use async_trait::async_trait;
use shared::error::AppResult;

/// reCAPTCHA 検証の外部コラボレーター。
/// 検証が無効な構成では常に true を返す実装を差し込む。
#[mockall::automock]
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> AppResult<bool>;
}
