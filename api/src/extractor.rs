use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use registry::AppRegistry;
use shared::error::AppError;

pub const ADMIN_KEY_HEADER: &str = "X-ADMIN-KEY";

/// 管理者 API 用のエクストラクター。X-ADMIN-KEY ヘッダを
/// AdminKeyPolicy で検証し、通らなければ 401 を返す。
pub struct AdminKey;

#[async_trait]
impl FromRequestParts<AppRegistry> for AdminKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok());
        if registry.admin_policy().authorize(provided) {
            Ok(AdminKey)
        } else {
            Err(AppError::UnauthenticatedError)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use kernel::{
        auth::AdminKeyPolicy,
        captcha::MockCaptchaVerifier,
        repository::{
            cancellation::MockCancellationRepository, health::MockHealthCheckRepository,
            reservation::MockReservationRepository, theme::MockThemeRepository,
            time_slot::MockTimeSlotRepository,
        },
        sms::MockSmsNotifier,
    };
    use shared::config::AdminConfig;
    use std::sync::Arc;

    fn registry(bypass: bool) -> AppRegistry {
        AppRegistry::from_parts(
            Arc::new(MockHealthCheckRepository::new()),
            Arc::new(MockThemeRepository::new()),
            Arc::new(MockTimeSlotRepository::new()),
            Arc::new(MockReservationRepository::new()),
            Arc::new(MockCancellationRepository::new()),
            Arc::new(MockSmsNotifier::new()),
            Arc::new(MockCaptchaVerifier::new()),
            Arc::new(AdminKeyPolicy::new(&AdminConfig {
                api_key: "keystone-admin-secret-123".into(),
                bypass,
            })),
            false,
        )
    }

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/admin/reservations");
        if let Some(value) = header {
            builder = builder.header(ADMIN_KEY_HEADER, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn matching_key_is_accepted() {
        let mut parts = parts(Some("keystone-admin-secret-123"));
        let result = AdminKey::from_request_parts(&mut parts, &registry(false)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn wrong_or_missing_key_is_rejected() {
        let mut with_wrong = parts(Some("wrong"));
        assert!(matches!(
            AdminKey::from_request_parts(&mut with_wrong, &registry(false)).await,
            Err(AppError::UnauthenticatedError)
        ));

        let mut without = parts(None);
        assert!(matches!(
            AdminKey::from_request_parts(&mut without, &registry(false)).await,
            Err(AppError::UnauthenticatedError)
        ));
    }

    #[tokio::test]
    async fn bypass_accepts_requests_without_key() {
        let mut parts = parts(None);
        let result = AdminKey::from_request_parts(&mut parts, &registry(true)).await;
        assert!(result.is_ok());
    }
}
