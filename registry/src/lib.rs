use std::sync::Arc;

use adapter::captcha::RecaptchaVerifierImpl;
use adapter::database::ConnectionPool;
use adapter::repository::cancellation::CancellationRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::reservation::ReservationRepositoryImpl;
use adapter::repository::theme::ThemeRepositoryImpl;
use adapter::repository::time_slot::TimeSlotRepositoryImpl;
use adapter::sms::SmsClientImpl;
use kernel::auth::AdminKeyPolicy;
use kernel::captcha::CaptchaVerifier;
use kernel::repository::cancellation::CancellationRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::reservation::ReservationRepository;
use kernel::repository::theme::ThemeRepository;
use kernel::repository::time_slot::TimeSlotRepository;
use kernel::sms::SmsNotifier;
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    theme_repository: Arc<dyn ThemeRepository>,
    time_slot_repository: Arc<dyn TimeSlotRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    cancellation_repository: Arc<dyn CancellationRepository>,
    sms_notifier: Arc<dyn SmsNotifier>,
    captcha_verifier: Arc<dyn CaptchaVerifier>,
    admin_policy: Arc<AdminKeyPolicy>,
    auto_confirm: bool,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, app_config: AppConfig) -> Self {
        Self::from_parts(
            Arc::new(HealthCheckRepositoryImpl::new(pool.clone())),
            Arc::new(ThemeRepositoryImpl::new(pool.clone())),
            Arc::new(TimeSlotRepositoryImpl::new(pool.clone())),
            Arc::new(ReservationRepositoryImpl::new(pool.clone())),
            Arc::new(CancellationRepositoryImpl::new(pool.clone())),
            Arc::new(SmsClientImpl::new(app_config.sms.clone())),
            Arc::new(RecaptchaVerifierImpl::new(app_config.captcha.clone())),
            Arc::new(AdminKeyPolicy::new(&app_config.admin)),
            app_config.booking.auto_confirm,
        )
    }

    // テストで各コラボレーターを差し替えられるよう、組み立てを分けておく
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        theme_repository: Arc<dyn ThemeRepository>,
        time_slot_repository: Arc<dyn TimeSlotRepository>,
        reservation_repository: Arc<dyn ReservationRepository>,
        cancellation_repository: Arc<dyn CancellationRepository>,
        sms_notifier: Arc<dyn SmsNotifier>,
        captcha_verifier: Arc<dyn CaptchaVerifier>,
        admin_policy: Arc<AdminKeyPolicy>,
        auto_confirm: bool,
    ) -> Self {
        Self {
            health_check_repository,
            theme_repository,
            time_slot_repository,
            reservation_repository,
            cancellation_repository,
            sms_notifier,
            captcha_verifier,
            admin_policy,
            auto_confirm,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn theme_repository(&self) -> Arc<dyn ThemeRepository> {
        self.theme_repository.clone()
    }

    pub fn time_slot_repository(&self) -> Arc<dyn TimeSlotRepository> {
        self.time_slot_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn cancellation_repository(&self) -> Arc<dyn CancellationRepository> {
        self.cancellation_repository.clone()
    }

    pub fn sms_notifier(&self) -> Arc<dyn SmsNotifier> {
        self.sms_notifier.clone()
    }

    pub fn captcha_verifier(&self) -> Arc<dyn CaptchaVerifier> {
        self.captcha_verifier.clone()
    }

    pub fn admin_policy(&self) -> Arc<AdminKeyPolicy> {
        self.admin_policy.clone()
    }

    /// true の場合、新規予約を CONFIRMED で作成する運用
    pub fn auto_confirm(&self) -> bool {
        self.auto_confirm
    }
}
