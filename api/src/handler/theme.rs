use crate::model::theme::{AvailableTimeResponse, AvailableTimesQuery, ThemeResponse, ThemesResponse};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use kernel::model::{id::ThemeId, time_slot::mark_reserved};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_theme_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ThemesResponse>> {
    registry
        .theme_repository()
        .find_all()
        .await
        .map(ThemesResponse::from)
        .map(Json)
}

pub async fn show_theme(
    Path(theme_id): Path<ThemeId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ThemeResponse>> {
    registry
        .theme_repository()
        .find_by_id(theme_id)
        .await?
        .ok_or(AppError::EntityNotFound(
            "指定されたテーマが見つかりませんでした。".into(),
        ))
        .map(ThemeResponse::from)
        .map(Json)
}

/// テーマの時間枠一覧に、指定日の予約有無フラグを付けて返す。
/// CANCELLED の予約は空き枠として扱う。
pub async fn show_available_times(
    Path(theme_id): Path<ThemeId>,
    Query(query): Query<AvailableTimesQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<AvailableTimeResponse>>> {
    registry
        .theme_repository()
        .find_by_id(theme_id)
        .await?
        .ok_or(AppError::EntityNotFound(
            "指定されたテーマが見つかりませんでした。".into(),
        ))?;

    let slots = registry
        .time_slot_repository()
        .find_active_by_theme_id(theme_id)
        .await?;
    let reserved_ids = registry
        .reservation_repository()
        .find_reserved_slot_ids(theme_id, query.date)
        .await?;

    let res = mark_reserved(slots, &reserved_ids)
        .into_iter()
        .map(AvailableTimeResponse::from)
        .collect();
    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::{
        auth::AdminKeyPolicy,
        model::{id::TimeSlotId, theme::Theme, time_slot::TimeSlot},
        repository::{
            cancellation::MockCancellationRepository, health::MockHealthCheckRepository,
            reservation::MockReservationRepository, theme::MockThemeRepository,
            time_slot::MockTimeSlotRepository,
        },
        captcha::MockCaptchaVerifier,
        sms::MockSmsNotifier,
    };
    use shared::config::AdminConfig;
    use std::sync::Arc;

    fn registry(
        theme: MockThemeRepository,
        time_slot: MockTimeSlotRepository,
        reservation: MockReservationRepository,
    ) -> AppRegistry {
        AppRegistry::from_parts(
            Arc::new(MockHealthCheckRepository::new()),
            Arc::new(theme),
            Arc::new(time_slot),
            Arc::new(reservation),
            Arc::new(MockCancellationRepository::new()),
            Arc::new(MockSmsNotifier::new()),
            Arc::new(MockCaptchaVerifier::new()),
            Arc::new(AdminKeyPolicy::new(&AdminConfig {
                api_key: "k".into(),
                bypass: true,
            })),
            false,
        )
    }

    fn theme() -> Theme {
        Theme {
            theme_id: ThemeId::new(1),
            theme_name: "密室からの脱出".into(),
            theme_description: "60分で鍵を見つけて脱出せよ".into(),
            difficulty: 3,
            min_person: 2,
            play_time: 60,
            price_per_person: 25000,
            image_url: None,
            is_active: true,
        }
    }

    fn slot(id: i64, start: &str, end: &str) -> TimeSlot {
        TimeSlot {
            time_slot_id: TimeSlotId::new(id),
            theme_id: ThemeId::new(1),
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn missing_theme_returns_not_found() {
        let mut theme_repo = MockThemeRepository::new();
        theme_repo.expect_find_by_id().returning(|_| Ok(None));
        let registry = registry(
            theme_repo,
            MockTimeSlotRepository::new(),
            MockReservationRepository::new(),
        );

        let result = show_theme(Path(ThemeId::new(99)), State(registry)).await;

        assert!(matches!(result, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn available_times_marks_reserved_slots() {
        let mut theme_repo = MockThemeRepository::new();
        theme_repo.expect_find_by_id().returning(|_| Ok(Some(theme())));
        let mut slot_repo = MockTimeSlotRepository::new();
        slot_repo.expect_find_active_by_theme_id().returning(|_| {
            Ok(vec![
                slot(1, "10:00:00", "11:00:00"),
                slot(2, "13:00:00", "14:00:00"),
            ])
        });
        let mut reservation_repo = MockReservationRepository::new();
        reservation_repo
            .expect_find_reserved_slot_ids()
            .returning(|_, _| Ok(vec![TimeSlotId::new(2)]));
        let registry = registry(theme_repo, slot_repo, reservation_repo);

        let Json(times) = show_available_times(
            Path(ThemeId::new(1)),
            Query(AvailableTimesQuery {
                date: "2024-06-01".parse().unwrap(),
            }),
            State(registry),
        )
        .await
        .unwrap();

        assert_eq!(times.len(), 2);
        assert!(!times[0].reserved);
        assert!(times[1].reserved);
    }

    #[tokio::test]
    async fn available_times_for_missing_theme_is_not_found() {
        let mut theme_repo = MockThemeRepository::new();
        theme_repo.expect_find_by_id().returning(|_| Ok(None));
        let registry = registry(
            theme_repo,
            MockTimeSlotRepository::new(),
            MockReservationRepository::new(),
        );

        let result = show_available_times(
            Path(ThemeId::new(99)),
            Query(AvailableTimesQuery {
                date: "2024-06-01".parse().unwrap(),
            }),
            State(registry),
        )
        .await;

        assert!(matches!(result, Err(AppError::EntityNotFound(_))));
    }
}
