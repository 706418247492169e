use crate::{
    extractor::AdminKey,
    model::admin::{
        CancelledListQuery, CancelledReservationsResponse, PaginatedReservationsResponse,
        ReservationListQuery, UpdateReservationRequest,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::ReservationId;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_reservation_list(
    _admin: AdminKey,
    Query(query): Query<ReservationListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedReservationsResponse>> {
    query.validate(&())?;

    registry
        .reservation_repository()
        .find_all(query.into())
        .await
        .map(PaginatedReservationsResponse::from)
        .map(Json)
}

pub async fn show_cancelled_list(
    _admin: AdminKey,
    Query(query): Query<CancelledListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CancelledReservationsResponse>> {
    let keyword = query.keyword.filter(|k| !k.trim().is_empty());
    registry
        .cancellation_repository()
        .find_all(keyword)
        .await
        .map(CancelledReservationsResponse::from)
        .map(Json)
}

pub async fn update_reservation(
    _admin: AdminKey,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateReservationRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .reservation_repository()
        .update(reservation_id, req.into())
        .await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::{
        auth::AdminKeyPolicy,
        captcha::MockCaptchaVerifier,
        model::{
            cancellation::RefundStatus,
            list::PaginatedList,
            reservation::ReservationStatus,
        },
        repository::{
            cancellation::MockCancellationRepository, health::MockHealthCheckRepository,
            reservation::MockReservationRepository, theme::MockThemeRepository,
            time_slot::MockTimeSlotRepository,
        },
        sms::MockSmsNotifier,
    };
    use shared::config::AdminConfig;
    use std::sync::Arc;

    fn registry(
        reservation: MockReservationRepository,
        cancellation: MockCancellationRepository,
    ) -> AppRegistry {
        AppRegistry::from_parts(
            Arc::new(MockHealthCheckRepository::new()),
            Arc::new(MockThemeRepository::new()),
            Arc::new(MockTimeSlotRepository::new()),
            Arc::new(reservation),
            Arc::new(cancellation),
            Arc::new(MockSmsNotifier::new()),
            Arc::new(MockCaptchaVerifier::new()),
            Arc::new(AdminKeyPolicy::new(&AdminConfig {
                api_key: "k".into(),
                bypass: true,
            })),
            false,
        )
    }

    #[tokio::test]
    async fn list_query_is_translated_to_limit_offset() {
        let mut reservation_repo = MockReservationRepository::new();
        reservation_repo
            .expect_find_all()
            .withf(|options| {
                options.limit == 10 && options.offset == 20 && options.keyword.is_none()
            })
            .returning(|options| {
                Ok(PaginatedList {
                    total: 0,
                    limit: options.limit,
                    offset: options.offset,
                    items: vec![],
                })
            });
        let registry = registry(reservation_repo, MockCancellationRepository::new());

        let Json(res) = show_reservation_list(
            AdminKey,
            Query(ReservationListQuery {
                page: 2,
                size: 10,
                keyword: None,
            }),
            State(registry),
        )
        .await
        .unwrap();

        assert_eq!(res.limit, 10);
        assert_eq!(res.offset, 20);
        assert!(res.items.is_empty());
    }

    #[tokio::test]
    async fn blank_keyword_is_dropped_from_cancelled_search() {
        let mut cancellation_repo = MockCancellationRepository::new();
        cancellation_repo
            .expect_find_all()
            .withf(|keyword| keyword.is_none())
            .returning(|_| Ok(vec![]));
        let registry = registry(MockReservationRepository::new(), cancellation_repo);

        let Json(res) = show_cancelled_list(
            AdminKey,
            Query(CancelledListQuery {
                keyword: Some("   ".into()),
            }),
            State(registry),
        )
        .await
        .unwrap();

        assert!(res.items.is_empty());
    }

    #[tokio::test]
    async fn update_is_delegated_with_requested_fields() {
        let mut reservation_repo = MockReservationRepository::new();
        reservation_repo
            .expect_update()
            .withf(|reservation_id, event| {
                *reservation_id == ReservationId::new(10)
                    && event.reservation_status == Some(ReservationStatus::Cancelled)
                    && event.refund_status == Some(RefundStatus::Completed)
            })
            .returning(|_, _| Ok(()));
        let registry = registry(reservation_repo, MockCancellationRepository::new());

        let status = update_reservation(
            AdminKey,
            Path(ReservationId::new(10)),
            State(registry),
            Json(UpdateReservationRequest {
                reservation_status: Some(ReservationStatus::Cancelled),
                refund_status: Some(RefundStatus::Completed),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::OK);
    }
}
