use crate::model::reservation::{
    CancelReservationResponse, ConfirmReservationQuery, CreateReservationRequest,
    CreateReservationRequestWithStatus, CreateReservationResponse, RefundAccountRequest,
    RefundAccountRequestWithCancelId, ReservationResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::{
    model::{
        id::{CancelId, ReservationId},
        reservation::{event::CancelReservation, ReservationStatus},
    },
    sms::ReservationNotice,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

/// 予約を作成する。CAPTCHA 検証に通らないリクエストは拒否する。
/// 予約完了 SMS の送信失敗は予約自体を失敗させず、ログに残すのみ。
pub async fn create_reservation(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<CreateReservationResponse>)> {
    req.validate(&())?;

    let token = req.captcha_token.clone().unwrap_or_default();
    if !registry.captcha_verifier().verify(&token).await? {
        return Err(AppError::CaptchaRejected);
    }

    let initial_status = if registry.auto_confirm() {
        ReservationStatus::Confirmed
    } else {
        ReservationStatus::Wait
    };
    let reservation_id = registry
        .reservation_repository()
        .create(CreateReservationRequestWithStatus::new(req, initial_status).into())
        .await?;

    notify_by_sms(&registry, reservation_id).await;

    Ok((
        StatusCode::OK,
        Json(CreateReservationResponse { reservation_id }),
    ))
}

async fn notify_by_sms(registry: &AppRegistry, reservation_id: ReservationId) {
    match registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await
    {
        Ok(Some(reservation)) => {
            let notice = ReservationNotice::from_reservation(&reservation);
            if let Err(e) = registry.sms_notifier().send_reservation_notice(notice).await {
                tracing::warn!(
                    error.message = %e,
                    reservation_id = %reservation_id,
                    "予約完了 SMS の送信に失敗しました"
                );
            }
        }
        Ok(None) => {
            tracing::warn!(reservation_id = %reservation_id, "作成直後の予約が見つかりませんでした");
        }
        Err(e) => {
            tracing::warn!(
                error.message = %e,
                reservation_id = %reservation_id,
                "SMS 送信用の予約取得に失敗しました"
            );
        }
    }
}

/// 予約番号・予約者名・電話番号の完全一致で予約内容を照会する。
pub async fn confirm_reservation(
    Query(query): Query<ConfirmReservationQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .reservation_repository()
        .find_by_confirmation(query.into())
        .await?
        .ok_or(AppError::EntityNotFound(
            "該当する予約が見つかりませんでした。".into(),
        ))
        .map(ReservationResponse::from)
        .map(Json)
}

pub async fn cancel_reservation(
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CancelReservationResponse>> {
    registry
        .reservation_repository()
        .cancel(CancelReservation::new(reservation_id))
        .await
        .map(|cancel_id| CancelReservationResponse { cancel_id })
        .map(Json)
}

pub async fn save_refund_account(
    Path(cancel_id): Path<CancelId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<RefundAccountRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .cancellation_repository()
        .update_refund_account(RefundAccountRequestWithCancelId::new(cancel_id, req).into())
        .await?;
    Ok(StatusCode::OK)
}
