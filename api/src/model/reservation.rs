use chrono::{NaiveDate, NaiveTime};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    cancellation::event::UpdateRefundAccount,
    id::{CancelId, ReservationId, ThemeId, TimeSlotId},
    reservation::{
        event::{ConfirmReservation, CreateReservation},
        Reservation, ReservationStatus,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    pub theme_id: ThemeId,
    #[garde(skip)]
    pub time_slot_id: TimeSlotId,
    #[garde(skip)]
    pub reservation_date: NaiveDate,
    #[garde(length(min = 1))]
    pub customer_name: String,
    #[garde(length(min = 1))]
    pub customer_phone: String,
    #[garde(range(min = 1))]
    pub head_count: i32,
    #[garde(length(min = 1))]
    pub payment_type: String,
    #[garde(skip)]
    pub captcha_token: Option<String>,
}

// 初期状態は運用ポリシー（auto_confirm）で決まるため、
// リクエスト単体ではなく状態を添えてイベントへ変換する
#[derive(new)]
pub struct CreateReservationRequestWithStatus(CreateReservationRequest, ReservationStatus);

impl From<CreateReservationRequestWithStatus> for CreateReservation {
    fn from(value: CreateReservationRequestWithStatus) -> Self {
        let CreateReservationRequestWithStatus(
            CreateReservationRequest {
                theme_id,
                time_slot_id,
                reservation_date,
                customer_name,
                customer_phone,
                head_count,
                payment_type,
                captcha_token: _,
            },
            reservation_status,
        ) = value;
        CreateReservation {
            theme_id,
            time_slot_id,
            reservation_date,
            customer_name,
            customer_phone,
            head_count,
            payment_type,
            reservation_status,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationResponse {
    pub reservation_id: ReservationId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmReservationQuery {
    pub reservation_id: ReservationId,
    pub name: String,
    pub phone: String,
}

impl From<ConfirmReservationQuery> for ConfirmReservation {
    fn from(value: ConfirmReservationQuery) -> Self {
        let ConfirmReservationQuery {
            reservation_id,
            name,
            phone,
        } = value;
        ConfirmReservation {
            reservation_id,
            customer_name: name,
            customer_phone: phone,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub reservation_date: NaiveDate,
    pub customer_name: String,
    pub customer_phone: String,
    pub head_count: i32,
    pub payment_type: String,
    pub reservation_status: ReservationStatus,
    pub theme_name: String,
    pub start_time: NaiveTime,
    pub total_price: i64,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let total_price = value.total_price();
        let Reservation {
            reservation_id,
            reservation_date,
            customer_name,
            customer_phone,
            head_count,
            payment_type,
            reservation_status,
            theme,
            time_slot,
            ..
        } = value;
        Self {
            reservation_id,
            reservation_date,
            customer_name,
            customer_phone,
            head_count,
            payment_type,
            reservation_status,
            theme_name: theme.theme_name,
            start_time: time_slot.start_time,
            total_price,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelReservationResponse {
    pub cancel_id: CancelId,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefundAccountRequest {
    #[garde(length(min = 1))]
    pub refund_bank: String,
    #[garde(length(min = 1))]
    pub refund_account: String,
}

#[derive(new)]
pub struct RefundAccountRequestWithCancelId(CancelId, RefundAccountRequest);

impl From<RefundAccountRequestWithCancelId> for UpdateRefundAccount {
    fn from(value: RefundAccountRequestWithCancelId) -> Self {
        let RefundAccountRequestWithCancelId(
            cancel_id,
            RefundAccountRequest {
                refund_bank,
                refund_account,
            },
        ) = value;
        UpdateRefundAccount {
            cancel_id,
            refund_bank,
            refund_account,
        }
    }
}
