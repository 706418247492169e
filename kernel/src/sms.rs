use crate::model::{id::ReservationId, reservation::Reservation};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use shared::error::AppResult;

/// 予約完了 SMS に載せる内容。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationNotice {
    pub reservation_id: ReservationId,
    pub customer_name: String,
    pub customer_phone: String,
    pub theme_name: String,
    pub reservation_date: NaiveDate,
    pub start_time: NaiveTime,
    pub head_count: i32,
    pub total_price: i64,
}

impl ReservationNotice {
    pub fn from_reservation(reservation: &Reservation) -> Self {
        Self {
            reservation_id: reservation.reservation_id,
            customer_name: reservation.customer_name.clone(),
            customer_phone: reservation.customer_phone.clone(),
            theme_name: reservation.theme.theme_name.clone(),
            reservation_date: reservation.reservation_date,
            start_time: reservation.time_slot.start_time,
            head_count: reservation.head_count,
            total_price: reservation.total_price(),
        }
    }
}

/// SMS 送信の外部コラボレーター。送信失敗は呼び出し側でログに残して
/// 握りつぶす（予約作成を失敗させてはならない）。
#[mockall::automock]
#[async_trait]
pub trait SmsNotifier: Send + Sync {
    async fn send_reservation_notice(&self, notice: ReservationNotice) -> AppResult<()>;
}
