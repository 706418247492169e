use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use kernel::model::{
    id::{ReservationId, ThemeId, TimeSlotId},
    reservation::{Reservation, ReservationTheme, ReservationTimeSlot},
};
use shared::error::AppError;

/// 予約一覧・詳細の取得に使う型。theme / time_slot と JOIN した結果を受ける。
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub reservation_date: NaiveDate,
    pub customer_name: String,
    pub customer_phone: String,
    pub head_count: i32,
    pub payment_type: String,
    pub reservation_status: String,
    pub refund_bank: Option<String>,
    pub refund_account: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub theme_id: ThemeId,
    pub theme_name: String,
    pub price_per_person: i32,
    pub time_slot_id: TimeSlotId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            reservation_date,
            customer_name,
            customer_phone,
            head_count,
            payment_type,
            reservation_status,
            refund_bank,
            refund_account,
            cancelled_at,
            theme_id,
            theme_name,
            price_per_person,
            time_slot_id,
            start_time,
            end_time,
        } = value;
        Ok(Reservation {
            reservation_id,
            reservation_date,
            customer_name,
            customer_phone,
            head_count,
            payment_type,
            reservation_status: reservation_status.parse()?,
            refund_bank,
            refund_account,
            cancelled_at,
            theme: ReservationTheme {
                theme_id,
                theme_name,
                price_per_person,
            },
            time_slot: ReservationTimeSlot {
                time_slot_id,
                start_time,
                end_time,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::reservation::ReservationStatus;

    fn row(status: &str) -> ReservationRow {
        ReservationRow {
            reservation_id: ReservationId::new(7),
            reservation_date: "2024-06-01".parse().unwrap(),
            customer_name: "홍길동".into(),
            customer_phone: "010-1234-5678".into(),
            head_count: 2,
            payment_type: "BANK_TRANSFER".into(),
            reservation_status: status.into(),
            refund_bank: None,
            refund_account: None,
            cancelled_at: None,
            theme_id: ThemeId::new(1),
            theme_name: "密室からの脱出".into(),
            price_per_person: 25000,
            time_slot_id: TimeSlotId::new(3),
            start_time: "13:00:00".parse().unwrap(),
            end_time: "14:00:00".parse().unwrap(),
        }
    }

    #[test]
    fn row_converts_into_reservation() {
        let reservation: Reservation = row("WAIT").try_into().unwrap();
        assert_eq!(reservation.reservation_status, ReservationStatus::Wait);
        assert_eq!(reservation.theme.theme_name, "密室からの脱出");
        assert_eq!(reservation.time_slot.time_slot_id, TimeSlotId::new(3));
        assert_eq!(reservation.total_price(), 50000);
    }

    #[test]
    fn unknown_status_fails_conversion() {
        assert!(Reservation::try_from(row("UNKNOWN")).is_err());
    }
}
