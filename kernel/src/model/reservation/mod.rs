use crate::model::id::{ReservationId, ThemeId, TimeSlotId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use std::fmt::{self, Display};
use std::str::FromStr;

pub mod event;

#[derive(Debug, Clone)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub reservation_date: NaiveDate,
    pub customer_name: String,
    pub customer_phone: String,
    pub head_count: i32,
    pub payment_type: String,
    pub reservation_status: ReservationStatus,
    pub refund_bank: Option<String>,
    pub refund_account: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub theme: ReservationTheme,
    pub time_slot: ReservationTimeSlot,
}

impl Reservation {
    /// 人数 × 単価。i32 同士の積が溢れないよう i64 で計算する。
    pub fn total_price(&self) -> i64 {
        i64::from(self.head_count) * i64::from(self.theme.price_per_person)
    }
}

#[derive(Debug, Clone)]
pub struct ReservationTheme {
    pub theme_id: ThemeId,
    pub theme_name: String,
    pub price_per_person: i32,
}

#[derive(Debug, Clone)]
pub struct ReservationTimeSlot {
    pub time_slot_id: TimeSlotId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// 予約の状態。WAIT と CONFIRMED は「有効な予約」として扱い、
/// CANCELLED は終端状態となる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Wait,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Wait => "WAIT",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Cancelled => "CANCELLED",
        }
    }

    /// 空き枠判定・重複予約チェックの対象となる状態かどうか
    pub fn is_active(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAIT" => Ok(ReservationStatus::Wait),
            "CONFIRMED" => Ok(ReservationStatus::Confirmed),
            "CANCELLED" => Ok(ReservationStatus::Cancelled),
            other => Err(AppError::ConversionEntityError(format!(
                "予約状態への変換に失敗しました: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            ReservationStatus::Wait,
            ReservationStatus::Confirmed,
            ReservationStatus::Cancelled,
        ] {
            assert_eq!(
                status.as_str().parse::<ReservationStatus>().unwrap(),
                status
            );
        }
        assert!("INVALID".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn cancelled_is_not_active() {
        assert!(ReservationStatus::Wait.is_active());
        assert!(ReservationStatus::Confirmed.is_active());
        assert!(!ReservationStatus::Cancelled.is_active());
    }

    fn reservation_fixture() -> Reservation {
        Reservation {
            reservation_id: ReservationId::new(1),
            reservation_date: "2024-06-01".parse().unwrap(),
            customer_name: "홍길동".into(),
            customer_phone: "010-1234-5678".into(),
            head_count: 4,
            payment_type: "BANK_TRANSFER".into(),
            reservation_status: ReservationStatus::Wait,
            refund_bank: None,
            refund_account: None,
            cancelled_at: None,
            theme: ReservationTheme {
                theme_id: ThemeId::new(1),
                theme_name: "密室からの脱出".into(),
                price_per_person: 25000,
            },
            time_slot: ReservationTimeSlot {
                time_slot_id: TimeSlotId::new(2),
                start_time: "13:00:00".parse().unwrap(),
                end_time: "14:00:00".parse().unwrap(),
            },
        }
    }

    #[test]
    fn total_price_is_head_count_times_unit_price() {
        assert_eq!(reservation_fixture().total_price(), 100000);
    }

    #[test]
    fn total_price_survives_i32_overflow() {
        let mut reservation = reservation_fixture();
        reservation.head_count = i32::MAX;

        assert_eq!(
            reservation.total_price(),
            i64::from(i32::MAX) * i64::from(reservation.theme.price_per_person)
        );
    }
}
