use crate::model::id::{CancelId, ReservationId};
use crate::model::reservation::ReservationStatus;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use std::fmt::{self, Display};
use std::str::FromStr;

pub mod event;

/// 取消台帳の 1 レコード。元予約が消えても履歴が残るよう、
/// 取消時点のスナップショットを非正規化して保持する。
#[derive(Debug, Clone)]
pub struct CancellationRecord {
    pub cancel_id: CancelId,
    pub reservation_id: ReservationId,
    pub theme_name: String,
    pub reservation_date: NaiveDate,
    pub start_time: NaiveTime,
    pub customer_name: String,
    pub customer_phone: String,
    pub head_count: i32,
    pub payment_type: String,
    pub refund_bank: String,
    pub refund_account: String,
    pub refund_status: RefundStatus,
    pub reservation_status: ReservationStatus,
    pub cancelled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundStatus {
    Pending,
    Completed,
}

impl RefundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundStatus::Pending => "PENDING",
            RefundStatus::Completed => "COMPLETED",
        }
    }
}

impl Display for RefundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RefundStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(RefundStatus::Pending),
            "COMPLETED" => Ok(RefundStatus::Completed),
            other => Err(AppError::ConversionEntityError(format!(
                "返金状態への変換に失敗しました: {other}"
            ))),
        }
    }
}
