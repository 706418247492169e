use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use garde::Validate;
use kernel::model::{
    cancellation::{CancellationRecord, RefundStatus},
    id::ReservationId,
    list::PaginatedList,
    reservation::{
        event::{ReservationListOptions, UpdateReservation},
        Reservation, ReservationStatus,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListQuery {
    #[garde(range(min = 0))]
    #[serde(default)]
    pub page: i64,
    #[garde(range(min = 1, max = 100))]
    #[serde(default = "default_size")]
    pub size: i64,
    #[garde(skip)]
    pub keyword: Option<String>,
}

const fn default_size() -> i64 {
    10
}

impl From<ReservationListQuery> for ReservationListOptions {
    fn from(value: ReservationListQuery) -> Self {
        let ReservationListQuery {
            page,
            size,
            keyword,
        } = value;
        ReservationListOptions {
            limit: size,
            offset: page * size,
            // 空白のみのキーワードは検索なしとして扱う
            keyword: keyword.filter(|k| !k.trim().is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledListQuery {
    pub keyword: Option<String>,
}

/// 有効な予約と取消履歴を同じ形で返す管理画面向けの行。
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReservationResponse {
    pub reservation_id: ReservationId,
    pub reservation_date: NaiveDate,
    pub theme_name: String,
    pub start_time: NaiveTime,
    pub customer_name: String,
    pub customer_phone: String,
    pub head_count: i32,
    pub reservation_status: ReservationStatus,
    pub refund_bank: String,
    pub refund_account: String,
    pub refund_status: Option<RefundStatus>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<Reservation> for AdminReservationResponse {
    fn from(value: Reservation) -> Self {
        Self {
            reservation_id: value.reservation_id,
            reservation_date: value.reservation_date,
            theme_name: value.theme.theme_name,
            start_time: value.time_slot.start_time,
            customer_name: value.customer_name,
            customer_phone: value.customer_phone,
            head_count: value.head_count,
            reservation_status: value.reservation_status,
            refund_bank: value.refund_bank.unwrap_or_default(),
            refund_account: value.refund_account.unwrap_or_default(),
            // 返金状態は取消台帳側でのみ管理する
            refund_status: None,
            cancelled_at: value.cancelled_at,
        }
    }
}

impl From<CancellationRecord> for AdminReservationResponse {
    fn from(value: CancellationRecord) -> Self {
        Self {
            reservation_id: value.reservation_id,
            reservation_date: value.reservation_date,
            theme_name: value.theme_name,
            start_time: value.start_time,
            customer_name: value.customer_name,
            customer_phone: value.customer_phone,
            head_count: value.head_count,
            reservation_status: value.reservation_status,
            refund_bank: value.refund_bank,
            refund_account: value.refund_account,
            refund_status: Some(value.refund_status),
            cancelled_at: Some(value.cancelled_at),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedReservationsResponse {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub items: Vec<AdminReservationResponse>,
}

impl From<PaginatedList<Reservation>> for PaginatedReservationsResponse {
    fn from(value: PaginatedList<Reservation>) -> Self {
        let PaginatedList {
            total,
            limit,
            offset,
            items,
        } = value;
        Self {
            total,
            limit,
            offset,
            items: items
                .into_iter()
                .map(AdminReservationResponse::from)
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledReservationsResponse {
    pub items: Vec<AdminReservationResponse>,
}

impl From<Vec<CancellationRecord>> for CancelledReservationsResponse {
    fn from(value: Vec<CancellationRecord>) -> Self {
        Self {
            items: value
                .into_iter()
                .map(AdminReservationResponse::from)
                .collect(),
        }
    }
}

/// 管理画面からの部分更新。許可フィールド以外は受け取らない。
#[derive(Debug, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    #[garde(skip)]
    pub reservation_status: Option<ReservationStatus>,
    #[garde(range(min = 1))]
    pub head_count: Option<i32>,
    #[garde(skip)]
    pub refund_bank: Option<String>,
    #[garde(skip)]
    pub refund_account: Option<String>,
    #[garde(skip)]
    pub refund_status: Option<RefundStatus>,
}

impl From<UpdateReservationRequest> for UpdateReservation {
    fn from(value: UpdateReservationRequest) -> Self {
        let UpdateReservationRequest {
            reservation_status,
            head_count,
            refund_bank,
            refund_account,
            refund_status,
        } = value;
        UpdateReservation {
            reservation_status,
            head_count,
            refund_bank,
            refund_account,
            refund_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_converts_page_and_size_to_limit_offset() {
        let query = ReservationListQuery {
            page: 2,
            size: 10,
            keyword: Some("  ".into()),
        };
        let options = ReservationListOptions::from(query);

        assert_eq!(options.limit, 10);
        assert_eq!(options.offset, 20);
        assert_eq!(options.keyword, None);
    }

    #[test]
    fn update_request_parses_allowed_fields_only() {
        let req: UpdateReservationRequest = serde_json::from_str(
            r#"{"reservationStatus": "CANCELLED", "refundStatus": "COMPLETED"}"#,
        )
        .unwrap();

        assert_eq!(req.reservation_status, Some(ReservationStatus::Cancelled));
        assert_eq!(req.refund_status, Some(RefundStatus::Completed));
        assert_eq!(req.head_count, None);
    }
}
