use crate::model::id::{ReservationId, ThemeId, TimeSlotId};
use crate::model::cancellation::RefundStatus;
use crate::model::reservation::ReservationStatus;
use chrono::NaiveDate;
use derive_new::new;
use shared::error::{AppError, AppResult};

#[derive(new, Debug)]
pub struct CreateReservation {
    pub theme_id: ThemeId,
    pub time_slot_id: TimeSlotId,
    pub reservation_date: NaiveDate,
    pub customer_name: String,
    pub customer_phone: String,
    pub head_count: i32,
    pub payment_type: String,
    pub reservation_status: ReservationStatus,
}

/// 予約番号と予約者情報の完全一致で本人照会する（会員機能は存在しない）。
#[derive(new, Debug)]
pub struct ConfirmReservation {
    pub reservation_id: ReservationId,
    pub customer_name: String,
    pub customer_phone: String,
}

#[derive(new, Debug)]
pub struct CancelReservation {
    pub reservation_id: ReservationId,
}

#[derive(new, Debug)]
pub struct ReservationListOptions {
    pub limit: i64,
    pub offset: i64,
    pub keyword: Option<String>,
}

/// 管理画面からの部分更新。許可されたフィールドのみを持つ。
#[derive(new, Debug, Default)]
pub struct UpdateReservation {
    pub reservation_status: Option<ReservationStatus>,
    pub head_count: Option<i32>,
    pub refund_bank: Option<String>,
    pub refund_account: Option<String>,
    pub refund_status: Option<RefundStatus>,
}

/// 現在の予約状態を踏まえて実際に適用する更新内容。
#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedUpdate {
    pub reservation_status: Option<ReservationStatus>,
    pub head_count: Option<i32>,
    pub refund_bank: Option<String>,
    pub refund_account: Option<String>,
    pub refund_status: Option<RefundStatus>,
    /// 今回の更新で CANCELLED へ遷移するか（取消台帳の作成トリガー）
    pub triggers_cancellation: bool,
}

impl UpdateReservation {
    /// 更新リクエストを現在の状態に対して解決する。
    ///
    /// キャンセル済みの予約では reservation_status と refund_bank /
    /// refund_account への書き込みを黙って無視する（エラーにはしない）。
    /// これはキャンセル済み予約を再オープンさせないための措置で、
    /// head_count の修正だけは引き続き許可する。
    pub fn resolve(&self, current: ReservationStatus) -> AppResult<ResolvedUpdate> {
        if let Some(head_count) = self.head_count {
            if head_count <= 0 {
                return Err(AppError::UnprocessableEntity(
                    "予約人数は 1 以上を指定してください。".into(),
                ));
            }
        }

        let already_cancelled = current == ReservationStatus::Cancelled;
        let reservation_status = if already_cancelled {
            None
        } else {
            self.reservation_status
        };
        let refund_bank = if already_cancelled {
            None
        } else {
            self.refund_bank.clone()
        };
        let refund_account = if already_cancelled {
            None
        } else {
            self.refund_account.clone()
        };
        let triggers_cancellation =
            !already_cancelled && reservation_status == Some(ReservationStatus::Cancelled);

        Ok(ResolvedUpdate {
            reservation_status,
            head_count: self.head_count,
            refund_bank,
            refund_account,
            refund_status: self.refund_status,
            triggers_cancellation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn cancelling_a_waiting_reservation_triggers_ledger_creation() {
        let update = UpdateReservation {
            reservation_status: Some(ReservationStatus::Cancelled),
            ..Default::default()
        };

        let resolved = update.resolve(ReservationStatus::Wait).unwrap();

        assert!(resolved.triggers_cancellation);
        assert_eq!(
            resolved.reservation_status,
            Some(ReservationStatus::Cancelled)
        );
    }

    #[rstest]
    #[case(ReservationStatus::Wait)]
    #[case(ReservationStatus::Confirmed)]
    fn non_cancelling_update_does_not_trigger_ledger(#[case] current: ReservationStatus) {
        let update = UpdateReservation {
            reservation_status: Some(ReservationStatus::Confirmed),
            head_count: Some(3),
            ..Default::default()
        };

        let resolved = update.resolve(current).unwrap();

        assert!(!resolved.triggers_cancellation);
        assert_eq!(resolved.head_count, Some(3));
    }

    #[test]
    fn cancelled_reservation_ignores_status_and_refund_edits() {
        let update = UpdateReservation {
            reservation_status: Some(ReservationStatus::Confirmed),
            head_count: Some(5),
            refund_bank: Some("農協".into()),
            refund_account: Some("12345678".into()),
            refund_status: Some(RefundStatus::Completed),
        };

        let resolved = update.resolve(ReservationStatus::Cancelled).unwrap();

        // 再オープン・返金先の書き換えは無視、人数と返金状態だけ通す
        assert_eq!(resolved.reservation_status, None);
        assert_eq!(resolved.refund_bank, None);
        assert_eq!(resolved.refund_account, None);
        assert_eq!(resolved.head_count, Some(5));
        assert_eq!(resolved.refund_status, Some(RefundStatus::Completed));
        assert!(!resolved.triggers_cancellation);
    }

    #[test]
    fn repeated_cancellation_does_not_trigger_ledger_again() {
        let update = UpdateReservation {
            reservation_status: Some(ReservationStatus::Cancelled),
            ..Default::default()
        };

        let resolved = update.resolve(ReservationStatus::Cancelled).unwrap();

        assert!(!resolved.triggers_cancellation);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    fn non_positive_head_count_is_rejected(#[case] head_count: i32) {
        let update = UpdateReservation {
            head_count: Some(head_count),
            ..Default::default()
        };

        assert!(update.resolve(ReservationStatus::Wait).is_err());
    }
}
