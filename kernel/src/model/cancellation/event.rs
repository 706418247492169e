use crate::model::id::{CancelId, ReservationId};
use crate::model::reservation::Reservation;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use derive_new::new;

#[derive(new, Debug)]
pub struct UpdateRefundAccount {
    pub cancel_id: CancelId,
    pub refund_bank: String,
    pub refund_account: String,
}

/// 取消台帳への書き込み方。取消は予約 ID ごとに冪等で、
/// 既に台帳レコードを持つ予約には新しいレコードを作らず
/// 既存レコードの ID をそのまま返す。
#[derive(Debug, PartialEq, Eq)]
pub enum CancellationLedgerAction {
    ReuseExisting(CancelId),
    AppendNew,
}

impl CancellationLedgerAction {
    pub fn for_existing(existing: Option<CancelId>) -> Self {
        match existing {
            Some(cancel_id) => CancellationLedgerAction::ReuseExisting(cancel_id),
            None => CancellationLedgerAction::AppendNew,
        }
    }
}

/// 取消台帳へ追記する新規レコード。refund_status は PENDING、
/// reservation_status は CANCELLED 固定で保存される。
#[derive(Debug, PartialEq, Eq)]
pub struct NewCancellationRecord {
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
    pub cancelled_at: DateTime<Utc>,
}

impl NewCancellationRecord {
    /// 取消時点の予約からスナップショットを作る。
    /// 返金口座が未入力の場合は NULL ではなく空文字を入れる。
    pub fn snapshot(reservation: &Reservation, cancelled_at: DateTime<Utc>) -> Self {
        Self {
            reservation_id: reservation.reservation_id,
            theme_name: reservation.theme.theme_name.clone(),
            reservation_date: reservation.reservation_date,
            start_time: reservation.time_slot.start_time,
            customer_name: reservation.customer_name.clone(),
            customer_phone: reservation.customer_phone.clone(),
            head_count: reservation.head_count,
            payment_type: reservation.payment_type.clone(),
            refund_bank: reservation.refund_bank.clone().unwrap_or_default(),
            refund_account: reservation.refund_account.clone().unwrap_or_default(),
            cancelled_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::id::{ThemeId, TimeSlotId};
    use crate::model::reservation::{ReservationStatus, ReservationTheme, ReservationTimeSlot};

    fn reservation() -> Reservation {
        Reservation {
            reservation_id: ReservationId::new(42),
            reservation_date: "2024-06-01".parse().unwrap(),
            customer_name: "김영희".into(),
            customer_phone: "010-9876-5432".into(),
            head_count: 3,
            payment_type: "BANK_TRANSFER".into(),
            reservation_status: ReservationStatus::Confirmed,
            refund_bank: None,
            refund_account: None,
            cancelled_at: None,
            theme: ReservationTheme {
                theme_id: ThemeId::new(1),
                theme_name: "監獄からの脱出".into(),
                price_per_person: 27000,
            },
            time_slot: ReservationTimeSlot {
                time_slot_id: TimeSlotId::new(2),
                start_time: "15:30:00".parse().unwrap(),
                end_time: "16:30:00".parse().unwrap(),
            },
        }
    }

    #[test]
    fn repeated_cancel_reuses_the_existing_ledger_id() {
        assert_eq!(
            CancellationLedgerAction::for_existing(Some(CancelId::new(7))),
            CancellationLedgerAction::ReuseExisting(CancelId::new(7))
        );
    }

    #[test]
    fn first_cancel_appends_a_new_ledger_record() {
        assert_eq!(
            CancellationLedgerAction::for_existing(None),
            CancellationLedgerAction::AppendNew
        );
    }

    #[test]
    fn snapshot_copies_reservation_fields() {
        let r = reservation();
        let cancelled_at = Utc::now();

        let record = NewCancellationRecord::snapshot(&r, cancelled_at);

        assert_eq!(record.reservation_id, r.reservation_id);
        assert_eq!(record.theme_name, "監獄からの脱出");
        assert_eq!(record.reservation_date, r.reservation_date);
        assert_eq!(record.start_time, r.time_slot.start_time);
        assert_eq!(record.customer_name, "김영희");
        assert_eq!(record.customer_phone, "010-9876-5432");
        assert_eq!(record.head_count, 3);
        assert_eq!(record.cancelled_at, cancelled_at);
    }

    #[test]
    fn missing_refund_account_defaults_to_empty_string() {
        let record = NewCancellationRecord::snapshot(&reservation(), Utc::now());
        assert_eq!(record.refund_bank, "");
        assert_eq!(record.refund_account, "");
    }

    #[test]
    fn present_refund_account_is_copied() {
        let mut r = reservation();
        r.refund_bank = Some("농협".into());
        r.refund_account = Some("12345678".into());

        let record = NewCancellationRecord::snapshot(&r, Utc::now());

        assert_eq!(record.refund_bank, "농협");
        assert_eq!(record.refund_account, "12345678");
    }
}
