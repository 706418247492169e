use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use kernel::model::{
    cancellation::CancellationRecord,
    id::{CancelId, ReservationId},
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct CancellationRow {
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
    pub refund_status: String,
    pub reservation_status: String,
    pub cancelled_at: DateTime<Utc>,
}

impl TryFrom<CancellationRow> for CancellationRecord {
    type Error = AppError;

    fn try_from(value: CancellationRow) -> Result<Self, Self::Error> {
        let CancellationRow {
            cancel_id,
            reservation_id,
            theme_name,
            reservation_date,
            start_time,
            customer_name,
            customer_phone,
            head_count,
            payment_type,
            refund_bank,
            refund_account,
            refund_status,
            reservation_status,
            cancelled_at,
        } = value;
        Ok(CancellationRecord {
            cancel_id,
            reservation_id,
            theme_name,
            reservation_date,
            start_time,
            customer_name,
            customer_phone,
            head_count,
            payment_type,
            refund_bank,
            refund_account,
            refund_status: refund_status.parse()?,
            reservation_status: reservation_status.parse()?,
            cancelled_at,
        })
    }
}
