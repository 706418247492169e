use crate::database::{model::cancellation::CancellationRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    cancellation::{event::UpdateRefundAccount, CancellationRecord},
    id::ReservationId,
};
use kernel::repository::cancellation::CancellationRepository;
use shared::error::{AppError, AppResult};

const SELECT_CANCELLATION: &str = r#"
    SELECT
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
    cancelled_at
    FROM reservation_cancel
"#;

#[derive(new)]
pub struct CancellationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl CancellationRepository for CancellationRepositoryImpl {
    async fn find_all(&self, keyword: Option<String>) -> AppResult<Vec<CancellationRecord>> {
        let rows = match keyword.map(|k| format!("%{k}%")) {
            Some(pattern) => {
                let sql = format!(
                    "{SELECT_CANCELLATION} \
                     WHERE customer_name LIKE $1 \
                        OR customer_phone LIKE $1 \
                        OR CAST(reservation_id AS TEXT) LIKE $1 \
                     ORDER BY cancelled_at DESC"
                );
                sqlx::query_as::<_, CancellationRow>(&sql)
                    .bind(pattern)
                    .fetch_all(self.db.inner_ref())
                    .await
            }
            None => {
                let sql = format!("{SELECT_CANCELLATION} ORDER BY cancelled_at DESC");
                sqlx::query_as::<_, CancellationRow>(&sql)
                    .fetch_all(self.db.inner_ref())
                    .await
            }
        }
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter()
            .map(CancellationRecord::try_from)
            .collect()
    }

    async fn find_by_reservation_id(
        &self,
        reservation_id: ReservationId,
    ) -> AppResult<Option<CancellationRecord>> {
        let sql = format!("{SELECT_CANCELLATION} WHERE reservation_id = $1");
        let row = sqlx::query_as::<_, CancellationRow>(&sql)
            .bind(reservation_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        row.map(CancellationRecord::try_from).transpose()
    }

    // 返金先口座のみを上書きする。refund_status は管理画面からの
    // 明示的な操作でしか変化しない
    async fn update_refund_account(&self, event: UpdateRefundAccount) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE reservation_cancel
                SET refund_bank = $2, refund_account = $3
                WHERE cancel_id = $1
                ;
            "#,
        )
        .bind(event.cancel_id)
        .bind(&event.refund_bank)
        .bind(&event.refund_account)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "取消履歴（{}）が見つかりませんでした。",
                event.cancel_id
            )));
        }

        Ok(())
    }
}
