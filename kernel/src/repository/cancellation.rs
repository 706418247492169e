use crate::model::{
    cancellation::{event::UpdateRefundAccount, CancellationRecord},
    id::ReservationId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait CancellationRepository: Send + Sync {
    // 取消台帳の一覧を取消日時の降順で取得する。キーワードは
    // 予約者名・電話番号・元予約 ID の部分一致
    async fn find_all(&self, keyword: Option<String>) -> AppResult<Vec<CancellationRecord>>;
    // 元予約 ID から台帳レコードを取得する
    async fn find_by_reservation_id(
        &self,
        reservation_id: ReservationId,
    ) -> AppResult<Option<CancellationRecord>>;
    // 返金先口座を上書きする。refund_status はこの操作では変化しない
    async fn update_refund_account(&self, event: UpdateRefundAccount) -> AppResult<()>;
}
