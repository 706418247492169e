use crate::model::{
    id::{CancelId, ReservationId, ThemeId, TimeSlotId},
    list::PaginatedList,
    reservation::{
        event::{
            CancelReservation, ConfirmReservation, CreateReservation, ReservationListOptions,
            UpdateReservation,
        },
        Reservation,
    },
};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // 予約を作成する。同一 (テーマ, 時間枠, 日付) に有効な予約が
    // 既にある場合は AlreadyBooked を返す
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId>;
    // reservation_id から予約を取得する
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    // 予約番号・予約者名・電話番号の完全一致で予約を照会する
    async fn find_by_confirmation(
        &self,
        event: ConfirmReservation,
    ) -> AppResult<Option<Reservation>>;
    // 指定テーマ・日付で予約済み（CANCELLED を除く）の時間枠 ID を取得する
    async fn find_reserved_slot_ids(
        &self,
        theme_id: ThemeId,
        date: NaiveDate,
    ) -> AppResult<Vec<TimeSlotId>>;
    // 管理画面向けの一覧取得。予約 ID の降順、キーワードは
    // 予約者名・電話番号・予約 ID の部分一致
    async fn find_all(
        &self,
        options: ReservationListOptions,
    ) -> AppResult<PaginatedList<Reservation>>;
    // 部分更新。CANCELLED への遷移時は同一トランザクション内で
    // 取消台帳レコードを作成する
    async fn update(&self, reservation_id: ReservationId, event: UpdateReservation)
        -> AppResult<()>;
    // 予約を取消す。予約を CANCELLED に更新し取消台帳へ追記する。
    // 同じ予約に対して冪等で、既存の台帳レコードの ID を返す
    async fn cancel(&self, event: CancelReservation) -> AppResult<CancelId>;
}
