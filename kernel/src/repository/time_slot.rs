use crate::model::{
    id::{ThemeId, TimeSlotId},
    time_slot::TimeSlot,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait TimeSlotRepository: Send + Sync {
    // テーマに属する有効な時間枠を開始時刻順に取得する
    async fn find_active_by_theme_id(&self, theme_id: ThemeId) -> AppResult<Vec<TimeSlot>>;
    // time_slot_id から時間枠を取得する
    async fn find_by_id(&self, time_slot_id: TimeSlotId) -> AppResult<Option<TimeSlot>>;
}
