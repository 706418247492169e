use crate::model::{id::ThemeId, theme::Theme};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait ThemeRepository: Send + Sync {
    // 公開中のテーマ一覧を取得する
    async fn find_all(&self) -> AppResult<Vec<Theme>>;
    // theme_id からテーマを取得する
    async fn find_by_id(&self, theme_id: ThemeId) -> AppResult<Option<Theme>>;
}
