use crate::database::{model::theme::ThemeRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::ThemeId, theme::Theme};
use kernel::repository::theme::ThemeRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ThemeRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ThemeRepository for ThemeRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Theme>> {
        sqlx::query_as::<_, ThemeRow>(
            r#"
                SELECT
                theme_id,
                theme_name,
                theme_description,
                difficulty,
                min_person,
                play_time,
                price_per_person,
                image_url,
                is_active
                FROM theme
                ORDER BY theme_id ASC
                ;
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Theme::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_id(&self, theme_id: ThemeId) -> AppResult<Option<Theme>> {
        sqlx::query_as::<_, ThemeRow>(
            r#"
                SELECT
                theme_id,
                theme_name,
                theme_description,
                difficulty,
                min_person,
                play_time,
                price_per_person,
                image_url,
                is_active
                FROM theme
                WHERE theme_id = $1
                ;
            "#,
        )
        .bind(theme_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Theme::from))
        .map_err(AppError::SpecificOperationError)
    }
}
