use crate::database::{model::time_slot::TimeSlotRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{ThemeId, TimeSlotId},
    time_slot::TimeSlot,
};
use kernel::repository::time_slot::TimeSlotRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct TimeSlotRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl TimeSlotRepository for TimeSlotRepositoryImpl {
    async fn find_active_by_theme_id(&self, theme_id: ThemeId) -> AppResult<Vec<TimeSlot>> {
        sqlx::query_as::<_, TimeSlotRow>(
            r#"
                SELECT
                time_slot_id,
                theme_id,
                start_time,
                end_time,
                is_active
                FROM time_slot
                WHERE theme_id = $1 AND is_active = TRUE
                ORDER BY start_time ASC
                ;
            "#,
        )
        .bind(theme_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(TimeSlot::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_id(&self, time_slot_id: TimeSlotId) -> AppResult<Option<TimeSlot>> {
        sqlx::query_as::<_, TimeSlotRow>(
            r#"
                SELECT
                time_slot_id,
                theme_id,
                start_time,
                end_time,
                is_active
                FROM time_slot
                WHERE time_slot_id = $1
                ;
            "#,
        )
        .bind(time_slot_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(TimeSlot::from))
        .map_err(AppError::SpecificOperationError)
    }
}
