use chrono::NaiveTime;
use kernel::model::{
    id::{ThemeId, TimeSlotId},
    time_slot::TimeSlot,
};

#[derive(sqlx::FromRow)]
pub struct TimeSlotRow {
    pub time_slot_id: TimeSlotId,
    pub theme_id: ThemeId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: bool,
}

impl From<TimeSlotRow> for TimeSlot {
    fn from(value: TimeSlotRow) -> Self {
        let TimeSlotRow {
            time_slot_id,
            theme_id,
            start_time,
            end_time,
            is_active,
        } = value;
        TimeSlot {
            time_slot_id,
            theme_id,
            start_time,
            end_time,
            is_active,
        }
    }
}
