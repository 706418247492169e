use chrono::{NaiveDate, NaiveTime};
use kernel::model::{
    id::{ThemeId, TimeSlotId},
    theme::Theme,
    time_slot::SlotAvailability,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemesResponse {
    pub items: Vec<ThemeResponse>,
}

impl From<Vec<Theme>> for ThemesResponse {
    fn from(value: Vec<Theme>) -> Self {
        Self {
            items: value.into_iter().map(ThemeResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeResponse {
    pub theme_id: ThemeId,
    pub theme_name: String,
    pub theme_description: String,
    pub difficulty: i32,
    pub min_person: i32,
    pub play_time: i32,
    pub price_per_person: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl From<Theme> for ThemeResponse {
    fn from(value: Theme) -> Self {
        let Theme {
            theme_id,
            theme_name,
            theme_description,
            difficulty,
            min_person,
            play_time,
            price_per_person,
            image_url,
            is_active,
        } = value;
        Self {
            theme_id,
            theme_name,
            theme_description,
            difficulty,
            min_person,
            play_time,
            price_per_person,
            image_url,
            is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AvailableTimesQuery {
    pub date: NaiveDate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTimeResponse {
    pub time_slot_id: TimeSlotId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reserved: bool,
}

impl From<SlotAvailability> for AvailableTimeResponse {
    fn from(value: SlotAvailability) -> Self {
        let SlotAvailability {
            time_slot,
            reserved,
        } = value;
        Self {
            time_slot_id: time_slot.time_slot_id,
            start_time: time_slot.start_time,
            end_time: time_slot.end_time,
            reserved,
        }
    }
}
