use kernel::model::{id::ThemeId, theme::Theme};

#[derive(sqlx::FromRow)]
pub struct ThemeRow {
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

impl From<ThemeRow> for Theme {
    fn from(value: ThemeRow) -> Self {
        let ThemeRow {
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
        Theme {
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
