use crate::model::id::ThemeId;

#[derive(Debug, Clone)]
pub struct Theme {
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
