use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::theme::{show_available_times, show_theme, show_theme_list};

pub fn build_theme_routers() -> Router<AppRegistry> {
    let themes_routers = Router::new()
        .route("/", get(show_theme_list))
        .route("/:theme_id", get(show_theme))
        .route("/:theme_id/available-times", get(show_available_times));

    Router::new().nest("/themes", themes_routers)
}
