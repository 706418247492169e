pub mod admin;
pub mod health;
pub mod reservation;
pub mod theme;

use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(health::build_health_check_routers())
        .merge(theme::build_theme_routers())
        .merge(reservation::build_reservation_routers())
        .merge(admin::build_admin_routers());
    Router::new().nest("/api", router)
}
