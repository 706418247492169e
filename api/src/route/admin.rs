use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::admin::{show_cancelled_list, show_reservation_list, update_reservation};

pub fn build_admin_routers() -> Router<AppRegistry> {
    let admin_routers = Router::new()
        .route("/reservations", get(show_reservation_list))
        .route("/reservations/cancelled", get(show_cancelled_list))
        .route("/reservations/:reservation_id", put(update_reservation));

    Router::new().nest("/admin", admin_routers)
}
