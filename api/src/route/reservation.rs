use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    cancel_reservation, confirm_reservation, create_reservation, save_refund_account,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let reservations_routers = Router::new()
        .route("/", post(create_reservation))
        .route("/confirm", get(confirm_reservation))
        .route("/:reservation_id/cancel", post(cancel_reservation))
        .route("/cancel/:cancel_id/refund", put(save_refund_account));

    Router::new().nest("/reservations", reservations_routers)
}
