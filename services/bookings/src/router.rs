use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use gymbros_core::health::{healthz, readyz};
use gymbros_core::middleware::request_id_layer;

use crate::handlers::{
    attendance::{create_checkin, get_access_logs, toggle_attendance},
    booking::{cancel_booking, create_booking, get_my_bookings},
    class::{create_class, delete_class, get_classes, get_occupancy, update_class},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Classes
        .route("/classes", get(get_classes))
        .route("/classes", post(create_class))
        .route("/classes/occupancy", get(get_occupancy))
        .route("/classes/{id}", patch(update_class))
        .route("/classes/{id}", delete(delete_class))
        // Bookings
        .route("/bookings", post(create_booking))
        .route("/bookings/@me", get(get_my_bookings))
        .route("/bookings/{class_id}", delete(cancel_booking))
        .route("/bookings/{id}/attendance", post(toggle_attendance))
        // Front desk
        .route("/checkin", post(create_checkin))
        .route("/access-logs", get(get_access_logs))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
