use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use gymbros_core::health::{healthz, readyz};
use gymbros_core::middleware::request_id_layer;

use crate::handlers::{
    membership::{cancel_membership, get_my_membership, get_my_membership_history},
    payment::{create_payment_sheet, stripe_webhook},
    plan::{get_plan_change, get_plans, get_tiers, update_plan},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Catalog
        .route("/tiers", get(get_tiers))
        .route("/tiers/{id}/change", get(get_plan_change))
        .route("/plans", get(get_plans))
        .route("/plans/{id}", patch(update_plan))
        // Memberships
        .route("/memberships/@me", get(get_my_membership))
        .route("/memberships/@me/history", get(get_my_membership_history))
        .route("/memberships/{id}/cancel", post(cancel_membership))
        // Payments
        .route("/payments/sheet", post(create_payment_sheet))
        .route("/payments/webhook", post(stripe_webhook))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
