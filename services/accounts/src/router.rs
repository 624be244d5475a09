use axum::{
    Router,
    routing::{get, patch, post},
};

use elevate_core::error::fallback;
use elevate_core::health::healthz;
use elevate_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    health::readyz,
    otp::{request_code, reset_password},
    password::change_password,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Password reset
        .route("/user/reset-password-otp", post(request_code))
        .route("/user/reset-password", post(reset_password))
        // Password change
        .route("/user/change-password", patch(change_password))
        .fallback(fallback)
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
