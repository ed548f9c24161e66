use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/new-trip", get(handlers::new_trip_form).post(handlers::submit_trip))
        .route("/trips", get(handlers::missing_trip_id))
        .route("/trips/", get(handlers::missing_trip_id))
        .route("/trips/:trip_id", get(handlers::trip_summary))
        .route("/dashboard", get(handlers::dashboard))
        .route("/api/trips/:trip_id/map", get(handlers::trip_map))
        .route("/api/dashboard", get(handlers::dashboard_data))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
