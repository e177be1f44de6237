use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;

pub mod handlers;
pub mod responses;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::get_health))
        .route("/api/temples", get(handlers::get_temples))
        .route("/api/temples/{temple_id}", get(handlers::get_temple))
        .route("/api/temples/{temple_id}/zones", get(handlers::get_zones))
        .route(
            "/api/temples/{temple_id}/forecast/hourly",
            get(handlers::get_hourly_forecast),
        )
        .route(
            "/api/temples/{temple_id}/forecast/weekly",
            get(handlers::get_weekly_forecast),
        )
        .route("/api/temples/{temple_id}/footfall", get(handlers::get_footfall))
        .route("/api/temples/{temple_id}/weather", get(handlers::get_weather))
        .with_state(state)
}
