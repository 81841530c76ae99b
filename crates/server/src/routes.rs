use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::ServerState;

pub mod absences;
pub mod calendar;
pub mod employees;
pub mod vacations;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the application router: JSON API under `/api`, health check, and the
/// static frontend as fallback.
pub fn build_router(state: ServerState, cors: CorsLayer, frontend_dir: &str) -> Router {
    let index = format!("{}/index.html", frontend_dir.trim_end_matches('/'));
    let static_dir = ServeDir::new(frontend_dir).fallback(ServeFile::new(index));

    let api = Router::new()
        .route("/api/employees", get(employees::list).post(employees::create))
        .route(
            "/api/employees/:id",
            get(employees::get).put(employees::update).delete(employees::delete),
        )
        .route("/api/employees/:id/balance", get(employees::balance))
        .route("/api/vacations", get(vacations::list).post(vacations::create))
        .route("/api/vacations/reconcile", post(vacations::reconcile))
        .route("/api/vacations/:id", delete(vacations::delete))
        .route("/api/absences", get(absences::list).post(absences::create))
        .route("/api/calendar/events", get(calendar::events))
        .route("/api/calendar/holidays", get(calendar::holidays));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
