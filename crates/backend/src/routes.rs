use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::shared::app_state::AppState;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/field/:entity_type",
            get(handlers::a001_extra_field::list),
        )
        .route(
            "/api/field/:entity_type/:key",
            post(handlers::a001_extra_field::upsert).delete(handlers::a001_extra_field::delete),
        )
        .with_state(state)
}
