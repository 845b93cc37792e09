//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The editor front end loads store documents from the catalog routes and
//! reads/writes one grid layout per store. Everything is JSON over HTTP; CORS
//! is open because the editor is served from a different origin in
//! development.

pub mod stores;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/stores", get(stores::list_stores))
        .route("/api/stores/{id}", get(stores::get_store))
        .route(
            "/api/stores/{id}/layout",
            get(stores::get_layout)
                .put(stores::put_layout)
                .delete(stores::delete_layout),
        )
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
