use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{create_link_handler, get_link_handler, health_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any);

        Router::new()
            // Two segments, so it never shadows a short code.
            .route("/api/health", get(health_handler))
            .route("/", post(create_link_handler))
            .route("/{code}", get(get_link_handler).post(create_link_handler))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
