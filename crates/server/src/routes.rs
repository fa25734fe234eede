use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::diagnostics;
use crate::state::AppState;
use crate::tmdb;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(diagnostics::root))
        .route("/health", get(diagnostics::health))
        .route("/test", get(diagnostics::report))
        .nest("/api", api_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/hello", get(diagnostics::hello))
        .nest("/tmdb", tmdb_router())
}

fn tmdb_router() -> Router<AppState> {
    Router::new()
        .route("/trending", get(tmdb::trending))
        .route("/search", get(tmdb::search))
        .route("/movie/{id}", get(tmdb::movie_detail))
}

/// Any origin, method and header.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
