//! Route definitions and router construction.

use axum::Router;
use axum::http::{HeaderValue, header};
use axum::routing::{get, post};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
///
/// `Content-Disposition` is exposed so a browser on another origin can
/// read the download's filename.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = match config {
        CorsConfig::AllowAll => CorsLayer::new().allow_origin(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new().allow_origin(allowed)
        }
    };
    layer
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([header::CONTENT_DISPOSITION])
}

/// API routes without the `/api` prefix, for nesting under `/api`.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/video-info", post(handlers::info::video_info))
        .route("/download", post(handlers::download::download))
        .route("/tool", get(handlers::tool::status))
}

/// Create the main Axum router with all API routes.
///
/// For serving static assets as well, use [`create_spa_router`].
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes().with_state(state).layer(cors))
        .layer(TraceLayer::new_for_http())
}

/// Create a router with API routes and static asset serving.
///
/// Unmatched paths are served from `static_dir`, falling back to
/// `index.html` for client-side routing.
pub fn create_spa_router<P: AsRef<Path>>(
    ctx: AxumContext,
    static_dir: P,
    cors_config: &CorsConfig,
) -> Router {
    let static_path = static_dir.as_ref();
    let index_path = static_path.join("index.html");

    let serve_dir = ServeDir::new(static_path).fallback(ServeFile::new(&index_path));

    // API routes take priority, then static/SPA serving
    create_router(ctx, cors_config).fallback_service(serve_dir)
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
