pub mod auth;
pub mod error;
pub mod export;
pub mod middleware;
pub mod reference;
pub mod reports;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::AppState;

/// Assemble the full application router. Routes that need a verified
/// caller sit behind [`middleware::require_session`]; report submission
/// and the auth endpoints resolve their own token, if any.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/session", get(auth::session))
        .route("/auth/logout", post(auth::logout))
        .route("/reports", get(reports::list_reports))
        .route("/reports", post(reports::create_report))
        .route("/reports/summary", get(reports::summary))
        .route("/reference/divisions", get(reference::divisions))
        .route("/reference/divisions/{division}/districts", get(reference::districts))
        .route(
            "/reference/divisions/{division}/coordinates",
            get(reference::division_coordinates),
        )
        .route(
            "/reference/divisions/{division}/districts/{district}/coordinates",
            get(reference::district_coordinates),
        )
        .route("/reference/districts", get(reference::all_districts))
        .route("/reference/categories", get(reference::categories))
        .route(
            "/reference/categories/{category}/subcategories",
            get(reference::subcategories),
        )
        .route("/reference/subcategories", get(reference::all_subcategories))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/reports/mine", get(reports::my_reports))
        .route("/reports/{id}/status", put(reports::update_status))
        .route("/reports/export", get(export::export_csv))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_session,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}
