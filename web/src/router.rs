//! Router composition.

use crate::handlers::{auth, comments, health, requests, stats};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};
use repairdesk_service::providers::{DirectoryRepository, RequestRepository};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router over the given state.
///
/// # Routes
///
/// - `POST /register`, `POST /login` — accounts
/// - `GET /requests`, `GET /requests/search` — listing and search
/// - `POST /requests`, `PUT /requests/:id` — creation and updates
/// - `PUT /requests/extend` — deadline extension (manager/admin)
/// - `POST /requests/parts` — parts replacement
/// - `POST /comments`, `GET /requests/:id/comments` — comments
/// - `GET /stats` — aggregate statistics
/// - `GET /health` — liveness
pub fn app_router<D, R>(state: AppState<D, R>) -> Router
where
    D: DirectoryRepository + 'static,
    R: RequestRepository + 'static,
{
    Router::new()
        // Accounts
        .route("/register", post(auth::register::<D, R>))
        .route("/login", post(auth::login::<D, R>))
        // Requests
        .route("/requests", get(requests::list::<D, R>).post(requests::create::<D, R>))
        .route("/requests/search", get(requests::search::<D, R>))
        .route("/requests/extend", put(requests::extend_deadline::<D, R>))
        .route("/requests/parts", post(requests::set_parts::<D, R>))
        .route("/requests/:id", put(requests::update::<D, R>))
        .route("/requests/:id/comments", get(comments::list::<D, R>))
        // Comments
        .route("/comments", post(comments::add::<D, R>))
        // Statistics
        .route("/stats", get(stats::get::<D, R>))
        // Liveness
        .route("/health", get(health::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
