pub mod auth;
pub mod health;
pub mod leads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                 create an account (public)
/// /auth/login                  login (public)
/// /auth/refresh                refresh tokens (public)
/// /auth/logout                 logout (requires auth)
///
/// /leads                       list, create
/// /leads/{id}                  get, update, delete
/// /leads/{id}/status           change status (PATCH)
/// /leads/{id}/email            draft an outbound e-mail (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (signup, login, refresh, logout).
        .nest("/auth", auth::router())
        // Lead CRUD, status changes, and e-mail drafting.
        .nest("/leads", leads::router())
}
