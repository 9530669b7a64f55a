//! Route definitions for the `/leads` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{leads, outreach};
use crate::state::AppState;

/// Routes mounted at `/leads`. All of them require authentication.
///
/// ```text
/// GET    /              -> list_leads
/// POST   /              -> create_lead
/// GET    /{id}          -> get_lead
/// PUT    /{id}          -> update_lead
/// DELETE /{id}          -> delete_lead
/// PATCH  /{id}/status   -> update_lead_status
/// POST   /{id}/email    -> compose_email
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leads::list_leads).post(leads::create_lead))
        .route(
            "/{id}",
            get(leads::get_lead)
                .put(leads::update_lead)
                .delete(leads::delete_lead),
        )
        .route("/{id}/status", patch(leads::update_lead_status))
        .route("/{id}/email", post(outreach::compose_email))
}
