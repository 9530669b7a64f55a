//! Handlers for the `/leads` resource.
//!
//! Every handler resolves the owner id from the bearer token and passes
//! it to the repository, which applies it as an equality predicate on
//! each query. A zero-row update is classified by re-reading the row:
//! still visible means the caller's version is stale (409), invisible
//! means absent or owned by someone else (404 -- the two are
//! deliberately indistinguishable).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use leadcrm_core::error::CoreError;
use leadcrm_core::types::DbId;
use leadcrm_core::validation::validate_lead_fields;
use leadcrm_db::models::lead::{CreateLead, UpdateLead};
use leadcrm_db::repositories::LeadRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT /leads/{id}`: the full field set plus the
/// version the client read. Partial updates are not supported.
#[derive(Debug, Deserialize)]
pub struct UpdateLeadRequest {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub is_prospect: bool,
    pub status: String,
    pub version: i64,
}

/// Request body for `PATCH /leads/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub version: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/leads
///
/// List the authenticated user's leads, newest first.
pub async fn list_leads(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let leads = LeadRepo::list_for_owner(&state.pool, user.user_id).await?;

    Ok(Json(DataResponse { data: leads }))
}

/// POST /api/v1/leads
///
/// Create a new lead owned by the authenticated user.
pub async fn create_lead(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateLead>,
) -> AppResult<impl IntoResponse> {
    validate_lead_fields(&input.name, &input.mobile, &input.email)?;

    let lead = LeadRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(
        lead_id = %lead.id,
        user_id = %user.user_id,
        status = %lead.status,
        "Lead created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

/// GET /api/v1/leads/{id}
///
/// Retrieve a single owned lead.
pub async fn get_lead(
    user: AuthUser,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let lead = LeadRepo::find_by_id(&state.pool, user.user_id, lead_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id: lead_id,
        }))?;

    Ok(Json(DataResponse { data: lead }))
}

/// PUT /api/v1/leads/{id}
///
/// Replace all editable fields of an owned lead.
pub async fn update_lead(
    user: AuthUser,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
    Json(input): Json<UpdateLeadRequest>,
) -> AppResult<impl IntoResponse> {
    validate_lead_fields(&input.name, &input.mobile, &input.email)?;

    let fields = UpdateLead {
        name: input.name,
        mobile: input.mobile,
        email: input.email,
        is_prospect: input.is_prospect,
        status: input.status,
    };

    let updated =
        LeadRepo::update(&state.pool, user.user_id, lead_id, &fields, input.version).await?;

    let lead = match updated {
        Some(lead) => lead,
        None => return Err(classify_missed_update(&state, user.user_id, lead_id).await?),
    };

    tracing::info!(lead_id = %lead_id, user_id = %user.user_id, "Lead updated");

    Ok(Json(DataResponse { data: lead }))
}

/// PATCH /api/v1/leads/{id}/status
///
/// Change the status label of an owned lead.
pub async fn update_lead_status(
    user: AuthUser,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let updated =
        LeadRepo::update_status(&state.pool, user.user_id, lead_id, &input.status, input.version)
            .await?;

    let lead = match updated {
        Some(lead) => lead,
        None => return Err(classify_missed_update(&state, user.user_id, lead_id).await?),
    };

    tracing::info!(
        lead_id = %lead_id,
        user_id = %user.user_id,
        status = %lead.status,
        "Lead status changed",
    );

    Ok(Json(DataResponse { data: lead }))
}

/// DELETE /api/v1/leads/{id}
///
/// Delete an owned lead. A repeated delete reports 404, never an error.
pub async fn delete_lead(
    user: AuthUser,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = LeadRepo::delete(&state.pool, user.user_id, lead_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id: lead_id,
        }));
    }

    tracing::info!(lead_id = %lead_id, user_id = %user.user_id, "Lead deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Classify an update that matched zero rows.
///
/// The row either moved past the caller's version (conflict) or is not
/// visible to this owner (absent or someone else's -- reported
/// identically as not-found).
async fn classify_missed_update(
    state: &AppState,
    owner_id: DbId,
    lead_id: DbId,
) -> AppResult<AppError> {
    let still_visible = LeadRepo::find_by_id(&state.pool, owner_id, lead_id)
        .await?
        .is_some();

    if still_visible {
        Ok(AppError::Core(CoreError::Conflict(
            "Lead was modified by another request; re-read and retry".into(),
        )))
    } else {
        Ok(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id: lead_id,
        }))
    }
}
