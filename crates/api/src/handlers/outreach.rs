//! Handlers for drafting outbound e-mails to leads.
//!
//! Drafting assembles a full RFC 5322 message with `lettre`'s builder --
//! which is also what validates the recipient address -- then logs it
//! and hands it back to the caller. No SMTP transport exists anywhere
//! in this service; a draft is never sent.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use lettre::message::header::ContentType;
use lettre::Message;
use serde::{Deserialize, Serialize};

use leadcrm_core::error::CoreError;
use leadcrm_core::types::DbId;
use leadcrm_db::repositories::LeadRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /leads/{id}/email`.
#[derive(Debug, Deserialize)]
pub struct ComposeEmailRequest {
    pub subject: String,
    pub message: String,
}

/// The assembled draft, echoed back to the caller.
#[derive(Debug, Serialize)]
pub struct EmailDraft {
    /// The lead's e-mail address the draft is addressed to.
    pub to: String,
    pub subject: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/leads/{id}/email
///
/// Draft an e-mail to an owned lead. The message is assembled and
/// logged, not sent.
pub async fn compose_email(
    user: AuthUser,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
    Json(input): Json<ComposeEmailRequest>,
) -> AppResult<impl IntoResponse> {
    if input.subject.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Subject must not be empty".into(),
        )));
    }
    if input.message.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message must not be empty".into(),
        )));
    }

    // Only the lead's owner may draft mail to it.
    let lead = LeadRepo::find_by_id(&state.pool, user.user_id, lead_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id: lead_id,
        }))?;

    let email = Message::builder()
        .from(state.config.outreach_from.parse().map_err(|e| {
            AppError::InternalError(format!("Invalid configured sender address: {e}"))
        })?)
        .to(lead.email.parse().map_err(|e| {
            AppError::Core(CoreError::Validation(format!(
                "Lead e-mail is not a deliverable address: {e}"
            )))
        })?)
        .subject(&input.subject)
        .header(ContentType::TEXT_PLAIN)
        .body(input.message.clone())
        .map_err(|e| AppError::InternalError(format!("Email build error: {e}")))?;

    tracing::info!(
        lead_id = %lead.id,
        user_id = %user.user_id,
        to = %lead.email,
        subject = %input.subject,
        bytes = email.formatted().len(),
        "Outbound e-mail drafted (no transport configured; not sent)",
    );

    Ok(Json(DataResponse {
        data: EmailDraft {
            to: lead.email,
            subject: input.subject,
            message: input.message,
        },
    }))
}
