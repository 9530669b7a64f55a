//! Lead entity model and DTOs.

use leadcrm_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full lead row from the `leads` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub is_prospect: bool,
    /// Open-ended label (`"New"`, `"Active"`, `"Closed"`, ...). The data
    /// layer treats it as opaque text; only the display layer interprets it.
    pub status: String,
    pub owner_id: DbId,
    /// Optimistic concurrency counter. Updates must supply the version
    /// they read; a mismatch matches zero rows.
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new lead.
///
/// The owner is taken from the caller's session, never from the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLead {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub is_prospect: bool,
    pub status: String,
}

/// DTO for a full-field lead update. Partial updates are not supported;
/// every field is always sent.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLead {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub is_prospect: bool,
    pub status: String,
}
