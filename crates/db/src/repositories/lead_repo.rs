//! Repository for the `leads` table.
//!
//! Every query carries the `owner_id` equality predicate; the double
//! filter (id AND owner) is the access-control boundary between
//! accounts. An update or delete whose predicate does not match affects
//! zero rows instead of erroring, so callers must check the returned
//! row / bool rather than rely on the absence of a transport error.

use sqlx::PgPool;

use leadcrm_core::types::DbId;

use crate::models::lead::{CreateLead, Lead, UpdateLead};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, mobile, email, is_prospect, status, \
                        owner_id, version, created_at, updated_at";

/// Provides CRUD operations for leads, always scoped to an owner.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead for the given owner, returning the created row.
    ///
    /// The database assigns id, version, and both timestamps.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateLead,
    ) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (name, mobile, email, is_prospect, status, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(&input.name)
            .bind(&input.mobile)
            .bind(&input.email)
            .bind(input.is_prospect)
            .bind(&input.status)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// List all leads belonging to an owner, newest first.
    pub async fn list_for_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads
             WHERE owner_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Find a single lead by id, scoped to the owner.
    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Change a lead's status.
    ///
    /// Filtered by id, owner, and the version the caller read. Returns
    /// `None` when zero rows matched -- missing, not owned, or version
    /// moved; a follow-up [`LeadRepo::find_by_id`] tells the cases apart.
    pub async fn update_status(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        status: &str,
        expected_version: i64,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET status = $4, version = version + 1, updated_at = NOW()
             WHERE id = $1 AND owner_id = $2 AND version = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(expected_version)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Replace all editable fields of a lead.
    ///
    /// Partial updates are not supported; every field is always sent.
    /// Same zero-rows semantics as [`LeadRepo::update_status`].
    pub async fn update(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &UpdateLead,
        expected_version: i64,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET
                name = $4,
                mobile = $5,
                email = $6,
                is_prospect = $7,
                status = $8,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND owner_id = $2 AND version = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(expected_version)
            .bind(&input.name)
            .bind(&input.mobile)
            .bind(&input.email)
            .bind(input.is_prospect)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a lead. Returns `true` if a row was deleted.
    ///
    /// Deleting an id that is already gone, or that belongs to another
    /// owner, returns `false` rather than erroring.
    pub async fn delete(pool: &PgPool, owner_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
