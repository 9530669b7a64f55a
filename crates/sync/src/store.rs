//! The storage seam behind the view-model.
//!
//! [`LeadStore`] abstracts the owner-scoped lead operations the
//! view-model needs; [`PgLeadStore`] is the Postgres-backed
//! implementation, classifying zero-row updates into
//! [`StoreError::NotFound`] or [`StoreError::Conflict`] by re-reading
//! the row.

use async_trait::async_trait;

use leadcrm_core::types::DbId;
use leadcrm_db::models::lead::{CreateLead, Lead, UpdateLead};
use leadcrm_db::repositories::LeadRepo;
use leadcrm_db::DbPool;

/// Error taxonomy for storage round-trips.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The lead does not exist for this owner (absent, or owned by
    /// someone else -- the two are deliberately indistinguishable).
    #[error("Lead not found")]
    NotFound,

    /// The lead was modified since the caller read it; the caller's
    /// version no longer matches.
    #[error("Lead was modified by another request")]
    Conflict,

    /// The round-trip itself failed (connectivity, backend rejection).
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

/// Owner-scoped lead operations as seen from the client side.
///
/// Every method takes the owner id explicitly; implementations must
/// apply it as an equality predicate on each call.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// All leads for the owner, newest first.
    async fn list(&self, owner_id: DbId) -> Result<Vec<Lead>, StoreError>;

    /// Insert a new lead, returning the confirmed row.
    async fn create(&self, owner_id: DbId, input: &CreateLead) -> Result<Lead, StoreError>;

    /// Change a lead's status, supplying the version that was read.
    async fn update_status(
        &self,
        owner_id: DbId,
        id: DbId,
        status: &str,
        expected_version: i64,
    ) -> Result<Lead, StoreError>;

    /// Replace all editable fields, supplying the version that was read.
    async fn update(
        &self,
        owner_id: DbId,
        id: DbId,
        input: &UpdateLead,
        expected_version: i64,
    ) -> Result<Lead, StoreError>;

    /// Delete a lead. A second delete of the same id reports
    /// [`StoreError::NotFound`], never an unhandled failure.
    async fn delete(&self, owner_id: DbId, id: DbId) -> Result<(), StoreError>;
}

/// [`LeadStore`] backed by the Postgres repository layer.
#[derive(Clone)]
pub struct PgLeadStore {
    pool: DbPool,
}

impl PgLeadStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Classify a zero-row update: the row either moved past the
    /// caller's version (conflict) or is not visible to this owner.
    async fn classify_missed_update(&self, owner_id: DbId, id: DbId) -> StoreError {
        match LeadRepo::find_by_id(&self.pool, owner_id, id).await {
            Ok(Some(_)) => StoreError::Conflict,
            Ok(None) => StoreError::NotFound,
            Err(err) => StoreError::from(err),
        }
    }
}

#[async_trait]
impl LeadStore for PgLeadStore {
    async fn list(&self, owner_id: DbId) -> Result<Vec<Lead>, StoreError> {
        Ok(LeadRepo::list_for_owner(&self.pool, owner_id).await?)
    }

    async fn create(&self, owner_id: DbId, input: &CreateLead) -> Result<Lead, StoreError> {
        Ok(LeadRepo::create(&self.pool, owner_id, input).await?)
    }

    async fn update_status(
        &self,
        owner_id: DbId,
        id: DbId,
        status: &str,
        expected_version: i64,
    ) -> Result<Lead, StoreError> {
        match LeadRepo::update_status(&self.pool, owner_id, id, status, expected_version).await? {
            Some(lead) => Ok(lead),
            None => Err(self.classify_missed_update(owner_id, id).await),
        }
    }

    async fn update(
        &self,
        owner_id: DbId,
        id: DbId,
        input: &UpdateLead,
        expected_version: i64,
    ) -> Result<Lead, StoreError> {
        match LeadRepo::update(&self.pool, owner_id, id, input, expected_version).await? {
            Some(lead) => Ok(lead),
            None => Err(self.classify_missed_update(owner_id, id).await),
        }
    }

    async fn delete(&self, owner_id: DbId, id: DbId) -> Result<(), StoreError> {
        if LeadRepo::delete(&self.pool, owner_id, id).await? {
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }
}
