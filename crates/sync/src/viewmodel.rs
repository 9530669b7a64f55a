//! The lead view-model: an ordered in-memory lead sequence kept
//! consistent with confirmed store results.

use leadcrm_core::error::CoreError;
use leadcrm_core::session::Session;
use leadcrm_core::types::DbId;
use leadcrm_core::validation::validate_lead_fields;
use leadcrm_db::models::lead::{CreateLead, Lead, UpdateLead};

use crate::store::{LeadStore, StoreError};

/// Lifecycle of the view-model's local sequence.
///
/// `Ready` and `Failed` both accept a retry, which goes back through
/// `Loading` and fully replaces the sequence; there is no separate
/// refreshing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No session attached yet; the sequence is empty.
    Uninitialized,
    /// A list round-trip is in flight.
    Loading,
    /// The sequence mirrors the last confirmed listing.
    Ready,
    /// The last listing failed; the message is retained and the
    /// sequence is empty.
    Failed { message: String },
}

/// Error taxonomy for view-model operations.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// No session is attached; the operation was aborted before any
    /// storage round-trip.
    #[error("Not signed in")]
    NotAuthenticated,

    /// The input failed validation before any storage round-trip.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The store rejected or could not complete the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Owns the ordered lead sequence for one signed-in user.
///
/// No operation is optimistic: the local sequence changes only after
/// the store confirms the corresponding write, so on any failure the
/// displayed state is exactly what storage last confirmed.
pub struct LeadsViewModel<S> {
    store: S,
    session: Option<Session>,
    state: LoadState,
    leads: Vec<Lead>,
}

impl<S: LeadStore> LeadsViewModel<S> {
    /// Create a detached view-model. No storage call happens until
    /// [`LeadsViewModel::initialize`] attaches a session.
    pub fn new(store: S) -> Self {
        Self {
            store,
            session: None,
            state: LoadState::Uninitialized,
            leads: Vec::new(),
        }
    }

    /// Attach a session and load its leads.
    pub async fn initialize(&mut self, session: Session) {
        self.session = Some(session);
        self.refresh().await;
    }

    /// Re-fetch the full sequence for the attached session.
    ///
    /// A successful fetch replaces the local sequence wholesale; a
    /// failed one clears it and retains the error message.
    pub async fn refresh(&mut self) {
        let Some(session) = self.session.clone() else {
            self.leads.clear();
            self.state = LoadState::Failed {
                message: SyncError::NotAuthenticated.to_string(),
            };
            return;
        };

        self.state = LoadState::Loading;
        match self.store.list(session.user_id).await {
            Ok(leads) => {
                self.leads = leads;
                self.state = LoadState::Ready;
            }
            Err(err) => {
                tracing::warn!(user_id = %session.user_id, error = %err, "Lead listing failed");
                self.leads.clear();
                self.state = LoadState::Failed {
                    message: err.to_string(),
                };
            }
        }
    }

    /// Create a lead and prepend it to the local sequence (newest
    /// first). Returns the confirmed lead.
    pub async fn add(&mut self, input: CreateLead) -> Result<Lead, SyncError> {
        let session = self.session.as_ref().ok_or(SyncError::NotAuthenticated)?;
        validate_lead_fields(&input.name, &input.mobile, &input.email)?;

        let lead = self.store.create(session.user_id, &input).await?;
        self.leads.insert(0, lead.clone());
        Ok(lead)
    }

    /// Change a lead's status. The local entry is patched only after
    /// the store confirms; on failure it keeps its prior status.
    pub async fn change_status(&mut self, id: DbId, status: &str) -> Result<(), SyncError> {
        let session = self.session.as_ref().ok_or(SyncError::NotAuthenticated)?;
        let version = self.version_of(id)?;

        let updated = self
            .store
            .update_status(session.user_id, id, status, version)
            .await?;
        self.patch(updated);
        Ok(())
    }

    /// Replace a lead's editable fields. Same confirm-then-patch
    /// contract as [`LeadsViewModel::change_status`].
    pub async fn update(&mut self, id: DbId, fields: UpdateLead) -> Result<(), SyncError> {
        let session = self.session.as_ref().ok_or(SyncError::NotAuthenticated)?;
        validate_lead_fields(&fields.name, &fields.mobile, &fields.email)?;
        let version = self.version_of(id)?;

        let updated = self
            .store
            .update(session.user_id, id, &fields, version)
            .await?;
        self.patch(updated);
        Ok(())
    }

    /// Delete a lead and drop it from the local sequence once the
    /// store confirms.
    pub async fn remove(&mut self, id: DbId) -> Result<(), SyncError> {
        let session = self.session.as_ref().ok_or(SyncError::NotAuthenticated)?;

        self.store.delete(session.user_id, id).await?;
        self.leads.retain(|lead| lead.id != id);
        Ok(())
    }

    /// The current local sequence, newest first.
    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The version of a lead as currently mirrored locally.
    ///
    /// Mutations always send the version they read; an id that is not
    /// in the mirror cannot have been read through this view-model, so
    /// it is reported missing without a round-trip.
    fn version_of(&self, id: DbId) -> Result<i64, SyncError> {
        self.leads
            .iter()
            .find(|lead| lead.id == id)
            .map(|lead| lead.version)
            .ok_or(SyncError::Store(StoreError::NotFound))
    }

    /// Replace the mirrored entry with the confirmed row.
    fn patch(&mut self, updated: Lead) {
        if let Some(entry) = self.leads.iter_mut().find(|lead| lead.id == updated.id) {
            *entry = updated;
        }
    }
}
