//! Client-side lead state synchronization.
//!
//! [`LeadsViewModel`] owns the in-process ordered lead sequence for one
//! signed-in user and keeps it consistent with confirmed store results:
//! nothing is patched locally until the backing store acknowledges the
//! write, so the displayed sequence is always a projection of confirmed
//! storage state.
//!
//! The view-model is generic over [`LeadStore`] so it can be driven by
//! the Postgres-backed [`PgLeadStore`] in production and by in-memory
//! doubles in tests.

pub mod store;
pub mod viewmodel;

pub use store::{LeadStore, PgLeadStore, StoreError};
pub use viewmodel::{LeadsViewModel, LoadState, SyncError};
