//! Integration tests for the Postgres-backed store: zero-row updates
//! must be classified into conflict vs. not-found by re-reading the row.

use assert_matches::assert_matches;
use sqlx::PgPool;

use leadcrm_core::types::DbId;
use leadcrm_db::models::lead::CreateLead;
use leadcrm_db::models::user::CreateUser;
use leadcrm_db::repositories::UserRepo;
use leadcrm_sync::{LeadStore, PgLeadStore, StoreError};

async fn create_owner(pool: &PgPool, email: &str) -> DbId {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        mobile: "1234567890".to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

fn john_doe() -> CreateLead {
    CreateLead {
        name: "John Doe".to_string(),
        mobile: "+1-555-0000".to_string(),
        email: "john@x.com".to_string(),
        is_prospect: true,
        status: "New".to_string(),
    }
}

/// Create/list round-trip through the store trait.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_store_round_trip(pool: PgPool) {
    let owner = create_owner(&pool, "u1@test.com").await;
    let store = PgLeadStore::new(pool);

    let created = store.create(owner, &john_doe()).await.unwrap();
    let listed = store.list(owner).await.unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
}

/// A stale version on a still-visible row is a conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_stale_version_classified_as_conflict(pool: PgPool) {
    let owner = create_owner(&pool, "u1@test.com").await;
    let store = PgLeadStore::new(pool);

    let lead = store.create(owner, &john_doe()).await.unwrap();
    store
        .update_status(owner, lead.id, "Active", lead.version)
        .await
        .unwrap();

    let err = store
        .update_status(owner, lead.id, "Closed", lead.version)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Conflict);
}

/// A row that is invisible to the caller is not-found, whether it never
/// existed or belongs to someone else.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invisible_row_classified_as_not_found(pool: PgPool) {
    let owner_a = create_owner(&pool, "a@test.com").await;
    let owner_b = create_owner(&pool, "b@test.com").await;
    let store = PgLeadStore::new(pool);

    let lead = store.create(owner_a, &john_doe()).await.unwrap();

    // Someone else's lead.
    let err = store
        .update_status(owner_b, lead.id, "Closed", lead.version)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::NotFound);

    // A lead that never existed.
    let err = store
        .update_status(owner_a, uuid::Uuid::new_v4(), "Closed", 1)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::NotFound);
}

/// Deleting twice through the store reports not-found on the second call.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_store_delete_twice(pool: PgPool) {
    let owner = create_owner(&pool, "u1@test.com").await;
    let store = PgLeadStore::new(pool);

    let lead = store.create(owner, &john_doe()).await.unwrap();
    store.delete(owner, lead.id).await.unwrap();

    let err = store.delete(owner, lead.id).await.unwrap_err();
    assert_matches!(err, StoreError::NotFound);
}
