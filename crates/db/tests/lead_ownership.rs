//! Integration tests for owner-scoped lead CRUD.
//!
//! Exercises the repository layer against a real database to verify:
//! - Listing never crosses the owner boundary
//! - Cross-owner updates and deletes affect zero rows and leave storage
//!   unchanged
//! - Create/list round-trips preserve field mapping and newest-first order
//! - Delete is idempotent (second call reports `false`)
//! - Stale-version updates are rejected without clobbering newer writes

use sqlx::PgPool;

use leadcrm_core::types::DbId;
use leadcrm_db::models::lead::{CreateLead, UpdateLead};
use leadcrm_db::models::user::CreateUser;
use leadcrm_db::repositories::{LeadRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_owner(pool: &PgPool, email: &str) -> DbId {
    let input = CreateUser {
        email: email.to_string(),
        // Repository tests never verify credentials, so any opaque
        // string stands in for a real hash.
        password_hash: "not-a-real-hash".to_string(),
        mobile: "1234567890".to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

fn new_lead(name: &str, status: &str) -> CreateLead {
    CreateLead {
        name: name.to_string(),
        mobile: "+1-555-0000".to_string(),
        email: format!("{}@x.com", name.to_lowercase().replace(' ', ".")),
        is_prospect: true,
        status: status.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Ownership boundary
// ---------------------------------------------------------------------------

/// Leads created under owner A never appear in owner B's listing.
#[sqlx::test]
async fn test_listing_never_crosses_owners(pool: PgPool) {
    let owner_a = create_owner(&pool, "a@test.com").await;
    let owner_b = create_owner(&pool, "b@test.com").await;

    let lead_a = LeadRepo::create(&pool, owner_a, &new_lead("Alice Lead", "New"))
        .await
        .unwrap();
    LeadRepo::create(&pool, owner_b, &new_lead("Bob Lead", "New"))
        .await
        .unwrap();

    let b_leads = LeadRepo::list_for_owner(&pool, owner_b).await.unwrap();
    assert_eq!(b_leads.len(), 1);
    assert!(
        b_leads.iter().all(|l| l.id != lead_a.id),
        "owner B's listing must not contain owner A's lead"
    );
    assert!(b_leads.iter().all(|l| l.owner_id == owner_b));
}

/// A cross-owner status update matches zero rows and leaves storage unchanged.
#[sqlx::test]
async fn test_cross_owner_status_update_rejected(pool: PgPool) {
    let owner_a = create_owner(&pool, "a@test.com").await;
    let owner_b = create_owner(&pool, "b@test.com").await;

    let lead = LeadRepo::create(&pool, owner_a, &new_lead("Alice Lead", "New"))
        .await
        .unwrap();

    let result = LeadRepo::update_status(&pool, owner_b, lead.id, "Closed", lead.version)
        .await
        .unwrap();
    assert!(result.is_none(), "cross-owner update must match zero rows");

    let stored = LeadRepo::find_by_id(&pool, owner_a, lead.id)
        .await
        .unwrap()
        .expect("lead must still exist for its owner");
    assert_eq!(stored.status, "New", "status must be unchanged in storage");
    assert_eq!(stored.version, lead.version);
}

/// A cross-owner full update and delete also match zero rows.
#[sqlx::test]
async fn test_cross_owner_update_and_delete_rejected(pool: PgPool) {
    let owner_a = create_owner(&pool, "a@test.com").await;
    let owner_b = create_owner(&pool, "b@test.com").await;

    let lead = LeadRepo::create(&pool, owner_a, &new_lead("Alice Lead", "New"))
        .await
        .unwrap();

    let fields = UpdateLead {
        name: "Hijacked".to_string(),
        mobile: "+0".to_string(),
        email: "evil@test.com".to_string(),
        is_prospect: false,
        status: "Closed".to_string(),
    };
    let updated = LeadRepo::update(&pool, owner_b, lead.id, &fields, lead.version)
        .await
        .unwrap();
    assert!(updated.is_none());

    let deleted = LeadRepo::delete(&pool, owner_b, lead.id).await.unwrap();
    assert!(!deleted, "cross-owner delete must report zero rows");

    let stored = LeadRepo::find_by_id(&pool, owner_a, lead.id)
        .await
        .unwrap()
        .expect("lead must survive the cross-owner attempts");
    assert_eq!(stored.name, "Alice Lead");
}

/// `find_by_id` is double-filtered too: another owner sees `None`.
#[sqlx::test]
async fn test_find_by_id_scoped_to_owner(pool: PgPool) {
    let owner_a = create_owner(&pool, "a@test.com").await;
    let owner_b = create_owner(&pool, "b@test.com").await;

    let lead = LeadRepo::create(&pool, owner_a, &new_lead("Alice Lead", "New"))
        .await
        .unwrap();

    assert!(LeadRepo::find_by_id(&pool, owner_b, lead.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Round-trip and ordering
// ---------------------------------------------------------------------------

/// Create then list: exactly one matching lead with storage-assigned id
/// and timestamps, listed before older leads.
#[sqlx::test]
async fn test_create_list_round_trip(pool: PgPool) {
    let owner = create_owner(&pool, "u1@test.com").await;

    LeadRepo::create(&pool, owner, &new_lead("Earlier Lead", "Active"))
        .await
        .unwrap();

    let input = CreateLead {
        name: "John Doe".to_string(),
        mobile: "+1-555-0000".to_string(),
        email: "john@x.com".to_string(),
        is_prospect: true,
        status: "New".to_string(),
    };
    let created = LeadRepo::create(&pool, owner, &input).await.unwrap();

    assert!(!created.id.is_nil(), "id must be storage-assigned");
    assert_eq!(created.status, "New");
    assert!(created.is_prospect);
    assert_eq!(created.version, 1);

    let leads = LeadRepo::list_for_owner(&pool, owner).await.unwrap();
    assert_eq!(leads.len(), 2);

    // Newest first.
    assert_eq!(leads[0].id, created.id);
    assert_eq!(leads[0].name, "John Doe");
    assert_eq!(leads[0].mobile, "+1-555-0000");
    assert_eq!(leads[0].email, "john@x.com");

    let matching: Vec<_> = leads.iter().filter(|l| l.id == created.id).collect();
    assert_eq!(matching.len(), 1, "round-trip must yield exactly one match");
}

/// An owner with no leads gets an empty vec, not an error.
#[sqlx::test]
async fn test_empty_listing(pool: PgPool) {
    let owner = create_owner(&pool, "empty@test.com").await;
    let leads = LeadRepo::list_for_owner(&pool, owner).await.unwrap();
    assert!(leads.is_empty());
}

// ---------------------------------------------------------------------------
// Mutation semantics
// ---------------------------------------------------------------------------

/// A status update bumps the version and touches `updated_at`.
#[sqlx::test]
async fn test_status_update_bumps_version(pool: PgPool) {
    let owner = create_owner(&pool, "u1@test.com").await;
    let lead = LeadRepo::create(&pool, owner, &new_lead("John Doe", "New"))
        .await
        .unwrap();

    let updated = LeadRepo::update_status(&pool, owner, lead.id, "Closed", lead.version)
        .await
        .unwrap()
        .expect("owned update with the read version must succeed");

    assert_eq!(updated.status, "Closed");
    assert_eq!(updated.version, lead.version + 1);
    assert!(updated.updated_at >= lead.updated_at);
}

/// A full update replaces every editable field.
#[sqlx::test]
async fn test_full_update_replaces_fields(pool: PgPool) {
    let owner = create_owner(&pool, "u1@test.com").await;
    let lead = LeadRepo::create(&pool, owner, &new_lead("John Doe", "New"))
        .await
        .unwrap();

    let fields = UpdateLead {
        name: "John A. Doe".to_string(),
        mobile: "+1-555-0001".to_string(),
        email: "john.doe@x.com".to_string(),
        is_prospect: false,
        status: "Active".to_string(),
    };
    let updated = LeadRepo::update(&pool, owner, lead.id, &fields, lead.version)
        .await
        .unwrap()
        .expect("owned update must succeed");

    assert_eq!(updated.name, "John A. Doe");
    assert_eq!(updated.mobile, "+1-555-0001");
    assert_eq!(updated.email, "john.doe@x.com");
    assert!(!updated.is_prospect);
    assert_eq!(updated.status, "Active");
    assert_eq!(updated.version, lead.version + 1);
    // Identity and provenance never change.
    assert_eq!(updated.id, lead.id);
    assert_eq!(updated.owner_id, owner);
    assert_eq!(updated.created_at, lead.created_at);
}

/// An update carrying a stale version matches zero rows and does not
/// clobber the newer write.
#[sqlx::test]
async fn test_stale_version_update_rejected(pool: PgPool) {
    let owner = create_owner(&pool, "u1@test.com").await;
    let lead = LeadRepo::create(&pool, owner, &new_lead("John Doe", "New"))
        .await
        .unwrap();

    // First writer wins and bumps the version.
    LeadRepo::update_status(&pool, owner, lead.id, "Active", lead.version)
        .await
        .unwrap()
        .expect("first update must succeed");

    // Second writer still holds version 1.
    let stale = LeadRepo::update_status(&pool, owner, lead.id, "Closed", lead.version)
        .await
        .unwrap();
    assert!(stale.is_none(), "stale version must match zero rows");

    let stored = LeadRepo::find_by_id(&pool, owner, lead.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, "Active", "the first write must survive");
    assert_eq!(stored.version, lead.version + 1);
}

/// Deleting twice: the second call reports `false` and nothing resurrects.
#[sqlx::test]
async fn test_delete_is_idempotent(pool: PgPool) {
    let owner = create_owner(&pool, "u1@test.com").await;
    let lead = LeadRepo::create(&pool, owner, &new_lead("John Doe", "New"))
        .await
        .unwrap();

    assert!(LeadRepo::delete(&pool, owner, lead.id).await.unwrap());
    assert!(
        !LeadRepo::delete(&pool, owner, lead.id).await.unwrap(),
        "second delete must report zero rows, not an error"
    );

    let leads = LeadRepo::list_for_owner(&pool, owner).await.unwrap();
    assert!(leads.is_empty(), "the lead must stay deleted");
}
