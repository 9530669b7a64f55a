//! The authenticated session principal.

use crate::types::DbId;

/// The signed-in user's identity, produced by a successful login and
/// passed explicitly to every privileged operation.
///
/// Holding a `Session` is the only way to obtain an owner id; there is
/// no ambient global state to read one from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The user's database id, used as the owner predicate on every
    /// lead query.
    pub user_id: DbId,
    /// The e-mail the user signed in with.
    pub email: String,
}

impl Session {
    pub fn new(user_id: DbId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}
