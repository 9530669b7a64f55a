//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and updates where the API accepts them

pub mod lead;
pub mod session;
pub mod user;
