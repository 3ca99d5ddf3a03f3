//! User Entity
//!
//! An account that can log in and own companies.

use chrono::{DateTime, Utc};
use kernel::email::Email;
use kernel::id::UserId;
use platform::password::HashedPassword;

/// User entity
///
/// `password_hash` never leaves the auth crate; responses are built from
/// the other fields.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    /// Unique across users
    pub email: Email,
    pub password_hash: HashedPassword,
    pub created_at: DateTime<Utc>,
    /// Set on every successful update
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user
    pub fn new(full_name: String, email: Email, password_hash: HashedPassword) -> Self {
        Self {
            id: UserId::new(),
            full_name,
            email,
            password_hash,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Mark the entity as modified
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
