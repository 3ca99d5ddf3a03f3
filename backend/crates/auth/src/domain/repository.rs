//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::email::Email;
use kernel::id::UserId;
use kernel::pagination::PageRequest;

use crate::domain::entity::user::User;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    ///
    /// Fails with `AuthError::EmailTaken` when the email is already stored,
    /// including when a concurrent insert wins the race.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Overwrite all mutable fields. Returns `false` if no row matched.
    async fn update(&self, user: &User) -> AuthResult<bool>;

    /// Delete user. Returns the number of rows removed.
    async fn delete(&self, user_id: &UserId) -> AuthResult<u64>;

    /// One page of users ordered by `(created_at, id)`
    async fn list(&self, page: PageRequest) -> AuthResult<Vec<User>>;

    /// Total number of users
    async fn count(&self) -> AuthResult<i64>;
}
