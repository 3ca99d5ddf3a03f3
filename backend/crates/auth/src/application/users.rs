//! User Management
//!
//! Registration, lookup, paginated listing, full update and delete.

use std::sync::Arc;

use kernel::email::Email;
use kernel::id::UserId;
use kernel::pagination::{Page, PageRequest};
use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Create user input
pub struct CreateUserInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Update user input
///
/// Name and email are always replaced; the password only when given.
pub struct UpdateUserInput {
    pub full_name: String,
    pub email: String,
    pub password: Option<String>,
}

/// User management use cases
pub struct UserService<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn create(&self, input: CreateUserInput) -> AuthResult<User> {
        let full_name = validate_full_name(&input.full_name)?;
        let email = validate_email(&input.email)?;
        let password_hash = self.hash_password(input.password)?;

        let user = User::new(full_name, email, password_hash);
        self.repo.create(&user).await?;

        tracing::info!(user_id = %user.id, "User created");

        Ok(user)
    }

    pub async fn get(&self, user_id: &UserId) -> AuthResult<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn list(&self, page: PageRequest) -> AuthResult<Page<User>> {
        let users = self.repo.list(page).await?;
        let total = self.repo.count().await?;
        Ok(Page::new(users, page, total))
    }

    pub async fn update(&self, user_id: &UserId, input: UpdateUserInput) -> AuthResult<User> {
        let full_name = validate_full_name(&input.full_name)?;
        let email = validate_email(&input.email)?;
        let password_hash = input
            .password
            .map(|password| self.hash_password(password))
            .transpose()?;

        let mut user = self.get(user_id).await?;
        user.full_name = full_name;
        user.email = email;
        if let Some(hash) = password_hash {
            user.password_hash = hash;
        }
        user.touch();

        if !self.repo.update(&user).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user.id, "User updated");

        Ok(user)
    }

    pub async fn delete(&self, user_id: &UserId) -> AuthResult<()> {
        let rows_deleted = self.repo.delete(user_id).await?;
        tracing::info!(user_id = %user_id, rows_deleted, "User deleted");
        Ok(())
    }

    fn hash_password(&self, raw: String) -> AuthResult<HashedPassword> {
        let password =
            ClearTextPassword::new(raw).map_err(|e| AuthError::validation("password", e))?;
        Ok(password.hash(self.config.pepper())?)
    }
}

fn validate_full_name(raw: &str) -> AuthResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AuthError::validation("full_name", "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_email(raw: &str) -> AuthResult<Email> {
    Email::new(raw).map_err(|e| AuthError::validation("email", e))
}
